// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Compiled search patterns.
//!
//! A [`CompiledPattern`] wraps a [`regex::Regex`] and records its
//! [`line_span`](CompiledPattern::line_span): how many rows of text one match may cover.
//! The finder uses the span to decide how many rows to slice out of the buffer for each
//! attempt.
//!
//! The span is computed from the pattern **source text**, not from the regex semantics:
//! an escaped `n`, `r` or `R` anywhere means [`MULTI_LINE_SPAN`], otherwise 1. This is
//! crude (eg: `\s+` can cross a row end and still gets 1) but it errs towards slicing
//! more text, never less, for the patterns people actually type. Three rows cover a
//! `\r\n` pair plus the rows on either side.

use super::CompileOptions;
use crate::{SearchError, SearchResult};
use regex::{Regex, RegexBuilder};
use std::{borrow::Cow, sync::Arc};

/// Line span of a pattern that mentions a line terminator.
pub const MULTI_LINE_SPAN: usize = 3;

/// What `\R` (any line break) is rewritten to, since the regex crate has no `\R`.
const LINE_BREAK_GROUP: &str = r"(?:\r\n|[\n\x0B\x0C\r\x{85}\x{2028}\x{2029}])";

/// Immutable, cheap to clone (the regex lives behind an [`Arc`]). The
/// [`PatternCache`](crate::PatternCache) and any search in flight share the same
/// instance.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    inner: Arc<CompiledPatternInner>,
}

#[derive(Debug)]
struct CompiledPatternInner {
    source: String,
    regex: Regex,
    line_span: usize,
}

impl CompiledPattern {
    /// Compile a regular expression.
    ///
    /// The dialect is the [`regex`] crate syntax in multi-line mode (`^` and `$` match at
    /// row boundaries) with CRLF awareness, plus `\R` for any line break.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PatternSyntax`] if the source does not compile.
    #[tracing::instrument]
    pub fn try_compile(source: &str, options: CompileOptions) -> SearchResult<Self> {
        let regex = build_regex(&rewrite_line_break_escape(source), options, source)?;
        let line_span = line_span_of(source);

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "🧩 Compiled search pattern",
            source = %source,
            line_span = %line_span
        );

        Ok(Self::from_parts(source.to_string(), regex, line_span))
    }

    /// Compile a plain text needle. Regex metacharacters in it have no meaning. Its line
    /// span is the number of rows the needle itself covers.
    ///
    /// This never goes through the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyNeedle`] for an empty needle.
    pub fn literal(needle: &str, caseless: bool) -> SearchResult<Self> {
        if needle.is_empty() {
            return Err(SearchError::EmptyNeedle);
        }
        let regex = build_regex(&regex::escape(needle), CompileOptions { caseless }, needle)?;
        let line_span = needle.matches('\n').count() + 1;
        Ok(Self::from_parts(needle.to_string(), regex, line_span))
    }

    fn from_parts(source: String, regex: Regex, line_span: usize) -> Self {
        Self {
            inner: Arc::new(CompiledPatternInner {
                source,
                regex,
                line_span,
            }),
        }
    }

    /// The pattern as it was given, before any rewriting.
    #[must_use]
    pub fn source(&self) -> &str { &self.inner.source }

    #[must_use]
    pub fn regex(&self) -> &Regex { &self.inner.regex }

    /// Maximum number of rows a single match may cover.
    #[must_use]
    pub fn line_span(&self) -> usize { self.inner.line_span }

    /// `true` if both handles point at the very same compiled regex.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.inner, &other.inner) }
}

fn build_regex(
    rewritten: &str,
    options: CompileOptions,
    original: &str,
) -> SearchResult<Regex> {
    RegexBuilder::new(rewritten)
        .case_insensitive(options.caseless)
        .multi_line(true)
        .crlf(true)
        .build()
        .map_err(|error| SearchError::PatternSyntax {
            pattern: original.to_string(),
            reason: error.to_string(),
        })
}

/// [`MULTI_LINE_SPAN`] if `source` contains an escaped `n`, `r` or `R`, else 1.
///
/// A backslash toggles the escaped state, so `\\n` is a literal backslash followed by
/// `n` and does not count.
#[must_use]
pub fn line_span_of(source: &str) -> usize {
    let mut escaped = false;
    for it in source.chars() {
        match it {
            '\\' => escaped = !escaped,
            'n' | 'r' | 'R' if escaped => return MULTI_LINE_SPAN,
            _ => escaped = false,
        }
    }
    1
}

/// Replace every `\R` outside a character class with [`LINE_BREAK_GROUP`].
fn rewrite_line_break_escape(source: &str) -> Cow<'_, str> {
    if !source.contains(r"\R") {
        return Cow::Borrowed(source);
    }

    let mut acc = String::with_capacity(source.len() + LINE_BREAK_GROUP.len());
    let mut in_class = false;
    let mut chars = source.chars();

    while let Some(it) = chars.next() {
        match it {
            '\\' => match chars.next() {
                Some('R') if !in_class => acc.push_str(LINE_BREAK_GROUP),
                Some(next) => {
                    acc.push('\\');
                    acc.push(next);
                }
                None => acc.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                acc.push(it);
            }
            ']' if in_class => {
                in_class = false;
                acc.push(it);
            }
            _ => acc.push(it),
        }
    }

    Cow::Owned(acc)
}

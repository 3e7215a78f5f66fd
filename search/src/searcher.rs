// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The entry point for editors: one [`TextSearcher`] per editor (or per find dialog).

use crate::{MatchRange, PatternCache, ReplaceCandidate, ReplaceResponse, SearchFlags,
            SearchResult, Snapshot, TextBuffer, find_literal_backward,
            find_literal_forward, find_regex_backward, find_regex_forward,
            replace_all_literal, replace_all_regex};

/// Search and replace over any [`TextBuffer`].
///
/// [`SearchFlags::regex`] picks the mode. Regex patterns go through the
/// [`PatternCache`] this searcher owns, so searching for the same pattern again does not
/// recompile it. Plain text needles are compiled for each call.
#[derive(Debug, Default)]
pub struct TextSearcher {
    cache: PatternCache,
}

impl TextSearcher {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn cache(&self) -> &PatternCache { &self.cache }

    /// First match at or after `start`. `Ok(None)` if there is none before `bound`.
    ///
    /// # Errors
    ///
    /// [`SearchError::PatternSyntax`](crate::SearchError::PatternSyntax) for a bad regex,
    /// [`SearchError::EmptyNeedle`](crate::SearchError::EmptyNeedle) for an empty plain
    /// text needle.
    #[tracing::instrument(skip(self, buffer))]
    pub fn search_forward<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        start: Snapshot,
        bound: Option<Snapshot>,
        needle: &str,
        flags: SearchFlags,
    ) -> SearchResult<Option<MatchRange>> {
        if !flags.regex {
            return find_literal_forward(buffer, start, bound, needle, flags);
        }
        let pattern = self.cache.get_or_compile(needle, flags)?;
        Ok(find_regex_forward(buffer, start, bound, &pattern).map(|it| it.range))
    }

    /// Last match before `start`. `Ok(None)` if there is none after `bound`.
    ///
    /// # Errors
    ///
    /// Same as [`TextSearcher::search_forward`].
    #[tracing::instrument(skip(self, buffer))]
    pub fn search_backward<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        start: Snapshot,
        bound: Option<Snapshot>,
        needle: &str,
        flags: SearchFlags,
    ) -> SearchResult<Option<MatchRange>> {
        if !flags.regex {
            return find_literal_backward(buffer, start, bound, needle, flags);
        }
        let pattern = self.cache.get_or_compile(needle, flags)?;
        Ok(find_regex_backward(buffer, start, bound, &pattern).map(|it| it.range))
    }

    /// Replace every match from `start` up to `bound` as one undo step, and return the
    /// count.
    ///
    /// # Errors
    ///
    /// Same as [`TextSearcher::search_forward`], plus
    /// [`SearchError::ReplacementSyntax`](crate::SearchError::ReplacementSyntax) for a bad
    /// regex replacement.
    pub fn replace_all<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        start: Snapshot,
        bound: Option<Snapshot>,
        needle: &str,
        replacement: &str,
        flags: SearchFlags,
    ) -> SearchResult<usize> {
        self.run_replace(buffer, start, bound, needle, replacement, flags, None)
    }

    /// Like [`TextSearcher::replace_all`], but `decide` is asked about every match until it
    /// answers [`ReplaceResponse::ReplaceAll`] or [`ReplaceResponse::Stop`].
    ///
    /// # Errors
    ///
    /// Same as [`TextSearcher::replace_all`].
    #[allow(clippy::too_many_arguments)]
    pub fn replace_all_interactive<B, F>(
        &mut self,
        buffer: &mut B,
        start: Snapshot,
        bound: Option<Snapshot>,
        needle: &str,
        replacement: &str,
        flags: SearchFlags,
        mut decide: F,
    ) -> SearchResult<usize>
    where
        B: TextBuffer + ?Sized,
        F: FnMut(&ReplaceCandidate<'_>) -> ReplaceResponse,
    {
        self.run_replace(buffer, start, bound, needle, replacement, flags, Some(&mut decide))
    }

    #[allow(clippy::too_many_arguments)]
    #[tracing::instrument(skip(self, buffer, decide))]
    fn run_replace<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        start: Snapshot,
        bound: Option<Snapshot>,
        needle: &str,
        replacement: &str,
        flags: SearchFlags,
        decide: Option<&mut dyn FnMut(&ReplaceCandidate<'_>) -> ReplaceResponse>,
    ) -> SearchResult<usize> {
        if !flags.regex {
            return replace_all_literal(buffer, start, bound, needle, replacement, flags, decide);
        }
        let pattern = self.cache.get_or_compile(needle, flags)?;
        replace_all_regex(
            buffer,
            start,
            bound,
            &pattern,
            replacement,
            flags.replacement_literal,
            decide,
        )
    }
}

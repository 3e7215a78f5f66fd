// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{CompiledPattern, SearchFlags};
use crate::SearchResult;

/// Single slot memo for [`CompiledPattern`]s, keyed on the exact `(pattern, flags)` pair.
///
/// Search UIs search for the same thing over and over (F3, F3, F3...) and switch to a new
/// pattern rarely, so this keeps only the most recent one:
///
/// - A hit hands back a clone of the cached handle (same [`std::sync::Arc`]).
/// - A miss drops the cached entry **before** compiling the new pattern.
/// - A failed compile leaves the cache empty, and the error goes to the caller as is.
///
/// It is owned by [`TextSearcher`](crate::TextSearcher) rather than being a hidden
/// static, so tests can make their own.
#[derive(Debug, Default)]
pub struct PatternCache {
    slot: Option<CacheSlot>,
}

#[derive(Debug)]
struct CacheSlot {
    pattern: String,
    flags: SearchFlags,
    compiled: CompiledPattern,
}

impl PatternCache {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// # Errors
    ///
    /// Returns [`crate::SearchError::PatternSyntax`] if `pattern` needs compiling and
    /// does not compile.
    pub fn get_or_compile(
        &mut self,
        pattern: &str,
        flags: SearchFlags,
    ) -> SearchResult<CompiledPattern> {
        if let Some(slot) = &self.slot
            && slot.pattern == pattern
            && slot.flags == flags
        {
            tracing::trace!(message = "♻️ Pattern cache hit", pattern = %pattern);
            return Ok(slot.compiled.clone());
        }

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "🆕 Pattern cache miss",
            pattern = %pattern,
            flags = ?flags
        );

        self.slot = None;
        let compiled = CompiledPattern::try_compile(pattern, flags.compile_options())?;
        self.slot = Some(CacheSlot {
            pattern: pattern.to_string(),
            flags,
            compiled: compiled.clone(),
        });

        Ok(compiled)
    }

    /// The cached pattern, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&CompiledPattern> { self.slot.as_ref().map(|it| &it.compiled) }

    pub fn clear(&mut self) { self.slot = None; }
}

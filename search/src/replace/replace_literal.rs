// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ReplaceCallback, ReplaceCandidate, ReplaceResponse, replace_loop::ReplaceLoop};
use crate::{CompiledPattern, SearchFlags, SearchResult, Snapshot, TextBuffer,
            next_literal_forward};

/// Replace every occurrence of the plain text `needle` from `start` up to `bound` (or the
/// end of the buffer) with `replacement`, taken as is.
///
/// Honors [`SearchFlags::caseless`] and [`SearchFlags::whole_words`]. An occurrence must
/// end at or before the bound. Undo grouping and the callback protocol are the same as
/// for [`replace_all_regex`](crate::replace_all_regex).
///
/// # Errors
///
/// Returns [`SearchError::EmptyNeedle`](crate::SearchError::EmptyNeedle) for an empty
/// needle, before any edit.
#[tracing::instrument(skip(buffer, decide))]
pub fn replace_all_literal<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    start: Snapshot,
    bound: Option<Snapshot>,
    needle: &str,
    replacement: &str,
    flags: SearchFlags,
    decide: Option<ReplaceCallback<'_>>,
) -> SearchResult<usize> {
    let pattern = CompiledPattern::literal(needle, flags.caseless)?;
    let mut state = ReplaceLoop::new(buffer, bound, decide);
    let mut start = start;

    loop {
        let bound = state.bound();
        let Some(range) =
            next_literal_forward(&*state.buffer, start, bound, &pattern, flags.whole_words)
        else {
            break;
        };

        let candidate = ReplaceCandidate {
            needle: Some(needle),
            pattern: None,
            replacement,
            range,
        };

        start = match state.decide(&candidate) {
            ReplaceResponse::Stop => break,
            ReplaceResponse::Skip => range.end,
            response => state.apply(response, range, replacement),
        };
    }

    Ok(state.finish())
}

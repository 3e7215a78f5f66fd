// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{MatchInfo, RegexMatch,
            window::{advance, char_to_byte}};
use crate::{CompiledPattern, MatchRange, Snapshot, TextBuffer, pos};

/// Find the first match that starts at or after `start`.
///
/// The buffer is searched one window at a time. A window begins at the start of a row and
/// covers [`CompiledPattern::line_span`] rows, so a match can never be longer than that.
/// Each next window begins one row lower, which means the windows overlap and a match
/// that crosses a window edge is still seen whole by a later window.
///
/// If `bound` is given, a match that starts after it is not reported. The search also
/// stops once a window would begin after it.
#[tracing::instrument(skip(buffer, pattern), fields(pattern = %pattern.source()))]
pub fn find_regex_forward<B: TextBuffer + ?Sized>(
    buffer: &B,
    start: Snapshot,
    bound: Option<Snapshot>,
    pattern: &CompiledPattern,
) -> Option<RegexMatch> {
    let start = buffer.clamp(start);
    let span = pattern.line_span().max(1);
    let mut locations = pattern.regex().capture_locations();

    let mut window_row = start.row;
    let mut start_col = start.col;

    loop {
        let window_start = pos(window_row, 0);
        let window_end = buffer.line_end(window_row + span - 1);
        let text = buffer.slice(window_start, window_end);
        let offset = char_to_byte(&text, start_col);
        tracing::trace!(message = "🪟 Forward window", from = %window_start, to = %window_end);

        if let Some(found) =
            pattern
                .regex()
                .captures_read_at(&mut locations, &text, offset)
        {
            let (match_offset, match_end) = (found.start(), found.end());
            let match_start = advance(window_start, &text[..match_offset]);
            if bound.is_some_and(|bound| match_start > bound) {
                tracing::trace!(message = "🚧 Match is past the bound", at = %match_start);
                return None;
            }
            let end = advance(match_start, &text[match_offset..match_end]);
            return Some(RegexMatch {
                range: MatchRange::new(match_start, end),
                match_offset,
                match_len: match_end - match_offset,
                info: MatchInfo::new(text, &locations, pattern.clone()),
            });
        }

        window_row += 1;
        start_col = 0;
        if window_row >= buffer.line_count()
            || bound.is_some_and(|bound| pos(window_row, 0) > bound)
        {
            return None;
        }
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{MatchInfo, RegexMatch,
            window::{advance, char_len_at}};
use crate::{CompiledPattern, MatchRange, Snapshot, TextBuffer, pos};
use regex::{CaptureLocations, Regex};

/// Find the last match that starts before `start`.
///
/// The first window covers the [`CompiledPattern::line_span`] rows above `start` plus the
/// row of `start` itself, up to `start`. Every next window moves up by the line span and
/// overlaps the previous one by one row less than the span, so a match that crosses the
/// top edge of a window is seen whole by the next one. Inside a window the last match
/// wins.
///
/// The first window is cut at `start`, which may be in the middle of a row. A match that
/// ends right at the cut is only kept if the regex still matches there once the rest of
/// the row is visible, so `foo$` does not match `foo` in `foobar` just because the cursor
/// sits after `foo`.
///
/// If `bound` is given, a match that starts before it ends the search with nothing found.
#[tracing::instrument(skip(buffer, pattern), fields(pattern = %pattern.source()))]
pub fn find_regex_backward<B: TextBuffer + ?Sized>(
    buffer: &B,
    start: Snapshot,
    bound: Option<Snapshot>,
    pattern: &CompiledPattern,
) -> Option<RegexMatch> {
    let start = buffer.clamp(start);
    let span = pattern.line_span().max(1);
    let mut locations = pattern.regex().capture_locations();

    let mut window_end = start;
    let mut top_row = start.row.saturating_sub(span);

    loop {
        let window_start = pos(top_row, 0);
        let text = buffer.slice(window_start, window_end);
        tracing::trace!(message = "🪟 Backward window", from = %window_start, to = %window_end);
        let extended = (!buffer.ends_line(window_end))
            .then(|| buffer.slice(window_start, buffer.line_end(window_end.row)));

        let ends_at_cursor = window_end == start;

        if let Some((match_offset, match_end)) = find_last_match(
            pattern.regex(),
            &mut locations,
            &text,
            extended.as_deref(),
            ends_at_cursor,
        ) {
            let match_start = advance(window_start, &text[..match_offset]);
            if bound.is_some_and(|bound| match_start < bound) {
                tracing::trace!(message = "🚧 Match is before the bound", at = %match_start);
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

        if top_row == 0 || bound.is_some_and(|bound| window_start < bound) {
            return None;
        }

        window_end = buffer.line_end((top_row + span).saturating_sub(2));
        top_row = top_row.saturating_sub(span);
    }
}

/// Scan `text` left to right and return the byte span of the last match, with its groups
/// left in `locations`.
///
/// After each match the scan restarts one char past the match start, so overlapping
/// matches are seen too. A scan that would restart at or past the end of `text` stops.
///
/// `extended` is `text` followed by the rest of its last row, when `text` was cut in the
/// middle of a row. It is used to reject a match that only exists because of the cut.
///
/// When `ends_at_cursor` is set, `text` ends at the search start, and an empty match at
/// its very end (eg: `\b` or `$` right at the cursor) is not before the cursor, so it is
/// rejected.
fn find_last_match(
    regex: &Regex,
    locations: &mut CaptureLocations,
    text: &str,
    extended: Option<&str>,
    ends_at_cursor: bool,
) -> Option<(usize, usize)> {
    let mut scratch = locations.clone();
    let mut last = None;
    let mut at = 0;

    while let Some(found) = regex.captures_read_at(&mut scratch, text, at) {
        let (match_start, match_end) = (found.start(), found.end());

        let at_cursor = ends_at_cursor && match_start == text.len();
        let survives_cut = match extended {
            Some(extended) if match_end == text.len() => regex
                .find_at(extended, match_start)
                .is_some_and(|it| it.start() == match_start && it.end() >= match_end),
            _ => true,
        };
        if survives_cut && !at_cursor {
            last = Some((match_start, match_end));
            locations.clone_from(&scratch);
        }

        at = match_start + char_len_at(text, match_start);
        if at >= text.len() {
            break;
        }
    }

    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompileOptions, LinesBuffer};
    use pretty_assertions::assert_eq;

    fn compile(source: &str) -> CompiledPattern {
        CompiledPattern::try_compile(source, CompileOptions::default()).unwrap()
    }

    #[test]
    fn test_last_match_before_start_wins() {
        let buffer = LinesBuffer::from("foo foo foo");
        let found = find_regex_backward(&buffer, pos(0, 9), None, &compile("foo")).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 4), pos(0, 7)));
    }

    #[test]
    fn test_finds_on_earlier_rows() {
        let buffer = LinesBuffer::from("cat\ndog\nbird\nfish\nfrog\nowl");
        let found = find_regex_backward(&buffer, pos(5, 3), None, &compile("c(a)t")).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 0), pos(0, 3)));
        assert_eq!(found.info.group(1), Some("a"));
    }

    #[test]
    fn test_not_found() {
        let buffer = LinesBuffer::from("a\nb\nc\nd");
        assert!(find_regex_backward(&buffer, pos(3, 1), None, &compile("zzz")).is_none());
    }

    #[test]
    fn test_cut_does_not_fake_end_of_line() {
        let buffer = LinesBuffer::from("foo\nfoobar");
        let found = find_regex_backward(&buffer, pos(1, 3), None, &compile("foo$")).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 0), pos(0, 3)));
    }

    #[test]
    fn test_match_ending_at_cut_that_still_holds_is_kept() {
        let buffer = LinesBuffer::from("foobar");
        let found = find_regex_backward(&buffer, pos(0, 3), None, &compile("fo+")).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 0), pos(0, 3)));
    }

    #[test]
    fn test_multi_line_match_across_window_edges() {
        let text = "a\nb\n.\n.\n.\n.\n.\n.\nend";
        let buffer = LinesBuffer::from(text);
        let found = find_regex_backward(&buffer, pos(8, 3), None, &compile(r"a\nb")).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 0), pos(1, 1)));
    }

    #[test]
    fn test_every_row_is_reached() {
        let rows: Vec<String> = (0..20).map(|it| format!("row{it}")).collect();
        let buffer = LinesBuffer::from(rows.join("\n").as_str());
        let pattern = compile(r"row\d+\n");
        for target in 0..19 {
            let needle = compile(&format!(r"^row{target}\n"));
            let found = find_regex_backward(&buffer, pos(19, 0), None, &needle).unwrap();
            assert_eq!(found.range.start, pos(target, 0));
        }
        let found = find_regex_backward(&buffer, pos(19, 0), None, &pattern).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(18, 0), pos(19, 0)));
    }

    #[test]
    fn test_bound() {
        let buffer = LinesBuffer::from("x\n.\nx\n.");
        let pattern = compile("x");
        let found = find_regex_backward(&buffer, pos(3, 1), Some(pos(2, 0)), &pattern).unwrap();
        assert_eq!(found.range.start, pos(2, 0));
        assert!(find_regex_backward(&buffer, pos(2, 0), Some(pos(1, 0)), &pattern).is_none());
    }

    #[test]
    fn test_word_boundary_at_cursor_is_not_reported() {
        let buffer = LinesBuffer::from("ab cd");
        let pattern = compile(r"\b");

        let found = find_regex_backward(&buffer, pos(0, 5), None, &pattern).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 3), pos(0, 3)));

        // Find previous again from the result keeps moving back.
        let found = find_regex_backward(&buffer, found.range.start, None, &pattern).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 2), pos(0, 2)));
        let found = find_regex_backward(&buffer, found.range.start, None, &pattern).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 0), pos(0, 0)));
        assert!(find_regex_backward(&buffer, pos(0, 0), None, &pattern).is_none());
    }

    #[test]
    fn test_end_of_line_at_cursor_is_not_reported() {
        let pattern = compile("$");

        let buffer = LinesBuffer::from("ab cd");
        assert!(find_regex_backward(&buffer, pos(0, 5), None, &pattern).is_none());

        let buffer = LinesBuffer::from("ab\ncd");
        let found = find_regex_backward(&buffer, pos(1, 2), None, &pattern).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 2), pos(0, 2)));
    }

    #[test]
    fn test_empty_match_at_cursor_is_not_reported() {
        let buffer = LinesBuffer::from("ab");
        let found = find_regex_backward(&buffer, pos(0, 2), None, &compile("x*")).unwrap();
        assert_eq!(found.range, MatchRange::new(pos(0, 1), pos(0, 1)));
    }
}

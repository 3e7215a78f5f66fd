// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ReplaceCallback, ReplaceCandidate, ReplaceResponse, replace_loop::ReplaceLoop};
use crate::{CompiledPattern, MatchInfo, ReplacementTemplate, SearchResult, Snapshot,
            TextBuffer, find_regex_forward};
use std::borrow::Cow;

/// The replacement, either fixed for every match or expanded per match.
enum Replacement {
    Fixed(String),
    PerMatch(ReplacementTemplate),
}

impl Replacement {
    fn try_new(replacement: &str, literal: bool) -> SearchResult<Self> {
        if literal {
            return Ok(Self::Fixed(replacement.to_string()));
        }
        let template = ReplacementTemplate::parse(replacement)?;
        Ok(if template.has_references() {
            Self::PerMatch(template)
        } else {
            Self::Fixed(template.expand(None))
        })
    }

    fn text_for(&self, info: &MatchInfo) -> Cow<'_, str> {
        match self {
            Self::Fixed(it) => Cow::Borrowed(it),
            Self::PerMatch(template) => Cow::Owned(template.expand(Some(info))),
        }
    }
}

/// Replace every match of `pattern` from `start` up to `bound` (or the end of the
/// buffer), and return how many replacements were made.
///
/// Unless `literal` is set, `replacement` is a [`ReplacementTemplate`]. It is checked
/// before the buffer is touched, so a bad template makes no edits.
///
/// Without `decide` every match is replaced and the whole run is one undo step. With it,
/// each match is offered to the callback, see [`ReplaceResponse`].
///
/// Empty matches are handled so the loop always makes progress:
/// - An empty match right where the previous empty match left off is not offered; the
///   search resumes one char later.
/// - An empty match replaced with nothing does not count, and the search resumes one
///   char later.
///
/// # Errors
///
/// Returns [`SearchError::ReplacementSyntax`](crate::SearchError::ReplacementSyntax) for
/// a bad template.
#[tracing::instrument(skip(buffer, pattern, decide), fields(pattern = %pattern.source()))]
pub fn replace_all_regex<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    start: Snapshot,
    bound: Option<Snapshot>,
    pattern: &CompiledPattern,
    replacement: &str,
    literal: bool,
    decide: Option<ReplaceCallback<'_>>,
) -> SearchResult<usize> {
    let replacement = Replacement::try_new(replacement, literal)?;
    let mut state = ReplaceLoop::new(buffer, bound, decide);
    let mut start = start;
    let mut was_empty = false;

    loop {
        let bound = state.bound();
        let Some(found) = find_regex_forward(&*state.buffer, start, bound, pattern) else {
            break;
        };
        let range = found.range;

        if found.is_empty() {
            if was_empty && range.start == start {
                was_empty = false;
                match state.buffer.forward_char(start) {
                    Some(next) => {
                        start = next;
                        continue;
                    }
                    None => break,
                }
            }
            was_empty = true;
        } else {
            was_empty = false;
        }

        let text = replacement.text_for(&found.info);
        let candidate = ReplaceCandidate {
            needle: None,
            pattern: Some(pattern),
            replacement: &text,
            range,
        };

        let response = state.decide(&candidate);
        if response == ReplaceResponse::Stop {
            break;
        }

        start = range.end;
        if response != ReplaceResponse::Skip && !(found.is_empty() && text.is_empty()) {
            start = state.apply(response, range, &text);
        }

        if was_empty && text.is_empty() {
            match state.buffer.forward_char(start) {
                Some(next) => start = next,
                None => break,
            }
            was_empty = false;
        }
    }

    Ok(state.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompileOptions, LinesBuffer, MatchRange, SearchError, pos};
    use pretty_assertions::assert_eq;

    fn compile(source: &str) -> CompiledPattern {
        CompiledPattern::try_compile(source, CompileOptions::default()).unwrap()
    }

    fn replace(text: &str, pattern: &str, replacement: &str) -> (usize, String) {
        let mut buffer = LinesBuffer::from(text);
        let pattern = compile(pattern);
        let count =
            replace_all_regex(&mut buffer, pos(0, 0), None, &pattern, replacement, false, None)
                .unwrap();
        (count, buffer.to_string())
    }

    #[test]
    fn test_back_references() {
        assert_eq!(replace("user@host", r"(\w+)@(\w+)", r"\2@\1"), (1, "host@user".into()));
        assert_eq!(replace("a-b c-d", r"(\w)-(\w)", r"\U\2\1"), (2, "BA DC".into()));
    }

    #[test]
    fn test_empty_matches_make_progress() {
        assert_eq!(replace("ab", "", "X"), (3, "XaXbX".into()));
        assert_eq!(replace("ab", "x*", ""), (0, "ab".into()));
        assert_eq!(replace("a\nb", "^", "> "), (2, "> a\n> b".into()));
    }

    #[test]
    fn test_replacement_inside_result_is_not_searched_again() {
        assert_eq!(replace("aaa", "a", "aa"), (3, "aaaaaa".into()));
    }

    #[test]
    fn test_literal_replacement_skips_expansion() {
        let mut buffer = LinesBuffer::from("x");
        let count =
            replace_all_regex(&mut buffer, pos(0, 0), None, &compile("x"), r"\1\q", true, None)
                .unwrap();
        assert_eq!(count, 1);
        assert_eq!(buffer.to_string(), r"\1\q");
    }

    #[test]
    fn test_bad_template_makes_no_edits() {
        let mut buffer = LinesBuffer::from("aaa");
        let result =
            replace_all_regex(&mut buffer, pos(0, 0), None, &compile("a"), r"b\", false, None);
        assert!(matches!(result, Err(SearchError::ReplacementSyntax { offset: 1, .. })));
        assert_eq!(buffer.to_string(), "aaa");
        assert_eq!(buffer.undo_len(), 0);
        assert_eq!(buffer.mark_count(), 0);
    }

    #[test]
    fn test_bound_follows_edits() {
        let mut buffer = LinesBuffer::from("a a a a");
        let count = replace_all_regex(
            &mut buffer,
            pos(0, 0),
            Some(pos(0, 5)),
            &compile("a"),
            "long",
            false,
            None,
        )
        .unwrap();
        assert_eq!(count, 3);
        assert_eq!(buffer.to_string(), "long long long a");
        assert_eq!(buffer.mark_count(), 0);
    }

    #[test]
    fn test_multi_line_matches() {
        assert_eq!(replace("a\nb\na\nb", r"a\nb", "ab"), (2, "ab\nab".into()));
    }

    #[test]
    fn test_bulk_is_one_undo_step() {
        let mut buffer = LinesBuffer::from("a b a b");
        replace_all_regex(&mut buffer, pos(0, 0), None, &compile("a"), "c", false, None).unwrap();
        assert_eq!(buffer.undo_len(), 1);
        assert!(buffer.undo());
        assert_eq!(buffer.to_string(), "a b a b");
    }

    #[test]
    fn test_interactive_undo_groups() {
        let mut buffer = LinesBuffer::from("a a a a a");
        let mut responses = vec![
            ReplaceResponse::Replace,
            ReplaceResponse::Skip,
            ReplaceResponse::Replace,
            ReplaceResponse::ReplaceAll,
        ]
        .into_iter();
        let mut seen = vec![];
        let mut callback = |candidate: &ReplaceCandidate<'_>| {
            seen.push(candidate.range);
            responses.next().unwrap_or(ReplaceResponse::Stop)
        };

        let count = replace_all_regex(
            &mut buffer,
            pos(0, 0),
            None,
            &compile("a"),
            "b",
            false,
            Some(&mut callback),
        )
        .unwrap();

        assert_eq!(count, 4);
        assert_eq!(buffer.to_string(), "b a b b b");
        // Two single replaces, then one group for the rest.
        assert_eq!(buffer.undo_len(), 3);
        assert_eq!(
            seen,
            vec![
                MatchRange::new(pos(0, 0), pos(0, 1)),
                MatchRange::new(pos(0, 2), pos(0, 3)),
                MatchRange::new(pos(0, 4), pos(0, 5)),
                MatchRange::new(pos(0, 6), pos(0, 7)),
            ]
        );
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end behavior of [`TextSearcher`] over a [`LinesBuffer`].

use pretty_assertions::assert_eq;
use r3bl_search::{LinesBuffer, MatchRange, PatternCache, ReplaceCandidate, ReplaceResponse,
                  SearchFlags, TextBuffer, TextSearcher, pos};

fn regex() -> SearchFlags { SearchFlags::default().with_regex(true) }

#[test]
fn not_found_leaves_everything_alone() {
    let mut buffer = LinesBuffer::from("alpha\nbeta");
    let mut searcher = TextSearcher::new();

    for _ in 0..2 {
        let found = searcher
            .search_forward(&buffer, pos(0, 0), None, "gamma", SearchFlags::default())
            .unwrap();
        assert_eq!(found, None);
        let found = searcher
            .search_backward(&buffer, pos(1, 4), None, "gam+a", regex())
            .unwrap();
        assert_eq!(found, None);
    }

    let count = searcher
        .replace_all(&mut buffer, pos(0, 0), None, "gamma", "x", SearchFlags::default())
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(buffer.to_string(), "alpha\nbeta");
    assert_eq!(buffer.undo_len(), 0);
}

#[test]
fn literal_replace_is_done_after_one_pass() {
    let mut buffer = LinesBuffer::from("XabcX");
    let mut searcher = TextSearcher::new();
    let flags = SearchFlags::default();

    let count = searcher
        .replace_all(&mut buffer, pos(0, 0), None, "abc", "Z", flags)
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(buffer.to_string(), "XZX");

    let count = searcher
        .replace_all(&mut buffer, pos(0, 0), None, "abc", "Z", flags)
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(buffer.to_string(), "XZX");
}

#[test]
fn whole_word_only_matches_the_standalone_word() {
    let buffer = LinesBuffer::from("concatenate cat scatter");
    let mut searcher = TextSearcher::new();
    let flags = SearchFlags::default().with_whole_words(true);

    let found = searcher
        .search_forward(&buffer, pos(0, 0), None, "cat", flags)
        .unwrap();
    assert_eq!(found, Some(MatchRange::new(pos(0, 12), pos(0, 15))));

    let found = searcher
        .search_forward(&buffer, pos(0, 15), None, "cat", flags)
        .unwrap();
    assert_eq!(found, None);
}

#[test]
fn empty_pattern_replace_terminates() {
    let mut buffer = LinesBuffer::from("ab");
    let count = TextSearcher::new()
        .replace_all(&mut buffer, pos(0, 0), None, "", "X", regex())
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(buffer.to_string(), "XaXbX");
}

#[test]
fn back_references_are_expanded() {
    let mut buffer = LinesBuffer::from("user@host\nroot@box");
    let count = TextSearcher::new()
        .replace_all(&mut buffer, pos(0, 0), None, r"(\w+)@(\w+)", r"\2@\1", regex())
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(buffer.to_string(), "host@user\nbox@root");
}

#[test]
fn pattern_with_newline_matches_across_rows() {
    let buffer = LinesBuffer::from("xa\nbx");
    let mut searcher = TextSearcher::new();
    let expected = Some(MatchRange::new(pos(0, 1), pos(1, 1)));

    let found = searcher
        .search_forward(&buffer, pos(0, 0), None, r"a\nb", regex())
        .unwrap();
    assert_eq!(found, expected);

    let found = searcher
        .search_backward(&buffer, buffer.end_position(), None, r"a\nb", regex())
        .unwrap();
    assert_eq!(found, expected);
}

#[test]
fn interactive_stop_keeps_earlier_replacements() {
    let mut buffer = LinesBuffer::from("one one one");
    let mut responses = [
        ReplaceResponse::Replace,
        ReplaceResponse::Replace,
        ReplaceResponse::Stop,
    ]
    .into_iter();
    let mut offered = vec![];

    let count = TextSearcher::new()
        .replace_all_interactive(
            &mut buffer,
            pos(0, 0),
            None,
            "one",
            "two",
            SearchFlags::default(),
            |candidate: &ReplaceCandidate<'_>| {
                assert_eq!(candidate.needle, Some("one"));
                assert_eq!(candidate.replacement, "two");
                offered.push(candidate.range);
                responses.next().unwrap_or(ReplaceResponse::Stop)
            },
        )
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(buffer.to_string(), "two two one");
    assert_eq!(offered.len(), 3);
    assert_eq!(buffer.undo_len(), 2);
}

#[test]
fn interactive_replace_all_stops_asking() {
    let mut buffer = LinesBuffer::from("a1 a2 a3 a4");
    let mut asked = 0;

    let count = TextSearcher::new()
        .replace_all_interactive(
            &mut buffer,
            pos(0, 0),
            None,
            r"a(\d)",
            r"b\1",
            regex(),
            |candidate: &ReplaceCandidate<'_>| {
                asked += 1;
                assert!(candidate.pattern.is_some());
                if asked == 1 {
                    ReplaceResponse::Skip
                } else {
                    ReplaceResponse::ReplaceAll
                }
            },
        )
        .unwrap();

    assert_eq!(asked, 2);
    assert_eq!(count, 3);
    assert_eq!(buffer.to_string(), "a1 b2 b3 b4");
    assert_eq!(buffer.undo_len(), 1);
}

#[test]
fn replace_stays_inside_the_bound() {
    let mut buffer = LinesBuffer::from("x x\nx x\nx x");
    let count = TextSearcher::new()
        .replace_all(
            &mut buffer,
            pos(1, 0),
            Some(pos(1, 3)),
            "x",
            "yy",
            SearchFlags::default(),
        )
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(buffer.to_string(), "x x\nyy yy\nx x");
    assert_eq!(buffer.mark_count(), 0);
}

#[test]
fn cache_hit_shares_the_compiled_pattern() {
    let mut cache = PatternCache::new();
    let first = cache.get_or_compile("a+", regex()).unwrap();
    let again = cache.get_or_compile("a+", regex()).unwrap();
    assert!(first.ptr_eq(&again));

    let other = cache.get_or_compile("b+", regex()).unwrap();
    assert!(!other.ptr_eq(&first));
    assert!(cache.peek().is_some_and(|it| it.ptr_eq(&other)));

    // The evicted pattern still works for whoever holds it.
    assert!(first.regex().is_match("aaa"));
}

#[test]
fn undo_restores_the_text_before_replace() {
    let mut buffer = LinesBuffer::from("red green red");
    TextSearcher::new()
        .replace_all(&mut buffer, pos(0, 0), None, "red", "blue", SearchFlags::default())
        .unwrap();
    assert_eq!(buffer.to_string(), "blue green blue");
    assert!(buffer.undo());
    assert_eq!(buffer.to_string(), "red green red");
}

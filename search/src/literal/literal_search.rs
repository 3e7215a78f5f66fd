// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::is_whole_word;
use crate::{CompiledPattern, MatchRange, SearchFlags, SearchResult, Snapshot, TextBuffer,
            find_regex_backward, find_regex_forward};

/// Find the first occurrence of `needle` at or after `start`.
///
/// Honors [`SearchFlags::caseless`] and [`SearchFlags::whole_words`]. A whole word
/// candidate that fails the check is skipped and the search resumes at its end. If
/// `bound` is given, the occurrence must end at or before it.
///
/// # Errors
///
/// Returns [`SearchError::EmptyNeedle`](crate::SearchError::EmptyNeedle) for an empty
/// needle.
pub fn find_literal_forward<B: TextBuffer + ?Sized>(
    buffer: &B,
    start: Snapshot,
    bound: Option<Snapshot>,
    needle: &str,
    flags: SearchFlags,
) -> SearchResult<Option<MatchRange>> {
    let pattern = CompiledPattern::literal(needle, flags.caseless)?;
    Ok(next_literal_forward(buffer, start, bound, &pattern, flags.whole_words))
}

/// [`find_literal_forward`] with a needle that is already compiled, so a replace loop
/// compiles it once.
pub(crate) fn next_literal_forward<B: TextBuffer + ?Sized>(
    buffer: &B,
    start: Snapshot,
    bound: Option<Snapshot>,
    pattern: &CompiledPattern,
    whole_words: bool,
) -> Option<MatchRange> {
    let mut from = start;

    while let Some(found) = find_regex_forward(buffer, from, bound, pattern) {
        let range = found.range;
        if bound.is_some_and(|bound| range.end > bound) {
            return None;
        }
        if !whole_words || is_whole_word(buffer, range) {
            return Some(range);
        }
        from = range.end;
    }

    None
}

/// Find the last occurrence of `needle` that ends at or before `start`.
///
/// A whole word candidate that fails the check is skipped and the search resumes at its
/// start. If `bound` is given, the occurrence must start at or after it.
///
/// # Errors
///
/// Returns [`SearchError::EmptyNeedle`](crate::SearchError::EmptyNeedle) for an empty
/// needle.
pub fn find_literal_backward<B: TextBuffer + ?Sized>(
    buffer: &B,
    start: Snapshot,
    bound: Option<Snapshot>,
    needle: &str,
    flags: SearchFlags,
) -> SearchResult<Option<MatchRange>> {
    let pattern = CompiledPattern::literal(needle, flags.caseless)?;
    let mut from = start;

    while let Some(found) = find_regex_backward(buffer, from, bound, &pattern) {
        let range = found.range;
        if !flags.whole_words || is_whole_word(buffer, range) {
            return Ok(Some(range));
        }
        from = range.start;
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinesBuffer, SearchError, pos};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metacharacters_are_plain_text() {
        let buffer = LinesBuffer::from("a+b a.b axb");
        let flags = SearchFlags::default();
        let found = find_literal_forward(&buffer, pos(0, 0), None, "a.b", flags).unwrap();
        assert_eq!(found, Some(MatchRange::new(pos(0, 4), pos(0, 7))));
    }

    #[test]
    fn test_whole_words_forward_and_backward() {
        let buffer = LinesBuffer::from("concatenate cat scatter");
        let flags = SearchFlags::default().with_whole_words(true);
        let expected = Some(MatchRange::new(pos(0, 12), pos(0, 15)));

        let found = find_literal_forward(&buffer, pos(0, 0), None, "cat", flags).unwrap();
        assert_eq!(found, expected);

        let found = find_literal_backward(&buffer, pos(0, 23), None, "cat", flags).unwrap();
        assert_eq!(found, expected);

        let found = find_literal_forward(&buffer, pos(0, 13), None, "cat", flags).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_caseless() {
        let buffer = LinesBuffer::from("Hello HELLO");
        let flags = SearchFlags::default().with_caseless(true);
        let found = find_literal_backward(&buffer, pos(0, 11), None, "hello", flags).unwrap();
        assert_eq!(found, Some(MatchRange::new(pos(0, 6), pos(0, 11))));

        let found =
            find_literal_forward(&buffer, pos(0, 0), None, "hello", SearchFlags::default())
                .unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_needle_spanning_rows() {
        let buffer = LinesBuffer::from("one\ntwo\nthree\nfour");
        let flags = SearchFlags::default();
        let found = find_literal_forward(&buffer, pos(0, 0), None, "two\nthree\nf", flags)
            .unwrap();
        assert_eq!(found, Some(MatchRange::new(pos(1, 0), pos(3, 1))));
    }

    #[test]
    fn test_bounds() {
        let buffer = LinesBuffer::from("abc abc");
        let flags = SearchFlags::default();

        let found = find_literal_forward(&buffer, pos(0, 1), Some(pos(0, 7)), "abc", flags);
        assert_eq!(found.unwrap(), Some(MatchRange::new(pos(0, 4), pos(0, 7))));
        let found = find_literal_forward(&buffer, pos(0, 1), Some(pos(0, 6)), "abc", flags);
        assert_eq!(found.unwrap(), None);

        let found = find_literal_backward(&buffer, pos(0, 7), Some(pos(0, 1)), "abc", flags);
        assert_eq!(found.unwrap(), Some(MatchRange::new(pos(0, 4), pos(0, 7))));
        let found = find_literal_backward(&buffer, pos(0, 6), Some(pos(0, 1)), "abc", flags);
        assert_eq!(found.unwrap(), None);
    }

    #[test]
    fn test_empty_needle() {
        let buffer = LinesBuffer::from("abc");
        let result = find_literal_forward(&buffer, pos(0, 0), None, "", SearchFlags::default());
        assert_eq!(result, Err(SearchError::EmptyNeedle));
    }
}

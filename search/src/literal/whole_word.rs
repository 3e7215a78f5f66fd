// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{MatchRange, TextBuffer};

/// `true` if the text in `range` is not glued to a word char on either side.
///
/// Row starts and row ends count as boundaries. A word char is alphanumeric (Unicode
/// aware) or `_`, see [`TextBuffer::is_word_char_at`].
pub fn is_whole_word<B: TextBuffer + ?Sized>(buffer: &B, range: MatchRange) -> bool {
    let (start, end) = if range.start <= range.end {
        (range.start, range.end)
    } else {
        (range.end, range.start)
    };

    if !buffer.starts_line(start)
        && let Some(before) = buffer.backward_char(start)
        && buffer.is_word_char_at(before)
    {
        return false;
    }

    buffer.ends_line(end) || !buffer.is_word_char_at(end)
}

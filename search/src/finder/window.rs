// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Conversions between a window's text (bytes) and buffer positions (rows and chars).

use crate::{Snapshot, pos};

/// Byte offset of the `chars`-th char of `text`, or its length if there are fewer.
pub(crate) fn char_to_byte(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}

/// The position reached by walking over `text` starting at `from`.
pub(crate) fn advance(from: Snapshot, text: &str) -> Snapshot {
    text.chars().fold(from, |at, it| {
        if it == '\n' {
            pos(at.row + 1, 0)
        } else {
            pos(at.row, at.col + 1)
        }
    })
}

/// Byte length of the char that starts at `index`, or 1 past the end.
pub(crate) fn char_len_at(text: &str, index: usize) -> usize {
    text[index..].chars().next().map_or(1, char::len_utf8)
}

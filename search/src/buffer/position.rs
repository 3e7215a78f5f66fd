// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// A plain `(row, col)` location in a [`TextBuffer`]. Both are zero based, and `col`
/// counts chars (not bytes) from the start of the row.
///
/// A snapshot does **not** track edits. Once text is inserted or deleted before it, it
/// points somewhere else. Use a [`LivePosition`] when a position has to survive an edit.
///
/// Snapshots order lexicographically by `(row, col)`, which is buffer order. You can use
/// [`pos()`] to create a new instance.
///
/// [`TextBuffer`]: crate::TextBuffer
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Snapshot {
    pub row: usize,
    pub col: usize,
}

/// Shorthand to create a [`Snapshot`].
#[must_use]
pub fn pos(row: usize, col: usize) -> Snapshot { Snapshot { row, col } }

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "{}:{}", self.row, self.col) }
}

/// Which way a [`LivePosition`] moves when text is inserted exactly at it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkGravity {
    /// Stays before the inserted text.
    Left,
    /// Ends up after the inserted text.
    Right,
}

/// A mark registered with a [`TextBuffer`]. The buffer adjusts it on every insert and
/// delete, so reading it back with [`TextBuffer::position_at_mark`] always gives the
/// current location of the text it was anchored to.
///
/// It is neither [`Copy`] nor [`Clone`]. A mark is owned by whoever
/// created it and must be handed back with [`TextBuffer::delete_mark`].
///
/// [`TextBuffer`]: crate::TextBuffer
/// [`TextBuffer::position_at_mark`]: crate::TextBuffer::position_at_mark
/// [`TextBuffer::delete_mark`]: crate::TextBuffer::delete_mark
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "a mark must be released with `TextBuffer::delete_mark`"]
pub struct LivePosition {
    id: u64,
}

impl LivePosition {
    /// For [`crate::TextBuffer`] implementations to hand out marks.
    pub fn from_raw_id(id: u64) -> Self { Self { id } }

    #[must_use]
    pub fn raw_id(&self) -> u64 { self.id }
}

/// A match, from `start` (inclusive) to `end` (exclusive). It may be empty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRange {
    pub start: Snapshot,
    pub end: Snapshot,
}

impl MatchRange {
    #[must_use]
    pub fn new(start: Snapshot, end: Snapshot) -> Self { Self { start, end } }

    /// Zero-width matches are legal, eg: `^` or `x*`.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.start == self.end }
}

impl Display for MatchRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

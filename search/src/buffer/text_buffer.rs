// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The buffer abstraction that the search engine consumes.
//!
//! The engine never owns text. A GUI toolkit (or [`LinesBuffer`] in tests and in the
//! `sr` binary) implements [`TextBuffer`], and the engine only talks to it through
//! `(row, col)` [`Snapshot`]s, slices, marks and undo grouping.
//!
//! Rows are separated by a single `\n`. A `\r` before it is ordinary row content.
//!
//! [`LinesBuffer`]: crate::LinesBuffer

use super::{LivePosition, MarkGravity, Snapshot, pos};

/// A `(row, col)` addressable text container.
///
/// Implementors provide the required methods. The navigation helpers are derived from
/// [`TextBuffer::line_count`] and [`TextBuffer::line_len`] and follow the semantics of a
/// toolkit text iterator: moving forward past the last row lands on the end of the
/// buffer, moving backward past the first row lands on its start.
pub trait TextBuffer {
    /// Number of rows. An empty buffer has one empty row.
    fn line_count(&self) -> usize;

    /// Number of chars in `row`, not counting the line terminator. Rows past the end
    /// have length 0.
    fn line_len(&self, row: usize) -> usize;

    /// The char at `at`. At the end of a row that is not the last one this is `'\n'`. At
    /// the end of the buffer it is `None`.
    fn char_at(&self, at: Snapshot) -> Option<char>;

    /// Text between two positions, with `\n` between rows.
    fn slice(&self, start: Snapshot, end: Snapshot) -> String;

    /// Insert `text` at `at`, and return the position right after the inserted text.
    fn insert(&mut self, at: Snapshot, text: &str) -> Snapshot;

    /// Remove the text between two positions.
    fn delete(&mut self, start: Snapshot, end: Snapshot);

    fn create_mark(&mut self, at: Snapshot, gravity: MarkGravity) -> LivePosition;

    fn position_at_mark(&self, mark: &LivePosition) -> Snapshot;

    fn delete_mark(&mut self, mark: LivePosition);

    /// Open an undo group. Groups nest; edits made until the matching
    /// [`TextBuffer::end_user_action`] undo as one step.
    fn begin_user_action(&mut self);

    fn end_user_action(&mut self);

    // Provided navigation.

    fn start_position(&self) -> Snapshot { pos(0, 0) }

    fn end_position(&self) -> Snapshot {
        let last_row = self.line_count().saturating_sub(1);
        pos(last_row, self.line_len(last_row))
    }

    /// Pull `at` back inside the buffer.
    fn clamp(&self, at: Snapshot) -> Snapshot {
        let end = self.end_position();
        if at.row > end.row {
            return end;
        }
        pos(at.row, at.col.min(self.line_len(at.row)))
    }

    fn is_start(&self, at: Snapshot) -> bool { at == self.start_position() }

    fn is_end(&self, at: Snapshot) -> bool { at >= self.end_position() }

    fn starts_line(&self, at: Snapshot) -> bool { at.col == 0 }

    fn ends_line(&self, at: Snapshot) -> bool { at.col >= self.line_len(at.row) }

    /// Start of `row`, or the end of the buffer if `row` is past the last row.
    fn line_start(&self, row: usize) -> Snapshot {
        if row >= self.line_count() {
            self.end_position()
        } else {
            pos(row, 0)
        }
    }

    /// End of `row` (before its terminator), clamped to the last row.
    fn line_end(&self, row: usize) -> Snapshot {
        let row = row.min(self.line_count().saturating_sub(1));
        pos(row, self.line_len(row))
    }

    /// Start of the row `count` rows below `at`, or the buffer end if there is none.
    fn forward_lines(&self, at: Snapshot, count: usize) -> Snapshot {
        self.line_start(at.row.saturating_add(count))
    }

    /// Start of the row `count` rows above `at`, or the buffer start.
    fn backward_lines(&self, at: Snapshot, count: usize) -> Snapshot {
        pos(at.row.saturating_sub(count), 0)
    }

    /// One char forward, crossing row ends. `None` at the end of the buffer.
    fn forward_char(&self, at: Snapshot) -> Option<Snapshot> {
        let at = self.clamp(at);
        if self.is_end(at) {
            None
        } else if self.ends_line(at) {
            Some(pos(at.row + 1, 0))
        } else {
            Some(pos(at.row, at.col + 1))
        }
    }

    /// One char backward, crossing row starts. `None` at the start of the buffer.
    fn backward_char(&self, at: Snapshot) -> Option<Snapshot> {
        let at = self.clamp(at);
        match (at.row, at.col) {
            (0, 0) => None,
            (row, 0) => Some(pos(row - 1, self.line_len(row - 1))),
            (row, col) => Some(pos(row, col - 1)),
        }
    }

    /// Alphanumeric or `_`, Unicode aware. Row ends and the buffer end are not word
    /// chars.
    fn is_word_char_at(&self, at: Snapshot) -> bool {
        self.char_at(at)
            .is_some_and(|it| it == '_' || it.is_alphanumeric())
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In-memory [`TextBuffer`] backed by one [`String`] per row.
//!
//! It exists so the engine can run without a GUI toolkit: the `sr` binary and the tests
//! use it. It keeps the two pieces of bookkeeping that the replace loop depends on:
//!
//! 1. **Marks** ([`LivePosition`]) that are adjusted on every insert and delete.
//! 2. **Undo groups** ([`UndoHistory`]) delimited by `begin_user_action` and
//!    `end_user_action`.

use super::{LivePosition, MarkGravity, Snapshot, TextBuffer, UndoHistory, pos};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq)]
struct MarkSlot {
    id: u64,
    at: Snapshot,
    gravity: MarkGravity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinesBuffer {
    /// Never empty.
    lines: Vec<String>,
    marks: Vec<MarkSlot>,
    next_mark_id: u64,
    history: UndoHistory,
}

impl Default for LinesBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            marks: vec![],
            next_mark_id: 0,
            history: UndoHistory::default(),
        }
    }
}

impl From<&str> for LinesBuffer {
    fn from(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            ..Default::default()
        }
    }
}

impl From<String> for LinesBuffer {
    fn from(text: String) -> Self { Self::from(text.as_str()) }
}

impl Display for LinesBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Byte offset of the `col`-th char of `line`, or its length if `col` is past the end.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(index, _)| index)
}

impl LinesBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn line(&self, row: usize) -> Option<&str> { self.lines.get(row).map(String::as_str) }

    /// Number of undo groups recorded so far.
    #[must_use]
    pub fn undo_len(&self) -> usize { self.history.len() }

    /// Revert the most recent undo group. Returns `false` if there is nothing to undo.
    /// Marks are clamped into the restored text.
    pub fn undo(&mut self) -> bool {
        let Some(lines) = self.history.pop() else {
            return false;
        };
        self.lines = lines;
        let clamped: Vec<Snapshot> = self.marks.iter().map(|it| self.clamp(it.at)).collect();
        for (slot, at) in self.marks.iter_mut().zip(clamped) {
            slot.at = at;
        }
        true
    }

    /// Number of live marks. Useful to check that an operation released its marks.
    #[must_use]
    pub fn mark_count(&self) -> usize { self.marks.len() }

    fn shift_marks_after_insert(&mut self, at: Snapshot, end: Snapshot) {
        for slot in &mut self.marks {
            let moves = slot.at > at || (slot.at == at && slot.gravity == MarkGravity::Right);
            if !moves {
                continue;
            }
            slot.at = if slot.at.row == at.row {
                pos(end.row, end.col + (slot.at.col - at.col))
            } else {
                pos(slot.at.row + (end.row - at.row), slot.at.col)
            };
        }
    }

    fn shift_marks_after_delete(&mut self, start: Snapshot, end: Snapshot) {
        for slot in &mut self.marks {
            if slot.at <= start {
                continue;
            }
            slot.at = if slot.at <= end {
                start
            } else if slot.at.row == end.row {
                pos(start.row, start.col + (slot.at.col - end.col))
            } else {
                pos(slot.at.row - (end.row - start.row), slot.at.col)
            };
        }
    }
}

impl TextBuffer for LinesBuffer {
    fn line_count(&self) -> usize { self.lines.len() }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |it| it.chars().count())
    }

    fn char_at(&self, at: Snapshot) -> Option<char> {
        let line = self.lines.get(at.row)?;
        match line.chars().nth(at.col) {
            Some(it) => Some(it),
            None if at.row + 1 < self.lines.len() => Some('\n'),
            None => None,
        }
    }

    fn slice(&self, start: Snapshot, end: Snapshot) -> String {
        let (start, end) = (self.clamp(start.min(end)), self.clamp(start.max(end)));

        if start.row == end.row {
            let line = &self.lines[start.row];
            return line[byte_index(line, start.col)..byte_index(line, end.col)].to_string();
        }

        let mut acc = String::new();
        let first = &self.lines[start.row];
        acc.push_str(&first[byte_index(first, start.col)..]);
        for line in &self.lines[start.row + 1..end.row] {
            acc.push('\n');
            acc.push_str(line);
        }
        let last = &self.lines[end.row];
        acc.push('\n');
        acc.push_str(&last[..byte_index(last, end.col)]);
        acc
    }

    fn insert(&mut self, at: Snapshot, text: &str) -> Snapshot {
        let at = self.clamp(at);
        if text.is_empty() {
            return at;
        }
        self.history.record_before_edit(&self.lines);

        let line = &mut self.lines[at.row];
        let tail = line.split_off(byte_index(line, at.col));
        let mut pieces = text.split('\n');

        // `split` always yields at least one piece.
        let first = pieces.next().unwrap_or_default();
        line.push_str(first);
        let mut end = pos(at.row, at.col + first.chars().count());

        for piece in pieces {
            end = pos(end.row + 1, piece.chars().count());
            self.lines.insert(end.row, piece.to_string());
        }
        self.lines[end.row].push_str(&tail);

        self.shift_marks_after_insert(at, end);
        end
    }

    fn delete(&mut self, start: Snapshot, end: Snapshot) {
        let (start, end) = (self.clamp(start.min(end)), self.clamp(start.max(end)));
        if start == end {
            return;
        }
        self.history.record_before_edit(&self.lines);

        let tail = {
            let last = &self.lines[end.row];
            last[byte_index(last, end.col)..].to_string()
        };
        let first = &mut self.lines[start.row];
        first.truncate(byte_index(first, start.col));
        first.push_str(&tail);
        self.lines.drain(start.row + 1..=end.row);

        self.shift_marks_after_delete(start, end);
    }

    fn create_mark(&mut self, at: Snapshot, gravity: MarkGravity) -> LivePosition {
        let id = self.next_mark_id;
        self.next_mark_id += 1;
        let at = self.clamp(at);
        self.marks.push(MarkSlot { id, at, gravity });
        LivePosition::from_raw_id(id)
    }

    fn position_at_mark(&self, mark: &LivePosition) -> Snapshot {
        self.marks
            .iter()
            .find(|it| it.id == mark.raw_id())
            .map_or_else(|| self.end_position(), |it| it.at)
    }

    fn delete_mark(&mut self, mark: LivePosition) {
        self.marks.retain(|it| it.id != mark.raw_id());
    }

    fn begin_user_action(&mut self) { self.history.begin_group(); }

    fn end_user_action(&mut self) { self.history.end_group(); }
}

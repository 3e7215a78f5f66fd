// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

/// Oldest groups are dropped once there are more than this many.
pub const MAX_UNDO_GROUPS: usize = 256;

/// # Undo grouping
///
/// [`UndoHistory`] keeps one copy of the buffer's rows per undo group, taken right before
/// the first edit of the group.
///
/// ## Grouping
///
/// 1. [`UndoHistory::begin_group`] and [`UndoHistory::end_group`] nest. Only the
///    outermost pair delimits a group.
/// 2. The copy is taken lazily, on the first edit inside the group. A group with no
///    edits leaves no trace.
/// 3. An edit made outside any group is a group of its own.
///
/// ## Undoing (history::pop)
///
/// The most recent copy is removed and handed back to the buffer, which replaces its
/// rows with it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UndoHistory {
    versions: VecDeque<Vec<String>>,
    depth: usize,
    group_has_edits: bool,
}

impl UndoHistory {
    pub fn begin_group(&mut self) {
        if self.depth == 0 {
            self.group_has_edits = false;
        }
        self.depth += 1;
    }

    pub fn end_group(&mut self) {
        match self.depth {
            0 => tracing::warn!(message = "↩️ end_user_action without begin_user_action"),
            _ => self.depth -= 1,
        }
    }

    #[must_use]
    pub fn is_in_group(&self) -> bool { self.depth > 0 }

    /// Call right before mutating `lines`.
    pub fn record_before_edit(&mut self, lines: &[String]) {
        if self.depth > 0 {
            if self.group_has_edits {
                return;
            }
            self.group_has_edits = true;
        }

        if self.versions.len() == MAX_UNDO_GROUPS {
            self.versions.pop_front();
        }
        self.versions.push_back(lines.to_vec());
    }

    pub fn pop(&mut self) -> Option<Vec<String>> { self.versions.pop_back() }

    /// Number of groups that can be undone.
    #[must_use]
    pub fn len(&self) -> usize { self.versions.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.versions.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(it: &str) -> Vec<String> { vec![it.to_string()] }

    #[test]
    fn test_group_records_once() {
        let mut history = UndoHistory::default();

        history.begin_group();
        history.begin_group();
        history.record_before_edit(&rows("a"));
        history.end_group();
        history.record_before_edit(&rows("b"));
        history.end_group();

        assert!(!history.is_in_group());
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop(), Some(rows("a")));
    }

    #[test]
    fn test_empty_group_leaves_no_trace() {
        let mut history = UndoHistory::default();
        history.begin_group();
        history.end_group();
        assert!(history.is_empty());
    }

    #[test]
    fn test_edits_outside_group_are_separate() {
        let mut history = UndoHistory::default();
        history.record_before_edit(&rows("a"));
        history.record_before_edit(&rows("b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(rows("b")));
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut history = UndoHistory::default();
        for it in 0..=MAX_UNDO_GROUPS {
            history.record_before_edit(&rows(&it.to_string()));
        }
        assert_eq!(history.len(), MAX_UNDO_GROUPS);
        let mut last = None;
        while let Some(it) = history.pop() {
            last = Some(it);
        }
        assert_eq!(last, Some(rows("1")));
    }
}

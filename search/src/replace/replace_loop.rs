// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DecisionMode, ReplaceCallback, ReplaceCandidate, ReplaceResponse};
use crate::{LivePosition, MarkGravity, MatchRange, Snapshot, TextBuffer};

/// State shared by the regex and the plain text replace loops: the buffer, who decides,
/// the live end bound, the open undo group, and the count.
///
/// [`ReplaceLoop::finish`] must be called on every way out, it releases the mark and
/// closes the undo group.
pub(super) struct ReplaceLoop<'b, 'c, B: TextBuffer + ?Sized> {
    pub(super) buffer: &'b mut B,
    mode: DecisionMode<'c>,
    end_mark: Option<LivePosition>,
    group_open: bool,
    count: usize,
}

impl<'b, 'c, B: TextBuffer + ?Sized> ReplaceLoop<'b, 'c, B> {
    pub(super) fn new(
        buffer: &'b mut B,
        bound: Option<Snapshot>,
        decide: Option<ReplaceCallback<'c>>,
    ) -> Self {
        let end_mark = bound
            .filter(|bound| !buffer.is_end(*bound))
            .map(|bound| buffer.create_mark(bound, MarkGravity::Left));

        let mode = DecisionMode::new(decide);
        let group_open = mode.is_all();
        if group_open {
            buffer.begin_user_action();
        }

        Self {
            buffer,
            mode,
            end_mark,
            group_open,
            count: 0,
        }
    }

    /// Where the end bound is now. `None` means the end of the buffer.
    pub(super) fn bound(&self) -> Option<Snapshot> {
        self.end_mark
            .as_ref()
            .map(|mark| self.buffer.position_at_mark(mark))
    }

    pub(super) fn decide(&mut self, candidate: &ReplaceCandidate<'_>) -> ReplaceResponse {
        self.mode.decide(candidate)
    }

    /// Replace `range` with `text` and return the position right after the new text.
    ///
    /// A [`ReplaceResponse::Replace`] is its own undo step. The first
    /// [`ReplaceResponse::ReplaceAll`] opens a group that stays open until
    /// [`ReplaceLoop::finish`].
    pub(super) fn apply(
        &mut self,
        response: ReplaceResponse,
        range: MatchRange,
        text: &str,
    ) -> Snapshot {
        let own_group = response != ReplaceResponse::ReplaceAll;
        if own_group {
            self.buffer.begin_user_action();
        } else if !self.group_open {
            self.buffer.begin_user_action();
            self.group_open = true;
        }

        self.buffer.delete(range.start, range.end);
        let after = self.buffer.insert(range.start, text);

        if own_group {
            self.buffer.end_user_action();
        }

        self.count += 1;

        // % is Display, ? is Debug.
        tracing::trace!(message = "✏️ Replaced", range = %range, count = %self.count);

        after
    }

    pub(super) fn finish(mut self) -> usize {
        if let Some(mark) = self.end_mark.take() {
            self.buffer.delete_mark(mark);
        }
        if self.group_open {
            self.buffer.end_user_action();
        }

        tracing::debug!(message = "🔁 Replace loop done", count = %self.count);

        self.count
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CompiledPattern, MatchRange};
use regex::CaptureLocations;
use smallvec::SmallVec;

/// Byte spans of every capture group, in the window text. Group 0 is the whole match.
pub type GroupSpans = SmallVec<[Option<(usize, usize)>; 8]>;

/// Everything a regex search learned about one match, detached from the buffer.
///
/// It owns the window text the regex ran on, so back-references can be expanded later
/// without slicing the buffer again (the buffer may have changed by then).
#[derive(Clone, Debug)]
pub struct MatchInfo {
    window_text: String,
    groups: GroupSpans,
    pattern: CompiledPattern,
}

impl MatchInfo {
    #[must_use]
    pub fn new(
        window_text: String,
        locations: &CaptureLocations,
        pattern: CompiledPattern,
    ) -> Self {
        let groups = (0..locations.len()).map(|index| locations.get(index)).collect();
        Self {
            window_text,
            groups,
            pattern,
        }
    }

    /// The text of the window the regex ran on.
    #[must_use]
    pub fn window_text(&self) -> &str { &self.window_text }

    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern { &self.pattern }

    /// Number of groups, including group 0.
    #[must_use]
    pub fn group_count(&self) -> usize { self.groups.len() }

    /// Byte span of group `index` in [`MatchInfo::window_text`].
    #[must_use]
    pub fn span(&self, index: usize) -> Option<(usize, usize)> {
        self.groups.get(index).copied().flatten()
    }

    /// Text of group `index`. `None` if there is no such group, or it did not take part
    /// in the match.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&str> {
        self.span(index)
            .map(|(start, end)| &self.window_text[start..end])
    }

    /// Text of the group called `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&str> {
        let index = self
            .pattern
            .regex()
            .capture_names()
            .position(|it| it == Some(name))?;
        self.group(index)
    }
}

/// Result of a successful regex search.
#[derive(Clone, Debug)]
pub struct RegexMatch {
    /// Where the match is in the buffer.
    pub range: MatchRange,
    /// Byte offset of the match in the window text.
    pub match_offset: usize,
    /// Byte length of the match.
    pub match_len: usize,
    pub info: MatchInfo,
}

impl RegexMatch {
    #[must_use]
    pub fn window_text(&self) -> &str { self.info.window_text() }

    #[must_use]
    pub fn matched_text(&self) -> &str {
        &self.info.window_text()[self.match_offset..self.match_offset + self.match_len]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.match_len == 0 }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CompiledPattern, MatchRange};
use serde::{Deserialize, Serialize};

/// What to do with the match the callback is shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplaceResponse {
    /// End the loop. Replacements already made stay.
    Stop,
    /// Leave this match alone and move on.
    Skip,
    /// Replace this match, as its own undo step.
    Replace,
    /// Replace this match and every following one without asking again, as one undo
    /// step.
    ReplaceAll,
}

/// A match offered to the interactive callback.
#[derive(Copy, Clone, Debug)]
pub struct ReplaceCandidate<'a> {
    /// The plain text needle, when replacing text.
    pub needle: Option<&'a str>,
    /// The compiled pattern, when replacing a regex.
    pub pattern: Option<&'a CompiledPattern>,
    /// The replacement, with back-references already expanded.
    pub replacement: &'a str,
    pub range: MatchRange,
}

/// Interactive callback. Whatever state the caller needs is captured by the closure.
pub type ReplaceCallback<'c> = &'c mut dyn FnMut(&ReplaceCandidate<'_>) -> ReplaceResponse;

/// Who decides about the next match. Starts as [`DecisionMode::Ask`] when there is a
/// callback, and moves to [`DecisionMode::All`] for good once it answers
/// [`ReplaceResponse::ReplaceAll`].
pub enum DecisionMode<'c> {
    Ask(ReplaceCallback<'c>),
    All,
}

impl<'c> DecisionMode<'c> {
    #[must_use]
    pub fn new(decide: Option<ReplaceCallback<'c>>) -> Self {
        decide.map_or(Self::All, Self::Ask)
    }

    pub fn decide(&mut self, candidate: &ReplaceCandidate<'_>) -> ReplaceResponse {
        match self {
            Self::All => ReplaceResponse::ReplaceAll,
            Self::Ask(callback) => {
                let response = callback(candidate);
                if response == ReplaceResponse::ReplaceAll {
                    *self = Self::All;
                }
                response
            }
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool { matches!(self, Self::All) }
}

impl std::fmt::Debug for DecisionMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ask(_) => f.write_str("Ask"),
            Self::All => f.write_str("All"),
        }
    }
}

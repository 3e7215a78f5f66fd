// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// Options for one search or replace. They are independent of each other.
///
/// - `whole_words` only applies to plain text search. In regex mode it is ignored; use
///   `\b` in the pattern, or filter the matches yourself.
/// - `replacement_literal` only applies to regex replace. It turns off back-reference
///   expansion in the replacement.
///
/// This is [`Serialize`] and [`Deserialize`] so a UI can remember the user's last choice.
///
/// # Examples
/// ```
/// use r3bl_search::SearchFlags;
/// let flags = SearchFlags::default().with_regex(true).with_caseless(true);
/// assert!(flags.regex && flags.caseless && !flags.whole_words);
/// ```
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct SearchFlags {
    pub caseless: bool,
    pub whole_words: bool,
    pub regex: bool,
    pub replacement_literal: bool,
}

impl SearchFlags {
    #[must_use]
    pub fn with_caseless(mut self, it: bool) -> Self {
        self.caseless = it;
        self
    }

    #[must_use]
    pub fn with_whole_words(mut self, it: bool) -> Self {
        self.whole_words = it;
        self
    }

    #[must_use]
    pub fn with_regex(mut self, it: bool) -> Self {
        self.regex = it;
        self
    }

    #[must_use]
    pub fn with_replacement_literal(mut self, it: bool) -> Self {
        self.replacement_literal = it;
        self
    }

    /// The subset of flags that changes how a pattern compiles.
    #[must_use]
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            caseless: self.caseless,
        }
    }
}

/// Options passed to the regex engine at compile time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompileOptions {
    pub caseless: bool,
}

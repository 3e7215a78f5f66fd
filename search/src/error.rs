// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors produced by the search engine.
//!
//! Not finding a match is **not** an error (it is `Ok(None)`), and neither is the user
//! stopping an interactive replace (it is `Ok(count_so_far)`). Everything in here is
//! detected before the buffer is touched.

/// Every error that the search and replace engine can produce.
///
/// Each variant carries a [diagnostic code] so that callers that render [`miette`]
/// reports can tell them apart.
///
/// [diagnostic code]: miette::Diagnostic::code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum SearchError {
    /// The regular expression source failed to compile.
    #[error("🔍 Could not compile search pattern '{pattern}'")]
    #[diagnostic(code(r3bl_search::pattern_syntax))]
    PatternSyntax {
        /// The pattern as the user typed it.
        pattern: String,
        /// The regex engine's explanation.
        #[help]
        reason: String,
    },

    /// The replacement template has a malformed escape or group reference.
    #[error("✏️ Could not parse replacement '{template}' at byte {offset}")]
    #[diagnostic(code(r3bl_search::replacement_syntax))]
    ReplacementSyntax {
        /// The replacement template as the user typed it.
        template: String,
        /// Byte offset in `template` of the backslash that starts the bad escape.
        offset: usize,
        /// What is wrong with the escape.
        #[help]
        reason: &'static str,
    },

    /// A plain text search or replace was asked to look for the empty string.
    #[error("🕳️ Could not search for an empty string")]
    #[diagnostic(
        code(r3bl_search::empty_needle),
        help("Type some text to search for, or turn on regex mode to match empty strings.")
    )]
    EmptyNeedle,
}

/// Convenience alias used throughout the crate.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_codes_are_distinct() {
        let pattern = SearchError::PatternSyntax {
            pattern: "(".into(),
            reason: "unclosed group".into(),
        };
        let replacement = SearchError::ReplacementSyntax {
            template: "\\".into(),
            offset: 0,
            reason: "trailing backslash",
        };

        assert_eq!(
            pattern.code().map(|it| it.to_string()),
            Some("r3bl_search::pattern_syntax".to_string())
        );
        assert_eq!(
            replacement.code().map(|it| it.to_string()),
            Some("r3bl_search::replacement_syntax".to_string())
        );
        assert_eq!(
            SearchError::EmptyNeedle.code().map(|it| it.to_string()),
            Some("r3bl_search::empty_needle".to_string())
        );
    }

    #[test]
    fn test_display() {
        let it = SearchError::ReplacementSyntax {
            template: "a\\q".into(),
            offset: 1,
            reason: "unknown escape",
        };
        assert_eq!(it.to_string(), "✏️ Could not parse replacement 'a\\q' at byte 1");
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Replacement templates with back-references.
//!
//! | Syntax                        | Meaning                                         |
//! |-------------------------------|-------------------------------------------------|
//! | `\0`                          | the whole match                                 |
//! | `\1` .. `\99`                 | numbered group (two digits at most)             |
//! | `\g<N>`, `\g<name>`           | numbered or named group                         |
//! | `\n \t \r \f \v \a \\`        | control chars and a backslash                   |
//! | `\xHH`, `\x{H..}`             | char by hex code point                          |
//! | `\u \l`                       | upper or lower case the next char               |
//! | `\U \L` .. `\E`               | upper or lower case until `\E`                  |
//!
//! Any other char after a backslash, or a backslash at the very end, is a
//! [`SearchError::ReplacementSyntax`]. A group that does not exist, or that did not take
//! part in the match, expands to nothing.

use super::{CaseChange, CaseState};
use crate::{MatchInfo, SearchError, SearchResult};
use smallvec::SmallVec;
use std::{iter::Peekable, str::CharIndices};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Text(String),
    Group(usize),
    Named(String),
    Case(CaseChange),
}

/// A parsed replacement. Parse once, then [`expand`](ReplacementTemplate::expand) it for
/// every match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplacementTemplate {
    source: String,
    pieces: SmallVec<[Piece; 4]>,
}

impl ReplacementTemplate {
    /// # Errors
    ///
    /// Returns [`SearchError::ReplacementSyntax`] with the byte offset of the bad escape.
    pub fn parse(source: &str) -> SearchResult<Self> {
        let mut pieces = SmallVec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, it)) = chars.next() {
            if it != '\\' {
                text.push(it);
                continue;
            }

            let fail = |reason: &'static str| SearchError::ReplacementSyntax {
                template: source.to_string(),
                offset,
                reason,
            };

            let Some((_, escaped)) = chars.next() else {
                return Err(fail("a backslash must be followed by an escape"));
            };

            let piece = match escaped {
                'n' => Piece::Text("\n".into()),
                't' => Piece::Text("\t".into()),
                'r' => Piece::Text("\r".into()),
                'f' => Piece::Text("\x0C".into()),
                'v' => Piece::Text("\x0B".into()),
                'a' => Piece::Text("\x07".into()),
                '\\' => Piece::Text("\\".into()),
                'x' => {
                    let decoded = parse_hex(&mut chars)
                        .ok_or_else(|| fail("bad hex escape, use \\xHH or \\x{H..}"))?;
                    Piece::Text(decoded.into())
                }
                'g' => parse_group_name(&mut chars)
                    .ok_or_else(|| fail("bad group reference, use \\g<N> or \\g<name>"))?,
                'u' => Piece::Case(CaseChange::UpperNext),
                'l' => Piece::Case(CaseChange::LowerNext),
                'U' => Piece::Case(CaseChange::Upper),
                'L' => Piece::Case(CaseChange::Lower),
                'E' => Piece::Case(CaseChange::End),
                digit @ '0'..='9' => Piece::Group(parse_group_number(digit, &mut chars)),
                _ => return Err(fail("unknown escape")),
            };

            match piece {
                Piece::Text(it) => text.push_str(&it),
                other => {
                    if !text.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut text)));
                    }
                    pieces.push(other);
                }
            }
        }

        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }

        Ok(Self {
            source: source.to_string(),
            pieces,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str { &self.source }

    /// `true` if the expansion depends on the match.
    #[must_use]
    pub fn has_references(&self) -> bool {
        self.pieces
            .iter()
            .any(|it| matches!(it, Piece::Group(_) | Piece::Named(_)))
    }

    /// Build the replacement text. With no `info` every group expands to nothing.
    #[must_use]
    pub fn expand(&self, info: Option<&MatchInfo>) -> String {
        let mut acc = String::with_capacity(self.source.len());
        let mut case = CaseState::default();

        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => case.push_str(&mut acc, text),
                Piece::Group(index) => {
                    if let Some(text) = info.and_then(|it| it.group(*index)) {
                        case.push_str(&mut acc, text);
                    }
                }
                Piece::Named(name) => {
                    if let Some(text) = info.and_then(|it| it.named(name)) {
                        case.push_str(&mut acc, text);
                    }
                }
                Piece::Case(change) => case.apply(*change),
            }
        }

        acc
    }
}

/// `true` if `template` refers to any group.
///
/// # Errors
///
/// Returns [`SearchError::ReplacementSyntax`] if `template` does not parse.
pub fn has_back_references(template: &str) -> SearchResult<bool> {
    ReplacementTemplate::parse(template).map(|it| it.has_references())
}

/// Expand `template` against one match.
///
/// # Errors
///
/// Returns [`SearchError::ReplacementSyntax`] if `template` does not parse.
pub fn expand_references(template: &str, info: &MatchInfo) -> SearchResult<String> {
    ReplacementTemplate::parse(template).map(|it| it.expand(Some(info)))
}

type Chars<'a> = Peekable<CharIndices<'a>>;

fn parse_group_number(first: char, chars: &mut Chars<'_>) -> usize {
    let mut index = first.to_digit(10).unwrap_or_default() as usize;
    if let Some(&(_, next)) = chars.peek()
        && let Some(digit) = next.to_digit(10)
    {
        chars.next();
        index = index * 10 + digit as usize;
    }
    index
}

/// After `\x`: either exactly two hex digits, or hex digits in braces.
fn parse_hex(chars: &mut Chars<'_>) -> Option<char> {
    let mut digits = String::new();
    if chars.next_if(|&(_, it)| it == '{').is_some() {
        loop {
            match chars.next()? {
                (_, '}') => break,
                (_, it) => digits.push(it),
            }
        }
    } else {
        for _ in 0..2 {
            digits.push(chars.next_if(|(_, it)| it.is_ascii_hexdigit())?.1);
        }
    }
    if digits.is_empty() || !digits.chars().all(|it| it.is_ascii_hexdigit()) {
        return None;
    }
    char::from_u32(u32::from_str_radix(&digits, 16).ok()?)
}

/// After `\g`: `<N>` or `<name>`.
fn parse_group_name(chars: &mut Chars<'_>) -> Option<Piece> {
    chars.next_if(|&(_, it)| it == '<')?;
    let mut name = String::new();
    loop {
        match chars.next()? {
            (_, '>') => break,
            (_, it) => name.push(it),
        }
    }

    if !name.is_empty() && name.chars().all(|it| it.is_ascii_digit()) {
        return name.parse().ok().map(Piece::Group);
    }

    let mut name_chars = name.chars();
    let valid = name_chars
        .next()
        .is_some_and(|it| it == '_' || it.is_alphabetic())
        && name_chars.all(|it| it == '_' || it.is_alphanumeric());
    valid.then_some(Piece::Named(name))
}

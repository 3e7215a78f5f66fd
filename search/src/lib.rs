// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_search
//!
//! Incremental search and replace over a mutable text buffer that is addressed by
//! logical `(row, col)` position rather than by byte offset.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//! - [Introduction](#introduction)
//! - [Architecture](#architecture)
//! - [Positions that track edits](#positions-that-track-edits)
//! - [Multi-line patterns](#multi-line-patterns)
//! - [Replace loop](#replace-loop)
//! - [Example](#example)
//! <!-- /TOC -->
//!
//! # Introduction
//!
//! This crate is the search core of a text editor. It does not know about windows,
//! documents or plugins. It consumes a [`TextBuffer`] and produces [`MatchRange`]s and
//! replacement counts.
//!
//! - Literal or regular expression search, case sensitive or not, whole words or not.
//! - Forward and backward search from an arbitrary position, with an optional bound.
//! - Bulk replace, and interactive replace driven by a callback that answers
//!   [`ReplaceResponse::Stop`], [`ReplaceResponse::Skip`], [`ReplaceResponse::Replace`]
//!   or [`ReplaceResponse::ReplaceAll`].
//!
//! # Architecture
//!
//! Leaves first:
//!
//! 1. [`pattern`]: compiles a pattern and [`SearchFlags`] into a [`CompiledPattern`],
//!    and memoizes the most recent one in a single slot [`PatternCache`].
//! 2. [`buffer`]: the [`TextBuffer`] trait that the engine consumes, plus
//!    [`LinesBuffer`], an in-memory implementation with marks and undo grouping.
//! 3. [`finder`]: window based regex search, forward and backward.
//! 4. [`literal`]: plain text search with the whole word filter.
//! 5. [`expand`]: replacement templates with back-references.
//! 6. [`replace`]: the bulk and interactive replace loops.
//! 7. [`searcher`]: [`TextSearcher`], the caller facing service that owns the cache.
//!
//! # Positions that track edits
//!
//! A [`Snapshot`] is a plain `(row, col)` value. It does **not** move when text is
//! inserted or deleted before it. A [`LivePosition`] is a mark registered with the
//! buffer, which the buffer adjusts on every edit. They are different types so a stale
//! snapshot can't be passed where a live position is expected.
//!
//! # Multi-line patterns
//!
//! Each search slices a small window of lines out of the buffer and runs the regex on
//! it. The window height is the pattern's [`CompiledPattern::line_span`], which is 3 if
//! the pattern source contains an escaped `n`, `r` or `R`, and 1 otherwise. This is a
//! heuristic over the pattern text, and it over-allocates rather than under-matches.
//!
//! # Replace loop
//!
//! ```text
//! Searching ──▶ MatchFound ──▶ Deciding ──▶ Replacing ─┐
//!     ▲                            │                     │
//!     │                            └──▶ Skipping ────────┤
//!     └──────────────────── Advancing ◀──────────────────┘
//! Searching ──▶ NotFound ──▶ Done
//! ```
//!
//! Zero-width matches are never offered twice at the same position, so the loop always
//! makes progress.
//!
//! # Example
//!
//! ```
//! use r3bl_search::{LinesBuffer, SearchFlags, TextSearcher, pos};
//!
//! let mut buffer = LinesBuffer::from("user@host");
//! let mut searcher = TextSearcher::default();
//! let count = searcher
//!     .replace_all(
//!         &mut buffer,
//!         pos(0, 0),
//!         None,
//!         r"(\w+)@(\w+)",
//!         r"\2@\1",
//!         SearchFlags::default().with_regex(true),
//!     )
//!     .unwrap();
//! assert_eq!(count, 1);
//! assert_eq!(buffer.to_string(), "host@user");
//! ```

// Enforce strict error handling in production library code only. Tests are allowed to use
// .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod buffer;
pub mod error;
pub mod expand;
pub mod finder;
pub mod literal;
pub mod log;
pub mod pattern;
pub mod replace;
pub mod searcher;

// Re-export.
pub use buffer::*;
pub use error::*;
pub use expand::*;
pub use finder::*;
pub use literal::*;
pub use log::*;
pub use pattern::*;
pub use replace::*;
pub use searcher::*;

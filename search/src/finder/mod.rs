// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Regex search over a [`TextBuffer`](crate::TextBuffer), one window of rows at a time.
//!
//! The regex engine only sees contiguous text, and the buffer is addressed by row and
//! col. So each attempt slices a window of [`line_span`](crate::CompiledPattern::line_span)
//! rows out of the buffer, runs the regex on it, and maps byte offsets back to
//! [`Snapshot`](crate::Snapshot)s.

// Attach.
mod match_info;
mod regex_backward;
mod regex_forward;
mod window;

// Re-export.
pub use match_info::*;
pub use regex_backward::*;
pub use regex_forward::*;

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bulk and interactive replace.
//!
//! Both loops search forward from a start position, offer each match to an optional
//! callback, and edit the buffer in place. The end bound is kept in a
//! [`LivePosition`](crate::LivePosition) so it follows the edits.

// Attach.
mod replace_decision;
mod replace_literal;
mod replace_loop;
mod replace_regex;

// Re-export.
pub use replace_decision::*;
pub use replace_literal::*;
pub use replace_regex::*;

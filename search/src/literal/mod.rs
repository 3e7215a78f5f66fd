// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Plain text search, with optional whole word matching.

// Attach.
mod literal_search;
mod whole_word;

// Re-export.
pub use literal_search::*;
pub use whole_word::*;

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod compiled_pattern;
pub mod pattern_cache;
pub mod search_flags;

// Re-export.
pub use compiled_pattern::*;
pub use pattern_cache::*;
pub use search_flags::*;

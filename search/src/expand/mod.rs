// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
mod case_state;
mod replacement_template;

// Re-export.
pub use case_state::*;
pub use replacement_template::*;

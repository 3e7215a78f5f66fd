// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod history;
pub mod lines_buffer;
pub mod position;
pub mod text_buffer;

// Re-export.
pub use history::*;
pub use lines_buffer::*;
pub use position::*;
pub use text_buffer::*;

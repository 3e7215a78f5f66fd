// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Open (or create) the log file at `path_str`. It is never rotated.
///
/// Note that if you wrap this up in a non blocking writer, it doesn't work.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no file name
/// - The file or its folder can't be created
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    let parent = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(parent)
        .into_diagnostic()
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `sr`: run the search engine over a file.
//!
//! Without `--replace`, prints every match as `row:col..row:col<TAB>text`. With it,
//! prints the rewritten file to stdout and the replacement count to stderr. The file
//! itself is never written.

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use r3bl_search::{LinesBuffer, MatchRange, SearchFlags, TextBuffer, TextSearcher,
                  TracingConfig, try_initialize_logging};
use serde::Serialize;

use crate::clap_config::CLIArg;

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    if let Some(log_file) = &cli_arg.global_options.log {
        try_initialize_logging(&TracingConfig::new_file(Some(log_file.clone())))?;
    }

    let text = std::fs::read_to_string(&cli_arg.file_path)
        .into_diagnostic()
        .wrap_err(format!("Can't read {}", cli_arg.file_path))?;
    let mut buffer = LinesBuffer::from(text);
    let mut searcher = TextSearcher::new();
    let flags = cli_arg.search_flags();

    // % is Display, ? is Debug.
    tracing::debug!(
        message = "🔎 sr started",
        file = %cli_arg.file_path,
        pattern = %cli_arg.pattern,
        flags = ?flags
    );

    match &cli_arg.replace {
        Some(replacement) => {
            let start = buffer.start_position();
            let count = searcher.replace_all(
                &mut buffer,
                start,
                None,
                &cli_arg.pattern,
                replacement,
                flags,
            )?;
            let report = ReplaceReport {
                count,
                text: buffer.to_string(),
            };
            if cli_arg.global_options.json {
                println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
            } else {
                print!("{}", report.text);
                eprintln!("{} replacement(s)", report.count);
            }
        }
        None => {
            let matches = collect_matches(
                &mut searcher,
                &buffer,
                &cli_arg.pattern,
                flags,
                cli_arg.backward,
            )?;
            if cli_arg.global_options.json {
                println!("{}", serde_json::to_string_pretty(&matches).into_diagnostic()?);
            } else {
                for it in &matches {
                    println!("{}\t{}", it.range, it.text.escape_debug());
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct MatchReport {
    range: MatchRange,
    text: String,
}

#[derive(Debug, Serialize)]
struct ReplaceReport {
    count: usize,
    text: String,
}

/// Every match in the buffer, in the order they are found.
fn collect_matches(
    searcher: &mut TextSearcher,
    buffer: &LinesBuffer,
    pattern: &str,
    flags: SearchFlags,
    backward: bool,
) -> miette::Result<Vec<MatchReport>> {
    let mut acc = vec![];

    let mut at = if backward {
        buffer.end_position()
    } else {
        buffer.start_position()
    };

    loop {
        let found = if backward {
            searcher.search_backward(buffer, at, None, pattern, flags)?
        } else {
            searcher.search_forward(buffer, at, None, pattern, flags)?
        };
        let Some(range) = found else { break };

        acc.push(MatchReport {
            range,
            text: buffer.slice(range.start, range.end),
        });

        // An empty match has to be stepped over, or it is found again.
        let next = match (backward, range.is_empty()) {
            (false, false) => Some(range.end),
            (false, true) => buffer.forward_char(range.end),
            (true, false) => Some(range.start),
            (true, true) => buffer.backward_char(range.start),
        };
        let Some(next) = next else { break };
        at = next;
    }

    Ok(acc)
}

mod clap_config {
    use clap::{Args, Parser};
    use r3bl_search::SearchFlags;

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "sr")]
    #[command(about = "🔎 Search and replace in a file, editor style")]
    #[command(version)]
    #[command(next_line_help = true)]
    #[command(arg_required_else_help(true))]
    pub struct CLIArg {
        #[arg(name = "file path", help = "File to search. It is only read, never written.")]
        pub file_path: String,

        #[arg(name = "pattern", help = "Plain text to find, or a regex with --regex.")]
        pub pattern: String,

        #[arg(
            long,
            short = 'r',
            help = "Replace every match with this. With --regex it may use \\1, \\g<name> etc."
        )]
        pub replace: Option<String>,

        #[arg(long, short = 'e', help = "Treat the pattern as a regex.")]
        pub regex: bool,

        #[arg(long, short = 'i', help = "Ignore case.")]
        pub ignore_case: bool,

        #[arg(long, short = 'w', help = "Only match whole words (plain text only).")]
        pub whole_words: bool,

        #[arg(long, help = "Insert the replacement as is, without expanding \\1 etc.")]
        pub literal_replacement: bool,

        #[arg(long, short = 'b', help = "List matches from the end of the file backward.")]
        pub backward: bool,

        #[command(flatten)]
        pub global_options: GlobalOption,
    }

    #[derive(Debug, Args)]
    pub struct GlobalOption {
        #[arg(global = true, long, short = 'l', help = "Log debug output to this file.")]
        pub log: Option<String>,

        #[arg(global = true, long, short = 'j', help = "Print the result as JSON.")]
        pub json: bool,
    }

    impl CLIArg {
        pub fn search_flags(&self) -> SearchFlags {
            SearchFlags::default()
                .with_regex(self.regex)
                .with_caseless(self.ignore_case)
                .with_whole_words(self.whole_words)
                .with_replacement_literal(self.literal_replacement)
        }
    }
}

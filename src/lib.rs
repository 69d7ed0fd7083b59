pub mod ast;
pub mod cli;
pub mod config;
pub mod dsl;
pub mod formatter;
pub mod ordered_map;
pub mod pattern;
pub mod scan;

#[cfg(test)]
pub mod testutil;

use std::io::Write;
use std::time::Instant;

use anyhow::Result;

use ast::AstNode;
use cli::{Args, Command};
use config::PatternSet;
use formatter::create_formatter;
use pattern::parse;
use scan::scan_files;

/// Run a command, writing results to stdout. Returns the exit code:
/// 0 = parsed / matched / scan clean, 1 = no match / scan hits, 2 = invalid pattern.
pub fn run(args: Args) -> Result<i32> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    run_to(args, &mut lock)
}

/// [`run`] with an explicit output stream. Parse errors still go to stderr.
pub fn run_to(args: Args, out: &mut dyn Write) -> Result<i32> {
    match args.command {
        Command::Parse { pattern } => match parse(&pattern) {
            Ok(matcher) => {
                writeln!(out, "{matcher}")?;
                Ok(0)
            }
            Err(e) => {
                eprintln!("{e}");
                Ok(2)
            }
        },

        Command::Match { pattern, file } => {
            let matcher = match parse(&pattern) {
                Ok(matcher) => matcher,
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(2);
                }
            };
            let node = AstNode::load(&file)?;
            let matched = matcher.matches(&node);
            log::debug!("{} {}: {matched}", pattern, file.display());
            writeln!(out, "{matched}")?;
            Ok(if matched { 0 } else { 1 })
        }

        Command::Scan {
            config,
            files,
            format,
        } => {
            let config_start = Instant::now();
            let set = PatternSet::load(&config)?;
            log::debug!("pattern set loading: {:.0?}", config_start.elapsed());

            let scan_start = Instant::now();
            let result = scan_files(&files, &set)?;
            log::debug!(
                "scanned {} files with {} patterns in {:.0?}",
                result.file_count,
                set.len(),
                scan_start.elapsed()
            );

            create_formatter(&format).format_to(&result, out)?;
            Ok(if result.hits.is_empty() { 0 } else { 1 })
        }
    }
}

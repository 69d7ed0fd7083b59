use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::scan::{Hit, ScanResult};

/// One `path[:line]: pattern` line per hit, then a summary.
pub struct TextFormatter;

fn write_hit(out: &mut dyn Write, hit: &Hit) -> io::Result<()> {
    match hit.line {
        Some(line) => writeln!(out, "{}:{line}: {}", hit.path.display(), hit.pattern),
        None => writeln!(out, "{}: {}", hit.path.display(), hit.pattern),
    }
}

impl Formatter for TextFormatter {
    fn format_to(&self, result: &ScanResult, out: &mut dyn Write) -> io::Result<()> {
        for hit in &result.hits {
            write_hit(out, hit)?;
        }
        let match_word = if result.hits.len() == 1 {
            "match"
        } else {
            "matches"
        };
        let file_word = if result.file_count == 1 {
            "file"
        } else {
            "files"
        };
        writeln!(
            out,
            "\n{} {file_word} scanned, {} {match_word} found",
            result.file_count,
            result.hits.len(),
        )
    }
}

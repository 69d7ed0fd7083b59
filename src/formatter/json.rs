use std::io::{self, Write};

use serde::Serialize;

use crate::formatter::Formatter;
use crate::scan::ScanResult;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    metadata: Metadata,
    matches: Vec<Match<'a>>,
}

#[derive(Serialize)]
struct Metadata {
    files_scanned: usize,
    match_count: usize,
}

#[derive(Serialize)]
struct Match<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<i64>,
    node_type: &'a str,
    pattern: &'a str,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, result: &ScanResult, out: &mut dyn Write) -> io::Result<()> {
        let output = JsonOutput {
            metadata: Metadata {
                files_scanned: result.file_count,
                match_count: result.hits.len(),
            },
            matches: result
                .hits
                .iter()
                .map(|hit| Match {
                    path: hit.path.display().to_string(),
                    line: hit.line,
                    node_type: &hit.node_type,
                    pattern: &hit.pattern,
                })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)
    }
}

pub mod json;
pub mod text;

use std::io::{self, Write};

use crate::scan::ScanResult;

pub trait Formatter {
    fn format_to(&self, result: &ScanResult, out: &mut dyn Write) -> io::Result<()>;

    fn print(&self, result: &ScanResult) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.format_to(result, &mut lock)
    }
}

pub fn create_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        // "text" and any unknown value
        _ => Box::new(text::TextFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Hit;
    use std::path::PathBuf;

    fn render(format: &str, result: &ScanResult) -> String {
        let mut buf = Vec::new();
        create_formatter(format).format_to(result, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn unknown_format_falls_back_to_text() {
        let result = ScanResult {
            hits: vec![Hit {
                path: PathBuf::from("a.json"),
                pattern: "Lint/Answer".to_string(),
                node_type: "FixnumLiteral".to_string(),
                line: None,
            }],
            file_count: 1,
        };
        assert_eq!(render("anything_else", &result), render("text", &result));
        assert!(render("json", &result).trim_start().starts_with('{'));
    }
}

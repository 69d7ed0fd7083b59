use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::ast::AstNode;
use crate::config::PatternSet;

/// A pattern accepting one node of a scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub path: PathBuf,
    pub pattern: String,
    pub node_type: String,
    pub line: Option<i64>,
}

#[derive(Debug, Default)]
pub struct ScanResult {
    pub hits: Vec<Hit>,
    pub file_count: usize,
}

/// Evaluate every pattern against every node of one AST.
pub fn scan_node(path: &Path, root: &AstNode, set: &PatternSet) -> Vec<Hit> {
    let mut hits = Vec::new();
    root.walk(&mut |node| {
        hits.extend(set.matching(node).map(|pattern| Hit {
            path: path.to_path_buf(),
            pattern: pattern.name.clone(),
            node_type: node.type_tag.clone(),
            line: node.line(),
        }));
    });
    hits
}

/// Load and scan `files` in parallel. Hits come back in file order; the
/// first file that fails to load aborts the scan.
pub fn scan_files(files: &[PathBuf], set: &PatternSet) -> Result<ScanResult> {
    let per_file: Vec<Vec<Hit>> = files
        .par_iter()
        .map(|path| -> Result<Vec<Hit>> {
            let root = AstNode::load(path)?;
            Ok(scan_node(path, &root, set))
        })
        .collect::<Result<_>>()?;

    Ok(ScanResult {
        hits: per_file.into_iter().flatten().collect(),
        file_count: files.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{send_file_call, write_temp};

    fn set() -> PatternSet {
        PatternSet::from_yaml(
            "patterns:\n  \
             Security/SendFileInline: 'SendWithArguments<name = :send_file | :send_data>'\n  \
             Lint/InlineString: 'StringLiteral<string = \"inline\">'\n  \
             Lint/Answer: 'FixnumLiteral<value = 42>'\n",
        )
        .unwrap()
    }

    #[test]
    fn nested_nodes_are_scanned() {
        let hits = scan_node(Path::new("a.json"), &send_file_call(), &set());
        let found: Vec<(&str, &str, Option<i64>)> = hits
            .iter()
            .map(|h| (h.pattern.as_str(), h.node_type.as_str(), h.line))
            .collect();
        assert_eq!(
            found,
            [
                ("Security/SendFileInline", "SendWithArguments", Some(3)),
                ("Lint/InlineString", "StringLiteral", None),
            ]
        );
    }

    #[test]
    fn files_are_reported_in_order() {
        let (_a, first) = write_temp("first.json", &serde_json::to_string(&send_file_call()).unwrap());
        let (_b, second) = write_temp(
            "second.yml",
            "type: FixnumLiteral\nattributes:\n  value: 42\n  line: 9\n",
        );
        let (_c, clean) = write_temp("clean.json", r#"{"type": "Self"}"#);

        let result = scan_files(&[second.clone(), clean, first.clone()], &set()).unwrap();
        assert_eq!(result.file_count, 3);
        let paths: Vec<&PathBuf> = result.hits.iter().map(|h| &h.path).collect();
        assert_eq!(paths, [&second, &first, &first]);
        assert_eq!(result.hits[0].line, Some(9));
    }

    #[test]
    fn unreadable_file_fails_the_scan() {
        let missing = PathBuf::from("/nonexistent/ast.json");
        let err = scan_files(&[missing], &set()).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/ast.json"));
    }
}

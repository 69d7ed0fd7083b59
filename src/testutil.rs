use std::fs;
use std::path::PathBuf;

use crate::ast::{AstNode, AstValue};

/// `send_file(path, disposition: "inline")` as the Ruby analyzer reports it.
pub fn send_file_call() -> AstNode {
    let disposition = AstNode::new("HashLiteral").with(
        "array",
        vec![
            AstValue::from(
                AstNode::new("SymbolLiteral").with("value", AstValue::symbol("disposition")),
            ),
            AstValue::from(AstNode::new("StringLiteral").with("string", "inline")),
        ],
    );
    AstNode::new("SendWithArguments")
        .with("name", AstValue::symbol("send_file"))
        .with("line", 3_i64)
        .with("receiver", AstValue::Nil)
        .with(
            "arguments",
            AstNode::new("ActualArguments").with("array", vec![AstValue::from(disposition)]),
        )
}

/// Write `contents` to `name` inside a fresh temp directory. The directory
/// is removed when the returned guard drops.
pub fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

//! Serialized AST nodes that patterns can be evaluated against.
//!
//! Analyzers that do not link against this crate can dump their trees as
//! JSON or YAML:
//!
//! ```json
//! {"type": "SendWithArguments",
//!  "attributes": {"name": {"sym": "send_file"}, "line": 3, "receiver": null}}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::pattern::{Literal, Target, TargetValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNode {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AstValue>,
}

/// An attribute value. Plain strings are string values; symbols are
/// written `{"sym": "name"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AstValue {
    Nil,
    Boolean(bool),
    Integer(i64),
    String(String),
    Symbol { sym: String },
    List(Vec<AstValue>),
    Node(AstNode),
}

impl AstNode {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<AstValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid JSON AST")
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yml::from_str(text).context("invalid YAML AST")
    }

    /// Load a node from a `.json`, `.yml` or `.yaml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let node = match ext {
            "json" => Self::from_json(&contents),
            "yml" | "yaml" => Self::from_yaml(&contents),
            _ => bail!("{}: unsupported AST file extension {ext:?}", path.display()),
        };
        node.with_context(|| format!("failed to load {}", path.display()))
    }

    /// Visit this node and every node nested in its attributes, preorder.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a AstNode)) {
        visit(self);
        for value in self.attributes.values() {
            value.walk(visit);
        }
    }

    /// The `line` attribute, when the analyzer recorded one.
    pub fn line(&self) -> Option<i64> {
        match self.attributes.get("line") {
            Some(AstValue::Integer(line)) => Some(*line),
            _ => None,
        }
    }
}

impl AstValue {
    pub fn symbol(name: impl Into<String>) -> Self {
        AstValue::Symbol { sym: name.into() }
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a AstNode)) {
        match self {
            AstValue::Node(node) => node.walk(visit),
            AstValue::List(items) => {
                for item in items {
                    item.walk(visit);
                }
            }
            _ => {}
        }
    }

    fn as_target(&self) -> TargetValue<'_, AstNode> {
        match self {
            AstValue::Nil => TargetValue::Nil,
            AstValue::Boolean(b) => TargetValue::Boolean(*b),
            AstValue::Integer(n) => TargetValue::Integer(*n),
            AstValue::String(s) => TargetValue::String(s),
            AstValue::Symbol { sym } => TargetValue::Symbol(sym),
            AstValue::List(items) => TargetValue::List(items.iter().map(Self::as_target).collect()),
            AstValue::Node(node) => TargetValue::Node(node),
        }
    }
}

impl Target for AstNode {
    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn attribute(&self, name: &str) -> Option<TargetValue<'_, Self>> {
        self.attributes.get(name).map(AstValue::as_target)
    }
}

impl From<i64> for AstValue {
    fn from(n: i64) -> Self {
        AstValue::Integer(n)
    }
}

impl From<bool> for AstValue {
    fn from(b: bool) -> Self {
        AstValue::Boolean(b)
    }
}

impl From<&str> for AstValue {
    fn from(s: &str) -> Self {
        AstValue::String(s.to_string())
    }
}

impl From<AstNode> for AstValue {
    fn from(node: AstNode) -> Self {
        AstValue::Node(node)
    }
}

impl From<Vec<AstValue>> for AstValue {
    fn from(items: Vec<AstValue>) -> Self {
        AstValue::List(items)
    }
}

impl From<Literal> for AstValue {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Integer(n) => AstValue::Integer(n),
            Literal::String(s) => AstValue::String(s),
            Literal::Symbol(sym) => AstValue::Symbol { sym },
            Literal::Boolean(b) => AstValue::Boolean(b),
            Literal::Nil => AstValue::Nil,
        }
    }
}

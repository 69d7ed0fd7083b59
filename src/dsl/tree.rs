//! The neutral Map/List/Scalar tree the builder produces.

use crate::ordered_map::OrderedMap;
use crate::pattern::lexer::{is_class_name, is_var_name};
use crate::pattern::{Matcher, NodeMatcher, parse};

use super::error::TreeError;

/// Scalars share the pattern language's literal kinds.
pub use crate::pattern::Literal as Scalar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericTree {
    Map(OrderedMap<GenericTree>),
    List(Vec<GenericTree>),
    Scalar(Scalar),
    /// Pattern text spliced into the rendering verbatim, e.g.
    /// `:send_file | :send_data`.
    Pattern(String),
}

impl GenericTree {
    pub fn empty_map() -> Self {
        GenericTree::Map(OrderedMap::new())
    }

    /// `{key: value}`
    pub fn pair(key: impl Into<String>, value: impl Into<GenericTree>) -> Self {
        let mut map = OrderedMap::new();
        map.insert(key, value.into());
        GenericTree::Map(map)
    }

    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<GenericTree>,
    {
        GenericTree::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }

    pub fn list(items: impl IntoIterator<Item = GenericTree>) -> Self {
        GenericTree::List(items.into_iter().collect())
    }

    pub fn as_map(&self) -> Option<&OrderedMap<GenericTree>> {
        match self {
            GenericTree::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key of a `Map`.
    pub fn get(&self, key: &str) -> Option<&GenericTree> {
        self.as_map()?.get(key)
    }

    /// Read the tree directly as a matcher specification: a one-entry map
    /// keyed by a type name is a node, its map value holds the attributes,
    /// scalars are literals, lists are arrays, and pattern fragments are
    /// compiled.
    pub fn to_matcher(&self) -> Result<Matcher, TreeError> {
        match self {
            GenericTree::Scalar(scalar) => Ok(Matcher::Literal(scalar.clone())),
            GenericTree::Pattern(text) => parse(text).map_err(|source| TreeError::Pattern {
                text: text.clone(),
                source,
            }),
            GenericTree::List(items) => items
                .iter()
                .map(GenericTree::to_matcher)
                .collect::<Result<_, _>>()
                .map(Matcher::Array),
            GenericTree::Map(map) => {
                let mut entries = map.iter();
                match (entries.next(), entries.next()) {
                    (Some((type_name, body)), None) => node_matcher(type_name, body),
                    _ => Err(TreeError::NotANode { entries: map.len() }),
                }
            }
        }
    }
}

fn node_matcher(type_name: &str, body: &GenericTree) -> Result<Matcher, TreeError> {
    if !is_class_name(type_name) {
        return Err(TreeError::InvalidTypeName(type_name.to_string()));
    }
    let mut node = NodeMatcher::new(type_name);
    match body {
        GenericTree::Scalar(Scalar::Nil) => {}
        GenericTree::Map(attributes) => {
            for (name, value) in attributes.iter() {
                if !is_var_name(name) {
                    return Err(TreeError::InvalidAttributeName(name.to_string()));
                }
                node.attributes.insert(name, value.to_matcher()?);
            }
        }
        _ => return Err(TreeError::InvalidAttributes(type_name.to_string())),
    }
    Ok(Matcher::Node(node))
}

impl From<Scalar> for GenericTree {
    fn from(scalar: Scalar) -> Self {
        GenericTree::Scalar(scalar)
    }
}

impl From<i64> for GenericTree {
    fn from(n: i64) -> Self {
        GenericTree::Scalar(Scalar::Integer(n))
    }
}

impl From<bool> for GenericTree {
    fn from(b: bool) -> Self {
        GenericTree::Scalar(Scalar::Boolean(b))
    }
}

/// Strings are pattern text, not string literals; use
/// [`Scalar::string`] for a quoted literal.
impl From<&str> for GenericTree {
    fn from(text: &str) -> Self {
        GenericTree::Pattern(text.to_string())
    }
}

impl From<String> for GenericTree {
    fn from(text: String) -> Self {
        GenericTree::Pattern(text)
    }
}

impl From<OrderedMap<GenericTree>> for GenericTree {
    fn from(map: OrderedMap<GenericTree>) -> Self {
        GenericTree::Map(map)
    }
}

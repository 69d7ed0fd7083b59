use thiserror::Error;

use crate::pattern::ParseError;

/// Conflicting arguments to a builder call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("call `{name}` has a block, so its only allowed argument is the list marker")]
    BlockWithArgument { name: String },

    #[error("call `{name}` passes the list marker without a block")]
    ListMarkerWithoutBlock { name: String },
}

/// A generic tree that does not describe a matcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("expected a single node entry, found {entries} entries")]
    NotANode { entries: usize },

    #[error("`{0}` is not a node type name")]
    InvalidTypeName(String),

    #[error("`{0}` is not an attribute name")]
    InvalidAttributeName(String),

    #[error("attributes of `{0}` must be a map")]
    InvalidAttributes(String),

    #[error("pattern fragment {text:?}: {source}")]
    Pattern { text: String, source: ParseError },
}

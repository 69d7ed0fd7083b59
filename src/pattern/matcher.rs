//! Compiled patterns and their evaluation against target nodes.
//!
//! A [`Matcher`] is an immutable tree. `Display` renders it as canonical
//! pattern text, which [`parse`](super::parse) turns back into an equal tree.

use std::fmt;

use super::target::{Target, TargetValue};
use crate::ordered_map::OrderedMap;

/// A scalar value a pattern can require.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Integer(i64),
    String(String),
    /// Symbol name without the leading colon.
    Symbol(String),
    Boolean(bool),
    Nil,
}

impl Literal {
    pub fn string(s: impl Into<String>) -> Self {
        Literal::String(s.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Literal::Symbol(name.into())
    }

    /// Kind and value must both agree: `1`, `"1"` and `:1` are all distinct.
    pub fn matches<T: ?Sized>(&self, value: &TargetValue<'_, T>) -> bool {
        match (self, value) {
            (Literal::Integer(a), TargetValue::Integer(b)) => a == b,
            (Literal::String(a), TargetValue::String(b)) => a == b,
            (Literal::Symbol(a), TargetValue::Symbol(b)) => a == b,
            (Literal::Boolean(a), TargetValue::Boolean(b)) => a == b,
            (Literal::Nil, TargetValue::Nil) => true,
            _ => false,
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Integer(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::String(s) => write_quoted(f, s),
            Literal::Symbol(name) => write!(f, ":{name}"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Nil => f.write_str("nil"),
        }
    }
}

/// Quote a string literal. Strings carry no escapes, so double quotes are
/// used unless the text itself contains one.
pub(crate) fn write_quoted(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    if s.contains('"') {
        write!(f, "'{s}'")
    } else {
        write!(f, "\"{s}\"")
    }
}

/// `TypeName<attr = matcher, ...>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMatcher {
    pub type_name: String,
    pub attributes: OrderedMap<Matcher>,
}

impl NodeMatcher {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: OrderedMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.attributes.insert(name, matcher.into());
        self
    }

    /// Exact type equality plus every listed attribute. Attributes the
    /// pattern does not mention are ignored.
    pub fn matches_node<T: Target + ?Sized>(&self, node: &T) -> bool {
        node.type_tag() == self.type_name
            && self.attributes.iter().all(|(name, matcher)| {
                node.attribute(name)
                    .is_some_and(|value| matcher.matches_value(&value))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    Literal(Literal),
    Node(NodeMatcher),
    /// Two or more alternatives, tried in order.
    Choice(Vec<Matcher>),
    /// Element-wise match against a list of the same length.
    Array(Vec<Matcher>),
}

impl Matcher {
    pub fn node(type_name: impl Into<String>) -> NodeMatcher {
        NodeMatcher::new(type_name)
    }

    /// Build a choice, flattening nested choices and unwrapping a single
    /// alternative.
    pub fn choice(alternatives: impl IntoIterator<Item = Matcher>) -> Matcher {
        let mut flat = Vec::new();
        for alt in alternatives {
            match alt {
                Matcher::Choice(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Matcher::Choice(flat)
        }
    }

    /// Evaluate against a top-level node.
    pub fn matches<T: Target + ?Sized>(&self, target: &T) -> bool {
        self.matches_value(&TargetValue::Node(target))
    }

    /// Evaluate against any attribute value.
    pub fn matches_value<T: Target + ?Sized>(&self, value: &TargetValue<'_, T>) -> bool {
        match self {
            Matcher::Literal(literal) => literal.matches(value),
            Matcher::Node(node) => match value {
                TargetValue::Node(target) => node.matches_node(*target),
                _ => false,
            },
            Matcher::Choice(alternatives) => alternatives.iter().any(|alt| alt.matches_value(value)),
            Matcher::Array(elements) => match value {
                TargetValue::List(items) => {
                    items.len() == elements.len()
                        && elements
                            .iter()
                            .zip(items)
                            .all(|(matcher, item)| matcher.matches_value(item))
                }
                _ => false,
            },
        }
    }
}

/// Evaluate `matcher` against `target`. Never fails: a type mismatch or a
/// missing attribute is just `false`.
pub fn matches<T: Target + ?Sized>(matcher: &Matcher, target: &T) -> bool {
    matcher.matches(target)
}

impl From<Literal> for Matcher {
    fn from(literal: Literal) -> Self {
        Matcher::Literal(literal)
    }
}

impl From<NodeMatcher> for Matcher {
    fn from(node: NodeMatcher) -> Self {
        Matcher::Node(node)
    }
}

impl From<i64> for Matcher {
    fn from(n: i64) -> Self {
        Matcher::Literal(Literal::Integer(n))
    }
}

impl From<bool> for Matcher {
    fn from(b: bool) -> Self {
        Matcher::Literal(Literal::Boolean(b))
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Matcher], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for NodeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<", self.type_name)?;
        for (i, (name, matcher)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {matcher}")?;
        }
        f.write_str(">")
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Literal(literal) => write!(f, "{literal}"),
            Matcher::Node(node) => write!(f, "{node}"),
            Matcher::Choice(alternatives) => write_joined(f, alternatives, " | "),
            Matcher::Array(elements) => {
                f.write_str("[")?;
                write_joined(f, elements, ", ")?;
                f.write_str("]")
            }
        }
    }
}

//! Canonical pattern text for a [`GenericTree`].
//!
//! The inverse of parsing: a builder tree rendered here parses back into the
//! matcher the tree describes.

use std::fmt;

use super::tree::{GenericTree, Scalar};

/// Render `tree` as pattern text.
pub fn to_canonical_text(tree: &GenericTree) -> String {
    tree.to_string()
}

fn starts_uppercase(key: &str) -> bool {
    key.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn write_tree(f: &mut impl fmt::Write, tree: &GenericTree) -> fmt::Result {
    match tree {
        GenericTree::Map(entries) => {
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                if starts_uppercase(key) {
                    write!(f, "{key}<")?;
                    // A nil body is the same as an empty one.
                    if !matches!(value, GenericTree::Scalar(Scalar::Nil)) {
                        write_tree(f, value)?;
                    }
                    f.write_str(">")?;
                } else {
                    write!(f, "{key} = ")?;
                    write_tree(f, value)?;
                }
            }
            Ok(())
        }
        GenericTree::List(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_tree(f, item)?;
            }
            f.write_str("]")
        }
        GenericTree::Scalar(scalar) => write!(f, "{scalar}"),
        GenericTree::Pattern(text) => f.write_str(text),
    }
}

impl fmt::Display for GenericTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self)
    }
}

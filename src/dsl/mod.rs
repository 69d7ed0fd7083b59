//! Tree-builder DSL and canonical serializer.
//!
//! Patterns can be written as text or assembled through [`Builder`], whose
//! output renders back to text with [`to_canonical_text`].

pub mod builder;
pub mod error;
pub mod naming;
pub mod serialize;
pub mod tree;

pub use builder::{Argument, Block, Builder};
pub use error::{BuildError, TreeError};
pub use naming::{Registry, callable_name};
pub use serialize::to_canonical_text;
pub use tree::{GenericTree, Scalar};

//! Programmatic construction of pattern trees.
//!
//! A build runs a closure against a [`Builder`]; every call the closure makes
//! names an entry and optionally carries an argument and a nested block:
//!
//! ```
//! use astmatch::dsl::{Builder, to_canonical_text};
//!
//! let tree = Builder::build(false, |b| {
//!     b.node("send_with_arguments", |b| {
//!         b.set("name", ":send_file | :send_data");
//!     });
//! })
//! .unwrap();
//! assert_eq!(
//!     to_canonical_text(&tree),
//!     "SendWithArguments<name = :send_file | :send_data>"
//! );
//! ```

use crate::ordered_map::OrderedMap;

use super::error::BuildError;
use super::naming::Registry;
use super::tree::GenericTree;

/// The optional argument of a builder call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Build the call's block as a list instead of a map.
    ListMarker,
    Value(GenericTree),
}

/// A nested construction block.
pub type Block<'b, 'r> = &'b mut dyn FnMut(&mut Builder<'r>);

#[derive(Debug)]
enum Root {
    Map(OrderedMap<GenericTree>),
    List(Vec<GenericTree>),
}

impl From<Root> for GenericTree {
    fn from(root: Root) -> Self {
        match root {
            Root::Map(map) => GenericTree::Map(map),
            Root::List(items) => GenericTree::List(items),
        }
    }
}

pub struct Builder<'r> {
    registry: &'r Registry,
    root: Root,
    error: Option<BuildError>,
}

impl Builder<'static> {
    /// Run `block` against a fresh builder using the bundled registry.
    pub fn build(
        as_list: bool,
        block: impl FnOnce(&mut Builder<'static>),
    ) -> Result<GenericTree, BuildError> {
        Builder::build_with(Registry::global(), as_list, block)
    }
}

impl<'r> Builder<'r> {
    fn new(registry: &'r Registry, as_list: bool) -> Self {
        let root = if as_list {
            Root::List(Vec::new())
        } else {
            Root::Map(OrderedMap::new())
        };
        Self {
            registry,
            root,
            error: None,
        }
    }

    /// Like [`Builder::build`] with a caller-supplied registry.
    pub fn build_with(
        registry: &'r Registry,
        as_list: bool,
        block: impl FnOnce(&mut Builder<'r>),
    ) -> Result<GenericTree, BuildError> {
        let mut builder = Builder::new(registry, as_list);
        block(&mut builder);
        builder.finish()
    }

    fn finish(self) -> Result<GenericTree, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(self.root.into())
    }

    /// Keep the first usage error; later calls still run.
    fn record_error(&mut self, err: BuildError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn build_nested(&mut self, as_list: bool, block: Block<'_, 'r>) -> GenericTree {
        let mut nested = Builder::new(self.registry, as_list);
        block(&mut nested);
        let error = nested.error.take();
        if let Some(err) = error {
            self.record_error(err);
        }
        nested.root.into()
    }

    fn add_element(&mut self, key: &str, item: GenericTree) {
        match &mut self.root {
            Root::Map(map) => {
                map.insert(key, item);
            }
            Root::List(items) => items.push(GenericTree::pair(key, item)),
        }
    }

    /// The single dispatch point for builder calls.
    ///
    /// `name` is resolved through the registry (`send_with_arguments` →
    /// `SendWithArguments`) and used literally when unknown. Returns the
    /// one-entry map built for a call that carries a plain value and no
    /// block; such calls record nothing themselves, the result is meant to
    /// be passed on as another call's argument.
    pub fn call(
        &mut self,
        name: &str,
        argument: Option<Argument>,
        block: Option<Block<'_, 'r>>,
    ) -> Option<GenericTree> {
        let registry = self.registry;
        let key = registry.resolve(name).unwrap_or(name);

        match (argument, block) {
            (Some(Argument::ListMarker), Some(block)) => {
                log::trace!("builder: {key} <- list block");
                let items = self.build_nested(true, block);
                self.add_element(key, items);
                None
            }
            (None, Some(block)) => {
                log::trace!("builder: {key} <- map block");
                let map = self.build_nested(false, block);
                self.add_element(key, map);
                None
            }
            (Some(Argument::Value(_)), Some(_)) => {
                self.record_error(BuildError::BlockWithArgument {
                    name: name.to_string(),
                });
                None
            }
            (Some(Argument::ListMarker), None) => {
                self.record_error(BuildError::ListMarkerWithoutBlock {
                    name: name.to_string(),
                });
                None
            }
            (Some(Argument::Value(value @ (GenericTree::Map(_) | GenericTree::Pattern(_)))), None) => {
                log::trace!("builder: {key} <- {value}");
                self.add_element(key, value);
                None
            }
            (Some(Argument::Value(value)), None) => Some(GenericTree::pair(key, value)),
            (None, None) => Some(GenericTree::pair(key, GenericTree::Scalar(super::Scalar::Nil))),
        }
    }

    /// `name do ... end`: a nested map.
    pub fn node(&mut self, name: &str, mut block: impl FnMut(&mut Builder<'r>)) {
        self.call(name, None, Some(&mut block));
    }

    /// `name(:array) do ... end`: a nested list keeping same-named siblings.
    pub fn list(&mut self, name: &str, mut block: impl FnMut(&mut Builder<'r>)) {
        self.call(name, Some(Argument::ListMarker), Some(&mut block));
    }

    /// `name(value)`. Maps and pattern text are recorded under `name`; any
    /// other value comes back as `{name: value}`.
    pub fn set(&mut self, name: &str, value: impl Into<GenericTree>) -> Option<GenericTree> {
        self.call(name, Some(Argument::Value(value.into())), None)
    }
}

//! The interface an analyzer's AST nodes expose to the matcher.

/// A node that patterns can be evaluated against.
///
/// Implemented by the caller's own AST type. Attribute absence is a normal
/// outcome and simply makes any matcher that asks for the attribute fail.
pub trait Target {
    /// The node's type name, compared exactly against `Foo` in `Foo<...>`.
    fn type_tag(&self) -> &str;

    /// Look up an attribute by name.
    fn attribute(&self, name: &str) -> Option<TargetValue<'_, Self>>;
}

/// The value of a target attribute.
#[derive(Debug)]
pub enum TargetValue<'a, T: ?Sized> {
    Integer(i64),
    String(&'a str),
    Symbol(&'a str),
    Boolean(bool),
    Nil,
    Node(&'a T),
    List(Vec<TargetValue<'a, T>>),
}

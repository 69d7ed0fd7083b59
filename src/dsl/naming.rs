//! Concept names and the builder identifiers derived from them.
//!
//! Every AST concept (`SendWithArguments`) gets a snake-case identifier
//! (`send_with_arguments`) that builder calls use to refer to it. The table
//! is fixed at startup and only ever read.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Identifiers that would collide with keywords of the languages patterns
/// are written for. Their callable form gets an extra leading underscore.
pub const RESERVED_WORDS: &[&str] = &[
    "for", "if", "alias", "next", "not", "super", "when", "case", "while", "yield", "class",
    "module", "and", "break", "send",
];

/// Node types of the Ruby AST the bundled registry knows about.
pub const CONCEPT_NAMES: &[&str] = &[
    // ── Literals ──────────────────────────────────────────────────────────
    "ArrayLiteral",
    "EmptyArray",
    "FalseLiteral",
    "FixnumLiteral",
    "FloatLiteral",
    "HashLiteral",
    "NilLiteral",
    "NumberLiteral",
    "Range",
    "RangeExclude",
    "RegexLiteral",
    "StringLiteral",
    "SymbolLiteral",
    "TrueLiteral",
    "DynamicString",
    "DynamicSymbol",
    "DynamicExecuteString",
    "DynamicRegex",
    "DynamicOnceRegex",
    "ExecuteString",
    "ToString",
    // ── Sends ─────────────────────────────────────────────────────────────
    "Send",
    "SendWithArguments",
    "SendFastNew",
    "AttributeAssignment",
    "ElementAssignment",
    "ActualArguments",
    "BlockPass",
    "CollectSplat",
    "ConcatArgs",
    "PushArgs",
    "SplatValue",
    "EmptySplat",
    "Iter",
    "For",
    "Negate",
    "Super",
    "ZSuper",
    "Yield",
    "Self",
    // ── Control flow ──────────────────────────────────────────────────────
    "Case",
    "ReceiverCase",
    "When",
    "SplatWhen",
    "If",
    "While",
    "Until",
    "Match",
    "Match2",
    "Match3",
    "Flip2",
    "Flip3",
    "Break",
    "Next",
    "Redo",
    "Retry",
    "Return",
    "Begin",
    "Ensure",
    "Rescue",
    "RescueCondition",
    "RescueSplat",
    // ── Operators ─────────────────────────────────────────────────────────
    "And",
    "Or",
    "Not",
    "OpAssign1",
    "OpAssign2",
    "OpAssignAnd",
    "OpAssignOr",
    // ── Definitions ───────────────────────────────────────────────────────
    "Alias",
    "VAlias",
    "Undef",
    "Block",
    "Define",
    "DefineSingleton",
    "FormalArguments",
    "BlockArgument",
    "DefaultArguments",
    "Class",
    "ClassName",
    "SClass",
    "Module",
    "ModuleName",
    "Defined",
    // ── Variables and constants ───────────────────────────────────────────
    "BackRef",
    "NthRef",
    "ClassVariableAccess",
    "ClassVariableAssignment",
    "GlobalVariableAccess",
    "GlobalVariableAssignment",
    "InstanceVariableAccess",
    "InstanceVariableAssignment",
    "LocalVariableAccess",
    "LocalVariableAssignment",
    "MultipleAssignment",
    "SplatAssignment",
    "ConstantAccess",
    "ConstantAssignment",
    "ScopedConstant",
    "ToplevelConstant",
];

/// Derive the builder identifier for a concept name: `_` before every
/// upper-case letter but the first, lower-cased, reserved words prefixed
/// with `_`.
pub fn callable_name(concept: &str) -> String {
    let mut out = String::with_capacity(concept.len() + 4);
    for (i, ch) in concept.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    if RESERVED_WORDS.contains(&out.as_str()) {
        out.insert(0, '_');
    }
    out
}

/// Read-only lookup from builder identifiers to concept names.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    by_callable: HashMap<String, String>,
}

static DEFAULT_REGISTRY: LazyLock<Registry> =
    LazyLock::new(|| Registry::from_concepts(CONCEPT_NAMES.iter().copied()));

impl Registry {
    /// The registry covering [`CONCEPT_NAMES`].
    pub fn global() -> &'static Registry {
        &DEFAULT_REGISTRY
    }

    pub fn from_concepts<I, S>(concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let by_callable = concepts
            .into_iter()
            .map(|concept| {
                let concept = concept.into();
                (callable_name(&concept), concept)
            })
            .collect();
        Self { by_callable }
    }

    /// Concept name for a builder identifier, if it names one.
    pub fn resolve(&self, callable: &str) -> Option<&str> {
        self.by_callable.get(callable).map(String::as_str)
    }

    pub fn contains(&self, callable: &str) -> bool {
        self.by_callable.contains_key(callable)
    }

    pub fn len(&self) -> usize {
        self.by_callable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_callable.is_empty()
    }
}

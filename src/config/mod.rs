use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_yml::Value;

use crate::pattern::{Matcher, Target, parse};

/// A pattern compiled from a pattern-set file.
#[derive(Debug, Clone)]
pub struct NamedPattern {
    pub name: String,
    pub source: String,
    pub matcher: Matcher,
}

/// Named patterns loaded from YAML:
///
/// ```yaml
/// patterns:
///   Security/SendFileInline: 'SendWithArguments<name = :send_file | :send_data>'
///   Lint/Answer: 'FixnumLiteral<value = 42>'
/// ```
///
/// Every pattern is compiled at load time, in file order.
#[derive(Debug, Default)]
pub struct PatternSet {
    path: Option<PathBuf>,
    patterns: Vec<NamedPattern>,
}

impl PatternSet {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pattern set {}", path.display()))?;
        let mut set = Self::from_yaml(&contents)
            .with_context(|| format!("failed to load pattern set {}", path.display()))?;
        set.path = Some(path.to_path_buf());
        log::debug!(
            "loaded {} patterns from {}",
            set.patterns.len(),
            path.display()
        );
        Ok(set)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let raw: Value = serde_yml::from_str(contents).context("invalid YAML")?;

        let Some(entries) = raw.get("patterns") else {
            bail!("missing top-level `patterns` mapping");
        };
        let entries = match entries {
            Value::Mapping(map) => map,
            // `patterns:` with nothing under it
            Value::Null => return Ok(Self::default()),
            _ => bail!("`patterns` must be a mapping of names to pattern text"),
        };

        let mut patterns = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let Some(name) = key.as_str() else {
                bail!("pattern names must be strings, found {key:?}");
            };
            let Some(source) = value.as_str() else {
                bail!("pattern {name}: expected pattern text");
            };
            let matcher = parse(source).with_context(|| format!("pattern {name}"))?;
            patterns.push(NamedPattern {
                name: name.to_string(),
                source: source.to_string(),
                matcher,
            });
        }

        Ok(Self {
            path: None,
            patterns,
        })
    }

    /// The file this set was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn patterns(&self) -> &[NamedPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns accepting `target`, in set order.
    pub fn matching<'a, T: Target + ?Sized>(
        &'a self,
        target: &'a T,
    ) -> impl Iterator<Item = &'a NamedPattern> + 'a {
        self.patterns
            .iter()
            .filter(move |pattern| pattern.matcher.matches(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstNode;
    use crate::testutil::{send_file_call, write_temp};

    const SET: &str = "patterns:\n  \
        Security/SendFileInline: 'SendWithArguments<name = :send_file | :send_data>'\n  \
        Lint/Answer: 'FixnumLiteral<value = 42>'\n";

    #[test]
    fn patterns_keep_file_order() {
        let set = PatternSet::from_yaml(SET).unwrap();
        let names: Vec<&str> = set.patterns().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Security/SendFileInline", "Lint/Answer"]);
        assert_eq!(set.patterns()[1].source, "FixnumLiteral<value = 42>");
        assert!(set.path().is_none());
    }

    #[test]
    fn matching_filters_by_target() {
        let set = PatternSet::from_yaml(SET).unwrap();
        let call = send_file_call();
        let hits: Vec<&str> = set.matching(&call).map(|p| p.name.as_str()).collect();
        assert_eq!(hits, ["Security/SendFileInline"]);

        let answer = AstNode::new("FixnumLiteral").with("value", 42_i64);
        let hits: Vec<&str> = set.matching(&answer).map(|p| p.name.as_str()).collect();
        assert_eq!(hits, ["Lint/Answer"]);
    }

    #[test]
    fn bad_pattern_names_the_pattern() {
        let err = PatternSet::from_yaml("patterns:\n  Broken/One: 'Foo<a = >'\n").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("pattern Broken/One"), "{message}");
        assert!(message.contains("Unexpected token: \">\"."), "{message}");
    }

    #[test]
    fn non_text_pattern_is_an_error() {
        let err = PatternSet::from_yaml("patterns:\n  Lint/Number: 42\n").unwrap_err();
        assert!(err.to_string().contains("Lint/Number"));
    }

    #[test]
    fn missing_patterns_key_is_an_error() {
        assert!(PatternSet::from_yaml("rules: {}\n").is_err());
        assert!(PatternSet::from_yaml("patterns: [a, b]\n").is_err());
    }

    #[test]
    fn empty_patterns_mapping() {
        assert!(PatternSet::from_yaml("patterns:\n").unwrap().is_empty());
        assert!(PatternSet::from_yaml("patterns: {}\n").unwrap().is_empty());
    }

    #[test]
    fn load_records_path() {
        let (_dir, path) = write_temp("patterns.yml", SET);
        let set = PatternSet::load(&path).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.path(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = PatternSet::load(Path::new("/nonexistent/patterns.yml")).unwrap_err();
        assert!(err.to_string().contains("failed to read pattern set"));
    }
}

//! Format registry for tree serialization
//!
//! Formats are registered once and picked by name, usually from the
//! `--format` flag or the `output.format` configuration key.

use crate::chunk::ast::Tree;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// A named way of turning a tree into text
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "bracket", "treeviz")
    fn name(&self) -> &str;

    /// Render a tree in this format
    fn serialize(&self, tree: &Tree) -> Result<String, FormatError>;

    /// One-line summary shown by `list-formats`
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of tree formatters, keyed by format name
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Look up a formatter by name
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Whether a format with this name is registered
    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a tree using the named format
    pub fn serialize(&self, tree: &Tree, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(tree)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::BracketFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ast::Node;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _tree: &Tree) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    fn sample() -> Tree {
        Tree::new("S", vec![Node::leaf("Hi", "UH")])
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());

        registry.register(TestFormatter);
        assert!(registry.has("test"));
        assert_eq!(registry.get("test").map(|f| f.description()), Some("Test formatter"));
        assert_eq!(registry.serialize(&sample(), "test").unwrap(), "test output");
    }

    #[test]
    fn test_registry_format_not_found() {
        let registry = FormatRegistry::new();
        let err = registry.serialize(&sample(), "nonexistent").unwrap_err();
        assert_eq!(err, FormatError::FormatNotFound("nonexistent".to_string()));
        assert_eq!(err.to_string(), "Format 'nonexistent' not found");
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["bracket", "json", "treeviz", "yaml"]
        );
        assert_eq!(registry.serialize(&sample(), "bracket").unwrap(), "(S Hi/UH)\n");
    }
}

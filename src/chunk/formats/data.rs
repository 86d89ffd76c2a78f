//! Serde-backed formats
//!
//! Leaves serialize as `{"kind": "leaf", "text", "tag"}`, chunks as
//! `{"kind": "chunk", "label", "children"}`; the root is a plain
//! `{"label", "children"}` object.

use super::registry::{FormatError, Formatter};
use crate::chunk::ast::Tree;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tree)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        serde_yaml::to_string(tree).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML document"
    }
}

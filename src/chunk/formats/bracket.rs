//! Bracketed tree notation, one tree per line

use super::registry::{FormatError, Formatter};
use crate::chunk::ast::Tree;

pub struct BracketFormatter;

impl Formatter for BracketFormatter {
    fn name(&self) -> &str {
        "bracket"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(format!("{}\n", tree))
    }

    fn description(&self) -> &str {
        "Single-line bracketed tree, e.g. (S (NP the/DT rose/NN))"
    }
}

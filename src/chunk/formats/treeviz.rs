//! Treeviz formatter for chunk trees
//!
//! One line per node, nesting drawn with box connectors, so a tree can be
//! scanned top to bottom:
//!
//! ```text
//! S
//! ├─ VP: bought a red rose
//! │ ├─ bought/VBD
//! │ └─ NP: a red rose
//! │   ├─ a/DT
//! │   ├─ red/JJ
//! │   └─ rose/NN
//! └─ ./.
//! ```
//!
//! Chunk lines show the label and the covered words, truncated to 40
//! characters. Leaf lines show `text/TAG`.

use super::registry::{FormatError, Formatter};
use crate::chunk::ast::{Node, Tree};

const MAX_SPAN_CHARS: usize = 40;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn node_line(node: &Node) -> String {
    match node {
        Node::Leaf(token) => token.to_string(),
        Node::Chunk(chunk) => format!(
            "{}: {}",
            chunk.label,
            truncate(&chunk.span_text(), MAX_SPAN_CHARS)
        ),
    }
}

fn format_node(
    output: &mut String,
    node: &Node,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!("{}{} {}\n", prefix, connector, node_line(node)));

    let children = node.children();
    if !children.is_empty() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        for (i, child) in children.iter().enumerate() {
            format_node(output, child, &child_prefix, i, children.len());
        }
    }
}

pub fn to_treeviz_str(tree: &Tree) -> String {
    let mut output = format!("{}\n", tree.label());
    let children = tree.children();
    for (i, child) in children.iter().enumerate() {
        format_node(&mut output, child, "", i, children.len());
    }
    output
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }

    fn description(&self) -> &str {
        "One node per line with tree connectors"
    }
}

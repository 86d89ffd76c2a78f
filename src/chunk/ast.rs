//! Chunk tree data structures
//!
//! A [`Tree`] is a root [`Chunk`] whose children are [`Node`]s in sentence
//! left-to-right order. A node is either a [`Node::Leaf`] carrying an input
//! [`Token`] unchanged, or a [`Node::Chunk`] created by a matched grammar rule.
//!
//! Flattening the leaves of a tree always reproduces the token sequence it was
//! built from: chunking only ever groups nodes, it never drops, duplicates or
//! reorders them.
//!
//! The tree owns all of its data and has no reference back to the grammar that
//! produced it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the root chunk unless a chunker is configured otherwise
pub const DEFAULT_ROOT_LABEL: &str = "S";

/// A word and its part-of-speech tag, as produced by an external tagger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub tag: String,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.text, self.tag)
    }
}

impl<T: Into<String>, G: Into<String>> From<(T, G)> for Token {
    fn from((text, tag): (T, G)) -> Self {
        Token::new(text, tag)
    }
}

/// A labeled group of contiguous nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub label: String,
    pub children: Vec<Node>,
}

impl Chunk {
    pub fn new(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// All leaf tokens below this chunk, in order
    pub fn leaves(&self) -> Vec<&Token> {
        let mut leaves = Vec::new();
        for child in &self.children {
            child.collect_leaves(&mut leaves);
        }
        leaves
    }

    /// Number of leaf tokens below this chunk
    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(Node::leaf_count).sum()
    }

    /// The covered words joined by single spaces
    pub fn span_text(&self) -> String {
        self.leaves()
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

/// A node of the chunk tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Leaf(Token),
    Chunk(Chunk),
}

impl Node {
    pub fn leaf(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Node::Leaf(Token::new(text, tag))
    }

    pub fn chunk(label: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Chunk(Chunk::new(label, children))
    }

    /// The symbol grammar rules see for this node: a leaf's tag or a chunk's label
    pub fn symbol(&self) -> &str {
        match self {
            Node::Leaf(token) => &token.tag,
            Node::Chunk(chunk) => &chunk.label,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Token> {
        match self {
            Node::Leaf(token) => Some(token),
            Node::Chunk(_) => None,
        }
    }

    pub fn as_chunk(&self) -> Option<&Chunk> {
        match self {
            Node::Leaf(_) => None,
            Node::Chunk(chunk) => Some(chunk),
        }
    }

    /// Children of a chunk; leaves have none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Chunk(chunk) => &chunk.children,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Chunk(chunk) => chunk.leaf_count(),
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Node::Leaf(token) => out.push(token),
            Node::Chunk(chunk) => {
                for child in &chunk.children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(token) => token.fmt(f),
            Node::Chunk(chunk) => chunk.fmt(f),
        }
    }
}

/// The result of chunking one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    pub root: Chunk,
}

impl Tree {
    pub fn new(root_label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            root: Chunk::new(root_label, children),
        }
    }

    pub fn label(&self) -> &str {
        &self.root.label
    }

    /// Top-level nodes, in sentence order
    pub fn children(&self) -> &[Node] {
        &self.root.children
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// The input tokens, recovered in order from the leaves
    pub fn leaves(&self) -> Vec<&Token> {
        self.root.leaves()
    }

    /// Pre-order traversal of every node below the root, with its depth.
    ///
    /// The root's children are at depth 1.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.root.children.iter().rev().map(|n| (1, n)).collect(),
        }
    }

    /// Every chunk with the given label, in pre-order
    pub fn chunks_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Chunk> + 'a {
        self.walk()
            .filter_map(|(_, node)| node.as_chunk())
            .filter(move |chunk| chunk.label == label)
    }

    /// Depth of the deepest node; an empty tree has height 0
    pub fn height(&self) -> usize {
        self.walk().map(|(depth, _)| depth).max().unwrap_or(0)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}

/// Iterator returned by [`Tree::walk`]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

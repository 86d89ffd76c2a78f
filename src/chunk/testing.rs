//! Testing utilities for chunk trees
//!
//! Two tools, used together by unit and integration tests:
//!
//! 1. [`tagged`] builds tokens from `word/TAG` text, so test inputs read like
//!    tagger output instead of long `Token::new` lists.
//! 2. [`assert_tree`] is a fluent assertion API over a [`Tree`]: it checks a
//!    whole subtree shape at once and reports where a mismatch happened.
//!
//! ```rust-example
//! let tree = Chunker::reference().chunk(&tagged("in/IN the/DT house/NN"))?;
//! assert_tree(&tree)
//!     .child_count(1)
//!     .child(0, |pp| {
//!         pp.chunk("PP")
//!             .child(0, |prep| { prep.leaf("in", "IN"); })
//!             .child(1, |np| { np.chunk("NP").tags(&["DT", "NN"]); });
//!     });
//! ```

use crate::chunk::ast::{Node, Token, Tree};
use crate::chunk::input::parse_tagged;

/// Tokens from whitespace separated `word/TAG` items; panics on bad input
pub fn tagged(source: &str) -> Vec<Token> {
    match parse_tagged(source) {
        Ok(tokens) => tokens,
        Err(e) => panic!("invalid tagged test input {:?}: {}", source, e),
    }
}

/// Compact `LABEL[child child]` rendering of a node's shape, without words
pub fn shape(node: &Node) -> String {
    match node {
        Node::Leaf(token) => token.tag.clone(),
        Node::Chunk(chunk) => {
            let children: Vec<_> = chunk.children.iter().map(shape).collect();
            format!("{}[{}]", chunk.label, children.join(" "))
        }
    }
}

/// Shape of a whole tree, see [`shape`]
pub fn tree_shape(tree: &Tree) -> String {
    let children: Vec<_> = tree.children().iter().map(shape).collect();
    format!("{}[{}]", tree.label(), children.join(" "))
}

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a tree
pub fn assert_tree(tree: &Tree) -> TreeAssertion<'_> {
    TreeAssertion { tree }
}

// ============================================================================
// Tree Assertions
// ============================================================================

pub struct TreeAssertion<'a> {
    tree: &'a Tree,
}

impl<'a> TreeAssertion<'a> {
    /// Assert the root label
    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.label(),
            expected,
            "Expected root label {}, tree is {}",
            expected,
            tree_shape(self.tree)
        );
        self
    }

    /// Assert the number of top-level nodes
    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.tree.children().len(),
            expected,
            "Expected {} top-level nodes, tree is {}",
            expected,
            tree_shape(self.tree)
        );
        self
    }

    /// Assert on a top-level node by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.tree.children();
        assert!(
            index < children.len(),
            "Child index {} out of bounds, tree is {}",
            index,
            tree_shape(self.tree)
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("children[{}]", index),
        });
        self
    }

    /// Assert the leaves reproduce the given tokens
    pub fn leaves(self, expected: &[Token]) -> Self {
        let actual: Vec<Token> = self.tree.leaves().into_iter().cloned().collect();
        assert_eq!(actual, expected, "Leaves differ from input");
        self
    }

    /// Assert the word-free shape, e.g. `S[NP[DT NN] VBD]`
    pub fn shape(self, expected: &str) -> Self {
        assert_eq!(tree_shape(self.tree), expected);
        self
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    /// Assert this node is a chunk with the given label
    pub fn chunk(self, label: &str) -> Self {
        match self.node {
            Node::Chunk(chunk) => assert_eq!(
                chunk.label, label,
                "{}: expected chunk {}, found chunk {}",
                self.context, label, chunk.label
            ),
            Node::Leaf(token) => panic!(
                "{}: expected chunk {}, found leaf {}",
                self.context, label, token
            ),
        }
        self
    }

    /// Assert this node is the given leaf
    pub fn leaf(self, text: &str, tag: &str) -> Self {
        match self.node {
            Node::Leaf(token) => {
                assert_eq!(
                    (token.text.as_str(), token.tag.as_str()),
                    (text, tag),
                    "{}: leaf mismatch",
                    self.context
                );
            }
            Node::Chunk(_) => panic!(
                "{}: expected leaf {}/{}, found {}",
                self.context,
                text,
                tag,
                shape(self.node)
            ),
        }
        self
    }

    /// Assert the tags of all leaves below this node, in order
    pub fn tags(self, expected: &[&str]) -> Self {
        let leaves: Vec<&str> = match self.node {
            Node::Leaf(token) => vec![token.tag.as_str()],
            Node::Chunk(chunk) => chunk.leaves().iter().map(|t| t.tag.as_str()).collect(),
        };
        assert_eq!(leaves, expected, "{}: leaf tags differ", self.context);
        self
    }

    /// Assert the number of direct children
    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.children().len(),
            expected,
            "{}: expected {} children, node is {}",
            self.context,
            expected,
            shape(self.node)
        );
        self
    }

    /// Assert on a direct child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.node.children();
        assert!(
            index < children.len(),
            "{}: child index {} out of bounds, node is {}",
            self.context,
            index,
            shape(self.node)
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}

//! Chunking
//!
//! [`Chunker::chunk`] turns a tagged sentence into a [`Tree`]:
//!
//! 1. The working stream starts as one leaf per input token.
//! 2. Each rule of the grammar, in declaration order, makes one left-to-right
//!    pass over the stream and replaces every span it matches with a chunk
//!    carrying the rule's label (see [engine]).
//! 3. Whatever is left, leaves and chunks alike, becomes the children of the
//!    root.
//!
//! Because each pass reads the stream the previous passes produced, a rule can
//! use an earlier rule's label as a symbol: with `NP` declared first,
//! `PP: {<IN><NP>}` sees the noun phrases as single `NP` symbols. There is no
//! iteration to a fixed point; rule order is the only composition mechanism.
//!
//! The work is O(rules × tokens) and a chunker holds no mutable state, so one
//! instance can serve any number of threads at once.

pub mod engine;

use crate::chunk::ast::{Node, Token, Tree, DEFAULT_ROOT_LABEL};
use crate::chunk::grammar::{reference_grammar, Grammar};
use std::fmt;
use std::ops::Range;

/// Error raised for a sentence that cannot be chunked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// An input item lacks its text or its tag
    MalformedInput { index: usize, reason: String },
}

impl ChunkError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        ChunkError::MalformedInput {
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::MalformedInput { index, reason } => {
                write!(f, "Malformed input at token {}: {}", index + 1, reason)
            }
        }
    }
}

impl std::error::Error for ChunkError {}

/// One chunk created while chunking, for grammar debugging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleApplication {
    /// Position of the rule in the grammar
    pub rule_index: usize,
    pub label: String,
    /// Input tokens covered by the new chunk
    pub tokens: Range<usize>,
    pub text: String,
}

impl fmt::Display for RuleApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule {} {} [{}..{}] {}",
            self.rule_index + 1,
            self.label,
            self.tokens.start,
            self.tokens.end,
            self.text
        )
    }
}

/// Applies a grammar to tagged sentences
#[derive(Debug, Clone)]
pub struct Chunker {
    grammar: Grammar,
    root_label: String,
}

impl Chunker {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
        }
    }

    /// A chunker for the reference NP / PP / VP grammar
    pub fn reference() -> Self {
        Self::new(reference_grammar().clone())
    }

    /// Set the label of the root chunk (default `S`)
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Chunk one tagged sentence
    pub fn chunk(&self, tokens: &[Token]) -> Result<Tree, ChunkError> {
        self.chunk_into(tokens, None)
    }

    /// Chunk `(text, tag)` pairs as handed over by a tagger
    pub fn chunk_pairs<I, T, G>(&self, pairs: I) -> Result<Tree, ChunkError>
    where
        I: IntoIterator<Item = (T, G)>,
        T: Into<String>,
        G: Into<String>,
    {
        let tokens: Vec<Token> = pairs.into_iter().map(Token::from).collect();
        self.chunk(&tokens)
    }

    /// Chunk one sentence and also report every chunk each rule created
    pub fn chunk_traced(
        &self,
        tokens: &[Token],
    ) -> Result<(Tree, Vec<RuleApplication>), ChunkError> {
        let mut events = Vec::new();
        let tree = self.chunk_into(tokens, Some(&mut events))?;
        Ok((tree, events))
    }

    fn chunk_into(
        &self,
        tokens: &[Token],
        mut trace: Option<&mut Vec<RuleApplication>>,
    ) -> Result<Tree, ChunkError> {
        validate_tokens(tokens)?;

        let mut stream: Vec<Node> = tokens.iter().cloned().map(Node::Leaf).collect();

        for (rule_index, compiled) in self.grammar.compiled().iter().enumerate() {
            if stream.is_empty() {
                break;
            }
            stream = engine::apply_rule(stream, rule_index, compiled, trace.as_deref_mut());
        }

        Ok(Tree::new(self.root_label.clone(), stream))
    }
}

fn validate_tokens(tokens: &[Token]) -> Result<(), ChunkError> {
    for (index, token) in tokens.iter().enumerate() {
        if token.text.is_empty() {
            return Err(ChunkError::malformed(index, "token has no text"));
        }
        if token.tag.is_empty() {
            return Err(ChunkError::malformed(
                index,
                format!("token '{}' has no tag", token.text),
            ));
        }
    }
    Ok(())
}

//! # tagchunk
//!
//! A shallow syntactic chunker for part-of-speech tagged sentences.
//!
//! The input is a sentence that an external tokenizer and tagger already turned
//! into `(text, tag)` pairs. A [`Grammar`](chunk::grammar::Grammar) of ordered,
//! labeled rules groups contiguous runs of tags into constituents (noun phrases,
//! prepositional phrases, verb phrases). Each rule runs as one left-to-right pass
//! over the stream left behind by the previous rules, so a later rule can use an
//! earlier rule's label as one of its symbols:
//!
//! ```text
//! NP: {<DT>?<JJ.*>*<NN.*>+}
//! PP: {<IN><NP>}
//! VP: {<VB.*><NP|PP>*}
//!
//! bought/VBD a/DT red/JJ rose/NN
//!   => (S (VP bought/VBD (NP a/DT red/JJ rose/NN)))
//! ```
//!
//! File Layout
//!
//! src/chunk
//!   ├── ast         Tokens, nodes and the chunk tree
//!   ├── grammar     Pattern algebra, rules and their compiled matchers
//!   ├── notation    The textual rule notation (logos lexer + chumsky parser)
//!   ├── chunking    The rule-by-rule stream rewriting engine
//!   ├── input       Readers for pre-tagged sentences
//!   ├── formats     Tree serializers for renderers and tooling
//!   ├── glossary    Penn Treebank tag descriptions
//!   ├── config      Layered configuration with embedded defaults
//!   └── testing     Token factories and fluent tree assertions

pub mod chunk;

pub use chunk::ast::{Chunk, Node, Token, Tree};
pub use chunk::chunking::{ChunkError, Chunker};
pub use chunk::grammar::{Grammar, GrammarError, Pattern, Rule};

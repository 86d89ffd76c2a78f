//! Chunk grammars
//!
//! A [`Grammar`] is an ordered list of [`Rule`]s. Order matters: the chunker
//! applies rules in declaration order, each against the stream left behind by
//! the rules before it, so a rule can only see chunk labels produced earlier.
//!
//! Construction validates every rule and compiles its pattern once; afterwards
//! the grammar is immutable and can be shared freely between threads.
//!
//! Validation rejects (see [`GrammarError::InvalidGrammar`]):
//! - rules with an empty label
//! - patterns that can match zero symbols, which would produce empty chunks
//! - malformed patterns (empty alternations, inverted repetition bounds)
//!
//! Rules that mention a chunk label no earlier rule produces are accepted, since
//! such an alternative just never matches, but they are reported through
//! [`Grammar::warnings`] and logged.

pub mod compile;
pub mod pattern;
pub mod reference;

pub use compile::{Matcher, SymbolSeq};
pub use pattern::Pattern;
pub use reference::{reference_grammar, REFERENCE_GRAMMAR};

use crate::chunk::notation::NotationError;
use std::collections::BTreeSet;
use std::fmt;

/// A labeled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub label: String,
    pub pattern: Pattern,
}

impl Rule {
    pub fn new(label: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            label: label.into(),
            pattern,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{{}}}", self.label, self.pattern)
    }
}

/// Error raised while building a grammar
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// A rule failed validation
    InvalidGrammar {
        index: usize,
        label: String,
        reason: String,
    },
    /// A line of grammar notation could not be parsed
    Notation { line: usize, error: NotationError },
    /// The compiled pattern was rejected by the regex engine
    Regex {
        index: usize,
        label: String,
        message: String,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::InvalidGrammar {
                index,
                label,
                reason,
            } => write!(f, "Invalid grammar: rule {} ({}): {}", index + 1, label, reason),
            GrammarError::Notation { line, error } => {
                write!(f, "Grammar notation error on line {}: {}", line, error)
            }
            GrammarError::Regex {
                index,
                label,
                message,
            } => write!(
                f,
                "Could not compile rule {} ({}): {}",
                index + 1,
                label,
                message
            ),
        }
    }
}

impl std::error::Error for GrammarError {}

/// A rule refers to a chunk label that no earlier rule produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarWarning {
    pub index: usize,
    pub label: String,
    pub symbol: String,
}

impl fmt::Display for GrammarWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule {} ({}) refers to <{}>, which no earlier rule produces; that alternative never matches",
            self.index + 1,
            self.label,
            self.symbol
        )
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) rule: Rule,
    pub(crate) matcher: Matcher,
}

/// An ordered, validated and compiled list of rules
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<CompiledRule>,
    warnings: Vec<GrammarWarning>,
}

impl Grammar {
    /// Validate and compile the rules, keeping their order
    pub fn new(rules: Vec<Rule>) -> Result<Self, GrammarError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for (index, rule) in rules.into_iter().enumerate() {
            validate_rule(index, &rule)?;
            let matcher = Matcher::compile(&rule.pattern).map_err(|e| GrammarError::Regex {
                index,
                label: rule.label.clone(),
                message: e.to_string(),
            })?;
            compiled.push(CompiledRule { rule, matcher });
        }

        let warnings = find_unproduced_labels(&compiled);
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        Ok(Self {
            rules: compiled,
            warnings,
        })
    }

    /// The rules, in application order
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Labels of all rules, in order, duplicates removed
    pub fn labels(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.rules()
            .map(|rule| rule.label.as_str())
            .filter(|label| seen.insert(*label))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn warnings(&self) -> &[GrammarWarning] {
        &self.warnings
    }

    pub(crate) fn compiled(&self) -> &[CompiledRule] {
        &self.rules
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.rules() {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

fn validate_rule(index: usize, rule: &Rule) -> Result<(), GrammarError> {
    let invalid = |reason: String| GrammarError::InvalidGrammar {
        index,
        label: rule.label.clone(),
        reason,
    };

    if rule.label.trim().is_empty() {
        return Err(invalid("rule label is empty".to_string()));
    }
    if let Some(reason) = rule.pattern.structural_error() {
        return Err(invalid(reason));
    }
    if rule.pattern.is_nullable() {
        return Err(invalid(format!(
            "pattern {} can match zero tags",
            rule.pattern
        )));
    }
    Ok(())
}

/// Symbols that name some rule's label but are referenced before any rule
/// produced that label
fn find_unproduced_labels(rules: &[CompiledRule]) -> Vec<GrammarWarning> {
    let all_labels: BTreeSet<&str> = rules.iter().map(|c| c.rule.label.as_str()).collect();
    let mut produced: BTreeSet<&str> = BTreeSet::new();
    let mut warnings = Vec::new();

    for (index, compiled) in rules.iter().enumerate() {
        for symbol in compiled.rule.pattern.referenced_symbols() {
            if all_labels.contains(symbol) && !produced.contains(symbol) {
                warnings.push(GrammarWarning {
                    index,
                    label: compiled.rule.label.clone(),
                    symbol: symbol.to_string(),
                });
            }
        }
        produced.insert(compiled.rule.label.as_str());
    }

    warnings
}

//! Pattern algebra over tag symbols
//!
//! A [`Pattern`] describes a run of consecutive symbols. The leaf cases test a
//! single symbol ([`Pattern::Exact`], [`Pattern::Prefix`]); the others combine
//! patterns the way a regular expression does. Symbols are the tags of leaf
//! tokens or the labels of chunks built by earlier rules; patterns never look
//! at token text.
//!
//! `Display` renders a pattern in the rule notation accepted by
//! [`crate::chunk::notation`], e.g. `<DT>?<JJ.*>*<NN.*>+`.

use crate::chunk::notation::parser::is_class_metachar;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// One symbol equal to the tag
    Exact(String),
    /// One symbol starting with the prefix (`NN` covers `NN`, `NNS`, `NNP`, `NNPS`)
    Prefix(String),
    /// The first alternative that lets the whole rule match wins
    Alternation(Vec<Pattern>),
    /// Greedy repetition; `max` of `None` is unbounded
    Repetition {
        pattern: Box<Pattern>,
        min: u32,
        max: Option<u32>,
    },
    Sequence(Vec<Pattern>),
}

impl Pattern {
    pub fn exact(tag: impl Into<String>) -> Self {
        Pattern::Exact(tag.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Pattern::Prefix(prefix.into())
    }

    /// Alternation of the given patterns; a single pattern is returned as is
    pub fn alternation(mut patterns: Vec<Pattern>) -> Self {
        if patterns.len() == 1 {
            return patterns.remove(0);
        }
        Pattern::Alternation(patterns)
    }

    pub fn repeat(pattern: Pattern, min: u32, max: Option<u32>) -> Self {
        Pattern::Repetition {
            pattern: Box::new(pattern),
            min,
            max,
        }
    }

    /// `pattern?`
    pub fn optional(pattern: Pattern) -> Self {
        Self::repeat(pattern, 0, Some(1))
    }

    /// `pattern*`
    pub fn zero_or_more(pattern: Pattern) -> Self {
        Self::repeat(pattern, 0, None)
    }

    /// `pattern+`
    pub fn one_or_more(pattern: Pattern) -> Self {
        Self::repeat(pattern, 1, None)
    }

    /// Concatenation of the given patterns.
    ///
    /// Nested sequences are flattened and a single pattern is returned as is.
    pub fn sequence(patterns: Vec<Pattern>) -> Self {
        let mut flat = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            match pattern {
                Pattern::Sequence(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        Pattern::Sequence(flat)
    }

    /// Fewest symbols any match consumes, or `None` if nothing can match
    pub fn min_len(&self) -> Option<usize> {
        match self {
            Pattern::Exact(_) | Pattern::Prefix(_) => Some(1),
            Pattern::Alternation(alternatives) => {
                alternatives.iter().filter_map(Pattern::min_len).min()
            }
            Pattern::Repetition { pattern, min, .. } => {
                if *min == 0 {
                    Some(0)
                } else {
                    pattern.min_len().map(|len| len.saturating_mul(*min as usize))
                }
            }
            Pattern::Sequence(items) => items
                .iter()
                .try_fold(0usize, |acc, item| item.min_len().map(|len| acc.saturating_add(len))),
        }
    }

    /// Whether the pattern accepts an empty run of symbols
    pub fn is_nullable(&self) -> bool {
        self.min_len() == Some(0)
    }

    /// Symbols named by `Exact` leaves, sorted
    pub fn referenced_symbols(&self) -> BTreeSet<&str> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Pattern::Exact(tag) => {
                out.insert(tag.as_str());
            }
            Pattern::Prefix(_) => {}
            Pattern::Alternation(items) | Pattern::Sequence(items) => {
                for item in items {
                    item.collect_symbols(out);
                }
            }
            Pattern::Repetition { pattern, .. } => pattern.collect_symbols(out),
        }
    }

    /// First structural problem found in the pattern, if any
    pub(crate) fn structural_error(&self) -> Option<String> {
        match self {
            Pattern::Exact(tag) if tag.is_empty() => Some("empty tag in exact match".to_string()),
            Pattern::Exact(_) | Pattern::Prefix(_) => None,
            Pattern::Alternation(items) if items.is_empty() => {
                Some("alternation with no alternatives".to_string())
            }
            Pattern::Alternation(items) | Pattern::Sequence(items) => {
                items.iter().find_map(Pattern::structural_error)
            }
            Pattern::Repetition { pattern, min, max } => match max {
                Some(max) if max < min => Some(format!(
                    "repetition upper bound {} is below lower bound {}",
                    max, min
                )),
                Some(0) => Some("repetition can only match nothing".to_string()),
                _ => pattern.structural_error(),
            },
        }
    }

    /// A single-symbol test that can be written inside one pair of angle brackets
    fn is_class(&self) -> bool {
        match self {
            Pattern::Exact(_) | Pattern::Prefix(_) => true,
            Pattern::Alternation(items) => {
                !items.is_empty()
                    && items
                        .iter()
                        .all(|item| matches!(item, Pattern::Exact(_) | Pattern::Prefix(_)))
            }
            _ => false,
        }
    }

    fn fmt_class_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Exact(tag) => write_escaped(f, tag),
            Pattern::Prefix(prefix) => {
                write_escaped(f, prefix)?;
                write!(f, ".*")
            }
            Pattern::Alternation(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    item.fmt_class_body(f)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn fmt_atom(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_class() {
            write!(f, "<")?;
            self.fmt_class_body(f)?;
            write!(f, ">")
        } else {
            write!(f, "(")?;
            self.fmt_inner(f)?;
            write!(f, ")")
        }
    }

    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Alternation(items) if !self.is_class() => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    item.fmt_inner(f)?;
                }
                Ok(())
            }
            Pattern::Sequence(items) => {
                for item in items {
                    match item {
                        Pattern::Alternation(_) | Pattern::Sequence(_) => item.fmt_atom(f)?,
                        _ => item.fmt_inner(f)?,
                    }
                }
                Ok(())
            }
            Pattern::Repetition { pattern, min, max } => {
                pattern.fmt_atom(f)?;
                match (min, max) {
                    (0, Some(1)) => write!(f, "?"),
                    (0, None) => write!(f, "*"),
                    (1, None) => write!(f, "+"),
                    (min, None) => write!(f, "{{{},}}", min),
                    (min, Some(max)) if min == max => write!(f, "{{{}}}", min),
                    (min, Some(max)) => write!(f, "{{{},{}}}", min, max),
                }
            }
            _ => self.fmt_atom(f),
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, tag: &str) -> fmt::Result {
    for c in tag.chars() {
        if matches!(c, '\\' | '<' | '>' | '|') || c.is_whitespace() || is_class_metachar(c) {
            write!(f, "\\")?;
        }
        write!(f, "{}", c)?;
    }
    Ok(())
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_inner(f)
    }
}

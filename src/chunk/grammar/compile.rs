//! Regex compilation of patterns
//!
//! Matching runs on a string rendering of the node stream rather than on the
//! nodes themselves. Every symbol becomes `<SYMBOL>`, so the stream
//! `[DT, JJ, NP]` is the string `<DT><JJ><NP>`, and every [`Pattern`] becomes a
//! regex over such strings:
//!
//! ```text
//! Exact("DT")       <DT>
//! Prefix("NN")      <NN[^>]*>
//! <DT>?<NN.*>+      ^(?:(?:<DT>){0,1}(?:<NN[^>]*>){1,})
//! ```
//!
//! The regex engine gives leftmost-first semantics: repetitions are greedy,
//! earlier alternatives are preferred, and the engine falls back to shorter
//! repetitions when the rest of the sequence needs it, without exponential
//! backtracking.
//!
//! Symbols are escaped before they are wrapped in angle brackets (`&` as `&amp;`,
//! `<` as `&lt;`, `>` as `&gt;`), which keeps exactly one `<` per symbol. The
//! number of symbols a match consumed is therefore the number of `<` in it.

use super::pattern::Pattern;
use regex::Regex;

/// Escape a symbol so it can sit between angle brackets.
///
/// The escape is a prefix-free per-character code, so a prefix of a symbol
/// escapes to a prefix of the escaped symbol.
pub fn encode_symbol(symbol: &str) -> String {
    let mut encoded = String::with_capacity(symbol.len());
    for c in symbol.chars() {
        match c {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            other => encoded.push(other),
        }
    }
    encoded
}

/// A sequence of symbols rendered as `<A><B><C>`, with the byte offset of each
/// symbol
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSeq {
    text: String,
    offsets: Vec<usize>,
}

impl SymbolSeq {
    pub fn new<'a>(symbols: impl IntoIterator<Item = &'a str>) -> Self {
        let mut text = String::new();
        let mut offsets = Vec::new();
        for symbol in symbols {
            offsets.push(text.len());
            text.push('<');
            text.push_str(&encode_symbol(symbol));
            text.push('>');
        }
        Self { text, offsets }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The rendering of the symbols from `index` to the end
    pub fn suffix(&self, index: usize) -> &str {
        match self.offsets.get(index) {
            Some(&offset) => &self.text[offset..],
            None => "",
        }
    }
}

/// Translate a pattern into regex source, anchored at the start
pub fn to_regex_source(pattern: &Pattern) -> String {
    let mut source = String::from("^(?:");
    push_pattern(pattern, &mut source);
    source.push(')');
    source
}

fn push_pattern(pattern: &Pattern, out: &mut String) {
    match pattern {
        Pattern::Exact(tag) => {
            out.push('<');
            out.push_str(&regex::escape(&encode_symbol(tag)));
            out.push('>');
        }
        Pattern::Prefix(prefix) => {
            out.push('<');
            out.push_str(&regex::escape(&encode_symbol(prefix)));
            out.push_str("[^>]*>");
        }
        Pattern::Alternation(alternatives) => {
            out.push_str("(?:");
            for (i, alternative) in alternatives.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                push_pattern(alternative, out);
            }
            out.push(')');
        }
        Pattern::Repetition { pattern, min, max } => {
            out.push_str("(?:");
            push_pattern(pattern, out);
            out.push(')');
            match max {
                Some(max) => out.push_str(&format!("{{{},{}}}", min, max)),
                None => out.push_str(&format!("{{{},}}", min)),
            }
        }
        Pattern::Sequence(items) => {
            for item in items {
                push_pattern(item, out);
            }
        }
    }
}

/// A compiled rule pattern
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile a pattern. Fails only when the regex exceeds the engine's limits.
    pub fn compile(pattern: &Pattern) -> Result<Self, regex::Error> {
        let regex = Regex::new(&to_regex_source(pattern))?;
        Ok(Self { regex })
    }

    /// Number of symbols matched starting exactly at `index`, if any
    pub fn match_at(&self, seq: &SymbolSeq, index: usize) -> Option<usize> {
        let found = self.regex.find(seq.suffix(index))?;
        let consumed = found.as_str().matches('<').count();
        if consumed == 0 {
            None
        } else {
            Some(consumed)
        }
    }

    /// The regex the pattern compiled to, for debugging grammars
    pub fn regex_source(&self) -> &str {
        self.regex.as_str()
    }
}

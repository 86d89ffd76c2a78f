//! Rule notation
//!
//! Grammars are usually written as text, one rule per line, in the chunk-rule
//! syntax of NLTK's `RegexpParser`:
//!
//! ```text
//! # noun phrases first: later rules consume them
//! NP: {<DT>?<JJ.*>*<NN.*>+}
//! PP: {<IN><NP>}
//! VP: {<VB.*><NP|PP>*}
//! ```
//!
//! A line holding only `{...}` adds another rule under the most recent label,
//! and a line holding only `LABEL:` sets the label for the lines that follow:
//!
//! ```text
//! NP:
//!     {<DT>?<JJ.*>*<NN.*>+}
//!     {<PRP>}
//! ```
//!
//! Parsing happens in two stages: [tokens] lexes a line with logos, [parser]
//! turns the tokens into a [`Pattern`](crate::chunk::grammar::Pattern) with
//! chumsky combinators.

pub mod parser;
pub mod tokens;

pub use tokens::NotationToken;

use crate::chunk::grammar::{Grammar, GrammarError, Rule};
use chumsky::error::SimpleReason;
use chumsky::Parser;
use logos::Logos;
use std::fmt;

/// Error raised for a single line of notation
#[derive(Debug, Clone, PartialEq)]
pub enum NotationError {
    /// Text that is not part of the notation
    UnexpectedText { offset: usize, text: String },
    /// Tokens in an order the notation does not allow
    Syntax { message: String },
    /// A `{pattern}` line with no label before it
    MissingLabel,
    /// A line with a label but no pattern, where a rule was required
    MissingPattern { label: String },
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::UnexpectedText { offset, text } => {
                write!(f, "unexpected text '{}' at column {}", text, offset + 1)
            }
            NotationError::Syntax { message } => write!(f, "{}", message),
            NotationError::MissingLabel => write!(f, "pattern has no label"),
            NotationError::MissingPattern { label } => {
                write!(f, "rule {} has no pattern", label)
            }
        }
    }
}

impl std::error::Error for NotationError {}

/// Parse a single `LABEL: {PATTERN}` rule
pub fn parse_rule(source: &str) -> Result<Rule, NotationError> {
    let line = parse_line(&lex_line(source)?)?;
    match (line.label, line.pattern) {
        (Some(label), Some(pattern)) => Ok(Rule::new(label, pattern)),
        (None, _) => Err(NotationError::MissingLabel),
        (Some(label), None) => Err(NotationError::MissingPattern { label }),
    }
}

/// Parse the rules of a multi-line grammar, in order
pub fn parse_rules(source: &str) -> Result<Vec<Rule>, GrammarError> {
    let mut rules = Vec::new();
    let mut current_label: Option<String> = None;
    let mut pending: Option<(usize, String)> = None;

    for (index, text) in source.lines().enumerate() {
        let line_number = index + 1;
        let at_line = |error| GrammarError::Notation {
            line: line_number,
            error,
        };

        let tokens = lex_line(text).map_err(at_line)?;
        if tokens.is_empty() {
            continue;
        }
        let line = parse_line(&tokens).map_err(at_line)?;

        if let Some(label) = line.label {
            if let Some((unfinished_line, unfinished_label)) = pending.take() {
                return Err(GrammarError::Notation {
                    line: unfinished_line,
                    error: NotationError::MissingPattern {
                        label: unfinished_label,
                    },
                });
            }
            if line.pattern.is_none() {
                pending = Some((line_number, label.clone()));
            }
            current_label = Some(label);
        }

        if let Some(pattern) = line.pattern {
            match &current_label {
                Some(label) => {
                    rules.push(Rule::new(label.clone(), pattern));
                    pending = None;
                }
                None => return Err(at_line(NotationError::MissingLabel)),
            }
        }
    }

    if let Some((line, label)) = pending {
        return Err(GrammarError::Notation {
            line,
            error: NotationError::MissingPattern { label },
        });
    }
    Ok(rules)
}

/// Parse and validate a multi-line grammar
pub fn parse_grammar(source: &str) -> Result<Grammar, GrammarError> {
    Grammar::new(parse_rules(source)?)
}

fn lex_line(source: &str) -> Result<Vec<NotationToken>, NotationError> {
    let mut lexer = NotationToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(NotationError::UnexpectedText {
                    offset: lexer.span().start,
                    text: lexer.slice().to_string(),
                })
            }
        }
    }
    Ok(tokens)
}

fn parse_line(tokens: &[NotationToken]) -> Result<parser::RuleLine, NotationError> {
    // report a bad class body by itself, not merged with the parser's expectations
    for token in tokens {
        if let NotationToken::TagClass(body) = token {
            parser::parse_tag_class(body)
                .map_err(|message| NotationError::Syntax { message })?;
        }
    }
    parser::rule_line()
        .parse(tokens.to_vec())
        .map_err(|errors| NotationError::Syntax {
            message: errors
                .first()
                .map(describe)
                .unwrap_or_else(|| "invalid rule".to_string()),
        })
}

fn describe(error: &parser::ParserError) -> String {
    match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        _ => match error.found() {
            Some(token) => format!("unexpected {}", token),
            None => "unexpected end of rule".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::grammar::Pattern;

    #[test]
    fn test_parse_rule() {
        let rule = parse_rule("PP: {<IN><NP>}").unwrap();
        assert_eq!(rule.label, "PP");
        assert_eq!(
            rule.pattern,
            Pattern::sequence(vec![Pattern::exact("IN"), Pattern::exact("NP")])
        );
    }

    #[test]
    fn test_parse_rule_requires_both_parts() {
        assert_eq!(parse_rule("{<NN>}"), Err(NotationError::MissingLabel));
        assert_eq!(
            parse_rule("NP:"),
            Err(NotationError::MissingPattern {
                label: "NP".to_string()
            })
        );
    }

    #[test]
    fn test_unexpected_text() {
        match parse_rule("NP: {<DT> ! <NN>}") {
            Err(NotationError::UnexpectedText { offset, text }) => {
                assert_eq!(offset, 10);
                assert_eq!(text, "!");
            }
            other => panic!("Expected UnexpectedText, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_message() {
        let err = parse_rule("NP: {<DT>?<NN>").unwrap_err();
        assert!(matches!(err, NotationError::Syntax { .. }), "{:?}", err);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_parse_rules_skips_blank_and_comment_lines() {
        let source = "\n# chunk rules\nNP: {<DT>?<NN.*>+}   # nouns\n\nPP: {<IN><NP>}\n";
        let rules = parse_rules(source).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].label, "PP");
    }

    #[test]
    fn test_continuation_lines_share_label() {
        let source = "NP:\n  {<DT>?<NN.*>+}\n  {<PRP>}\nVP: {<VB.*><NP>}\n";
        let rules = parse_rules(source).unwrap();
        let labels: Vec<_> = rules.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["NP", "NP", "VP"]);
        assert_eq!(rules[1].pattern, Pattern::exact("PRP"));
    }

    #[test]
    fn test_label_without_pattern_is_reported() {
        let err = parse_rules("NP: {<NN>}\nVP:\nPP: {<IN><NP>}\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::Notation {
                line: 2,
                error: NotationError::MissingPattern {
                    label: "VP".to_string()
                }
            }
        );
        let trailing = parse_rules("NP: {<NN>}\nVP:\n").unwrap_err();
        assert!(matches!(trailing, GrammarError::Notation { line: 2, .. }));
    }

    #[test]
    fn test_pattern_without_label_is_reported() {
        let err = parse_rules("# rules\n{<NN>}\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::Notation {
                line: 2,
                error: NotationError::MissingLabel
            }
        );
    }

    #[test]
    fn test_parse_grammar_validates() {
        let err = parse_grammar("ADJ: {<JJ>*}").unwrap_err();
        assert!(matches!(err, GrammarError::InvalidGrammar { .. }));
    }

    #[test]
    fn test_display_round_trip() {
        let source = "NP: {<DT|PRP\\$>?(<JJ.*>|<VBN>)*<NN.*>+}";
        let rule = parse_rule(source).unwrap();
        let reparsed = parse_rule(&rule.to_string()).unwrap();
        assert_eq!(rule, reparsed);
    }
}

//! Parser combinators for the rule notation
//!
//! One line holds at most one rule:
//!
//! ```text
//! line        := (label ':')? ('{' alternation '}')?
//! alternation := sequence ('|' sequence)*
//! sequence    := term+
//! term        := atom quantifier*
//! atom        := tag-class | '(' alternation ')'
//! quantifier  := '?' | '*' | '+' | '{m}' | '{m,}' | '{m,n}'
//! ```
//!
//! A tag class body is a `|`-separated list of tags; a tag ending in an
//! unescaped `.*` is a prefix class. Whitespace inside `< >` is ignored, so
//! `< DT >` is `<DT>`. Other regex metacharacters are rejected unless escaped
//! with `\`; a literal `.` or `$` needs no escape (`<.>`, `<PRP$>`).

use super::tokens::NotationToken;
use crate::chunk::grammar::Pattern;
use chumsky::prelude::*;

/// Type alias for parser error
pub(crate) type ParserError = Simple<NotationToken>;

/// One parsed line: a label, a pattern, or both
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RuleLine {
    pub(crate) label: Option<String>,
    pub(crate) pattern: Option<Pattern>,
}

pub(crate) fn rule_line() -> impl Parser<NotationToken, RuleLine, Error = ParserError> {
    let label = select! { NotationToken::Label(label) => label }
        .then_ignore(just(NotationToken::Colon));
    let body = pattern().delimited_by(
        just(NotationToken::OpenBrace),
        just(NotationToken::CloseBrace),
    );

    label
        .or_not()
        .then(body.or_not())
        .then_ignore(end())
        .try_map(|(label, pattern), span| {
            if label.is_none() && pattern.is_none() {
                Err(Simple::custom(span, "expected a rule label or a {pattern}"))
            } else {
                Ok(RuleLine { label, pattern })
            }
        })
}

pub(crate) fn pattern() -> impl Parser<NotationToken, Pattern, Error = ParserError> + Clone {
    recursive(|alternation| {
        let class = select! { NotationToken::TagClass(body) => body }
            .try_map(|body: String, span| {
                parse_tag_class(&body).map_err(|reason| Simple::custom(span, reason))
            });
        let group = alternation.delimited_by(
            just(NotationToken::OpenParen),
            just(NotationToken::CloseParen),
        );
        let quantifier = select! {
            NotationToken::Question => (0, Some(1)),
            NotationToken::Star => (0, None),
            NotationToken::Plus => (1, None),
            NotationToken::Bounds(bounds) => bounds,
        };

        let term = class
            .or(group)
            .then(quantifier.repeated())
            .foldl(|pattern, (min, max)| Pattern::repeat(pattern, min, max));
        let sequence = term.repeated().at_least(1).map(Pattern::sequence);

        sequence
            .separated_by(just(NotationToken::Pipe))
            .at_least(1)
            .map(Pattern::alternation)
    })
}

/// Interpret the body of `<...>`
pub(crate) fn parse_tag_class(body: &str) -> Result<Pattern, String> {
    // (character, escaped)
    let mut chars = Vec::new();
    let mut iter = body.chars();
    while let Some(c) = iter.next() {
        if c == '\\' {
            match iter.next() {
                Some(escaped) => chars.push((escaped, true)),
                None => return Err(format!("dangling escape in <{}>", body)),
            }
        } else if !c.is_whitespace() {
            chars.push((c, false));
        }
    }

    let mut alternatives = Vec::new();
    for part in chars.split(|&(c, escaped)| c == '|' && !escaped) {
        alternatives.push(class_alternative(part, body)?);
    }
    Ok(Pattern::alternation(alternatives))
}

fn class_alternative(part: &[(char, bool)], body: &str) -> Result<Pattern, String> {
    let is_prefix = part.len() >= 2 && part[part.len() - 2..] == [('.', false), ('*', false)];
    let tag_chars = if is_prefix {
        &part[..part.len() - 2]
    } else {
        part
    };

    if let Some(&(c, _)) = tag_chars
        .iter()
        .find(|&&(c, escaped)| !escaped && is_class_metachar(c))
    {
        return Err(format!(
            "unsupported '{}' in <{}>: only a trailing .* wildcard is allowed",
            c, body
        ));
    }

    let tag: String = tag_chars.iter().map(|&(c, _)| c).collect();
    if is_prefix {
        Ok(Pattern::Prefix(tag))
    } else if tag.is_empty() {
        Err(format!("empty tag in <{}>", body))
    } else {
        Ok(Pattern::Exact(tag))
    }
}

/// Regex syntax that has no meaning inside a tag class here
pub(crate) fn is_class_metachar(c: char) -> bool {
    matches!(c, '*' | '+' | '?' | '[' | ']' | '{' | '}' | '(' | ')' | '^')
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn tokens(source: &str) -> Vec<NotationToken> {
        NotationToken::lexer(source)
            .map(|result| result.expect("valid token"))
            .collect()
    }

    fn parse_pattern(source: &str) -> Pattern {
        pattern()
            .then_ignore(end())
            .parse(tokens(source))
            .expect("pattern to parse")
    }

    #[test]
    fn test_tag_class_exact_and_prefix() {
        assert_eq!(parse_tag_class("DT"), Ok(Pattern::exact("DT")));
        assert_eq!(parse_tag_class("NN.*"), Ok(Pattern::prefix("NN")));
        assert_eq!(parse_tag_class(".*"), Ok(Pattern::prefix("")));
        assert_eq!(parse_tag_class("."), Ok(Pattern::exact(".")));
        assert_eq!(parse_tag_class("PRP\\$"), Ok(Pattern::exact("PRP$")));
        assert_eq!(parse_tag_class("PRP$"), Ok(Pattern::exact("PRP$")));
    }

    #[test]
    fn test_tag_class_alternatives() {
        assert_eq!(
            parse_tag_class("NP|PP"),
            Ok(Pattern::Alternation(vec![
                Pattern::exact("NP"),
                Pattern::exact("PP")
            ]))
        );
        assert_eq!(
            parse_tag_class("NN.*|PRP"),
            Ok(Pattern::Alternation(vec![
                Pattern::prefix("NN"),
                Pattern::exact("PRP")
            ]))
        );
        assert_eq!(parse_tag_class("A\\|B"), Ok(Pattern::exact("A|B")));
    }

    #[test]
    fn test_tag_class_errors() {
        assert!(parse_tag_class("").is_err());
        assert!(parse_tag_class("NP|").is_err());
        assert!(parse_tag_class("NN*").is_err());
        assert!(parse_tag_class("NN\\").is_err());
        assert_eq!(parse_tag_class("NN\\*"), Ok(Pattern::exact("NN*")));
    }

    #[test]
    fn test_tag_class_ignores_whitespace() {
        assert_eq!(parse_tag_class(" DT "), Ok(Pattern::exact("DT")));
        assert_eq!(
            parse_tag_class("NP | PP"),
            Ok(Pattern::Alternation(vec![
                Pattern::exact("NP"),
                Pattern::exact("PP")
            ]))
        );
        assert_eq!(parse_tag_class(" NN.* "), Ok(Pattern::prefix("NN")));
        assert!(parse_tag_class("  ").is_err());
    }

    #[test]
    fn test_tag_class_rejects_other_regex_syntax() {
        for body in ["NN.+", "NN.?", "NN+", "[NV]B", "NN{2}", "(NN)", "^NN", ".*NN"] {
            let err = parse_tag_class(body).unwrap_err();
            assert!(err.contains("only a trailing .* wildcard"), "{}: {}", body, err);
        }
        assert_eq!(parse_tag_class("\\("), Ok(Pattern::exact("(")));
        assert_eq!(parse_tag_class("\\)"), Ok(Pattern::exact(")")));
        assert_eq!(parse_tag_class("NN\\+"), Ok(Pattern::exact("NN+")));
    }

    #[test]
    fn test_sequence_with_quantifiers() {
        assert_eq!(
            parse_pattern("<DT>?<JJ.*>*<NN.*>+"),
            Pattern::sequence(vec![
                Pattern::optional(Pattern::exact("DT")),
                Pattern::zero_or_more(Pattern::prefix("JJ")),
                Pattern::one_or_more(Pattern::prefix("NN")),
            ])
        );
    }

    #[test]
    fn test_groups_and_alternation() {
        assert_eq!(
            parse_pattern("<NP>(<CC><NP>){1,3}|<PRP>"),
            Pattern::alternation(vec![
                Pattern::sequence(vec![
                    Pattern::exact("NP"),
                    Pattern::repeat(
                        Pattern::sequence(vec![Pattern::exact("CC"), Pattern::exact("NP")]),
                        1,
                        Some(3)
                    ),
                ]),
                Pattern::exact("PRP"),
            ])
        );
    }

    #[test]
    fn test_stacked_quantifiers_nest() {
        assert_eq!(
            parse_pattern("<A>*?"),
            Pattern::optional(Pattern::zero_or_more(Pattern::exact("A")))
        );
    }

    #[test]
    fn test_rule_line_shapes() {
        let full = rule_line().parse(tokens("NP: {<NN>}")).unwrap();
        assert_eq!(full.label.as_deref(), Some("NP"));
        assert_eq!(full.pattern, Some(Pattern::exact("NN")));

        let label_only = rule_line().parse(tokens("NP:")).unwrap();
        assert_eq!(label_only.label.as_deref(), Some("NP"));
        assert!(label_only.pattern.is_none());

        let pattern_only = rule_line().parse(tokens("{<NNP>+}")).unwrap();
        assert!(pattern_only.label.is_none());
        assert!(pattern_only.pattern.is_some());
    }

    #[test]
    fn test_rule_line_errors() {
        assert!(rule_line().parse(tokens("NP {<NN>}")).is_err());
        assert!(rule_line().parse(tokens("NP: {<NN>")).is_err());
        assert!(rule_line().parse(tokens("NP: {}")).is_err());
        assert!(rule_line().parse(tokens("NP: {<NN*>}")).is_err());
    }
}

//! Tagged input
//!
//! The chunker takes tokens that a tagger already produced. Two text forms are
//! read here:
//!
//! - `word/TAG` items separated by whitespace, one sentence per line. The tag
//!   follows the last `/`, so `1/2/CD` is the word `1/2` tagged `CD`.
//! - JSON: an array of `[text, tag]` pairs or `{"text": .., "tag": ..}`
//!   objects, freely mixed.

use crate::chunk::ast::Token;
use crate::chunk::chunking::ChunkError;
use serde::Deserialize;

/// Parse a `word/TAG word/TAG ...` line
pub fn parse_tagged(line: &str) -> Result<Vec<Token>, ChunkError> {
    line.split_whitespace()
        .enumerate()
        .map(|(index, item)| parse_item(index, item))
        .collect()
}

fn parse_item(index: usize, item: &str) -> Result<Token, ChunkError> {
    let (text, tag) = item
        .rsplit_once('/')
        .ok_or_else(|| ChunkError::malformed(index, format!("'{}' has no /TAG", item)))?;
    if text.is_empty() {
        return Err(ChunkError::malformed(index, format!("'{}' has no text", item)));
    }
    if tag.is_empty() {
        return Err(ChunkError::malformed(index, format!("'{}' has no tag", item)));
    }
    Ok(Token::new(text, tag))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonItem {
    Pair(String, String),
    Object {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        tag: Option<String>,
    },
}

/// Parse a JSON array of tagged tokens
pub fn parse_tagged_json(source: &str) -> Result<Vec<Token>, ChunkError> {
    let items: Vec<serde_json::Value> = serde_json::from_str(source)
        .map_err(|e| ChunkError::malformed(0, format!("expected a JSON array: {}", e)))?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let item: JsonItem = serde_json::from_value(value).map_err(|_| {
                ChunkError::malformed(index, "expected [text, tag] or {\"text\", \"tag\"}")
            })?;
            match item {
                JsonItem::Pair(text, tag) => Ok(Token::new(text, tag)),
                JsonItem::Object { text, tag } => {
                    let text = text.ok_or_else(|| ChunkError::malformed(index, "missing text"))?;
                    let tag = tag.ok_or_else(|| {
                        ChunkError::malformed(index, format!("token '{}' has no tag", text))
                    })?;
                    Ok(Token::new(text, tag))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged() {
        let tokens = parse_tagged("The/DT red/JJ rose/NN").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new("The", "DT"),
                Token::new("red", "JJ"),
                Token::new("rose", "NN"),
            ]
        );
    }

    #[test]
    fn test_tag_follows_last_slash() {
        let tokens = parse_tagged("1/2/CD and/CC //SYM").unwrap();
        assert_eq!(tokens[0], Token::new("1/2", "CD"));
        assert_eq!(tokens[2], Token::new("/", "SYM"));
    }

    #[test]
    fn test_punctuation_tags() {
        let tokens = parse_tagged("Stop/VB ./. ,/,").unwrap();
        assert_eq!(tokens[1], Token::new(".", "."));
        assert_eq!(tokens[2], Token::new(",", ","));
    }

    #[test]
    fn test_blank_line_is_empty_sentence() {
        assert_eq!(parse_tagged("   ").unwrap(), vec![]);
    }

    #[test]
    fn test_malformed_items() {
        assert_eq!(
            parse_tagged("The/DT rose").unwrap_err(),
            ChunkError::malformed(1, "'rose' has no /TAG")
        );
        assert!(matches!(
            parse_tagged("/NN").unwrap_err(),
            ChunkError::MalformedInput { index: 0, .. }
        ));
        assert!(matches!(
            parse_tagged("a/DT rose/").unwrap_err(),
            ChunkError::MalformedInput { index: 1, .. }
        ));
    }

    #[test]
    fn test_parse_json_pairs_and_objects() {
        let source = r#"[["The", "DT"], {"text": "rose", "tag": "NN"}]"#;
        let tokens = parse_tagged_json(source).unwrap();
        assert_eq!(tokens, vec![Token::new("The", "DT"), Token::new("rose", "NN")]);
    }

    #[test]
    fn test_parse_json_missing_tag() {
        let err = parse_tagged_json(r#"[["The", "DT"], {"text": "rose"}]"#).unwrap_err();
        assert_eq!(err, ChunkError::malformed(1, "token 'rose' has no tag"));
    }

    #[test]
    fn test_parse_json_wrong_shape() {
        assert!(matches!(
            parse_tagged_json(r#"[["The", "DT"], 7]"#).unwrap_err(),
            ChunkError::MalformedInput { index: 1, .. }
        ));
        assert!(parse_tagged_json("{}").is_err());
    }
}

//! Penn Treebank tag glossary
//!
//! Readable descriptions for the tags a Penn Treebank tagger emits, used to
//! explain which tags a sentence actually contains.

use crate::chunk::ast::Token;
use serde::Serialize;
use std::collections::BTreeSet;

pub const UNKNOWN_TAG: &str = "Unknown tag";

pub const PENN_TAGS: &[(&str, &str)] = &[
    ("CC", "Coordinating conjunction"),
    ("CD", "Cardinal number"),
    ("DT", "Determiner"),
    ("EX", "Existential there"),
    ("FW", "Foreign word"),
    ("IN", "Preposition or subordinating conjunction"),
    ("JJ", "Adjective"),
    ("JJR", "Adjective, comparative"),
    ("JJS", "Adjective, superlative"),
    ("LS", "List item marker"),
    ("MD", "Modal"),
    ("NN", "Noun, singular or mass"),
    ("NNS", "Noun, plural"),
    ("NNP", "Proper noun, singular"),
    ("NNPS", "Proper noun, plural"),
    ("PDT", "Predeterminer"),
    ("POS", "Possessive ending"),
    ("PRP", "Personal pronoun"),
    ("PRP$", "Possessive pronoun"),
    ("RB", "Adverb"),
    ("RBR", "Adverb, comparative"),
    ("RBS", "Adverb, superlative"),
    ("RP", "Particle"),
    ("SYM", "Symbol"),
    ("TO", "to"),
    ("UH", "Interjection"),
    ("VB", "Verb, base form"),
    ("VBD", "Verb, past tense"),
    ("VBG", "Verb, gerund or present participle"),
    ("VBN", "Verb, past participle"),
    ("VBP", "Verb, non-3rd person singular present"),
    ("VBZ", "Verb, 3rd person singular present"),
    ("WDT", "Wh-determiner"),
    ("WP", "Wh-pronoun"),
    ("WP$", "Possessive wh-pronoun"),
    ("WRB", "Wh-adverb"),
    (".", "Sentence-final punctuation"),
    (",", "Comma"),
    (":", "Colon or ellipsis"),
    ("``", "Opening quotation mark"),
    ("''", "Closing quotation mark"),
    ("(", "Left bracket"),
    (")", "Right bracket"),
];

/// A tag together with its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry {
    pub tag: String,
    pub description: &'static str,
}

/// Description of a tag, or [`UNKNOWN_TAG`]
pub fn describe(tag: &str) -> &'static str {
    PENN_TAGS
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, description)| *description)
        .unwrap_or(UNKNOWN_TAG)
}

/// The distinct tags of a sentence, sorted, with their descriptions
pub fn used_tags(tokens: &[Token]) -> Vec<GlossaryEntry> {
    let tags: BTreeSet<&str> = tokens.iter().map(|t| t.tag.as_str()).collect();
    tags.into_iter()
        .map(|tag| GlossaryEntry {
            tag: tag.to_string(),
            description: describe(tag),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::testing::tagged;

    #[test]
    fn test_describe() {
        assert_eq!(describe("NNS"), "Noun, plural");
        assert_eq!(describe("PRP$"), "Possessive pronoun");
        assert_eq!(describe(","), "Comma");
        assert_eq!(describe("XYZ"), UNKNOWN_TAG);
        assert_eq!(describe("nn"), UNKNOWN_TAG);
    }

    #[test]
    fn test_tags_are_unique() {
        let tags: BTreeSet<_> = PENN_TAGS.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags.len(), PENN_TAGS.len());
    }

    #[test]
    fn test_used_tags_sorted_and_deduplicated() {
        let entries = used_tags(&tagged("the/DT rose/NN and/CC the/DT lily/NN ./. x/ZZ"));
        let tags: Vec<_> = entries.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec![".", "CC", "DT", "NN", "ZZ"]);
        assert_eq!(entries[2].description, "Determiner");
        assert_eq!(entries[4].description, UNKNOWN_TAG);
    }
}

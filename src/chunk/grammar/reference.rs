//! The reference English shallow-parse grammar
//!
//! ```text
//! NP: {<DT>?<JJ.*>*<NN.*>+}
//! PP: {<IN><NP>}
//! VP: {<VB.*><NP|PP>*}
//! ```
//!
//! NP must run before PP and VP, whose patterns consume NP chunks.

use super::{Grammar, Pattern, Rule};
use once_cell::sync::Lazy;

/// The reference grammar in rule notation
pub const REFERENCE_GRAMMAR: &str = "\
NP: {<DT>?<JJ.*>*<NN.*>+}
PP: {<IN><NP>}
VP: {<VB.*><NP|PP>*}
";

static REFERENCE: Lazy<Grammar> =
    Lazy::new(|| Grammar::new(reference_rules()).expect("reference grammar is valid"));

/// Shared, compiled copy of the reference grammar
pub fn reference_grammar() -> &'static Grammar {
    &REFERENCE
}

/// The reference rules built directly from the pattern algebra
pub fn reference_rules() -> Vec<Rule> {
    vec![
        // optional determiner, any adjectives, at least one noun
        Rule::new(
            "NP",
            Pattern::sequence(vec![
                Pattern::optional(Pattern::exact("DT")),
                Pattern::zero_or_more(Pattern::prefix("JJ")),
                Pattern::one_or_more(Pattern::prefix("NN")),
            ]),
        ),
        Rule::new(
            "PP",
            Pattern::sequence(vec![Pattern::exact("IN"), Pattern::exact("NP")]),
        ),
        Rule::new(
            "VP",
            Pattern::sequence(vec![
                Pattern::prefix("VB"),
                Pattern::zero_or_more(Pattern::alternation(vec![
                    Pattern::exact("NP"),
                    Pattern::exact("PP"),
                ])),
            ]),
        ),
    ]
}

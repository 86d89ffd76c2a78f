//! Single-rule pass over the node stream
//!
//! One pass renders the stream as a [`SymbolSeq`] and scans it left to right.
//! At each position the rule's matcher is tried once, anchored there. A match
//! of `n` symbols replaces the next `n` nodes with one chunk and the scan
//! resumes right after it; otherwise the node is copied through unchanged.
//!
//! Later positions are never affected by earlier replacements in the same
//! pass, so the symbol string is rendered only once per pass. A chunk created
//! in this pass is never looked at again by the same rule.

use super::RuleApplication;
use crate::chunk::ast::Node;
use crate::chunk::grammar::{CompiledRule, SymbolSeq};

pub(crate) fn apply_rule(
    stream: Vec<Node>,
    rule_index: usize,
    compiled: &CompiledRule,
    mut trace: Option<&mut Vec<RuleApplication>>,
) -> Vec<Node> {
    let symbols = SymbolSeq::new(stream.iter().map(Node::symbol));
    let label = &compiled.rule.label;
    log::trace!(
        "rule {} ({}) over {}",
        rule_index + 1,
        label,
        symbols.as_str()
    );

    let mut output = Vec::with_capacity(stream.len());
    let mut nodes = stream.into_iter();
    let mut index = 0;
    // leaf offset of the node at `index`
    let mut token_offset = 0;

    while index < symbols.len() {
        match compiled.matcher.match_at(&symbols, index) {
            Some(consumed) => {
                let children: Vec<Node> = nodes.by_ref().take(consumed).collect();
                let chunk = Node::chunk(label.clone(), children);
                let covered = chunk.leaf_count();

                log::debug!(
                    "rule {} ({}) chunked tokens {}..{}",
                    rule_index + 1,
                    label,
                    token_offset,
                    token_offset + covered
                );
                if let Some(events) = trace.as_deref_mut() {
                    events.push(RuleApplication {
                        rule_index,
                        label: label.clone(),
                        tokens: token_offset..token_offset + covered,
                        text: chunk.as_chunk().map(|c| c.span_text()).unwrap_or_default(),
                    });
                }

                output.push(chunk);
                index += consumed;
                token_offset += covered;
            }
            None => {
                if let Some(node) = nodes.next() {
                    token_offset += node.leaf_count();
                    output.push(node);
                }
                index += 1;
            }
        }
    }

    output
}

//! A grammar is a flat pair of registries plus a root rule reference.
//!
//! Unlike an object graph of named rules, nothing here owns a `HashMap` of
//! definitions: every rule a grammar author declares lives at a fixed
//! offset in `RuleRegistry`, and rules refer to each other by that offset.
//! A `Grammar` is immutable once `GrammarBuilder::finalize_grammar` hands
//! it over; many `analyze` calls may share one grammar across threads.

use std::fmt;

use crate::rule_registry::{Node, RuleRef, RuleRegistry, RuleView};
use crate::text_registry::TextRegistry;

#[derive(Debug, Clone)]
pub struct Grammar {
    rules: RuleRegistry,
    text: TextRegistry,
    root: RuleRef,
}

impl Grammar {
    pub(crate) fn new(rules: RuleRegistry, text: TextRegistry, root: RuleRef) -> Self {
        Self { rules, text, root }
    }

    pub fn root(&self) -> RuleRef {
        self.root
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn text(&self) -> &TextRegistry {
        &self.text
    }

    pub fn rule_name(&self, view: &RuleView<'_>) -> &str {
        self.text.get(view.name_ref())
    }

    pub fn get_rule_count(&self) -> u32 {
        self.rules.len()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = string_builder::Builder::default();
        fmt_node(&mut builder, &self.rules, &self.text, self.root);
        write!(f, "{}", builder.string().unwrap())
    }
}

fn fmt_node(out: &mut string_builder::Builder, rules: &RuleRegistry, text: &TextRegistry, offset: RuleRef) {
    match rules.classify(offset) {
        Node::End => {}
        Node::CustomRef(r) => {
            out.append(format!("@{r}"));
        }
        Node::Builtin(b) => {
            out.append(b.name());
        }
        Node::Structural(view) => {
            let name = text.get(view.name_ref());
            if !name.is_empty() {
                out.append(name.to_string());
                out.append(":");
            }
            if view.kind() == crate::rule_registry::RuleKind::Text {
                out.append(format!("\"{}\"", text.get(view.text_ref())));
                return;
            }
            out.append(view.kind().name());
            out.append("(");
            let mut first = true;
            for child in view.children() {
                if !first {
                    out.append(", ");
                }
                first = false;
                match child {
                    Node::CustomRef(r) => out.append(format!("@{r}")),
                    Node::Builtin(b) => out.append(b.name()),
                    Node::Structural(child_view) => {
                        fmt_node(out, rules, text, child_view.rule_ref())
                    }
                    Node::End => {}
                }
            }
            out.append(")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GrammarBuilder;
    use crate::rule_registry::RuleKind;

    #[test]
    fn displays_a_simple_seq_grammar() {
        let mut b = GrammarBuilder::new();
        let root = b.begin_rule(RuleKind::Seq, true, "doc");
        b.add_text("A", "");
        b.add_text("B", "");
        b.end_rule();
        let g = b.finalize_grammar(root, &[]);
        let s = g.to_string();
        assert!(s.contains("doc:Seq"));
        assert!(s.contains("\"A\""));
        assert!(s.contains("\"B\""));
    }
}

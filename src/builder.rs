//! Stateful assembler that emits rules into the rule and text registries.
//!
//! Rules are written in the order the grammar author declares them, depth
//! first. A rule body can only reference another rule that has already been
//! `begin_rule`'d (its `RuleRef` is already known) -- except where the
//! grammar genuinely needs a forward reference (a code block's statement
//! rule mentions the statement grammar before it exists yet). For that case
//! the builder records a patch: a placeholder word plus the slot it should
//! eventually resolve to, fixed up once in `finalize_grammar`.

use crate::builtins::Builtin;
use crate::grammar::Grammar;
use crate::rule_registry::{RuleKind, RuleRef, RuleRegistry, HEADER_WIDTH};
use crate::text_registry::TextRegistry;

struct PendingRule {
    header_offset: u32,
    num_children: u32,
}

pub struct GrammarBuilder {
    rules: RuleRegistry,
    text: TextRegistry,
    pending: Vec<PendingRule>,
    forward_patches: Vec<(u32, usize)>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self {
            rules: RuleRegistry::new(),
            text: TextRegistry::new(),
            pending: Vec::new(),
            forward_patches: Vec::new(),
        }
    }

    fn try_increase_children(&mut self) {
        if let Some(frame) = self.pending.last_mut() {
            frame.num_children += 1;
        }
    }

    pub fn register_text(&mut self, text: &str) -> crate::text_registry::TextRef {
        self.text.register(text)
    }

    /// Opens a structural rule. Must be closed with a matching `end_rule`.
    pub fn begin_rule(&mut self, kind: RuleKind, captured: bool, name: &str) -> RuleRef {
        self.try_increase_children();
        let name_ref = self.register_text(name);
        let header_offset = self
            .rules
            .push(RuleRegistry::encode_header_kind(kind, captured));
        self.rules.push(name_ref.start);
        self.rules.push(name_ref.len);
        self.rules.push(0); // NUM_CHILDREN placeholder
        self.rules.push(0); // NEXT_SIBLING_AT placeholder
        debug_assert_eq!(self.rules.len(), header_offset + HEADER_WIDTH);
        self.pending.push(PendingRule {
            header_offset,
            num_children: 0,
        });
        header_offset
    }

    /// Convenience for the common case of building a rule and immediately
    /// stashing its reference into a capture table slot, so later rules
    /// built in the same pass can refer back to it.
    pub fn begin_rule_and_assign(
        &mut self,
        slots: &mut [RuleRef],
        slot: usize,
        kind: RuleKind,
        captured: bool,
        name: &str,
    ) -> RuleRef {
        let r = self.begin_rule(kind, captured, name);
        slots[slot] = r;
        r
    }

    pub fn end_rule(&mut self) -> RuleRef {
        let frame = self
            .pending
            .pop()
            .expect("end_rule called with no open rule");
        self.rules
            .write(frame.header_offset + 3, frame.num_children);
        self.rules
            .write(frame.header_offset + 4, self.rules.len());
        frame.header_offset
    }

    pub fn add_rule_ref(&mut self, r: RuleRef) {
        self.try_increase_children();
        self.rules.push(RuleRegistry::encode_custom_ref(r));
    }

    pub fn add_builtin_ref(&mut self, b: Builtin) {
        self.try_increase_children();
        self.rules.push(RuleRegistry::encode_builtin(b));
    }

    /// Records a reference to a rule that hasn't been built yet. `slot`
    /// identifies which entry of the final capture table (passed to
    /// `finalize_grammar`) holds the eventual `RuleRef`.
    pub fn add_forward_ref(&mut self, slot: usize) {
        self.try_increase_children();
        let offset = self.rules.push(RuleRegistry::encode_custom_ref(0));
        self.forward_patches.push((offset, slot));
    }

    /// Shorthand: a `Text` rule whose child area is exactly the literal's
    /// `(offset, len)` in the text registry.
    pub fn add_text(&mut self, literal: &str, name: &str) -> RuleRef {
        let r = self.begin_rule(RuleKind::Text, false, name);
        let text_ref = self.register_text(literal);
        self.rules.push(text_ref.start);
        self.rules.push(text_ref.len);
        self.end_rule();
        r
    }

    /// Consumes the builder, patching any forward references against the
    /// final capture table, and returns the finished grammar.
    pub fn finalize_grammar(mut self, root: RuleRef, slots: &[RuleRef]) -> Grammar {
        assert!(
            self.pending.is_empty(),
            "finalize_grammar called with {} rule(s) still open",
            self.pending.len()
        );
        for (offset, slot) in &self.forward_patches {
            let resolved = slots[*slot];
            self.rules
                .write(*offset, RuleRegistry::encode_custom_ref(resolved));
        }
        Grammar::new(self.rules, self.text, root)
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_of_two_texts_reports_two_children() {
        let mut b = GrammarBuilder::new();
        let seq = b.begin_rule(RuleKind::Seq, true, "greeting");
        b.add_text("hello", "");
        b.add_text("world", "");
        b.end_rule();
        let g = b.finalize_grammar(seq, &[]);
        let view = g.rules().view_at(seq);
        assert_eq!(view.num_children(), 2);
    }

    #[test]
    fn forward_ref_resolves_after_target_is_built() {
        let mut b = GrammarBuilder::new();
        const STATEMENT: usize = 0;
        let mut slots = vec![0u32; 1];

        let block = b.begin_rule(RuleKind::Seq, true, "block");
        b.add_forward_ref(STATEMENT);
        b.end_rule();

        let stmt = b.begin_rule_and_assign(&mut slots, STATEMENT, RuleKind::Seq, true, "Statement");
        b.add_text("x", "");
        b.end_rule();

        let g = b.finalize_grammar(block, &slots);
        let block_view = g.rules().view_at(block);
        let child = block_view.children().next().unwrap();
        match child {
            crate::rule_registry::Node::CustomRef(r) => assert_eq!(r, stmt),
            _ => panic!("expected resolved custom ref"),
        }
    }
}

//! The analyzer: dispatch over rule kinds, restore-point bookkeeping, and
//! the `analyze` entry point.
//!
//! The interesting discipline lives in how restore points interact with
//! commit. `restore` is the ordinary "try something, and if it fails,
//! pretend it never happened" operation every combinator uses -- except
//! once a `Must`/`IfMust` has committed (`parse_failed` latched), `restore`
//! becomes a no-op on purpose: we want the AST and position to stay at the
//! deepest point reached before the commit, for diagnostics. `force_restore`
//! bypasses that latch; only `OneIfNotAt`'s lookahead needs it, since a
//! lookahead's inner match is never supposed to leave a trace either way.

use crate::ast::{Ast, AstEntry, EntryId};
use crate::combinators;
use crate::grammar::Grammar;
use crate::rule_registry::{Node, RuleKind, RuleRef, RuleView};

#[derive(Debug, Clone, Copy)]
pub struct RestorePoint {
    pos: usize,
    num_entries: u32,
    children_depth: usize,
    parse_failed: bool,
}

pub struct AnalyzerState<'doc> {
    document: &'doc [u8],
    pos: usize,
    ast: Ast,
    children_counters: Vec<u32>,
    pub(crate) parse_failed: bool,
    pub(crate) failed_rule: Option<RuleRef>,
}

impl<'doc> AnalyzerState<'doc> {
    fn new(document: &'doc [u8]) -> Self {
        Self {
            document,
            pos: 0,
            ast: Ast::new(),
            children_counters: Vec::new(),
            parse_failed: false,
            failed_rule: None,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.document.len()
    }

    pub fn remaining(&self) -> &'doc [u8] {
        &self.document[self.pos..]
    }

    pub fn prev_byte(&self) -> Option<u8> {
        if self.pos == 0 {
            None
        } else {
            Some(self.document[self.pos - 1])
        }
    }

    pub fn consume(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn create_restore_point(&self) -> RestorePoint {
        RestorePoint {
            pos: self.pos,
            num_entries: self.ast.len(),
            children_depth: self.children_counters.len(),
            parse_failed: self.parse_failed,
        }
    }

    /// Unconditionally rewinds to `rp`, including the commit flag. Only
    /// `OneIfNotAt` should call this.
    pub fn force_restore(&mut self, rp: RestorePoint) {
        self.pos = rp.pos;
        self.ast.truncate(rp.num_entries);
        self.children_counters.truncate(rp.children_depth);
        self.parse_failed = rp.parse_failed;
    }

    /// Rewinds to `rp`, unless a commit has already latched -- in which
    /// case this is a no-op, so the committed failure's position and
    /// partial AST survive for diagnostics.
    pub fn restore(&mut self, rp: RestorePoint) {
        if self.parse_failed {
            return;
        }
        self.force_restore(rp);
    }

    pub fn begin_entry(&mut self, rule: RuleRef) -> EntryId {
        let id = self.ast.push(AstEntry {
            rule,
            start_pos: self.pos,
            end_pos: self.pos,
            num_children: 0,
            next_id_same_nesting: 0,
        });
        self.children_counters.push(0);
        id
    }

    pub fn finalize_entry(&mut self, id: EntryId) {
        let num_children = self
            .children_counters
            .pop()
            .expect("finalize_entry without matching begin_entry");
        if let Some(parent) = self.children_counters.last_mut() {
            *parent += 1;
        }
        let start_pos = self.ast.get_entry(id).start_pos;
        self.ast.set(
            id,
            AstEntry {
                rule: self.ast.get_entry(id).rule,
                start_pos,
                end_pos: self.pos,
                num_children,
                next_id_same_nesting: self.ast.len(),
            },
        );
    }

    pub fn fail_current_entry(&mut self, id: EntryId) {
        self.children_counters.pop();
        self.ast.truncate(id);
    }
}

pub struct CompletedAnalysis {
    pub ast: Ast,
}

pub struct FailedAnalysis {
    pub ast: Ast,
    pub failed_rule: RuleRef,
    pub pos: usize,
}

/// Matches `grammar`'s root rule against `document`, requiring the whole
/// document to be consumed on success.
pub fn analyze(grammar: &Grammar, document: &[u8]) -> Result<CompletedAnalysis, FailedAnalysis> {
    let mut state = AnalyzerState::new(document);
    let matched = try_match_rule_ref(grammar, &mut state, grammar.root());
    let is_at_end = state.at_end();

    if state.parse_failed || !matched || !is_at_end {
        let failed_rule = state.failed_rule.unwrap_or_else(|| grammar.root());
        return Err(FailedAnalysis {
            ast: state.ast,
            failed_rule,
            pos: state.pos,
        });
    }

    Ok(CompletedAnalysis { ast: state.ast })
}

pub(crate) fn try_match_rule_ref(grammar: &Grammar, state: &mut AnalyzerState, r: RuleRef) -> bool {
    let view = grammar.rules().view_at(r);
    try_match_structural_rule(grammar, state, view)
}

fn try_match_rule(grammar: &Grammar, state: &mut AnalyzerState, node: Node) -> bool {
    match node {
        Node::End => false,
        Node::Structural(view) => {
            log::trace!("entering {}", view.kind().name());
            let result = try_match_structural_rule(grammar, state, view);
            log::trace!("leaving {} ({})", view.kind().name(), result);
            result
        }
        Node::CustomRef(r) => try_match_rule_ref(grammar, state, r),
        Node::Builtin(b) => try_match_builtin_rule(state, b),
    }
}

pub(crate) fn try_match_structural_rule(
    grammar: &Grammar,
    state: &mut AnalyzerState,
    view: RuleView,
) -> bool {
    if view.kind() == RuleKind::Text {
        let text = grammar.text().get(view.text_ref());
        return try_match_text(state, text);
    }
    combinators::dispatch(grammar, state, view)
}

fn try_match_text(state: &mut AnalyzerState, text: &str) -> bool {
    let remaining = state.remaining();
    if remaining.len() < text.len() || &remaining[..text.len()] != text.as_bytes() {
        return false;
    }
    state.consume(text.len());
    true
}

fn try_match_builtin_rule(state: &mut AnalyzerState, builtin: crate::builtins::Builtin) -> bool {
    let result = crate::builtins::try_match(builtin, state.remaining(), state.prev_byte());
    if result.success {
        log::trace!(
            "matched builtin {} at pos {}",
            builtin.name(),
            state.pos()
        );
        state.consume(result.count);
    }
    result.success
}

/// Exposed for `combinators.rs`: dispatches a single child node (custom
/// reference, builtin, or nested structural rule).
pub(crate) fn try_match_child(grammar: &Grammar, state: &mut AnalyzerState, node: Node) -> bool {
    try_match_rule(grammar, state, node)
}

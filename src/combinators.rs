//! One function per combinator. Each takes the combinator's own structural
//! view and walks its declared children, managing a single restore point
//! and (if the rule is captured) a single AST entry spanning the whole
//! attempt -- including `Must`/`IfMust`, which open one entry that covers
//! both their condition and their committing body, rather than one entry
//! per phase.

use crate::analyzer::{try_match_child, AnalyzerState};
use crate::grammar::Grammar;
use crate::rule_registry::{RuleKind, RuleView};

pub(crate) fn dispatch(grammar: &Grammar, state: &mut AnalyzerState, view: RuleView) -> bool {
    match view.kind() {
        RuleKind::Seq => seq(grammar, state, view),
        RuleKind::Sor => sor(grammar, state, view),
        RuleKind::Plus => repeat(grammar, state, view, 1, 0),
        RuleKind::Star => repeat(grammar, state, view, 0, 0),
        RuleKind::Opt => repeat(grammar, state, view, 0, 1),
        RuleKind::Must => must(grammar, state, view),
        RuleKind::IfMust => if_must(grammar, state, view),
        RuleKind::OneIfNotAt => one_if_not_at(grammar, state, view),
        RuleKind::Text => unreachable!("Text is matched directly by the analyzer"),
    }
}

/// Ordered sequence: every child must match in order, or the whole thing
/// backs out to where it started.
pub(crate) fn seq(grammar: &Grammar, state: &mut AnalyzerState, view: RuleView) -> bool {
    let rp = state.create_restore_point();
    let entry_id = view.captured().then(|| state.begin_entry(view.rule_ref()));

    for child in view.children() {
        if !try_match_child(grammar, state, child) {
            if let Some(id) = entry_id {
                state.fail_current_entry(id);
            }
            state.restore(rp);
            return false;
        }
    }

    if let Some(id) = entry_id {
        state.finalize_entry(id);
    }
    true
}

/// Ordered alternatives: the first child to match wins; later alternatives
/// are never tried once one succeeds, and none are tried once a committed
/// failure has occurred inside an earlier one.
pub(crate) fn sor(grammar: &Grammar, state: &mut AnalyzerState, view: RuleView) -> bool {
    let rp = state.create_restore_point();
    let entry_id = view.captured().then(|| state.begin_entry(view.rule_ref()));

    for child in view.children() {
        if try_match_child(grammar, state, child) {
            if let Some(id) = entry_id {
                state.finalize_entry(id);
            }
            return true;
        }
        if state.parse_failed {
            break;
        }
    }

    if let Some(id) = entry_id {
        state.fail_current_entry(id);
    }
    state.restore(rp);
    false
}

/// Shared implementation of `Plus`/`Star`/`Opt`: repeat the full child
/// sequence between `min` and `max` times (`max == 0` means unbounded).
fn repeat(grammar: &Grammar, state: &mut AnalyzerState, view: RuleView, min: u32, max: u32) -> bool {
    let rp = state.create_restore_point();
    let entry_id = view.captured().then(|| state.begin_entry(view.rule_ref()));

    let mut num_matches = 0u32;
    loop {
        if max != 0 && num_matches >= max {
            break;
        }
        let inner_rp = state.create_restore_point();
        let mut matched_all = true;
        for child in view.children() {
            if !try_match_child(grammar, state, child) {
                matched_all = false;
                break;
            }
            if state.parse_failed {
                break;
            }
        }
        if state.parse_failed {
            break;
        }
        if !matched_all {
            state.restore(inner_rp);
            break;
        }
        num_matches += 1;
    }

    if num_matches < min || state.parse_failed {
        if let Some(id) = entry_id {
            state.fail_current_entry(id);
        }
        state.restore(rp);
        return false;
    }

    if let Some(id) = entry_id {
        state.finalize_entry(id);
    }
    true
}

/// Unconditional commit: match every child in order, and if any fails,
/// latch the analyzer into a committed-failure state anchored on this rule.
pub(crate) fn must(grammar: &Grammar, state: &mut AnalyzerState, view: RuleView) -> bool {
    let rp = state.create_restore_point();
    let entry_id = view.captured().then(|| state.begin_entry(view.rule_ref()));

    for child in view.children() {
        if !try_match_child(grammar, state, child) {
            if let Some(id) = entry_id {
                state.fail_current_entry(id);
            }
            let already_committed = state.parse_failed;
            state.restore(rp);
            state.parse_failed = true;
            if !already_committed {
                state.failed_rule = Some(view.rule_ref());
            }
            return false;
        }
    }

    if let Some(id) = entry_id {
        state.finalize_entry(id);
    }
    true
}

/// Conditional commit: the first child is a non-committing condition. If it
/// fails, this rule simply fails, same as any `Sor` alternative. If it
/// succeeds, every remaining child is matched as a `Must` sequence -- once
/// the condition is seen, a syntax error past it is reported at this rule.
pub(crate) fn if_must(grammar: &Grammar, state: &mut AnalyzerState, view: RuleView) -> bool {
    let rp = state.create_restore_point();
    let entry_id = view.captured().then(|| state.begin_entry(view.rule_ref()));

    let mut children = view.children();
    let Some(condition) = children.next() else {
        if let Some(id) = entry_id {
            state.fail_current_entry(id);
        }
        state.restore(rp);
        return false;
    };

    if !try_match_child(grammar, state, condition) {
        if let Some(id) = entry_id {
            state.fail_current_entry(id);
        }
        state.restore(rp);
        return false;
    }

    for child in children {
        if !try_match_child(grammar, state, child) {
            if let Some(id) = entry_id {
                state.fail_current_entry(id);
            }
            let already_committed = state.parse_failed;
            state.restore(rp);
            state.parse_failed = true;
            if !already_committed {
                state.failed_rule = Some(view.rule_ref());
            }
            return false;
        }
    }

    if let Some(id) = entry_id {
        state.finalize_entry(id);
    }
    true
}

/// Negative lookahead that consumes one byte on success. Fails at
/// end-of-input. Its inner sequence is always discarded -- matched or not --
/// via `force_restore`, since a lookahead must never leave a trace.
pub(crate) fn one_if_not_at(grammar: &Grammar, state: &mut AnalyzerState, view: RuleView) -> bool {
    if state.at_end() {
        return false;
    }
    let rp = state.create_restore_point();
    let inner_matched = seq(grammar, state, view);
    state.force_restore(rp);
    if inner_matched {
        return false;
    }
    state.consume(1);
    true
}

#[cfg(test)]
mod tests {
    use crate::analyzer::analyze;
    use crate::builder::GrammarBuilder;
    use crate::rule_registry::RuleKind;

    /// `outer` is a `Must` whose only child is `inner`, itself a `Must` that
    /// fails. The outer `Must` also fails its own child match, but the
    /// *inner* rule committed first, so `failed_rule` must stay pointed at
    /// it -- not get overwritten by the outer `Must` re-latching on its own
    /// failure.
    #[test]
    fn nested_must_failure_keeps_the_innermost_committed_rule() {
        let mut b = GrammarBuilder::new();
        let outer = b.begin_rule(RuleKind::Must, false, "outer");
        let inner = b.begin_rule(RuleKind::Must, false, "inner");
        b.add_text("a", "");
        b.add_text("b", "");
        b.end_rule();
        b.add_rule_ref(inner);
        b.end_rule();

        let grammar = b.finalize_grammar(outer, &[]);
        let failed = analyze(&grammar, b"a").unwrap_err();
        let view = grammar.rules().view_at(failed.failed_rule);
        assert_eq!(grammar.rule_name(&view), "inner");
    }
}

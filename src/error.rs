use std::fmt;

use crate::analyzer::FailedAnalysis;
use crate::grammar::Grammar;
use crate::line_index::LineIndex;

/// Renders a failed analysis as a single diagnostic line, in the analyzer's
/// native byte-offset contract plus a `line:column` presentation nicety.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub rule_name: String,
    pub pos: usize,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn from_failed_analysis(grammar: &Grammar, document: &[u8], failed: &FailedAnalysis) -> Self {
        let view = grammar.rules().view_at(failed.failed_rule);
        let rule_name = grammar.rule_name(&view).to_string();
        let index = LineIndex::build(document);
        let line = index.line_at(failed.pos);
        let column = index.column_at(failed.pos);
        Diagnostic {
            rule_name,
            pos: failed.pos,
            line,
            column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "couldn't parse \"{}\" at pos {} ({}:{})",
            self.rule_name,
            self.pos,
            self.line + 1,
            self.column + 1
        )
    }
}

/// Driver-level error taxonomy. Distinct from `Diagnostic`: this covers the
/// short-circuit chain around analysis, not the analyzer's own internal
/// failure modes.
#[derive(Debug)]
pub enum CliError {
    Io(String),
    EmptyModule,
    Analysis(Diagnostic),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "couldn't read input: {e}"),
            CliError::EmptyModule => write!(f, "module is empty"),
            CliError::Analysis(d) => write!(f, "{d}"),
        }
    }
}

impl std::error::Error for CliError {}

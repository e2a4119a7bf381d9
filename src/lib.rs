//! A hand-rolled PEG (parsing expression grammar) engine: a grammar
//! builder that assembles rules into a flat, index-addressed registry, and
//! an analyzer that matches a grammar's root rule against a document and
//! produces either a captured AST or a diagnostic anchored at the deepest
//! committed failure.
//!
//! See [`lang_grammar::build_grammar`] for the concrete curly-brace
//! language grammar this crate ships, and [`analyzer::analyze`] for the
//! entry point that runs it against a document.

pub mod analyzer;
pub mod ast;
pub mod builder;
pub mod builtins;
pub mod combinators;
pub mod debug;
pub mod error;
pub mod grammar;
pub mod lang_grammar;
pub mod line_index;
pub mod rule_registry;
pub mod text_registry;

pub use analyzer::{analyze, CompletedAnalysis, FailedAnalysis};
pub use ast::Ast;
pub use error::Diagnostic;
pub use grammar::Grammar;
pub use lang_grammar::build_grammar;

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

use argh::FromArgs;

use bracec::ast::{Ast, EntryId};
use bracec::debug::{DebugConfig, DebugLevel};
use bracec::error::{CliError, Diagnostic};
use bracec::grammar::Grammar;
use bracec::{debug_basic, debug_detailed};

#[derive(FromArgs)]
/// Parse a document with the built-in curly-brace language grammar
#[argh(subcommand, name = "parse")]
pub struct Parse {
    /// input file; omit when using -i
    #[argh(positional)]
    file: Option<OsString>,

    /// parse this literal text instead of reading a file
    #[argh(option, short = 'i')]
    inline: Option<String>,

    /// print the captured AST on success
    #[argh(switch)]
    ast: bool,

    /// trace level: off, basic, detailed, trace
    #[argh(option, short = 'v', default = "\"off\".to_string()")]
    verbose: String,

    /// trace only this byte position (for `--verbose trace`)
    #[argh(option, long = "debug-pos")]
    debug_pos: Option<usize>,
}

impl Parse {
    pub fn run(self) -> ExitCode {
        match DebugLevel::from_str(&self.verbose) {
            Ok(level) => bracec::debug::set_debug_config(DebugConfig {
                level,
                position_filter: self.debug_pos,
                failure_only: false,
            }),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }

        match self.parse_document() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        }
    }

    fn parse_document(&self) -> Result<(), CliError> {
        let document = self.read_document()?;
        debug_basic!("input is {} byte(s)", document.len());
        if document.is_empty() {
            return Err(CliError::EmptyModule);
        }

        let grammar = bracec::build_grammar();
        debug_detailed!("grammar built, {} rule(s)", grammar.get_rule_count());

        match bracec::analyze(&grammar, &document) {
            Ok(completed) => {
                debug_detailed!("analysis succeeded, {} ast entries", completed.ast.len());
                println!("parsed {} byte(s) successfully", document.len());
                if self.ast {
                    print_ast(&grammar, &document, &completed.ast);
                }
                Ok(())
            }
            Err(failed) => {
                let diagnostic = Diagnostic::from_failed_analysis(&grammar, &document, &failed);
                bracec::debug::debug_parse_failure(
                    &String::from_utf8_lossy(&document),
                    failed.pos,
                    &diagnostic.to_string(),
                );
                Err(CliError::Analysis(diagnostic))
            }
        }
    }

    fn read_document(&self) -> Result<Vec<u8>, CliError> {
        if let Some(text) = &self.inline {
            return Ok(text.clone().into_bytes());
        }
        let Some(path) = &self.file else {
            return Err(CliError::Io("no input given: pass a file or -i TEXT".to_string()));
        };
        fs::read(path).map_err(|e| CliError::Io(e.to_string()))
    }
}

/// Renders the AST as an indented tree, walking top-level entries then
/// recursing via `Ast::children` -- no parent pointers are needed.
fn print_ast(grammar: &Grammar, document: &[u8], ast: &Ast) {
    let Some(root) = ast.root_id() else {
        println!("(empty ast)");
        return;
    };
    print_entry(grammar, document, ast, root, 0);
}

fn print_entry(grammar: &Grammar, document: &[u8], ast: &Ast, id: EntryId, depth: usize) {
    let entry = ast.get_entry(id);
    let view = grammar.rules().view_at(entry.rule);
    let name = grammar.rule_name(&view);
    let text = String::from_utf8_lossy(&document[entry.start_pos..entry.end_pos]);
    let clamp = text.char_indices().nth(40).map(|(i, _)| i).unwrap_or(text.len());
    let text = &text[..clamp];
    println!(
        "{}{} [{}..{}] {:?}",
        "  ".repeat(depth),
        name,
        entry.start_pos,
        entry.end_pos,
        text
    );
    for child in ast.children(id) {
        print_entry(grammar, document, ast, child, depth + 1);
    }
}

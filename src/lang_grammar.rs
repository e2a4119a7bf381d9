//! The concrete grammar for the curly-brace language this front-end
//! parses: keywords, literals, expressions (with an explicit,
//! longest-operator-first `Sor` ordering), statements, declarations,
//! control flow, and module-level statements.
//!
//! Built in dependency order where possible; a handful of rules are
//! genuinely mutually recursive (a code block's statements include
//! declarations that haven't been built yet; a parenthesized expression
//! contains an expression that contains it). Those use
//! `GrammarBuilder::add_forward_ref`, resolved once every rule exists.

use crate::builder::GrammarBuilder;
use crate::builtins::Builtin;
use crate::grammar::Grammar;
use crate::rule_registry::{RuleKind, RuleRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LangRule {
    Statement,
    Expression,
    DeclVariable,
    DeclFunction,
    UseStatement,
    ReturnStatement,
    IfStatement,
    LoopStatement,
    WhileLoopStatement,
    ForLoopStatement,
    ModuleLevelStatements,
}

impl LangRule {
    const COUNT: usize = 11;
}

fn add_keyword(b: &mut GrammarBuilder, text: &str) -> RuleRef {
    let r = b.begin_rule(RuleKind::Seq, false, "");
    b.add_text(text, "");
    b.add_builtin_ref(Builtin::WordBoundary);
    b.end_rule();
    r
}

struct Keywords {
    kw_mod: RuleRef,
    kw_use: RuleRef,
    kw_as: RuleRef,
    kw_var: RuleRef,
    kw_let: RuleRef,
    kw_fn: RuleRef,
    kw_ret: RuleRef,
    kw_if: RuleRef,
    kw_else: RuleRef,
    kw_loop: RuleRef,
    kw_while: RuleRef,
    kw_for: RuleRef,
    kw_break: RuleRef,
    kw_continue: RuleRef,
}

fn add_keywords(b: &mut GrammarBuilder) -> Keywords {
    Keywords {
        kw_mod: add_keyword(b, "mod"),
        kw_use: add_keyword(b, "use"),
        kw_as: add_keyword(b, "as"),
        kw_var: add_keyword(b, "var"),
        kw_let: add_keyword(b, "let"),
        kw_fn: add_keyword(b, "fn"),
        kw_ret: add_keyword(b, "ret"),
        kw_if: add_keyword(b, "if"),
        kw_else: add_keyword(b, "else"),
        kw_loop: add_keyword(b, "loop"),
        kw_while: add_keyword(b, "while"),
        kw_for: add_keyword(b, "for"),
        kw_break: add_keyword(b, "break"),
        kw_continue: add_keyword(b, "continue"),
    }
}

/// Line comments, mandatory whitespace (`Ws`, one or more whitespace bytes
/// or comments) and its optional form.
fn add_base_rules(b: &mut GrammarBuilder) -> (RuleRef, RuleRef) {
    let line_comment = b.begin_rule(RuleKind::Seq, false, "");
    b.add_text("//", "");
    b.add_builtin_ref(Builtin::UntilEOL);
    b.end_rule();

    let ws = b.begin_rule(RuleKind::Plus, true, "Ws");
    b.begin_rule(RuleKind::Sor, false, "");
    b.add_builtin_ref(Builtin::Whitespace);
    b.add_rule_ref(line_comment);
    b.end_rule();
    b.end_rule();

    let opt_ws = b.begin_rule(RuleKind::Opt, false, "OptWs");
    b.add_rule_ref(ws);
    b.end_rule();

    (ws, opt_ws)
}

/// Integer, real, and string literals. String literals rely on
/// `OneIfNotAt` to consume "any character that isn't a backslash escape,
/// a newline, or the closing quote".
fn add_literals(b: &mut GrammarBuilder) -> (RuleRef, RuleRef, RuleRef) {
    let digits = b.begin_rule(RuleKind::Plus, false, "");
    b.add_builtin_ref(Builtin::Digit);
    b.end_rule();

    let integer_literal = b.begin_rule(RuleKind::Seq, true, "Integer literal");
    b.add_rule_ref(digits);
    b.end_rule();

    let real_literal = b.begin_rule(RuleKind::Seq, true, "Real literal");
    b.add_rule_ref(digits);
    b.add_text(".", "");
    b.add_rule_ref(digits);
    b.end_rule();

    let escape_sequence = b.begin_rule(RuleKind::Seq, false, "");
    b.add_text("\\", "");
    b.add_builtin_ref(Builtin::Any);
    b.end_rule();

    let string_literal_content = b.begin_rule(RuleKind::Sor, false, "");
    b.add_rule_ref(escape_sequence);
    b.begin_rule(RuleKind::OneIfNotAt, false, "");
    b.begin_rule(RuleKind::Sor, false, "");
    b.add_text("\n", "");
    b.add_text("\"", "");
    b.end_rule();
    b.end_rule();
    b.end_rule();

    let string_literal = b.begin_rule(RuleKind::Seq, true, "String literal");
    b.add_text("\"", "");
    b.begin_rule(RuleKind::Star, false, "String literal content");
    b.add_rule_ref(string_literal_content);
    b.end_rule();
    b.add_text("\"", "");
    b.end_rule();

    (integer_literal, real_literal, string_literal)
}

/// `{ (OptWs Statement)* OptWs }`. `Statement` doesn't exist yet when this
/// is built, so it's a forward reference.
fn add_blocks(b: &mut GrammarBuilder, opt_ws: RuleRef) -> RuleRef {
    let code_block = b.begin_rule(RuleKind::Seq, true, "Code block");
    b.add_text("{", "");
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Statement as usize);
    b.end_rule();
    b.add_rule_ref(opt_ws);
    b.add_text("}", "");
    b.end_rule();
    code_block
}

struct Identifiers {
    name: RuleRef,
    ty: RuleRef,
    opt_explicit_type: RuleRef,
    opt_initializer: RuleRef,
}

/// `Name`, `Type` (a bare name for now -- type parameters are a known
/// unimplemented extension), `ExplicitType` (`: Type`), `Initializer`
/// (`= Expression`), and their optional forms. `Initializer` needs
/// `Expression`, which isn't built until `add_expressions`.
fn add_identifiers(b: &mut GrammarBuilder, opt_ws: RuleRef) -> Identifiers {
    let name = b.begin_rule(RuleKind::Seq, true, "Name");
    b.add_builtin_ref(Builtin::Ident);
    b.end_rule();

    // TODO: add type parameters
    let ty = b.begin_rule(RuleKind::Seq, true, "Type");
    b.add_rule_ref(name);
    b.end_rule();

    let explicit_type = b.begin_rule(RuleKind::Seq, true, "Explicit type");
    b.add_rule_ref(opt_ws);
    b.add_text(":", "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(ty);
    b.end_rule();

    let opt_explicit_type = b.begin_rule(RuleKind::Opt, false, "");
    b.add_rule_ref(explicit_type);
    b.end_rule();

    let initializer = b.begin_rule(RuleKind::Seq, true, "Initializer");
    b.add_rule_ref(opt_ws);
    b.add_text("=", "");
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Expression as usize);
    b.end_rule();

    let opt_initializer = b.begin_rule(RuleKind::Opt, false, "");
    b.add_rule_ref(initializer);
    b.end_rule();

    Identifiers {
        name,
        ty,
        opt_explicit_type,
        opt_initializer,
    }
}

struct Expressions {
    expression: RuleRef,
    statement: RuleRef,
}

/// Atomic expressions, prefix/infix/postfix operators, the expression
/// chain itself, and `Statement`. `InfixOperator`'s alternatives are listed
/// longest-first on purpose: `Sor` tries alternatives in order and commits
/// to the first match, so `==` must precede `=` or it would never be
/// reached.
fn add_expressions(
    b: &mut GrammarBuilder,
    slots: &mut [RuleRef],
    opt_ws: RuleRef,
    name: RuleRef,
    code_block: RuleRef,
    string_literal: RuleRef,
    integer_literal: RuleRef,
    real_literal: RuleRef,
) -> Expressions {
    // ExprInParen needs Expression, which doesn't exist until after
    // ExprAtomic (which needs ExprInParen) is built. One forward reference
    // breaks the cycle.
    let expr_in_paren = b.begin_rule(RuleKind::Seq, false, "");
    b.add_text("(", "");
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Expression as usize);
    b.add_rule_ref(opt_ws);
    b.add_text(")", "");
    b.end_rule();

    let expr_atomic = b.begin_rule(RuleKind::Sor, false, "ExprAtomic");
    b.add_rule_ref(name);
    b.add_rule_ref(code_block);
    b.add_rule_ref(string_literal);
    b.add_rule_ref(integer_literal);
    b.add_rule_ref(real_literal);
    b.add_rule_ref(expr_in_paren);
    b.end_rule();

    let prefix_operator = b.begin_rule(RuleKind::Sor, false, "");
    b.add_text("not", "");
    b.add_text("&", "");
    b.add_text("*", "");
    b.add_text("++", "");
    b.add_text("--", "");
    b.end_rule();

    let infix_operator = b.begin_rule(RuleKind::Sor, false, "");
    for op in [
        ".", "::", "==", "!=", "<=", ">=", "<", ">", "+=", "-=", "*=", "/=", "%=", "=", "+", "-",
        "*", "/", "%",
    ] {
        b.add_text(op, "");
    }
    b.end_rule();

    let comma = b.add_text(",", "");

    let expr_list = b.begin_rule(RuleKind::Seq, false, "Expr list");
    b.add_forward_ref(LangRule::Expression as usize);
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(comma);
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Expression as usize);
    b.end_rule();
    b.add_rule_ref(opt_ws);
    b.begin_rule(RuleKind::Opt, false, "");
    b.add_rule_ref(comma);
    b.end_rule();
    b.end_rule();

    let opt_expr_list = b.begin_rule(RuleKind::Opt, false, "Opt Expr List");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(expr_list);
    b.add_rule_ref(opt_ws);
    b.end_rule();

    let function_call_operator = b.begin_rule(RuleKind::Seq, false, "");
    b.add_text("(", "");
    b.add_rule_ref(opt_expr_list);
    b.add_text(")", "");
    b.end_rule();

    let subscript_operator = b.begin_rule(RuleKind::Seq, false, "");
    b.add_text("[", "");
    b.add_rule_ref(opt_expr_list);
    b.add_text("]", "");
    b.end_rule();

    let postfix_operator = b.begin_rule(RuleKind::Sor, false, "");
    b.add_text("++", "");
    b.add_text("--", "");
    b.add_rule_ref(function_call_operator);
    b.add_rule_ref(subscript_operator);
    b.end_rule();

    // prefix* ~ primary ~ postfix* ~ (infix ~ prefix* ~ primary ~ postfix*)*
    let expression = b.begin_rule(RuleKind::Seq, true, "Expression");
    let primary_seq = b.begin_rule(RuleKind::Seq, false, "");
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(prefix_operator);
    b.add_rule_ref(opt_ws);
    b.end_rule();
    b.add_rule_ref(expr_atomic);
    b.add_rule_ref(opt_ws);
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(postfix_operator);
    b.add_rule_ref(opt_ws);
    b.end_rule();
    b.end_rule();
    let _ = primary_seq;
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(infix_operator);
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(primary_seq);
    b.end_rule();
    b.end_rule();
    slots[LangRule::Expression as usize] = expression;

    let statement = b.begin_rule(RuleKind::Sor, true, "Statement");
    b.add_forward_ref(LangRule::DeclVariable as usize);
    b.add_forward_ref(LangRule::DeclFunction as usize);
    b.add_forward_ref(LangRule::UseStatement as usize);
    b.add_forward_ref(LangRule::ReturnStatement as usize);
    b.add_forward_ref(LangRule::IfStatement as usize);
    b.add_forward_ref(LangRule::LoopStatement as usize);
    b.add_forward_ref(LangRule::WhileLoopStatement as usize);
    b.add_forward_ref(LangRule::ForLoopStatement as usize);
    b.add_rule_ref(code_block);
    b.begin_rule(RuleKind::Seq, false, "");
    b.add_forward_ref(LangRule::Expression as usize);
    b.add_rule_ref(opt_ws);
    b.add_text(";", "");
    b.end_rule();
    b.end_rule();
    slots[LangRule::Statement as usize] = statement;

    Expressions {
        expression,
        statement,
    }
}

struct ControlFlow {
    return_statement: RuleRef,
    if_statement: RuleRef,
    loop_statement: RuleRef,
    while_loop_statement: RuleRef,
    for_loop_statement: RuleRef,
}

fn add_control_flow(
    b: &mut GrammarBuilder,
    slots: &mut [RuleRef],
    opt_ws: RuleRef,
    ws: RuleRef,
    kw: &Keywords,
) -> ControlFlow {
    let return_statement = b.begin_rule(RuleKind::Seq, true, "Return statement");
    b.add_rule_ref(kw.kw_ret);
    b.begin_rule(RuleKind::Opt, false, "");
    b.begin_rule(RuleKind::Sor, false, "");
    b.begin_rule(RuleKind::Seq, false, "");
    b.add_rule_ref(ws);
    b.add_forward_ref(LangRule::Expression as usize);
    b.end_rule();
    b.begin_rule(RuleKind::Seq, false, "");
    b.add_rule_ref(opt_ws);
    b.add_text("(", "");
    b.add_forward_ref(LangRule::Expression as usize);
    b.add_text(")", "");
    b.end_rule();
    b.end_rule();
    b.end_rule();
    b.add_rule_ref(opt_ws);
    b.add_text(";", "");
    b.end_rule();
    slots[LangRule::ReturnStatement as usize] = return_statement;

    let else_statement = b.begin_rule(RuleKind::IfMust, true, "Else statement");
    b.add_rule_ref(kw.kw_else);
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Statement as usize);
    b.end_rule();

    let if_statement = b.begin_rule(RuleKind::IfMust, true, "If statement");
    b.add_rule_ref(kw.kw_if);
    b.add_rule_ref(opt_ws);
    b.begin_rule(RuleKind::Seq, false, "");
    b.add_text("(", "");
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Expression as usize);
    b.add_rule_ref(opt_ws);
    b.add_text(")", "");
    b.end_rule();
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Statement as usize);
    b.begin_rule(RuleKind::Opt, false, "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(else_statement);
    b.end_rule();
    b.end_rule();
    slots[LangRule::IfStatement as usize] = if_statement;

    let loop_statement = b.begin_rule(RuleKind::IfMust, true, "Loop statement");
    b.add_rule_ref(kw.kw_loop);
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Statement as usize);
    b.end_rule();
    slots[LangRule::LoopStatement as usize] = loop_statement;

    let while_loop_statement = b.begin_rule(RuleKind::IfMust, true, "While statement");
    b.add_rule_ref(kw.kw_while);
    b.add_rule_ref(opt_ws);
    b.begin_rule(RuleKind::Seq, false, "");
    b.add_text("(", "");
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Expression as usize);
    b.add_rule_ref(opt_ws);
    b.add_text(")", "");
    b.end_rule();
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Statement as usize);
    b.end_rule();
    slots[LangRule::WhileLoopStatement as usize] = while_loop_statement;

    // for ( init-statement ; condition ; step ) body
    let for_loop_statement = b.begin_rule(RuleKind::IfMust, true, "For statement");
    b.add_rule_ref(kw.kw_for);
    b.add_rule_ref(opt_ws);
    b.add_text("(", "");
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Statement as usize);
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Expression as usize);
    b.add_rule_ref(opt_ws);
    b.add_text(";", "");
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Expression as usize);
    b.add_rule_ref(opt_ws);
    b.add_text(")", "");
    b.add_rule_ref(opt_ws);
    b.add_forward_ref(LangRule::Statement as usize);
    b.end_rule();
    slots[LangRule::ForLoopStatement as usize] = for_loop_statement;

    ControlFlow {
        return_statement,
        if_statement,
        loop_statement,
        while_loop_statement,
        for_loop_statement,
    }
}

struct Declarations {
    decl_variable: RuleRef,
    decl_function: RuleRef,
}

fn add_declarations(
    b: &mut GrammarBuilder,
    slots: &mut [RuleRef],
    opt_ws: RuleRef,
    ws: RuleRef,
    kw: &Keywords,
    ids: &Identifiers,
    code_block: RuleRef,
) -> Declarations {
    let decl_variable = b.begin_rule(RuleKind::IfMust, true, "Variable declaration");
    b.begin_rule(RuleKind::Sor, false, "");
    b.add_rule_ref(kw.kw_var);
    b.add_rule_ref(kw.kw_let);
    b.end_rule();
    b.add_rule_ref(ws);
    b.add_rule_ref(ids.name);
    b.add_rule_ref(ids.opt_explicit_type);
    b.add_rule_ref(ids.opt_initializer);
    b.add_rule_ref(opt_ws);
    b.add_text(";", "");
    b.end_rule();
    slots[LangRule::DeclVariable as usize] = decl_variable;

    let function_parameter = b.begin_rule(RuleKind::Seq, true, "Function parameter");
    b.add_rule_ref(ids.name);
    b.add_rule_ref(ids.opt_explicit_type);
    b.add_rule_ref(ids.opt_initializer);
    b.end_rule();

    let param_comma = b.add_text(",", "");
    let param_list = b.begin_rule(RuleKind::Seq, false, "");
    b.add_rule_ref(function_parameter);
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(param_comma);
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(function_parameter);
    b.end_rule();
    b.add_rule_ref(opt_ws);
    b.begin_rule(RuleKind::Opt, false, "");
    b.add_rule_ref(param_comma);
    b.end_rule();
    b.end_rule();

    let opt_param_list = b.begin_rule(RuleKind::Opt, false, "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(param_list);
    b.add_rule_ref(opt_ws);
    b.end_rule();

    let function_parameters = b.begin_rule(RuleKind::Seq, true, "Function parameters");
    b.add_text("(", "");
    b.add_rule_ref(opt_param_list);
    b.add_text(")", "");
    b.end_rule();

    // TODO: make a separate code block variant for function bodies
    let decl_function = b.begin_rule(RuleKind::IfMust, true, "Function declaration");
    b.add_rule_ref(kw.kw_fn);
    b.add_rule_ref(ws);
    b.add_rule_ref(ids.name);
    b.begin_rule(RuleKind::Opt, false, "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(function_parameters);
    b.end_rule();
    b.add_rule_ref(ids.opt_explicit_type);
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(code_block);
    b.end_rule();
    slots[LangRule::DeclFunction as usize] = decl_function;

    Declarations {
        decl_variable,
        decl_function,
    }
}

/// `use`/submodule machinery and the module root (`Must`-anchored: at
/// least one module-level statement is required).
fn add_module_level_statements(
    b: &mut GrammarBuilder,
    slots: &mut [RuleRef],
    opt_ws: RuleRef,
    ws: RuleRef,
    kw: &Keywords,
    ids: &Identifiers,
    decls: &Declarations,
) -> RuleRef {
    let scope_op = b.add_text("::", "");

    let scoped_name_seq = b.begin_rule(RuleKind::Seq, false, "");
    b.add_rule_ref(ids.name);
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(scope_op);
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(ids.name);
    b.end_rule();
    b.end_rule();

    let use_name_alias = b.begin_rule(RuleKind::Seq, false, "");
    b.add_rule_ref(ws);
    b.add_rule_ref(kw.kw_as);
    b.add_rule_ref(ws);
    b.add_rule_ref(ids.name);
    b.end_rule();

    let use_identifier_seq = b.begin_rule(RuleKind::Seq, true, "Use identifier");
    b.add_rule_ref(scoped_name_seq);
    b.begin_rule(RuleKind::Sor, false, "");
    b.add_rule_ref(use_name_alias);
    // use_group_specifier: (:: (* | { seq, seq, ... }))?
    b.begin_rule(RuleKind::Opt, false, "");
    b.add_rule_ref(scope_op);
    b.begin_rule(RuleKind::Sor, false, "");
    b.add_text("*", "");
    b.begin_rule(RuleKind::Seq, false, "");
    b.add_text("{", "");
    b.add_rule_ref(opt_ws);
    b.begin_rule(RuleKind::Seq, false, "");
    b.add_rule_ref(scoped_name_seq);
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(opt_ws);
    b.add_text(",", "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(scoped_name_seq);
    b.end_rule();
    b.end_rule();
    b.add_rule_ref(opt_ws);
    b.add_text("}", "");
    b.end_rule();
    b.end_rule();
    b.end_rule();
    b.end_rule();
    b.end_rule();

    let use_identifier_seq_list = b.begin_rule(RuleKind::Seq, false, "");
    b.add_rule_ref(use_identifier_seq);
    b.begin_rule(RuleKind::Star, false, "");
    b.add_rule_ref(opt_ws);
    b.add_text(",", "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(use_identifier_seq);
    b.end_rule();
    b.end_rule();

    let use_statement = b.begin_rule(RuleKind::IfMust, true, "Use statement");
    b.add_rule_ref(kw.kw_use);
    b.add_rule_ref(ws);
    b.add_rule_ref(use_identifier_seq_list);
    b.add_rule_ref(opt_ws);
    b.add_text(";", "");
    b.end_rule();
    slots[LangRule::UseStatement as usize] = use_statement;

    // mod name { ... } -- an empty body is allowed.
    let submodule_definition = b.begin_rule(RuleKind::IfMust, true, "Submodule definition");
    b.add_rule_ref(kw.kw_mod);
    b.add_rule_ref(ws);
    b.add_rule_ref(scoped_name_seq);
    b.add_rule_ref(opt_ws);
    b.add_text("{", "");
    b.begin_rule(RuleKind::Sor, false, "");
    b.add_forward_ref(LangRule::ModuleLevelStatements as usize);
    b.add_rule_ref(opt_ws);
    b.end_rule();
    b.add_text("}", "");
    b.end_rule();

    let single_module_level_statement = b.begin_rule(RuleKind::Sor, false, "");
    b.add_rule_ref(decls.decl_function);
    b.add_rule_ref(use_statement);
    b.add_rule_ref(submodule_definition);
    b.end_rule();

    let module_level_statements = b.begin_rule(RuleKind::Must, true, "Module level statements");
    b.begin_rule(RuleKind::Plus, false, "");
    b.add_rule_ref(opt_ws);
    b.add_rule_ref(single_module_level_statement);
    b.end_rule();
    b.add_rule_ref(opt_ws);
    b.end_rule();
    slots[LangRule::ModuleLevelStatements as usize] = module_level_statements;

    module_level_statements
}

pub fn build_grammar() -> Grammar {
    let mut b = GrammarBuilder::new();
    let mut slots = vec![0u32; LangRule::COUNT];

    let (ws, opt_ws) = add_base_rules(&mut b);
    let (integer_literal, real_literal, string_literal) = add_literals(&mut b);
    let code_block = add_blocks(&mut b, opt_ws);
    let kw = add_keywords(&mut b);
    let ids = add_identifiers(&mut b, opt_ws);
    let exprs = add_expressions(
        &mut b,
        &mut slots,
        opt_ws,
        ids.name,
        code_block,
        string_literal,
        integer_literal,
        real_literal,
    );
    let _ = exprs;
    add_control_flow(&mut b, &mut slots, opt_ws, ws, &kw);
    let decls = add_declarations(&mut b, &mut slots, opt_ws, ws, &kw, &ids, code_block);
    let root = add_module_level_statements(&mut b, &mut slots, opt_ws, ws, &kw, &ids, &decls);

    b.finalize_grammar(root, &slots)
}

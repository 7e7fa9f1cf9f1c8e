//! Parser tests
//!
//! - expressions: precedence and grouping
//! - statements: statement forms and desugaring
//! - fn_def: function declarations
//! - errors: first-error reporting
//! - fuzz: proptest robustness checks

mod fn_def;

use crate::frontend::core::lexer::tokenize;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::{parse, parse_expression, ParseError};

fn parse_src(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source).expect("lexing should succeed");
    parse(&tokens)
}

fn parse_expr(source: &str) -> Expr {
    let tokens = tokenize(source).expect("lexing should succeed");
    parse_expression(&tokens).expect("expression should parse")
}

/// Fully parenthesized rendering, for precedence checks
fn show(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Number(n) => n.clone(),
        ExprKind::Str(s) => s.clone(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Binary { op, lhs, rhs } => format!("({} {} {})", show(lhs), op, show(rhs)),
    }
}

/// The only statement of a single-statement program
fn single_stmt(source: &str) -> StmtKind {
    let program = parse_src(source).expect("program should parse");
    assert_eq!(program.items.len(), 1);
    match program.items.into_iter().next() {
        Some(Item::Statement(stmt)) => stmt.kind,
        other => panic!("expected a statement, got {:?}", other),
    }
}

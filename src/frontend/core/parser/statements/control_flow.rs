//! Control flow statement parsing
//! Handles if/else, for, while, return and print

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::statements::{declarations, StatementParser};
use crate::frontend::core::parser::{ParseError, ParserState, BP_LOWEST};
use crate::util::span::Span;

/// `( expr )` around a condition
fn parse_condition(state: &mut ParserState<'_>) -> Result<Expr, ParseError> {
    state.expect(&TokenKind::LParen)?;
    let cond = state.parse_expression(BP_LOWEST)?;
    state.expect(&TokenKind::RParen)?;
    Ok(cond)
}

/// Parse `if (cond) { ... } [else if ... | else { ... }]`
pub fn parse_if_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Result<Stmt, ParseError> {
    state.expect(&TokenKind::KwIf)?;
    let cond = parse_condition(state)?;
    let then_block = state.parse_block()?;

    let else_branch = if state.skip(&TokenKind::KwElse) {
        if state.at(&TokenKind::KwIf) {
            let nested_span = state.span();
            Some(ElseBranch::If(Box::new(parse_if_stmt(state, nested_span)?)))
        } else {
            Some(ElseBranch::Block(state.parse_block()?))
        }
    } else {
        None
    };

    Ok(Stmt {
        kind: StmtKind::If {
            cond,
            then_block,
            else_branch,
        },
        span: span.merge(state.previous_span()),
    })
}

/// Parse `for (init; cond; update) { ... }`; init and update are optional
pub fn parse_for_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Result<Stmt, ParseError> {
    state.expect(&TokenKind::KwFor)?;
    state.expect(&TokenKind::LParen)?;

    let init_span = state.span();
    let init = match state.current().map(|t| &t.kind) {
        Some(TokenKind::KwVar) => Some(declarations::parse_var_stmt(state, init_span, false)?),
        Some(TokenKind::Identifier(_)) => Some(declarations::parse_assign_stmt(state, init_span, false)?),
        _ => None,
    };
    state.expect(&TokenKind::Semicolon)?;

    let cond = state.parse_expression(BP_LOWEST)?;
    state.expect(&TokenKind::Semicolon)?;

    let update_span = state.span();
    let update = if matches!(state.current().map(|t| &t.kind), Some(TokenKind::Identifier(_))) {
        Some(declarations::parse_assign_stmt(state, update_span, false)?)
    } else {
        None
    };
    state.expect(&TokenKind::RParen)?;

    let body = state.parse_block()?;
    Ok(Stmt {
        kind: StmtKind::For {
            init: init.map(Box::new),
            cond,
            update: update.map(Box::new),
            body,
        },
        span: span.merge(state.previous_span()),
    })
}

/// Parse `while (cond) { ... }`
pub fn parse_while_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Result<Stmt, ParseError> {
    state.expect(&TokenKind::KwWhile)?;
    let cond = parse_condition(state)?;
    let body = state.parse_block()?;
    Ok(Stmt {
        kind: StmtKind::While { cond, body },
        span: span.merge(state.previous_span()),
    })
}

/// Parse `return expr;`
pub fn parse_return_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Result<Stmt, ParseError> {
    state.expect(&TokenKind::KwReturn)?;
    let value = state.parse_expression(BP_LOWEST)?;
    state.expect(&TokenKind::Semicolon)?;
    Ok(Stmt {
        kind: StmtKind::Return(value),
        span: span.merge(state.previous_span()),
    })
}

/// Parse `print(expr);`
pub fn parse_print_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Result<Stmt, ParseError> {
    state.expect(&TokenKind::KwPrint)?;
    let value = parse_condition(state)?;
    state.expect(&TokenKind::Semicolon)?;
    Ok(Stmt {
        kind: StmtKind::Print(value),
        span: span.merge(state.previous_span()),
    })
}

//! Declaration parsing
//!
//! - Functions: `func name(a: int, b: int) -> int { ... }`
//! - Variables: `var name[: type] = expr;`
//! - Assignments: `name = expr;`, `name++;`, `name--;`

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::statements::StatementParser;
use crate::frontend::core::parser::{ParseError, ParserState, BP_LOWEST};
use crate::util::span::Span;

/// Parse a type keyword
pub fn parse_type(state: &mut ParserState<'_>) -> Result<TypeName, ParseError> {
    let ty = match state.current().map(|t| &t.kind) {
        Some(TokenKind::KwInt) => TypeName::Int,
        Some(TokenKind::KwFloat) => TypeName::Float,
        Some(TokenKind::KwBool) => TypeName::Bool,
        Some(TokenKind::KwString) => TypeName::String,
        _ => return Err(state.expected("type")),
    };
    state.bump();
    Ok(ty)
}

/// Parse a function declaration
pub fn parse_function(
    state: &mut ParserState<'_>,
    span: Span,
) -> Result<FunctionDecl, ParseError> {
    state.expect(&TokenKind::KwFunc)?;
    let (name, _) = state.expect_identifier()?;

    state.expect(&TokenKind::LParen)?;
    let mut params = Vec::new();
    if !state.at(&TokenKind::RParen) {
        loop {
            let (param, param_span) = state.expect_identifier()?;
            state.expect(&TokenKind::Colon)?;
            let ty = parse_type(state)?;
            params.push(Param {
                name: param,
                ty,
                span: param_span,
            });
            if !state.skip(&TokenKind::Comma) {
                break;
            }
        }
    }
    state.expect(&TokenKind::RParen)?;

    let return_type = if state.skip(&TokenKind::Arrow) {
        Some(parse_type(state)?)
    } else {
        None
    };

    let body = state.parse_block()?;
    Ok(FunctionDecl {
        name,
        params,
        return_type,
        span: span.merge(body.span),
        body,
    })
}

/// Parse `var name[: type] = expr`, with the `;` when `terminated`
pub fn parse_var_stmt(
    state: &mut ParserState<'_>,
    span: Span,
    terminated: bool,
) -> Result<Stmt, ParseError> {
    state.expect(&TokenKind::KwVar)?;
    let (name, _) = state.expect_identifier()?;
    let ty = if state.skip(&TokenKind::Colon) {
        Some(parse_type(state)?)
    } else {
        None
    };
    state.expect(&TokenKind::Eq)?;
    let init = state.parse_expression(BP_LOWEST)?;
    if terminated {
        state.expect(&TokenKind::Semicolon)?;
    }

    Ok(Stmt {
        kind: StmtKind::VarDecl { name, ty, init },
        span: span.merge(state.previous_span()),
    })
}

/// Parse `name = expr`, `name++` or `name--`, with the `;` when `terminated`
pub fn parse_assign_stmt(
    state: &mut ParserState<'_>,
    span: Span,
    terminated: bool,
) -> Result<Stmt, ParseError> {
    let (name, name_span) = state.expect_identifier()?;

    let value = match state.current_kind() {
        TokenKind::Eq => {
            state.bump();
            state.parse_expression(BP_LOWEST)?
        },
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            let op_token = state.bump().ok_or_else(|| state.unexpected())?;
            let op = if op_token.kind == TokenKind::PlusPlus {
                BinOp::Add
            } else {
                BinOp::Sub
            };
            let op_span = name_span.merge(op_token.span);
            Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(Expr::new(ExprKind::Ident(name.clone()), name_span)),
                    rhs: Box::new(Expr::new(ExprKind::Number("1".to_string()), op_token.span)),
                },
                op_span,
            )
        },
        _ => return Err(state.expected("'=', '++' or '--'")),
    };
    if terminated {
        state.expect(&TokenKind::Semicolon)?;
    }

    Ok(Stmt {
        kind: StmtKind::Assign { name, value },
        span: span.merge(state.previous_span()),
    })
}

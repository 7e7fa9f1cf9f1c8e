//! Prefix expression parsing (nud - null denotation)

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::{ParseError, ParserState};

use super::precedence::BP_LOWEST;

impl ParserState<'_> {
    /// Literal, identifier or parenthesized expression
    pub(crate) fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let span = self.span();
        let kind = match self.current_kind() {
            TokenKind::NumberLiteral(text) => ExprKind::Number(text),
            TokenKind::StringLiteral(text) => ExprKind::Str(text),
            TokenKind::BoolLiteral(value) => ExprKind::Bool(value),
            TokenKind::Identifier(name) => ExprKind::Ident(name),
            TokenKind::LParen => return self.parse_group(),
            _ => return Err(self.expected("expression")),
        };
        self.bump();
        Ok(Expr::new(kind, span))
    }

    /// `( expr )`
    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        let open = self.expect(&TokenKind::LParen)?;
        let mut inner = self.parse_expression(BP_LOWEST)?;
        let close = self.expect(&TokenKind::RParen)?;
        inner.span = open.span.merge(close.span);
        Ok(inner)
    }
}

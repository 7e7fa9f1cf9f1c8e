//! Statement parsing modules

pub mod control_flow;
pub mod declarations;

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::{ParseError, ParserState};

/// Statement parsing entry points
pub trait StatementParser {
    /// Parse a function declaration or a top-level statement
    fn parse_item(&mut self) -> Result<Item, ParseError>;
    /// Parse one statement
    fn parse_statement(&mut self) -> Result<Stmt, ParseError>;
    /// Parse `{ stmt* }`
    fn parse_block(&mut self) -> Result<Block, ParseError>;
}

impl StatementParser for ParserState<'_> {
    fn parse_item(&mut self) -> Result<Item, ParseError> {
        if self.at(&TokenKind::KwFunc) {
            let span = self.span();
            return declarations::parse_function(self, span).map(Item::Function);
        }
        self.parse_statement().map(Item::Statement)
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.span();

        match self.current().map(|t| &t.kind) {
            Some(TokenKind::KwVar) => declarations::parse_var_stmt(self, start_span, true),
            Some(TokenKind::KwIf) => control_flow::parse_if_stmt(self, start_span),
            Some(TokenKind::KwFor) => control_flow::parse_for_stmt(self, start_span),
            Some(TokenKind::KwWhile) => control_flow::parse_while_stmt(self, start_span),
            Some(TokenKind::KwReturn) => control_flow::parse_return_stmt(self, start_span),
            Some(TokenKind::KwPrint) => control_flow::parse_print_stmt(self, start_span),
            Some(TokenKind::Identifier(_)) => declarations::parse_assign_stmt(self, start_span, true),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.at(&TokenKind::RBrace) {
            if self.at_end() {
                return Err(self.expected(TokenKind::RBrace.to_string()));
            }
            stmts.push(self.parse_statement()?);
        }
        let close = self.expect(&TokenKind::RBrace)?;
        Ok(Block {
            stmts,
            span: open.span.merge(close.span),
        })
    }
}

//! Parser state and error handling

use crate::frontend::core::lexer::tokens::*;
use crate::util::span::Span;

/// Parse error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Expected a specific token or construct
    #[error("Expected {expected}, found {found}")]
    ExpectedToken {
        expected: String,
        found: TokenKind,
        span: Span,
    },
    /// Token that cannot start what is being parsed
    #[error("Unexpected {found}")]
    UnexpectedToken { found: TokenKind, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::ExpectedToken { span, .. } | ParseError::UnexpectedToken { span, .. } => *span,
        }
    }
}

/// Cursor over the token stream
pub struct ParserState<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> ParserState<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
            || matches!(self.current().map(|t| &t.kind), Some(TokenKind::Eof))
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Kind of the current token, `Eof` past the end
    pub fn current_kind(&self) -> TokenKind {
        self.current()
            .map(|t| t.kind.clone())
            .unwrap_or(TokenKind::Eof)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    pub fn span(&self) -> Span {
        self.current()
            .map(|t| t.span)
            .or_else(|| self.tokens.last().map(|t| t.span))
            .unwrap_or_else(Span::dummy)
    }

    pub fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.current().is_some_and(|t| &t.kind == kind)
    }

    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or fail
    pub fn expect(
        &mut self,
        kind: &TokenKind,
    ) -> Result<Token, ParseError> {
        if self.at(kind) {
            if let Some(token) = self.bump() {
                return Ok(token);
            }
        }
        Err(self.expected(kind.to_string()))
    }

    /// Consume an identifier and return its name
    pub fn expect_identifier(&mut self) -> Result<(String, Span), ParseError> {
        match self.current() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                span,
            }) => {
                let result = (name.clone(), *span);
                self.bump();
                Ok(result)
            },
            _ => Err(self.expected("identifier")),
        }
    }

    /// Error for the current token
    pub fn expected(
        &self,
        what: impl Into<String>,
    ) -> ParseError {
        ParseError::ExpectedToken {
            expected: what.into(),
            found: self.current_kind(),
            span: self.span(),
        }
    }

    pub fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.current_kind(),
            span: self.span(),
        }
    }

    /// Span of the most recently consumed token
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map(|t| t.span)
            .unwrap_or_else(Span::dummy)
    }

    pub fn save_position(&self) -> usize {
        self.pos
    }

    pub fn restore_position(
        &mut self,
        pos: usize,
    ) {
        self.pos = pos;
    }
}

//! Token types

use std::fmt;

use crate::util::span::{Position, Span};

/// Lexer error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },
    #[error("Unterminated string starting at {position}")]
    UnterminatedString { position: Position },
    #[error("Unterminated block comment starting at {position}")]
    UnterminatedComment { position: Position },
}

impl LexError {
    /// Location of the offending input
    pub fn span(&self) -> Span {
        let position = match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::UnterminatedComment { position } => *position,
        };
        let end = Position::with_offset(position.line, position.column + 1, position.offset + 1);
        Span::new(position, end)
    }
}

/// Token kind
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    KwFunc,
    KwVar,
    KwIf,
    KwElse,
    KwFor,
    KwWhile,
    KwReturn,
    KwPrint,
    KwInt,
    KwFloat,
    KwBool,
    KwString,

    Identifier(String),

    // Literals keep their source text; strings keep their quotes
    NumberLiteral(String),
    StringLiteral(String),
    BoolLiteral(bool),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Eq,
    EqEq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Arrow,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,

    Eof,
}

impl TokenKind {
    /// Whether this kind names a type
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwBool | TokenKind::KwString
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let text = match self {
            TokenKind::KwFunc => "'func'",
            TokenKind::KwVar => "'var'",
            TokenKind::KwIf => "'if'",
            TokenKind::KwElse => "'else'",
            TokenKind::KwFor => "'for'",
            TokenKind::KwWhile => "'while'",
            TokenKind::KwReturn => "'return'",
            TokenKind::KwPrint => "'print'",
            TokenKind::KwInt => "'int'",
            TokenKind::KwFloat => "'float'",
            TokenKind::KwBool => "'bool'",
            TokenKind::KwString => "'string'",
            TokenKind::Identifier(name) => return write!(f, "identifier '{}'", name),
            TokenKind::NumberLiteral(n) => return write!(f, "number {}", n),
            TokenKind::StringLiteral(s) => return write!(f, "string {}", s),
            TokenKind::BoolLiteral(b) => return write!(f, "'{}'", b),
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::Neq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Arrow => "'->'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// Token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::dummy(),
        }
    }
}

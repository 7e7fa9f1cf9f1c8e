//! Keyword recognition

use crate::frontend::core::lexer::tokens::TokenKind;

/// Keyword table
#[derive(Debug, Default)]
pub struct LexerState;

impl LexerState {
    pub fn new() -> Self {
        Self
    }

    /// Convert an identifier to its keyword token, if it is one
    pub fn keyword_from_str(
        &self,
        s: &str,
    ) -> Option<TokenKind> {
        match s {
            // Declarations
            "func" => Some(TokenKind::KwFunc),
            "var" => Some(TokenKind::KwVar),

            // Control flow
            "if" => Some(TokenKind::KwIf),
            "else" => Some(TokenKind::KwElse),
            "for" => Some(TokenKind::KwFor),
            "while" => Some(TokenKind::KwWhile),
            "return" => Some(TokenKind::KwReturn),
            "print" => Some(TokenKind::KwPrint),

            // Types
            "int" => Some(TokenKind::KwInt),
            "float" => Some(TokenKind::KwFloat),
            "bool" => Some(TokenKind::KwBool),
            "string" => Some(TokenKind::KwString),

            "true" => Some(TokenKind::BoolLiteral(true)),
            "false" => Some(TokenKind::BoolLiteral(false)),

            _ => None,
        }
    }
}

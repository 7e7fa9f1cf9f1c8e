//! Lexer module
//!
//! Turns Charmeleon source text into tokens. Literal tokens keep their source
//! spelling, which is what the IR and the generated Python use.

pub mod literals;
pub mod state;
pub mod tokenizer;
pub mod tokens;

pub use tokenizer::Lexer;
pub use tokens::{LexError, Token, TokenKind};

use crate::util::span::Span;

/// Tokenize source code. The last token is always [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tracing::debug!("lexing {} bytes", source.len());

    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token() {
        let token = token?;
        tracing::trace!("token {:?} at {}", token.kind, token.span);
        tokens.push(token);
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(lexer.position(), lexer.position()),
    });
    tracing::debug!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

//! Literal scanning

use crate::frontend::core::lexer::tokens::*;

use super::tokenizer::Lexer;

/// Scan a number literal: `\d+(\.\d*)?`
pub fn scan_number(
    lexer: &mut Lexer<'_>,
    first_char: char,
) -> Token {
    let mut value = String::new();
    value.push(first_char);

    while let Some(&c) = lexer.peek() {
        if is_digit(c) {
            value.push(c);
            lexer.advance();
        } else {
            break;
        }
    }

    if lexer.peek() == Some(&'.') {
        value.push('.');
        lexer.advance();
        while let Some(&c) = lexer.peek() {
            if is_digit(c) {
                value.push(c);
                lexer.advance();
            } else {
                break;
            }
        }
    }

    lexer.make_token(TokenKind::NumberLiteral(value))
}

/// Scan a string literal opened by `quote`. The token keeps both quotes and
/// any escape sequences as written.
pub fn scan_string(
    lexer: &mut Lexer<'_>,
    quote: char,
) -> Result<Token, LexError> {
    let start = lexer.start_position();
    let mut value = String::new();
    value.push(quote);

    loop {
        match lexer.advance() {
            Some('\\') => {
                value.push('\\');
                match lexer.advance() {
                    Some(c) => value.push(c),
                    None => return Err(LexError::UnterminatedString { position: start }),
                }
            },
            Some(c) if c == quote => {
                value.push(c);
                return Ok(lexer.make_token(TokenKind::StringLiteral(value)));
            },
            Some('\n') | None => return Err(LexError::UnterminatedString { position: start }),
            Some(c) => value.push(c),
        }
    }
}

/// Check if character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if character can continue an identifier
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

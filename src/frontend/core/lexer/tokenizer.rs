//! Tokenizer implementation

use std::iter::Peekable;
use std::str::Chars;

use super::literals::{is_digit, is_identifier_char, is_identifier_start, scan_number, scan_string};
use super::state::LexerState;
use crate::frontend::core::lexer::tokens::*;
use crate::util::span::{Position, Span};

/// Main lexer structure
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            state: LexerState::new(),
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.offset += 1;
                self.line += 1;
                self.column = 1;
                Some('\n')
            },
            Some(c) => {
                self.offset += c.len_utf8();
                self.column += 1;
                Some(c)
            },
            None => None,
        }
    }

    /// Peek at next character
    pub fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Peek at character after next
    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Skip whitespace and `//`, `/* */` and `#` comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        while let Some(&c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                },
                '#' => self.skip_line(),
                '/' if self.peek_next() == Some('/') => self.skip_line(),
                '/' if self.peek_next() == Some('*') => {
                    let start = self.position();
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some(&'/') => {
                                self.advance();
                                break;
                            },
                            Some(_) => {},
                            None => return Err(LexError::UnterminatedComment { position: start }),
                        }
                    }
                },
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_line(&mut self) {
        while let Some(&c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Generate next token; `None` at end of input
    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        if let Err(err) = self.skip_whitespace_and_comments() {
            return Some(Err(err));
        }

        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;

        let c = self.advance()?;

        let token = match c {
            c if is_identifier_start(c) => self.scan_identifier(c),
            c if is_digit(c) => scan_number(self, c),
            '"' | '\'' => return Some(scan_string(self, c)),
            '+' => self.one_or_two('+', TokenKind::PlusPlus, TokenKind::Plus),
            '-' => {
                if self.peek() == Some(&'>') {
                    self.advance();
                    self.make_token(TokenKind::Arrow)
                } else {
                    self.one_or_two('-', TokenKind::MinusMinus, TokenKind::Minus)
                }
            },
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '=' => self.one_or_two('=', TokenKind::EqEq, TokenKind::Eq),
            '<' => self.one_or_two('=', TokenKind::Le, TokenKind::Lt),
            '>' => self.one_or_two('=', TokenKind::Ge, TokenKind::Gt),
            '!' if self.peek() == Some(&'=') => {
                self.advance();
                self.make_token(TokenKind::Neq)
            },
            '&' if self.peek() == Some(&'&') => {
                self.advance();
                self.make_token(TokenKind::And)
            },
            '|' if self.peek() == Some(&'|') => {
                self.advance();
                self.make_token(TokenKind::Or)
            },
            '(' => self.make_token(TokenKind::LParen),
            ')' => self.make_token(TokenKind::RParen),
            '{' => self.make_token(TokenKind::LBrace),
            '}' => self.make_token(TokenKind::RBrace),
            ',' => self.make_token(TokenKind::Comma),
            ':' => self.make_token(TokenKind::Colon),
            ';' => self.make_token(TokenKind::Semicolon),
            c => {
                return Some(Err(LexError::UnexpectedChar {
                    ch: c,
                    position: self.start_position(),
                }))
            },
        };

        Some(Ok(token))
    }

    /// `double` if the next character is `second`, otherwise `single`
    fn one_or_two(
        &mut self,
        second: char,
        double: TokenKind,
        single: TokenKind,
    ) -> Token {
        if self.peek() == Some(&second) {
            self.advance();
            self.make_token(double)
        } else {
            self.make_token(single)
        }
    }

    /// Scan identifier token
    fn scan_identifier(
        &mut self,
        first_char: char,
    ) -> Token {
        let mut value = String::new();
        value.push(first_char);

        while let Some(&c) = self.peek() {
            if is_identifier_char(c) {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = self
            .state
            .keyword_from_str(&value)
            .unwrap_or(TokenKind::Identifier(value));
        self.make_token(kind)
    }

    /// Create token with current span
    pub fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        Token {
            kind,
            span: self.span(),
        }
    }
}

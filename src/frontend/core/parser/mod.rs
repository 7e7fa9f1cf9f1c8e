//! Parser module
//!
//! Recursive descent for statements, Pratt parsing for expressions.

pub mod ast;
pub mod parser_state;
pub mod pratt;
pub mod statements;
#[cfg(test)]
mod tests;

pub use ast::*;
pub use parser_state::{ParseError, ParserState};
pub use pratt::*;
pub use statements::StatementParser;

pub use crate::frontend::core::lexer::tokens::*;

/// Parse tokens into a program. Stops at the first error.
///
/// ```text
/// func main() {
///     print("Hello");
/// }
/// ```
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut state = ParserState::new(tokens);
    let mut items = Vec::new();

    while !state.at_end() {
        items.push(state.parse_item()?);
    }

    tracing::debug!("parsed {} top-level items", items.len());
    Ok(Program { items })
}

/// Parse a single expression, requiring all input to be consumed
pub fn parse_expression(tokens: &[Token]) -> Result<Expr, ParseError> {
    let mut state = ParserState::new(tokens);
    let expr = state.parse_expression(BP_LOWEST)?;
    if !state.at_end() {
        return Err(state.unexpected());
    }
    Ok(expr)
}

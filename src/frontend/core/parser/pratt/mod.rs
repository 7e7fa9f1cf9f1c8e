//! Pratt parser for expressions

pub mod led;
pub mod nud;
pub mod precedence;

pub use precedence::*;

use crate::frontend::core::parser::ast::Expr;
use crate::frontend::core::parser::{ParseError, ParserState};

impl ParserState<'_> {
    /// Parse an expression whose operators bind tighter than `min_bp`
    pub fn parse_expression(
        &mut self,
        min_bp: u8,
    ) -> Result<Expr, ParseError> {
        let left = self.parse_prefix()?;
        self.parse_infix(left, min_bp)
    }
}

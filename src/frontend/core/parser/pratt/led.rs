//! Infix expression parsing (led - left denotation)

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::{ParseError, ParserState};

use super::precedence::infix_binding_power;

impl ParserState<'_> {
    /// Fold every infix operator binding tighter than `min_bp` onto `left`
    pub(crate) fn parse_infix(
        &mut self,
        mut left: Expr,
        min_bp: u8,
    ) -> Result<Expr, ParseError> {
        while let Some((op, bp)) = self.current().and_then(|t| infix_binding_power(&t.kind)) {
            if bp <= min_bp {
                break;
            }
            self.bump();
            // Left associative: the right side only takes tighter operators
            let right = self.parse_expression(bp)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(left),
                    rhs: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }
}

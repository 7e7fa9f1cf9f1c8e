//! Binding powers for binary operators
//!
//! All six comparisons share one level, so `a < b == c` groups left.

use crate::frontend::core::lexer::tokens::TokenKind;
use crate::frontend::core::parser::ast::BinOp;

pub const BP_LOWEST: u8 = 0;
pub const BP_OR: u8 = 2;
pub const BP_AND: u8 = 3;
pub const BP_CMP: u8 = 5;
pub const BP_ADD: u8 = 6;
pub const BP_MUL: u8 = 7;

/// Operator and left binding power of an infix token
pub fn infix_binding_power(kind: &TokenKind) -> Option<(BinOp, u8)> {
    let entry = match kind {
        TokenKind::Or => (BinOp::Or, BP_OR),
        TokenKind::And => (BinOp::And, BP_AND),
        TokenKind::EqEq => (BinOp::Eq, BP_CMP),
        TokenKind::Neq => (BinOp::Ne, BP_CMP),
        TokenKind::Lt => (BinOp::Lt, BP_CMP),
        TokenKind::Le => (BinOp::Le, BP_CMP),
        TokenKind::Gt => (BinOp::Gt, BP_CMP),
        TokenKind::Ge => (BinOp::Ge, BP_CMP),
        TokenKind::Plus => (BinOp::Add, BP_ADD),
        TokenKind::Minus => (BinOp::Sub, BP_ADD),
        TokenKind::Star => (BinOp::Mul, BP_MUL),
        TokenKind::Slash => (BinOp::Div, BP_MUL),
        TokenKind::Percent => (BinOp::Mod, BP_MUL),
        _ => return None,
    };
    Some(entry)
}

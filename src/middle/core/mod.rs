//! Core intermediate representation
//!
//! The instruction model, its text recognizer, and lowering from the AST.

pub mod ir;
pub mod ir_gen;
pub mod parse;

pub use ir::{is_temporary, Instruction, IrError, Program};
pub use ir_gen::{generate_ir, AstToIrGenerator};

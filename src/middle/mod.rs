//! Middle end: IR and IR passes
//!
//! `core` holds the instruction model and AST lowering; `passes` holds dead
//! code elimination and Python generation.

pub mod core;
pub mod passes;

pub use self::core::{generate_ir, Instruction, IrError, Program};
pub use passes::codegen::{generate, CodegenWarning, Generator};
pub use passes::dce::{eliminate, DceConfig, DcePass, DceStats};

//! IR pass tests
//!
//! - dce: elimination scenarios and statistics
//! - codegen: structuring of loops, branches and fallbacks
//! - properties: proptest checks over generated programs


use crate::middle::core::ir::Program;

fn program(text: &str) -> Program {
    Program::parse(text).expect("IR listing should be valid")
}

//! IR passes
//!
//! - dce: dead code elimination
//! - codegen: control-flow structuring into Python

pub mod codegen;
pub mod dce;

#[cfg(test)]
mod tests;

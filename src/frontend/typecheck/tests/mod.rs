//! Semantic analysis tests
//!
//! - scope: scope stack behaviour
//! - accept: programs that must pass
//! - errors: programs that must be rejected

mod accept;
mod errors;

use crate::frontend::core::{parse, tokenize};
use crate::frontend::typecheck::{analyze, SemanticError};

fn check_src(source: &str) -> Result<(), SemanticError> {
    let tokens = tokenize(source).expect("lexing should succeed");
    let program = parse(&tokens).expect("parsing should succeed");
    analyze(&program)
}

fn check_err(source: &str) -> SemanticError {
    check_src(source).expect_err("analysis should fail")
}

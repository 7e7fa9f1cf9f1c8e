//! Semantic analysis
//!
//! Scoped symbol tables and type checking for Charmeleon:
//! - redeclaration and undeclared-name errors
//! - declared type vs initializer type
//! - bool conditions for `if`, `for` and `while`
//! - operand types of binary operators
//! - declared function return types

pub mod check;
pub mod errors;
pub mod scope;

#[cfg(test)]
mod tests;

pub use check::{binary_result, SemanticAnalyzer};
pub use errors::SemanticError;
pub use scope::{ScopeStack, Symbol, SymbolKind};

use crate::frontend::core::parser::ast::Program;

/// Check a program with a fresh analyzer
pub fn analyze(program: &Program) -> Result<(), SemanticError> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(program)?;
    tracing::debug!(
        "semantic analysis passed ({} global symbols)",
        analyzer.scopes().globals().count()
    );
    Ok(())
}

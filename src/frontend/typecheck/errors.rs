//! Semantic errors

use thiserror::Error;

use crate::frontend::core::parser::ast::{BinOp, TypeName};
use crate::util::span::Span;

/// Semantic error. Analysis stops at the first one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    #[error("Symbol '{name}' already declared in this scope")]
    Redeclared { name: String, span: Span },

    #[error("'{name}' is reserved for compiler temporaries")]
    ReservedName { name: String, span: Span },

    #[error("Undeclared variable '{name}'")]
    Undeclared { name: String, span: Span },

    #[error("'{name}' is a function, not a value")]
    NotAValue { name: String, span: Span },

    #[error("Incompatible assignment to '{name}': expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: TypeName,
        found: TypeName,
        span: Span,
    },

    #[error("Condition of '{construct}' must be bool, found {found}")]
    NonBoolCondition {
        construct: &'static str,
        found: TypeName,
        span: Span,
    },

    #[error("Invalid operands for '{op}': {left} and {right}")]
    InvalidOperands {
        op: BinOp,
        left: TypeName,
        right: TypeName,
        span: Span,
    },

    #[error("Function '{function}' must return {expected}, found {found}")]
    ReturnTypeMismatch {
        function: String,
        expected: TypeName,
        found: TypeName,
        span: Span,
    },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            SemanticError::Redeclared { span, .. }
            | SemanticError::ReservedName { span, .. }
            | SemanticError::Undeclared { span, .. }
            | SemanticError::NotAValue { span, .. }
            | SemanticError::TypeMismatch { span, .. }
            | SemanticError::NonBoolCondition { span, .. }
            | SemanticError::InvalidOperands { span, .. }
            | SemanticError::ReturnTypeMismatch { span, .. } => *span,
        }
    }
}

//! Front end and compilation driver
//!
//! Tokenizing, parsing, semantic analysis and the security scan, plus the
//! [`pipeline`] that strings every phase together.

use thiserror::Error;

use crate::frontend::core::lexer::LexError;
use crate::frontend::core::parser::ParseError;
use crate::frontend::typecheck::SemanticError;
use crate::middle::core::ir::IrError;
use crate::util::span::Span;

pub mod core;
pub mod pipeline;
pub mod sast;
pub mod typecheck;

pub use pipeline::{CompileOutput, FrontendOutput, Pipeline, PipelineState, StructureOutput};

/// Compilation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    #[error("Unstructured jump to '{label}' in function '{function}'")]
    UnstructuredJump { function: String, label: String },
}

impl CompileError {
    /// Source location, for errors raised on source text
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex(e) => Some(e.span()),
            CompileError::Parse(e) => Some(e.span()),
            CompileError::Semantic(e) => Some(e.span()),
            CompileError::Ir(_) | CompileError::UnstructuredJump { .. } => None,
        }
    }
}

//! Core front-end algorithms: tokenizing and parsing

pub mod lexer;
pub mod parser;

pub use lexer::tokenize;
pub use parser::parse;

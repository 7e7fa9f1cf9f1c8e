//! Charmeleon compiler
//!
//! Compiles the small C-like Charmeleon language to Python source. The
//! front end checks and scans the program, the middle end lowers it to a
//! flat three-address IR, removes dead definitions and rebuilds structured
//! Python `if`/`else`/`while` blocks from the labels and jumps.
//!
//! # Example
//!
//! ```
//! let python = charmeleon::compile("func main() { print(\"Hello\"); }").unwrap();
//! assert!(python.starts_with("def main():\n    print(\"Hello\")\n"));
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;
pub mod middle;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

pub use frontend::{CompileError, CompileOutput, Pipeline};
pub use middle::{eliminate, generate};

use std::fs;
use std::path::Path;

use tracing::debug;

/// Compiler version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compiler name
pub const NAME: &str = "Charmeleon";

/// Compile source code to Python with the default configuration
pub fn compile(source: &str) -> ::std::result::Result<String, CompileError> {
    Pipeline::default().run(source).map(|output| output.python)
}

/// Compile a source file with the given configuration
pub fn compile_file(
    path: &Path,
    config: util::config::CompilerConfig,
) -> Result<CompileOutput> {
    debug!("compiling file {}", path.display());
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let output = Pipeline::new(config)
        .run(&source)
        .with_context(|| format!("Failed to compile: {}", path.display()))?;
    Ok(output)
}

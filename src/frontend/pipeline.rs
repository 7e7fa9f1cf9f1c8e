//! Compilation pipeline
//!
//! Drives the phases in order and records which phase is running:
//!
//! ```text
//! source -> tokens -> AST -> semantic check -> scan -> IR
//!        -> entry wrapping -> DCE -> Python
//! ```
//!
//! Any front-end error stops the run. The scan and the structuring warnings
//! never do, unless `codegen.strict_jumps` is set.

use std::fmt;
use std::time::Instant;

use crate::frontend::core::lexer::{tokenize, Token};
use crate::frontend::core::parser::{ast, parse};
use crate::frontend::sast::{self, Vulnerability};
use crate::frontend::typecheck;
use crate::frontend::CompileError;
use crate::middle::core::{generate_ir, Instruction, Program};
use crate::middle::passes::codegen::{CodegenWarning, Generator};
use crate::middle::passes::dce::{DceConfig, DcePass, DceStats};
use crate::util::config::CompilerConfig;

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Lexing,
    Parsing,
    Analyzing,
    Scanning,
    IrGenerating,
    Optimizing,
    Generating,
    Completed,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Lexing => write!(f, "lexing"),
            PipelineState::Parsing => write!(f, "parsing"),
            PipelineState::Analyzing => write!(f, "semantic analysis"),
            PipelineState::Scanning => write!(f, "security scan"),
            PipelineState::IrGenerating => write!(f, "IR generation"),
            PipelineState::Optimizing => write!(f, "dead code elimination"),
            PipelineState::Generating => write!(f, "Python generation"),
            PipelineState::Completed => write!(f, "completed"),
            PipelineState::Failed => write!(f, "failed"),
        }
    }
}

/// Result of the front end alone
#[derive(Debug, Clone)]
pub struct FrontendOutput {
    pub tokens: Vec<Token>,
    pub ast: ast::Program,
}

/// Result of running DCE and structuring on an IR program
#[derive(Debug, Clone)]
pub struct StructureOutput {
    pub optimized_ir: Program,
    pub python: String,
    pub warnings: Vec<CodegenWarning>,
    pub dce_stats: DceStats,
}

/// Everything a full compilation produces
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub tokens: Vec<Token>,
    pub ast: ast::Program,
    pub vulnerabilities: Vec<Vulnerability>,
    /// IR as lowered, before entry wrapping
    pub ir: Program,
    pub optimized_ir: Program,
    pub python: String,
    pub warnings: Vec<CodegenWarning>,
    pub dce_stats: DceStats,
    /// Time spent per phase, in microseconds
    pub phase_durations: Vec<(PipelineState, u64)>,
}

/// Compilation pipeline
#[derive(Debug)]
pub struct Pipeline {
    state: PipelineState,
    config: CompilerConfig,
    phase_durations: Vec<(PipelineState, u64)>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            state: PipelineState::Idle,
            config,
            phase_durations: Vec::new(),
        }
    }

    /// Current (or, after a run, final) state
    #[inline]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Run `f` as phase `state`, timing it and marking failures
    fn phase<T>(
        &mut self,
        state: PipelineState,
        f: impl FnOnce(&Self) -> Result<T, CompileError>,
    ) -> Result<T, CompileError> {
        self.state = state;
        let start = Instant::now();
        let result = f(self);
        self.phase_durations
            .push((state, start.elapsed().as_micros() as u64));
        if let Err(e) = &result {
            tracing::debug!("{} failed: {}", state, e);
            self.state = PipelineState::Failed;
        }
        result
    }

    /// Tokenize, parse and check `source`
    pub fn run_frontend(
        &mut self,
        source: &str,
    ) -> Result<FrontendOutput, CompileError> {
        self.phase_durations.clear();
        let tokens = self.phase(PipelineState::Lexing, |_| Ok(tokenize(source)?))?;
        let ast = self.phase(PipelineState::Parsing, |_| Ok(parse(&tokens)?))?;
        self.phase(PipelineState::Analyzing, |_| Ok(typecheck::analyze(&ast)?))?;
        Ok(FrontendOutput { tokens, ast })
    }

    /// Full compilation of Charmeleon source to Python
    pub fn run(
        &mut self,
        source: &str,
    ) -> Result<CompileOutput, CompileError> {
        tracing::debug!("compiling {} bytes", source.len());
        let FrontendOutput { tokens, ast } = self.run_frontend(source)?;

        let vulnerabilities = self.phase(PipelineState::Scanning, |this| {
            Ok(if this.config.sast.enabled {
                sast::scan(&ast)
            } else {
                Vec::new()
            })
        })?;

        let ir = self.phase(PipelineState::IrGenerating, |_| Ok(generate_ir(&ast)?))?;
        let StructureOutput {
            optimized_ir,
            python,
            warnings,
            dce_stats,
        } = self.run_entry(&ir, self.config.optimizer.enabled, true)?;

        self.state = PipelineState::Completed;
        Ok(CompileOutput {
            tokens,
            ast,
            vulnerabilities,
            ir,
            optimized_ir,
            python,
            warnings,
            dce_stats,
            phase_durations: self.phase_durations.clone(),
        })
    }

    /// Run DCE (optionally) and structuring on a textual IR listing.
    /// Top-level instructions are wrapped into the entry function.
    pub fn run_ir(
        &mut self,
        text: &str,
        dce: bool,
    ) -> Result<StructureOutput, CompileError> {
        self.phase_durations.clear();
        let program = self.phase(PipelineState::Parsing, |_| Ok(Program::parse(text)?))?;
        let output = self.run_entry(&program, dce && self.config.optimizer.enabled, false)?;
        self.state = PipelineState::Completed;
        Ok(output)
    }

    /// Wrap top-level instructions into the entry function, then run the
    /// backend and append the module guard calling it. Without top-level
    /// code the guard calls a parameterless `main` when `call_main` is set.
    fn run_entry(
        &mut self,
        ir: &Program,
        dce: bool,
        call_main: bool,
    ) -> Result<StructureOutput, CompileError> {
        let entry = self.config.codegen.entry_function.clone();
        let (wrapped, wrapped_entry) = wrap_entry(ir, &entry);
        let entry_call = if wrapped_entry {
            Some(entry)
        } else if call_main {
            find_main(ir)
        } else {
            None
        };

        let mut output = self.run_backend(&wrapped, dce)?;
        if let Some(entry) = entry_call {
            output
                .python
                .push_str(&format!("\nif __name__ == '__main__':\n{}{}()\n", self.indent(), entry));
        }
        Ok(output)
    }

    fn run_backend(
        &mut self,
        program: &Program,
        dce: bool,
    ) -> Result<StructureOutput, CompileError> {
        let (optimized_ir, dce_stats) = self.phase(PipelineState::Optimizing, |this| {
            let mut pass = DcePass::new(DceConfig {
                enabled: dce,
                ..DceConfig::from(&this.config.optimizer)
            });
            let optimized = pass.run(program);
            Ok((optimized, pass.stats().clone()))
        })?;

        let (python, warnings) = self.phase(PipelineState::Generating, |this| {
            let (python, warnings) = Generator::new(&optimized_ir, &this.config.codegen).generate();
            if this.config.codegen.strict_jumps {
                if let Some(e) = warnings.iter().find_map(strict_error) {
                    return Err(e);
                }
            }
            Ok((python, warnings))
        })?;

        Ok(StructureOutput {
            optimized_ir,
            python,
            warnings,
            dce_stats,
        })
    }

    fn indent(&self) -> String {
        " ".repeat(self.config.codegen.indent_width)
    }
}

/// Error for a warning that strict mode refuses
fn strict_error(warning: &CodegenWarning) -> Option<CompileError> {
    match warning {
        CodegenWarning::UnstructuredJump { function, label, .. }
        | CodegenWarning::UnresolvedBranch { function, label, .. } => Some(CompileError::UnstructuredJump {
            function: function.clone(),
            label: label.clone(),
        }),
        CodegenWarning::OutsideFunction { .. } => None,
    }
}

/// Move instructions outside every function into a trailing `entry` function.
///
/// Returns the new program and whether anything was moved.
pub fn wrap_entry(
    program: &Program,
    entry: &str,
) -> (Program, bool) {
    let mut functions = Vec::with_capacity(program.len() + 2);
    let mut top_level = Vec::new();
    let mut inside = false;

    for instr in program {
        match instr {
            Instruction::Func { .. } => {
                inside = true;
                functions.push(instr.clone());
            },
            Instruction::EndFunc { .. } => {
                inside = false;
                functions.push(instr.clone());
            },
            _ if inside => functions.push(instr.clone()),
            _ => top_level.push(instr.clone()),
        }
    }

    if top_level.is_empty() {
        return (program.clone(), false);
    }

    tracing::debug!("wrapping {} top-level instructions into '{}'", top_level.len(), entry);
    functions.push(Instruction::Func {
        name: entry.to_string(),
        params: Vec::new(),
    });
    functions.extend(top_level);
    functions.push(Instruction::EndFunc {
        name: entry.to_string(),
    });
    // Labels are only moved, so they stay unique
    (Program::from_validated(functions), true)
}

/// A parameterless `main` function to call from the module guard
fn find_main(program: &Program) -> Option<String> {
    program.iter().find_map(|instr| match instr {
        Instruction::Func { name, params } if name == "main" && params.is_empty() => Some(name.clone()),
        _ => None,
    })
}

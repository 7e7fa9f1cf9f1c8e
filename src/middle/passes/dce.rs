//! Dead code elimination
//!
//! A backward liveness sweep over the flat IR. Only `ASSIGN` and `BIN_OP`
//! are ever removed; labels, jumps, prints, returns and unknown lines always
//! survive, so the sweep needs no control-flow graph.
//!
//! With [`DceConfig::prune_unread_variables`] a user variable is also removed
//! when nothing left in the program reads it. That read set is
//! flow-insensitive, and the sweep repeats until nothing changes.

use std::collections::HashSet;

use crate::middle::core::ir::{is_temporary, Instruction, Program};
use crate::util::config::OptimizerConfig;

/// DCE configuration
#[derive(Debug, Clone)]
pub struct DceConfig {
    /// Whether the pass runs at all
    pub enabled: bool,
    /// Remove user variables that are never read
    pub prune_unread_variables: bool,
}

impl Default for DceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prune_unread_variables: true,
        }
    }
}

impl DceConfig {
    /// Single conservative sweep: user variables are always kept
    pub fn conservative() -> Self {
        Self {
            enabled: true,
            prune_unread_variables: false,
        }
    }
}

impl From<&OptimizerConfig> for DceConfig {
    fn from(config: &OptimizerConfig) -> Self {
        Self {
            enabled: config.enabled,
            prune_unread_variables: config.prune_unread_variables,
        }
    }
}

/// DCE statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DceStats {
    /// Instructions before the pass
    pub input_instructions: usize,
    /// Instructions after the pass
    pub output_instructions: usize,
    /// Removed temporary definitions
    pub temporaries_removed: usize,
    /// Removed user variable definitions
    pub variables_removed: usize,
    /// Backward sweeps performed
    pub sweeps: usize,
}

impl DceStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total removed instructions
    pub fn removed(&self) -> usize {
        self.input_instructions - self.output_instructions
    }

    pub fn format(&self) -> String {
        format!(
            "DCE: {} -> {} instructions ({} temporaries, {} variables removed, {} sweeps)",
            self.input_instructions,
            self.output_instructions,
            self.temporaries_removed,
            self.variables_removed,
            self.sweeps
        )
    }
}

/// Dead code elimination pass
#[derive(Debug, Default)]
pub struct DcePass {
    config: DceConfig,
    stats: DceStats,
}

impl DcePass {
    pub fn new(config: DceConfig) -> Self {
        Self {
            config,
            stats: DceStats::new(),
        }
    }

    pub fn config(&self) -> &DceConfig {
        &self.config
    }

    /// Statistics of the last run
    pub fn stats(&self) -> &DceStats {
        &self.stats
    }

    /// Run the pass, producing an order-preserving subsequence of `program`
    pub fn run(
        &mut self,
        program: &Program,
    ) -> Program {
        self.stats = DceStats {
            input_instructions: program.len(),
            ..DceStats::default()
        };

        if !self.config.enabled {
            self.stats.output_instructions = program.len();
            return program.clone();
        }

        let mut current: Vec<Instruction> = program.instructions().to_vec();
        loop {
            let reads = if self.config.prune_unread_variables {
                Some(read_set(&current))
            } else {
                None
            };
            let keep = sweep(&current, reads.as_ref());
            self.stats.sweeps += 1;

            let before = current.len();
            let mut next = Vec::with_capacity(before);
            for (instr, kept) in current.into_iter().zip(keep) {
                if kept {
                    next.push(instr);
                    continue;
                }
                match instr.defined_name() {
                    Some(name) if is_temporary(name) => self.stats.temporaries_removed += 1,
                    _ => self.stats.variables_removed += 1,
                }
            }
            current = next;

            if reads.is_none() || current.len() == before {
                break;
            }
        }

        self.stats.output_instructions = current.len();
        tracing::debug!("{}", self.stats.format());
        Program::from_validated(current)
    }
}

/// Remove dead definitions with the default configuration
pub fn eliminate(program: &Program) -> Program {
    DcePass::new(DceConfig::default()).run(program)
}

/// Every name read anywhere in `instructions`
fn read_set(instructions: &[Instruction]) -> HashSet<String> {
    instructions
        .iter()
        .flat_map(|instr| instr.used_names())
        .map(String::from)
        .collect()
}

/// One backward liveness sweep; returns a keep flag per instruction
fn sweep(
    instructions: &[Instruction],
    reads: Option<&HashSet<String>>,
) -> Vec<bool> {
    let mut live: HashSet<&str> = HashSet::new();
    let mut keep = vec![false; instructions.len()];

    for (idx, instr) in instructions.iter().enumerate().rev() {
        let kept = match instr.defined_name() {
            None => true,
            Some(name) if live.contains(name) => true,
            Some(name) if is_temporary(name) => false,
            Some(name) => reads.map_or(true, |reads| reads.contains(name)),
        };
        if !kept {
            continue;
        }

        keep[idx] = true;
        if let Some(name) = instr.defined_name() {
            live.remove(name);
        }
        live.extend(instr.used_names());
    }

    keep
}

//! Three-address intermediate representation
//!
//! A [`Program`] is a flat, ordered list of [`Instruction`]s together with the
//! index of every label. Control flow is expressed with labels and jumps only;
//! the structuring generator recovers nesting from it later.

use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;

use super::parse;

/// Names read by one instruction. Rarely more than two.
pub type UseList<'a> = SmallVec<[&'a str; 4]>;

/// IR errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    #[error("label '{name}' defined twice (instructions {first} and {second})")]
    DuplicateLabel {
        name: String,
        first: usize,
        second: usize,
    },
}

/// One IR instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Function entry
    Func { name: String, params: Vec<String> },
    /// Function end
    EndFunc { name: String },
    /// Jump target
    Label { name: String },
    /// `target = value`
    Assign { target: String, value: String },
    /// `target = left op right`
    BinOp {
        target: String,
        left: String,
        op: String,
        right: String,
    },
    /// Jump to `label` when `cond` is false
    IfFalseGoto { cond: String, label: String },
    /// Unconditional jump
    Goto { label: String },
    Print { expr: String },
    Return { expr: String },
    /// Unrecognized line, carried through verbatim
    Other { raw: String },
}

impl Instruction {
    /// Recognize one line of IR text. Never fails.
    pub fn parse(line: &str) -> Instruction {
        parse::recognize(line)
    }

    /// The name written by this instruction, if any
    pub fn defined_name(&self) -> Option<&str> {
        match self {
            Instruction::Assign { target, .. } | Instruction::BinOp { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Identifier tokens read by this instruction's operands
    pub fn used_names(&self) -> UseList<'_> {
        let mut uses = UseList::new();
        match self {
            Instruction::Assign { value, .. } => uses.extend(parse::operand_names(value)),
            Instruction::BinOp { left, right, .. } => {
                uses.extend(parse::operand_names(left));
                uses.extend(parse::operand_names(right));
            },
            Instruction::IfFalseGoto { cond, .. } => uses.extend(parse::operand_names(cond)),
            Instruction::Print { expr } | Instruction::Return { expr } => {
                uses.extend(parse::operand_names(expr))
            },
            Instruction::Func { .. }
            | Instruction::EndFunc { .. }
            | Instruction::Label { .. }
            | Instruction::Goto { .. }
            | Instruction::Other { .. } => {},
        }
        uses
    }

    /// Label jumped to by a branch or goto
    pub fn jump_target(&self) -> Option<&str> {
        match self {
            Instruction::IfFalseGoto { label, .. } | Instruction::Goto { label } => Some(label),
            _ => None,
        }
    }

    /// Whether this is a plain data definition (`Assign` or `BinOp`)
    pub fn is_definition(&self) -> bool {
        matches!(self, Instruction::Assign { .. } | Instruction::BinOp { .. })
    }
}

/// Whether `name` follows the temporary naming convention `t<N>`
pub fn is_temporary(name: &str) -> bool {
    name.len() > 1 && name.starts_with('t') && name[1..].bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Instruction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Instruction::Func { name, params } if params.is_empty() => write!(f, "FUNC {}:", name),
            Instruction::Func { name, params } => write!(f, "FUNC {}({}):", name, params.join(", ")),
            Instruction::EndFunc { name } => write!(f, "END_FUNC {}", name),
            Instruction::Label { name } => write!(f, "{}:", name),
            Instruction::Assign { target, value } => write!(f, "ASSIGN {}, {}", target, value),
            Instruction::BinOp {
                target,
                left,
                op,
                right,
            } => write!(f, "BIN_OP {}, {}, {}, {}", target, left, op, right),
            Instruction::IfFalseGoto { cond, label } => write!(f, "IF_FALSE {} GOTO {}", cond, label),
            Instruction::Goto { label } => write!(f, "GOTO {}", label),
            Instruction::Print { expr } => write!(f, "PRINT {}", expr),
            Instruction::Return { expr } => write!(f, "RETURN {}", expr),
            Instruction::Other { raw } => write!(f, "{}", raw),
        }
    }
}

/// An ordered instruction sequence with its label index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
    labels: HashMap<String, usize>,
}

impl Program {
    /// Build a program, rejecting labels defined more than once
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, IrError> {
        let mut labels = HashMap::new();
        for (idx, instr) in instructions.iter().enumerate() {
            if let Instruction::Label { name } = instr {
                if let Some(first) = labels.insert(name.clone(), idx) {
                    return Err(IrError::DuplicateLabel {
                        name: name.clone(),
                        first,
                        second: idx,
                    });
                }
            }
        }
        Ok(Self {
            instructions,
            labels,
        })
    }

    /// Build a program from a subsequence of an already validated one
    pub(crate) fn from_validated(instructions: Vec<Instruction>) -> Self {
        let labels = instructions
            .iter()
            .enumerate()
            .filter_map(|(idx, instr)| match instr {
                Instruction::Label { name } => Some((name.clone(), idx)),
                _ => None,
            })
            .collect();
        Self {
            instructions,
            labels,
        }
    }

    /// Recognize a whole IR listing. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, IrError> {
        let instructions = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Instruction::parse)
            .collect();
        Self::new(instructions)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    pub fn get(
        &self,
        idx: usize,
    ) -> Option<&Instruction> {
        self.instructions.get(idx)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Position of a label
    pub fn label_index(
        &self,
        name: &str,
    ) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Canonical IR text, one instruction per line
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Program {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for instr in &self.instructions {
            writeln!(f, "{}", instr)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

//! Control-flow structuring code generator
//!
//! Rebuilds nested Python `if`/`else`/`while` blocks from the flat,
//! label-and-jump IR. Each `FUNC ... END_FUNC` region becomes one `def`.
//!
//! Three modes cooperate:
//! - linear: walk a block, skipping consumed indices
//! - branch: at `IF_FALSE`, classify the shape (see [`structure`]) and recurse
//!   into its blocks
//! - single: render one plain instruction
//!
//! Chains of temporaries feeding a condition or an assignment are folded into
//! one expression, so `BIN_OP t1, x, >, 0` / `IF_FALSE t1 GOTO L2` becomes
//! `while x > 0:`.

pub mod emitter;
pub mod structure;

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use crate::middle::core::ir::{is_temporary, Instruction, Program};
use crate::util::config::CodegenConfig;

pub use emitter::{render_op, render_operand, EmissionContext, Mark};
pub use structure::{analyze, Shape};

/// Control flow the generator could not structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenWarning {
    /// A `GOTO` that is not the boundary of an `if` or loop
    UnstructuredJump {
        function: String,
        index: usize,
        label: String,
    },
    /// An `IF_FALSE` whose label is missing or outside its block
    UnresolvedBranch {
        function: String,
        index: usize,
        label: String,
    },
    /// An instruction outside every `FUNC` region
    OutsideFunction { index: usize },
}

impl fmt::Display for CodegenWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            CodegenWarning::UnstructuredJump {
                function,
                index,
                label,
            } => write!(
                f,
                "unstructured jump to '{}' in '{}' (instruction {}) emitted as a comment",
                label, function, index
            ),
            CodegenWarning::UnresolvedBranch {
                function,
                index,
                label,
            } => write!(
                f,
                "branch to unresolved label '{}' in '{}' (instruction {}) emitted as a comment",
                label, function, index
            ),
            CodegenWarning::OutsideFunction { index } => {
                write!(f, "instruction {} is outside any function and was skipped", index)
            },
        }
    }
}

/// Python generator over one program
pub struct Generator<'p> {
    program: &'p Program,
    ctx: EmissionContext,
    warnings: Vec<CodegenWarning>,
    /// Name of the function being emitted
    function: String,
    /// Labels of loop headers in the current function
    loop_headers: HashSet<usize>,
}

impl<'p> Generator<'p> {
    pub fn new(
        program: &'p Program,
        config: &CodegenConfig,
    ) -> Self {
        Self {
            program,
            ctx: EmissionContext::new(config.indent_width),
            warnings: Vec::new(),
            function: String::new(),
            loop_headers: HashSet::new(),
        }
    }

    /// Warnings collected so far
    pub fn warnings(&self) -> &[CodegenWarning] {
        &self.warnings
    }

    /// Emit every function and return the Python text with its warnings
    pub fn generate(mut self) -> (String, Vec<CodegenWarning>) {
        let len = self.program.len();
        let mut idx = 0;
        while idx < len {
            match self.program.get(idx) {
                Some(Instruction::Func { .. }) => {
                    let end = self.function_end(idx);
                    self.emit_function(idx, end);
                    idx = end + 1;
                },
                _ => {
                    self.warn(CodegenWarning::OutsideFunction { index: idx });
                    idx += 1;
                },
            }
        }

        tracing::debug!(
            "codegen: {} instructions -> {} lines, {} warnings",
            len,
            self.ctx.lines().len(),
            self.warnings.len()
        );
        (self.ctx.finish(), self.warnings)
    }

    /// Index of the `END_FUNC` closing the function at `start`
    fn function_end(
        &self,
        start: usize,
    ) -> usize {
        self.program.instructions()[start + 1..]
            .iter()
            .position(|instr| matches!(instr, Instruction::EndFunc { .. }))
            .map_or(self.program.len(), |offset| start + 1 + offset)
    }

    fn emit_function(
        &mut self,
        start: usize,
        end: usize,
    ) {
        let Some(Instruction::Func { name, params }) = self.program.get(start) else {
            return;
        };

        self.ctx.reset_function();
        self.function = name.clone();
        self.loop_headers = self.find_loop_headers(start, end);

        self.ctx.statement(format!("def {}({}):", name, params.join(", ")));
        self.ctx.indent();
        self.emit_body(start + 1..end, start);
        self.ctx.dedent();
        self.ctx.blank();
    }

    /// Labels targeted by the back-edge of a recognized loop
    fn find_loop_headers(
        &self,
        start: usize,
        end: usize,
    ) -> HashSet<usize> {
        (start + 1..end)
            .filter(|&idx| matches!(self.program.get(idx), Some(Instruction::IfFalseGoto { .. })))
            .filter_map(|idx| match analyze(self.program, idx, start, end) {
                Shape::Loop { header, .. } => Some(header),
                _ => None,
            })
            .collect()
    }

    /// Emit an indented block body, falling back to `pass`
    fn emit_body(
        &mut self,
        range: Range<usize>,
        func_start: usize,
    ) {
        let mark = self.ctx.mark();
        self.emit_block(range, func_start);
        if self.ctx.statements_since(mark) == 0 {
            self.ctx.statement("pass");
        }
    }

    /// Linear mode
    fn emit_block(
        &mut self,
        range: Range<usize>,
        func_start: usize,
    ) {
        let limit = range.end;
        let mut i = range.start;
        while i < limit {
            if self.ctx.is_consumed(i) {
                i += 1;
                continue;
            }
            let Some(instr) = self.program.get(i) else {
                break;
            };

            i = match instr {
                Instruction::BinOp { .. } => self.emit_bin_op_run(i, limit, func_start),
                Instruction::IfFalseGoto { .. } => self.emit_branch(i, i, limit, func_start),
                Instruction::Label { name } => {
                    self.ctx.consume(i);
                    if !self.loop_headers.contains(&i) {
                        self.ctx.comment(format!("label: {}", name));
                    }
                    i + 1
                },
                Instruction::Goto { label } => {
                    self.ctx.consume(i);
                    self.ctx.comment(format!("goto {}", label));
                    self.warn(CodegenWarning::UnstructuredJump {
                        function: self.function.clone(),
                        index: i,
                        label: label.clone(),
                    });
                    i + 1
                },
                _ => {
                    self.emit_single(i);
                    i + 1
                },
            };
        }
    }

    /// Handle a run of `BIN_OP`s starting at `start`.
    ///
    /// If the run feeds an `IF_FALSE`, `ASSIGN`, `PRINT` or `RETURN`, the
    /// whole temporary chain is folded into that statement. Otherwise only `start` is
    /// emitted.
    fn emit_bin_op_run(
        &mut self,
        start: usize,
        limit: usize,
        func_start: usize,
    ) -> usize {
        let mut end = start;
        while end < limit
            && !self.ctx.is_consumed(end)
            && matches!(self.program.get(end), Some(Instruction::BinOp { .. }))
        {
            end += 1;
        }
        let last = end - 1;
        let Some(Instruction::BinOp { target: last_target, .. }) = self.program.get(last) else {
            self.emit_single(start);
            return start + 1;
        };
        let foldable = is_temporary(last_target);

        match self.program.get(end) {
            Some(Instruction::IfFalseGoto { cond, .. })
                if end < limit && foldable && cond == last_target =>
            {
                self.emit_branch(end, start, limit, func_start)
            },
            Some(Instruction::Assign { target, value })
                if end < limit && foldable && value == last_target && !self.ctx.is_consumed(end) =>
            {
                let expr = self.fold_chain(last, start);
                self.flush(start..last);
                self.ctx.statement(format!("{} = {}", target, expr));
                self.ctx.consume(end);
                end + 1
            },
            Some(consumer @ (Instruction::Print { expr } | Instruction::Return { expr }))
                if end < limit && foldable && expr == last_target && !self.ctx.is_consumed(end) =>
            {
                let expr = self.fold_chain(last, start);
                self.flush(start..last);
                let statement = match consumer {
                    Instruction::Print { .. } => format!("print({})", expr),
                    _ => format!("return {}", expr),
                };
                self.ctx.statement(statement);
                self.ctx.consume(end);
                end + 1
            },
            _ => {
                self.emit_single(start);
                start + 1
            },
        }
    }

    /// Branch mode, for the `IF_FALSE` at `at`.
    ///
    /// `pending` is the first instruction of a `BIN_OP` run ending at `at`;
    /// it equals `at` when there is none.
    fn emit_branch(
        &mut self,
        at: usize,
        pending: usize,
        limit: usize,
        func_start: usize,
    ) -> usize {
        let Some(Instruction::IfFalseGoto { cond, label }) = self.program.get(at) else {
            return at + 1;
        };

        let shape = analyze(self.program, at, func_start, limit);
        if shape == Shape::Unresolved {
            self.flush(pending..at);
            self.ctx.consume(at);
            self.ctx.comment(self.program.instructions()[at].to_string());
            self.warn(CodegenWarning::UnresolvedBranch {
                function: self.function.clone(),
                index: at,
                label: label.clone(),
            });
            return at + 1;
        }

        let condition = self.condition(at, pending, cond);
        self.flush(pending..at);
        self.ctx.consume(at);

        match shape {
            Shape::Loop { body, resume, .. } => {
                self.ctx.statement(format!("while {}:", condition));
                self.ctx.indent();
                self.emit_body(body, func_start);
                self.ctx.dedent();
                resume
            },
            Shape::If {
                then_body,
                else_body,
                resume,
            } => {
                self.ctx.statement(format!("if {}:", condition));
                self.ctx.indent();
                self.emit_body(then_body, func_start);
                self.ctx.dedent();
                if let Some(else_body) = else_body {
                    self.emit_else(else_body, func_start);
                }
                resume
            },
            Shape::Unresolved => at + 1,
        }
    }

    /// `else:` block, dropped entirely when it renders nothing
    fn emit_else(
        &mut self,
        range: Range<usize>,
        func_start: usize,
    ) {
        let outer = self.ctx.mark();
        self.ctx.statement("else:");
        self.ctx.indent();
        let inner = self.ctx.mark();
        self.emit_block(range, func_start);
        if self.ctx.lines_since(inner) == 0 {
            self.ctx.dedent();
            self.ctx.truncate(outer);
            return;
        }
        if self.ctx.statements_since(inner) == 0 {
            self.ctx.statement("pass");
        }
        self.ctx.dedent();
    }

    /// Condition text for the `IF_FALSE` at `at`
    fn condition(
        &mut self,
        at: usize,
        floor: usize,
        cond: &str,
    ) -> String {
        if at > floor && is_temporary(cond) {
            if let Some(Instruction::BinOp { target, .. }) = self.program.get(at - 1) {
                if target == cond && !self.ctx.is_consumed(at - 1) {
                    return self.fold_chain(at - 1, floor);
                }
            }
        }
        render_operand(cond)
    }

    /// Render the `BIN_OP` at `idx` as one expression, inlining temporaries
    /// defined by the `BIN_OP`s directly above it (down to `floor`).
    fn fold_chain(
        &mut self,
        idx: usize,
        floor: usize,
    ) -> String {
        let mut cursor = idx;
        self.fold_bin_op(idx, &mut cursor, floor)
    }

    fn fold_bin_op(
        &mut self,
        idx: usize,
        cursor: &mut usize,
        floor: usize,
    ) -> String {
        let Some(Instruction::BinOp { left, op, right, .. }) = self.program.get(idx) else {
            return String::new();
        };
        self.ctx.consume(idx);
        *cursor = idx;

        // Operands were flattened left first, so the right one sits closest
        let right = self.fold_operand(right, cursor, floor);
        let left = self.fold_operand(left, cursor, floor);
        format!("{} {} {}", left, render_op(op), right)
    }

    fn fold_operand(
        &mut self,
        operand: &str,
        cursor: &mut usize,
        floor: usize,
    ) -> String {
        if is_temporary(operand) && *cursor > floor {
            let candidate = *cursor - 1;
            if let Some(Instruction::BinOp { target, .. }) = self.program.get(candidate) {
                if target == operand && !self.ctx.is_consumed(candidate) {
                    return format!("({})", self.fold_bin_op(candidate, cursor, floor));
                }
            }
        }
        render_operand(operand)
    }

    /// Emit whatever in `range` was not folded away
    fn flush(
        &mut self,
        range: Range<usize>,
    ) {
        for idx in range {
            if !self.ctx.is_consumed(idx) {
                self.emit_single(idx);
            }
        }
    }

    /// Single-statement mode
    fn emit_single(
        &mut self,
        idx: usize,
    ) {
        if !self.ctx.consume(idx) {
            return;
        }
        let Some(instr) = self.program.get(idx) else {
            return;
        };

        match instr {
            Instruction::Assign { target, value } => {
                self.ctx.statement(format!("{} = {}", target, render_operand(value)));
            },
            Instruction::BinOp {
                target,
                left,
                op,
                right,
            } => {
                // Result fold: BIN_OP t / ASSIGN x, t
                let (target, consumed) = match self.program.get(idx + 1) {
                    Some(Instruction::Assign { target: dest, value })
                        if value == target && is_temporary(target) && !self.ctx.is_consumed(idx + 1) =>
                    {
                        (dest, Some(idx + 1))
                    },
                    _ => (target, None),
                };
                if let Some(next) = consumed {
                    self.ctx.consume(next);
                }
                self.ctx.statement(format!(
                    "{} = {} {} {}",
                    target,
                    render_operand(left),
                    render_op(op),
                    render_operand(right)
                ));
            },
            Instruction::Print { expr } => self.ctx.statement(format!("print({})", render_operand(expr))),
            Instruction::Return { expr } => self.ctx.statement(format!("return {}", render_operand(expr))),
            Instruction::Label { name } => self.ctx.comment(format!("label: {}", name)),
            Instruction::Goto { label } => self.ctx.comment(format!("goto {}", label)),
            Instruction::Other { raw } => self.ctx.comment(raw),
            other => self.ctx.comment(other.to_string()),
        }
    }

    fn warn(
        &mut self,
        warning: CodegenWarning,
    ) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Structure `program` into Python with the default configuration
pub fn generate(program: &Program) -> String {
    Generator::new(program, &CodegenConfig::default()).generate().0
}

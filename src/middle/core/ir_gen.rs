//! AST to IR lowering
//!
//! Produces the three-address IR listing the optimizer and the Python
//! generator consume. Every compilation uses a fresh generator, so
//! temporaries are numbered `t1, t2, ...` and labels `L1, L2, ...` from one.
//!
//! Declared types are tracked per scope so that `int / int` lowers to the
//! floor division `//`.

use crate::frontend::core::parser::ast::{
    self, BinOp, ElseBranch, Expr, ExprKind, Item, Stmt, StmtKind, TypeName,
};
use crate::frontend::typecheck::{binary_result, ScopeStack, Symbol, SymbolKind};
use crate::middle::core::ir::{Instruction, IrError, Program};
use crate::util::span::Span;

/// AST to IR generator
#[derive(Debug, Default)]
pub struct AstToIrGenerator {
    instructions: Vec<Instruction>,
    /// Last temporary number handed out
    next_temp: usize,
    /// Last label number handed out
    next_label: usize,
    /// Value types of the names in scope
    scopes: ScopeStack,
}

impl AstToIrGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower a whole program. Top-level statements stay outside any function.
    pub fn generate(
        mut self,
        program: &ast::Program,
    ) -> Result<Program, IrError> {
        for item in &program.items {
            match item {
                Item::Function(func) => self.lower_function(func),
                Item::Statement(stmt) => self.lower_stmt(stmt),
            }
        }
        tracing::debug!(
            "generated {} IR instructions ({} temporaries, {} labels)",
            self.instructions.len(),
            self.next_temp,
            self.next_label
        );
        Program::new(self.instructions)
    }

    fn emit(
        &mut self,
        instr: Instruction,
    ) {
        self.instructions.push(instr);
    }

    fn new_temp(&mut self) -> String {
        self.next_temp += 1;
        format!("t{}", self.next_temp)
    }

    fn new_label(&mut self) -> String {
        self.next_label += 1;
        format!("L{}", self.next_label)
    }

    fn label(
        &mut self,
        name: &str,
    ) {
        self.emit(Instruction::Label {
            name: name.to_string(),
        });
    }

    fn goto(
        &mut self,
        label: &str,
    ) {
        self.emit(Instruction::Goto {
            label: label.to_string(),
        });
    }

    fn if_false(
        &mut self,
        cond: String,
        label: &str,
    ) {
        self.emit(Instruction::IfFalseGoto {
            cond,
            label: label.to_string(),
        });
    }

    /// Record the value type of `name` in the innermost scope
    fn bind(
        &mut self,
        name: &str,
        ty: Option<TypeName>,
        span: Span,
    ) {
        if let Some(ty) = ty {
            // A conflicting name was already reported by semantic analysis
            let _ = self.scopes.declare(
                name,
                Symbol {
                    kind: SymbolKind::Variable(ty),
                    span,
                },
            );
        }
    }

    fn lower_function(
        &mut self,
        func: &ast::FunctionDecl,
    ) {
        self.emit(Instruction::Func {
            name: func.name.clone(),
            params: func.params.iter().map(|p| p.name.clone()).collect(),
        });
        self.scopes.enter();
        for param in &func.params {
            self.bind(&param.name, Some(param.ty), param.span);
        }
        for stmt in &func.body.stmts {
            self.lower_stmt(stmt);
        }
        self.scopes.exit();
        self.emit(Instruction::EndFunc {
            name: func.name.clone(),
        });
    }

    fn lower_block(
        &mut self,
        block: &ast::Block,
    ) {
        self.scopes.enter();
        for stmt in &block.stmts {
            self.lower_stmt(stmt);
        }
        self.scopes.exit();
    }

    fn lower_stmt(
        &mut self,
        stmt: &Stmt,
    ) {
        match &stmt.kind {
            StmtKind::VarDecl { name, ty, init } => {
                let found = self.lower_assign(name, init);
                self.bind(name, ty.or(found), stmt.span);
            },
            StmtKind::Assign { name, value } => {
                self.lower_assign(name, value);
            },
            StmtKind::If {
                cond,
                then_block,
                else_branch,
            } => {
                let (cond, _) = self.lower_expr(cond);
                let else_label = self.new_label();
                let end_label = self.new_label();
                self.if_false(cond, &else_label);
                self.lower_block(then_block);
                self.goto(&end_label);
                self.label(&else_label);
                match else_branch {
                    Some(ElseBranch::Block(block)) => self.lower_block(block),
                    Some(ElseBranch::If(nested)) => self.lower_stmt(nested),
                    None => {},
                }
                self.label(&end_label);
            },
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.scopes.enter();
                if let Some(init) = init {
                    self.lower_stmt(init);
                }
                let start = self.new_label();
                let end = self.new_label();
                self.label(&start);
                let (cond, _) = self.lower_expr(cond);
                self.if_false(cond, &end);
                self.lower_block(body);
                if let Some(update) = update {
                    self.lower_stmt(update);
                }
                self.goto(&start);
                self.label(&end);
                self.scopes.exit();
            },
            StmtKind::While { cond, body } => {
                let start = self.new_label();
                let end = self.new_label();
                self.label(&start);
                let (cond, _) = self.lower_expr(cond);
                self.if_false(cond, &end);
                self.lower_block(body);
                self.goto(&start);
                self.label(&end);
            },
            StmtKind::Return(value) => {
                let (expr, _) = self.lower_expr(value);
                self.emit(Instruction::Return { expr });
            },
            StmtKind::Print(value) => {
                let (expr, _) = self.lower_expr(value);
                self.emit(Instruction::Print { expr });
            },
        }
    }

    /// Lower `target = value`, returning the value's type when known
    fn lower_assign(
        &mut self,
        target: &str,
        value: &Expr,
    ) -> Option<TypeName> {
        let (value, ty) = self.lower_expr(value);
        self.emit(Instruction::Assign {
            target: target.to_string(),
            value,
        });
        ty
    }

    /// Lower an expression and return the operand text holding its value,
    /// with its type when known
    fn lower_expr(
        &mut self,
        expr: &Expr,
    ) -> (String, Option<TypeName>) {
        match &expr.kind {
            ExprKind::Number(text) if text.contains('.') => (text.clone(), Some(TypeName::Float)),
            ExprKind::Number(text) => (text.clone(), Some(TypeName::Int)),
            ExprKind::Str(text) => (text.clone(), Some(TypeName::String)),
            ExprKind::Bool(value) => (value.to_string(), Some(TypeName::Bool)),
            ExprKind::Ident(name) => {
                let ty = self.scopes.lookup(name).and_then(Symbol::value_type);
                (name.clone(), ty)
            },
            ExprKind::Binary { op, lhs, rhs } => {
                let (left, left_ty) = self.lower_expr(lhs);
                let (right, right_ty) = self.lower_expr(rhs);
                let operands = left_ty.zip(right_ty);
                let op_text = match operands {
                    Some((TypeName::Int, TypeName::Int)) if *op == BinOp::Div => "//",
                    _ => op.as_str(),
                };
                let target = self.new_temp();
                self.emit(Instruction::BinOp {
                    target: target.clone(),
                    left,
                    op: op_text.to_string(),
                    right,
                });
                let ty = operands.and_then(|(l, r)| binary_result(*op, l, r));
                (target, ty)
            },
        }
    }
}

/// Lower a program with a fresh generator
pub fn generate_ir(program: &ast::Program) -> Result<Program, IrError> {
    AstToIrGenerator::new().generate(program)
}

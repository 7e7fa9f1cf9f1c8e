//! Statement and expression checking

use crate::frontend::core::parser::ast::*;
use crate::middle::core::is_temporary;
use crate::util::span::Span;

use super::errors::SemanticError;
use super::scope::{ScopeStack, Symbol, SymbolKind};

/// Function whose body is being checked
struct FunctionContext {
    name: String,
    return_type: Option<TypeName>,
}

/// Scoped semantic analyzer
#[derive(Default)]
pub struct SemanticAnalyzer {
    scopes: ScopeStack,
    function: Option<FunctionContext>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols left in the global scope after analysis
    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    /// Check a whole program in source order
    pub fn analyze(
        &mut self,
        program: &Program,
    ) -> Result<(), SemanticError> {
        for item in &program.items {
            match item {
                Item::Function(func) => self.check_function(func)?,
                Item::Statement(stmt) => self.check_stmt(stmt)?,
            }
        }
        Ok(())
    }

    fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        span: Span,
    ) -> Result<(), SemanticError> {
        // `t<N>` would alias an IR temporary
        if is_temporary(name) {
            return Err(SemanticError::ReservedName {
                name: name.to_string(),
                span,
            });
        }
        self.scopes
            .declare(name, Symbol { kind, span })
            .map_err(|_| SemanticError::Redeclared {
                name: name.to_string(),
                span,
            })
    }

    /// Run `f` inside a fresh scope
    fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SemanticError>,
    ) -> Result<T, SemanticError> {
        self.scopes.enter();
        let result = f(self);
        self.scopes.exit();
        result
    }

    fn check_function(
        &mut self,
        func: &FunctionDecl,
    ) -> Result<(), SemanticError> {
        self.declare(
            &func.name,
            SymbolKind::Function {
                return_type: func.return_type,
            },
            func.span,
        )?;

        let outer = self.function.replace(FunctionContext {
            name: func.name.clone(),
            return_type: func.return_type,
        });
        let result = self.scoped(|this| {
            for param in &func.params {
                this.declare(&param.name, SymbolKind::Parameter(param.ty), param.span)?;
            }
            // Parameters and body locals share the function scope
            this.check_stmts(&func.body.stmts)
        });
        self.function = outer;
        result
    }

    fn check_block(
        &mut self,
        block: &Block,
    ) -> Result<(), SemanticError> {
        self.scoped(|this| this.check_stmts(&block.stmts))
    }

    fn check_stmts(
        &mut self,
        stmts: &[Stmt],
    ) -> Result<(), SemanticError> {
        stmts.iter().try_for_each(|stmt| self.check_stmt(stmt))
    }

    fn check_stmt(
        &mut self,
        stmt: &Stmt,
    ) -> Result<(), SemanticError> {
        match &stmt.kind {
            StmtKind::VarDecl { name, ty, init } => {
                let found = self.infer(init)?;
                let declared = ty.unwrap_or(found);
                if declared != found {
                    return Err(SemanticError::TypeMismatch {
                        name: name.clone(),
                        expected: declared,
                        found,
                        span: init.span,
                    });
                }
                self.declare(name, SymbolKind::Variable(declared), stmt.span)
            },
            StmtKind::Assign { name, value } => {
                let expected = self.value_type(name, stmt.span)?;
                let found = self.infer(value)?;
                if expected != found {
                    return Err(SemanticError::TypeMismatch {
                        name: name.clone(),
                        expected,
                        found,
                        span: value.span,
                    });
                }
                Ok(())
            },
            StmtKind::If {
                cond,
                then_block,
                else_branch,
            } => {
                self.check_condition("if", cond)?;
                self.check_block(then_block)?;
                match else_branch {
                    Some(ElseBranch::Block(block)) => self.check_block(block),
                    Some(ElseBranch::If(nested)) => self.scoped(|this| this.check_stmt(nested)),
                    None => Ok(()),
                }
            },
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => self.scoped(|this| {
                if let Some(init) = init {
                    this.check_stmt(init)?;
                }
                this.check_condition("for", cond)?;
                if let Some(update) = update {
                    this.check_stmt(update)?;
                }
                this.check_block(body)
            }),
            StmtKind::While { cond, body } => {
                self.check_condition("while", cond)?;
                self.check_block(body)
            },
            StmtKind::Return(value) => {
                let found = self.infer(value)?;
                if let Some(FunctionContext {
                    name,
                    return_type: Some(expected),
                }) = &self.function
                {
                    if *expected != found {
                        return Err(SemanticError::ReturnTypeMismatch {
                            function: name.clone(),
                            expected: *expected,
                            found,
                            span: value.span,
                        });
                    }
                }
                Ok(())
            },
            StmtKind::Print(value) => self.infer(value).map(|_| ()),
        }
    }

    fn check_condition(
        &mut self,
        construct: &'static str,
        cond: &Expr,
    ) -> Result<(), SemanticError> {
        let found = self.infer(cond)?;
        if found != TypeName::Bool {
            return Err(SemanticError::NonBoolCondition {
                construct,
                found,
                span: cond.span,
            });
        }
        Ok(())
    }

    /// Type held by a named value
    fn value_type(
        &self,
        name: &str,
        span: Span,
    ) -> Result<TypeName, SemanticError> {
        let symbol = self.scopes.lookup(name).ok_or_else(|| SemanticError::Undeclared {
            name: name.to_string(),
            span,
        })?;
        symbol.value_type().ok_or_else(|| SemanticError::NotAValue {
            name: name.to_string(),
            span,
        })
    }

    /// Infer the type of an expression
    pub fn infer(
        &self,
        expr: &Expr,
    ) -> Result<TypeName, SemanticError> {
        match &expr.kind {
            ExprKind::Number(text) if text.contains('.') => Ok(TypeName::Float),
            ExprKind::Number(_) => Ok(TypeName::Int),
            ExprKind::Str(_) => Ok(TypeName::String),
            ExprKind::Bool(_) => Ok(TypeName::Bool),
            ExprKind::Ident(name) => self.value_type(name, expr.span),
            ExprKind::Binary { op, lhs, rhs } => {
                let left = self.infer(lhs)?;
                let right = self.infer(rhs)?;
                binary_result(*op, left, right).ok_or(SemanticError::InvalidOperands {
                    op: *op,
                    left,
                    right,
                    span: expr.span,
                })
            },
        }
    }
}

/// Result type of `left op right`, if the operands are valid
pub fn binary_result(
    op: BinOp,
    left: TypeName,
    right: TypeName,
) -> Option<TypeName> {
    use TypeName::*;

    if op.is_arithmetic() {
        return match (left, right) {
            (Int, Int) => Some(Int),
            (Float, Float) | (Int, Float) | (Float, Int) => Some(Float),
            (String, String) if op == BinOp::Add => Some(String),
            _ => None,
        };
    }
    if op.is_comparison() {
        return (left == right).then_some(Bool);
    }
    // Logical
    (left == Bool && right == Bool).then_some(Bool)
}

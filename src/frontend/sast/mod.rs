//! Static security scan
//!
//! A pattern-based walk over the AST. Findings are advisory: the scan never
//! fails a compilation.

use std::fmt;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::frontend::core::parser::ast::*;
use crate::util::span::Span;

/// Kind of finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VulnerabilityKind {
    /// An identifier printed directly
    SensitiveDataExposure,
    /// String literal concatenated with an identifier
    PotentialInjection,
}

impl fmt::Display for VulnerabilityKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            VulnerabilityKind::SensitiveDataExposure => write!(f, "SensitiveDataExposure"),
            VulnerabilityKind::PotentialInjection => write!(f, "PotentialInjection"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vulnerability {
    pub kind: VulnerabilityKind,
    pub message: String,
    pub span: Span,
}

/// Report format for [`render_report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// AST walker collecting findings in source order
#[derive(Debug, Default)]
pub struct Scanner {
    findings: Vec<Vulnerability>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan(
        mut self,
        program: &Program,
    ) -> Vec<Vulnerability> {
        for item in &program.items {
            match item {
                Item::Function(func) => self.visit_block(&func.body),
                Item::Statement(stmt) => self.visit_stmt(stmt),
            }
        }
        tracing::debug!("scan found {} potential issues", self.findings.len());
        self.findings
    }

    fn report(
        &mut self,
        kind: VulnerabilityKind,
        message: String,
        span: Span,
    ) {
        self.findings.push(Vulnerability {
            kind,
            message,
            span,
        });
    }

    fn visit_block(
        &mut self,
        block: &Block,
    ) {
        for stmt in &block.stmts {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(
        &mut self,
        stmt: &Stmt,
    ) {
        match &stmt.kind {
            StmtKind::VarDecl { init, .. } => self.visit_expr(init),
            StmtKind::Assign { value, .. } => self.visit_expr(value),
            StmtKind::If {
                cond,
                then_block,
                else_branch,
            } => {
                self.visit_expr(cond);
                self.visit_block(then_block);
                match else_branch {
                    Some(ElseBranch::Block(block)) => self.visit_block(block),
                    Some(ElseBranch::If(nested)) => self.visit_stmt(nested),
                    None => {},
                }
            },
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                if let Some(init) = init {
                    self.visit_stmt(init);
                }
                self.visit_expr(cond);
                if let Some(update) = update {
                    self.visit_stmt(update);
                }
                self.visit_block(body);
            },
            StmtKind::While { cond, body } => {
                self.visit_expr(cond);
                self.visit_block(body);
            },
            StmtKind::Return(value) => self.visit_expr(value),
            StmtKind::Print(value) => {
                if let ExprKind::Ident(name) = &value.kind {
                    self.report(
                        VulnerabilityKind::SensitiveDataExposure,
                        format!("Variable '{}' is printed directly", name),
                        stmt.span,
                    );
                }
                self.visit_expr(value);
            },
        }
    }

    fn visit_expr(
        &mut self,
        expr: &Expr,
    ) {
        if let ExprKind::Binary { op, lhs, rhs } = &expr.kind {
            let mixed = (lhs.is_string_literal() && rhs.is_identifier())
                || (lhs.is_identifier() && rhs.is_string_literal());
            if *op == BinOp::Add && mixed {
                self.report(
                    VulnerabilityKind::PotentialInjection,
                    "String concatenated with an identifier; consider sanitizing the input".to_string(),
                    expr.span,
                );
            }
            self.visit_expr(lhs);
            self.visit_expr(rhs);
        }
    }
}

/// Scan a program with a fresh scanner
pub fn scan(program: &Program) -> Vec<Vulnerability> {
    Scanner::new().scan(program)
}

/// Render findings for a terminal or as pretty JSON
pub fn render_report(
    findings: &[Vulnerability],
    format: ReportFormat,
    use_colors: bool,
) -> String {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(findings).unwrap_or_else(|_| "[]".to_string())
        },
        ReportFormat::Text => {
            if findings.is_empty() {
                return "No vulnerabilities found.\n".to_string();
            }
            let mut out = String::new();
            for finding in findings {
                let kind = finding.kind.to_string();
                let kind = if use_colors {
                    kind.yellow().bold().to_string()
                } else {
                    kind
                };
                out.push_str(&format!(
                    "- {} at {}\n  {}\n",
                    kind, finding.span.start, finding.message
                ));
            }
            out
        },
    }
}

//! Python line emission
//!
//! Holds the indentation depth, the output lines and the set of instruction
//! indices already absorbed into some emitted line.

use std::collections::HashSet;

/// Position in the output, used to detect and undo empty blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    lines: usize,
    statements: usize,
}

/// Emission state for one generator run
#[derive(Debug)]
pub struct EmissionContext {
    indent_unit: String,
    depth: usize,
    lines: Vec<String>,
    /// Non-comment lines emitted so far
    statements: usize,
    consumed: HashSet<usize>,
}

impl EmissionContext {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_unit: " ".repeat(indent_width),
            depth: 0,
            lines: Vec::new(),
            statements: 0,
            consumed: HashSet::new(),
        }
    }

    /// Forget consumed indices; called at every function start
    pub fn reset_function(&mut self) {
        self.consumed.clear();
    }

    pub fn is_consumed(
        &self,
        idx: usize,
    ) -> bool {
        self.consumed.contains(&idx)
    }

    /// Mark `idx` as emitted. Returns `false` if it already was.
    pub fn consume(
        &mut self,
        idx: usize,
    ) -> bool {
        self.consumed.insert(idx)
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Emit a statement line at the current depth
    pub fn statement(
        &mut self,
        text: impl AsRef<str>,
    ) {
        self.push(text.as_ref());
        self.statements += 1;
    }

    /// Emit a `# ...` comment at the current depth
    pub fn comment(
        &mut self,
        text: impl AsRef<str>,
    ) {
        let line = format!("# {}", text.as_ref());
        self.push(&line);
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn mark(&self) -> Mark {
        Mark {
            lines: self.lines.len(),
            statements: self.statements,
        }
    }

    pub fn lines_since(
        &self,
        mark: Mark,
    ) -> usize {
        self.lines.len() - mark.lines
    }

    pub fn statements_since(
        &self,
        mark: Mark,
    ) -> usize {
        self.statements - mark.statements
    }

    /// Drop everything emitted after `mark`
    pub fn truncate(
        &mut self,
        mark: Mark,
    ) {
        self.lines.truncate(mark.lines);
        self.statements = mark.statements;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }

    fn push(
        &mut self,
        text: &str,
    ) {
        let mut line = self.indent_unit.repeat(self.depth);
        line.push_str(text);
        self.lines.push(line);
    }
}

/// Spell an IR operator in Python
pub fn render_op(op: &str) -> &str {
    match op {
        "&&" => "and",
        "||" => "or",
        other => other,
    }
}

/// Spell an IR operand in Python
pub fn render_operand(operand: &str) -> String {
    match operand.trim() {
        "true" => "True".to_string(),
        "false" => "False".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut ctx = EmissionContext::new(4);
        ctx.statement("def f():");
        ctx.indent();
        ctx.statement("x = 1");
        ctx.comment("label: L1");
        ctx.dedent();
        ctx.blank();
        assert_eq!(ctx.finish(), "def f():\n    x = 1\n    # label: L1\n");
    }

    #[test]
    fn test_truncate_restores_counts() {
        let mut ctx = EmissionContext::new(2);
        ctx.statement("a = 1");
        let mark = ctx.mark();
        ctx.statement("else:");
        ctx.comment("goto L3");
        assert_eq!(ctx.lines_since(mark), 2);
        assert_eq!(ctx.statements_since(mark), 1);
        ctx.truncate(mark);
        assert_eq!(ctx.lines(), &["a = 1".to_string()]);
        assert_eq!(ctx.statements_since(mark), 0);
    }

    #[test]
    fn test_consume_once() {
        let mut ctx = EmissionContext::new(4);
        assert!(ctx.consume(3));
        assert!(!ctx.consume(3));
        ctx.reset_function();
        assert!(!ctx.is_consumed(3));
    }

    #[test]
    fn test_python_spelling() {
        assert_eq!(render_op("&&"), "and");
        assert_eq!(render_op("||"), "or");
        assert_eq!(render_op("<="), "<=");
        assert_eq!(render_operand("true"), "True");
        assert_eq!(render_operand("\"true\""), "\"true\"");
    }
}

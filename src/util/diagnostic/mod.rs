//! Diagnostic rendering
//!
//! Turns compiler errors and scan findings into `rustc`-style text with a
//! source snippet:
//!
//! ```text
//! error: Undeclared variable 'y'
//!  --> demo.charm:3:5
//!   |
//! 3 |     y = 2;
//!   |     ^
//! ```

use owo_colors::OwoColorize;

use crate::util::span::{SourceFile, Span};

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single message attached to an optional source location
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span: None,
        }
    }

    /// Attach a location; dummy spans are ignored
    pub fn at(
        mut self,
        span: Span,
    ) -> Self {
        if !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }
}

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Colorize headers and markers
    pub use_colors: bool,
    /// Print the offending source line
    pub show_source: bool,
    /// Marker character under the span
    pub indicator: char,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            indicator: '^',
        }
    }
}

/// Plain-text diagnostic renderer
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Render a diagnostic, with a snippet when the source is known
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
        source: Option<&SourceFile>,
    ) -> String {
        let mut output = self.render_header(diagnostic);
        output.push('\n');

        let Some(span) = diagnostic.span else {
            return output;
        };

        let file_name = source.map(|s| s.name.as_str()).unwrap_or("<input>");
        output.push_str(&format!(" --> {}:{}\n", file_name, span.start));

        if !self.config.show_source {
            return output;
        }
        let Some(line) = source.and_then(|s| s.line_text(span.start.line)) else {
            return output;
        };

        let gutter = span.start.line.to_string();
        let pad = " ".repeat(gutter.len());
        let width = if span.end.line == span.start.line {
            span.end.column.saturating_sub(span.start.column).max(1)
        } else {
            1
        };
        let marker: String = std::iter::repeat(self.config.indicator).take(width).collect();
        let marker = if self.config.use_colors {
            marker.red().bold().to_string()
        } else {
            marker
        };

        output.push_str(&format!("{} |\n", pad));
        output.push_str(&format!("{} | {}\n", gutter, line));
        output.push_str(&format!(
            "{} | {}{}\n",
            pad,
            " ".repeat(span.start.column.saturating_sub(1)),
            marker
        ));
        output
    }

    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let severity = diagnostic.severity.to_string();
        if !self.config.use_colors {
            return format!("{}: {}", severity, diagnostic.message);
        }
        let severity = match diagnostic.severity {
            Severity::Error => severity.red().bold().to_string(),
            Severity::Warning => severity.yellow().bold().to_string(),
            Severity::Info => severity.cyan().bold().to_string(),
        };
        format!("{}: {}", severity, diagnostic.message.bold())
    }
}

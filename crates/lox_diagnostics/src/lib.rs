//! lox_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Diagnostics are plain values. A front-end phase pushes them into a
//! [`DiagnosticSink`]; the host decides after the phase what an error means
//! for the process (exit status, prompt reset, ...).

use lox_core::text::TextSpan;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based source line the diagnostic refers to.
    pub line: u32,
    /// Contextual location phrase (e.g. `at 'foo'`). Empty for lexical errors.
    pub location: String,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
    /// Byte span of the offending input, if any.
    pub span: Option<TextSpan>,
}

impl Diagnostic {
    /// Create a new diagnostic on `line` from a message template.
    pub fn new(line: u32, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            line,
            location: String::new(),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            span: None,
        }
    }

    /// Attach a location hint.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Attach the byte span of the offending input.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self.category {
            DiagnosticCategory::Error => "Error",
            DiagnosticCategory::Warning => "Warning",
        };
        write!(f, "[line {}] {}", self.line, word)?;
        if !self.location.is_empty() {
            write!(f, " {}", self.location)?;
        }
        write!(f, ": {}", self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Receiver of diagnostics produced by a front-end phase.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    /// Report a free-form error with a location hint.
    fn report_at(&mut self, line: u32, location: &str, message_text: &str) {
        self.report(Diagnostic {
            line,
            location: location.to_string(),
            message_text: message_text.to_string(),
            code: 0,
            category: DiagnosticCategory::Error,
            span: None,
        });
    }
}

/// An ordered collection of diagnostics accumulated during one phase.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Sort diagnostics by line, then by span start.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.line.cmp(&b.line).then_with(|| {
                let a_pos = a.span.map(|s| s.start).unwrap_or(0);
                let b_pos = b.span.map(|s| s.start).unwrap_or(0);
                a_pos.cmp(&b_pos)
            })
        });
    }
}

impl DiagnosticSink for DiagnosticCollection {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner diagnostics (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER_0: DiagnosticMessage = diag!(1001, Error, "Unexpected character '{0}'");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, Error, "Unterminated string.");
    pub const UNTERMINATED_BLOCK_COMMENT: DiagnosticMessage = diag!(1003, Warning, "Unterminated block comment.");
}

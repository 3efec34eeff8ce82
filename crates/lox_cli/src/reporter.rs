//! Console error sink.
//!
//! Prints each diagnostic to stderr as soon as it is reported and keeps the
//! error count for one run. A fresh reporter is created per run so an error in
//! one prompt entry never leaks into the next.

use lox_core::LineMap;
use lox_diagnostics::{Diagnostic, DiagnosticSink};
use std::io::{self, Write};

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub struct ConsoleReporter<'src, W: Write = io::Stderr> {
    source: &'src str,
    line_map: LineMap,
    use_color: bool,
    out: W,
    error_count: usize,
    warning_count: usize,
}

impl<'src> ConsoleReporter<'src> {
    pub fn stderr(source: &'src str, use_color: bool) -> Self {
        Self::new(source, use_color, io::stderr())
    }
}

impl<'src, W: Write> ConsoleReporter<'src, W> {
    pub fn new(source: &'src str, use_color: bool, out: W) -> Self {
        Self {
            source,
            line_map: LineMap::new(source),
            use_color,
            out,
            error_count: 0,
            warning_count: 0,
        }
    }

    pub fn had_error(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    fn write_diagnostic(&mut self, diag: &Diagnostic) -> io::Result<()> {
        if !self.use_color {
            return writeln!(self.out, "{}", diag);
        }

        let (color, category) = if diag.is_error() { (RED, "error") } else { (YELLOW, "warning") };
        write!(self.out, "{}[line {}]{} ", CYAN, diag.line, RESET)?;
        write!(self.out, "{}{}{}{}", BOLD, color, category, RESET)?;
        if !diag.location.is_empty() {
            write!(self.out, " {}", diag.location)?;
        }
        writeln!(self.out, ": {}", diag.message_text)?;

        if let Some(span) = diag.span {
            let line = self.line_map.line_of(span.start);
            if let Some(range) = self.line_map.line_range(line) {
                let text = self.source[range.clone()].trim_end_matches('\r');
                let column = span.start as usize - range.start;
                // Carets stop at the end of the excerpt line.
                let width = (span.length as usize).clamp(1, text.len().saturating_sub(column).max(1));
                let gutter = line.to_string();
                writeln!(self.out, "{} {}|{} {}", gutter, CYAN, RESET, text)?;
                writeln!(
                    self.out,
                    "{} {}|{} {}{}{}{}",
                    " ".repeat(gutter.len()),
                    CYAN,
                    RESET,
                    " ".repeat(column),
                    color,
                    "^".repeat(width),
                    RESET
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> DiagnosticSink for ConsoleReporter<'_, W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        } else {
            self.warning_count += 1;
        }
        if let Err(err) = self.write_diagnostic(&diagnostic) {
            tracing::warn!(error = %err, "failed to write diagnostic");
        }
    }
}

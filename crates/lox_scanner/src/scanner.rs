//! The lox scanner.
//!
//! A single left-to-right pass over the source bytes. Each iteration marks
//! the start of a lexeme, consumes one byte and dispatches on it, looking at
//! most two bytes ahead. Malformed input is reported as a diagnostic and
//! scanning carries on with the next unconsumed character.

use crate::char_codes::*;
use lox_core::text::{TextPos, TextSpan};
use lox_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticSink};
use lox_syntax::{Literal, Token, TokenKind};
use memchr::memmem;

/// The result of scanning one source text.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// Tokens in source order, always ending with exactly one [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
    /// Diagnostics raised by this scan only.
    pub diagnostics: DiagnosticCollection,
}

impl ScanOutput {
    /// Whether any error-category diagnostic was produced.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Scan a complete source text.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn scan(source: &str) -> ScanOutput {
    Scanner::new(source).scan_tokens()
}

/// Converts lox source text into tokens.
///
/// A scanner owns its cursor and is consumed by the scan, so one instance
/// serves exactly one pass.
pub struct Scanner<'src> {
    source: &'src str,
    bytes: &'src [u8],
    tokens: Vec<Token>,
    /// Byte offset of the lexeme being recognized.
    start: usize,
    /// Byte offset of the next unconsumed byte.
    current: usize,
    /// Current 1-based line.
    line: u32,
    /// Line on which the current lexeme started.
    start_line: u32,
    diagnostics: DiagnosticCollection,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Scan the whole source, collecting diagnostics in a scan-scoped collection.
    pub fn scan_tokens(mut self) -> ScanOutput {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line, self.bytes.len() as TextPos));

        tracing::debug!(
            tokens = self.tokens.len(),
            diagnostics = self.diagnostics.len(),
            lines = self.line,
            "scan finished"
        );

        ScanOutput {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Scan the whole source, forwarding diagnostics to `sink` in source order.
    pub fn scan_tokens_into(self, sink: &mut impl DiagnosticSink) -> Vec<Token> {
        let output = self.scan_tokens();
        for diagnostic in output.diagnostics.into_diagnostics() {
            sink.report(diagnostic);
        }
        output.tokens
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let b = self.advance();
        match b {
            b'(' => self.add_token(TokenKind::LeftParen),
            b')' => self.add_token(TokenKind::RightParen),
            b'{' => self.add_token(TokenKind::LeftBrace),
            b'}' => self.add_token(TokenKind::RightBrace),
            b',' => self.add_token(TokenKind::Comma),
            b'.' => self.add_token(TokenKind::Dot),
            b'-' => self.add_token(TokenKind::Minus),
            b'+' => self.add_token(TokenKind::Plus),
            b';' => self.add_token(TokenKind::Semicolon),
            b'*' => self.add_token(TokenKind::Star),

            b'!' => self.add_one_or_two(TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.add_one_or_two(TokenKind::EqualEqual, TokenKind::Equal),
            b'<' => self.add_one_or_two(TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.add_one_or_two(TokenKind::GreaterEqual, TokenKind::Greater),

            SLASH => self.scan_slash(),
            DOUBLE_QUOTE => self.scan_string(),

            SPACE | CARRIAGE_RETURN | TAB => {}
            LINE_FEED => self.line += 1,

            _ if is_digit(b) => self.scan_number(),
            _ if is_alpha(b) => self.scan_identifier(),

            _ => self.unexpected_character(),
        }
    }

    // ========================================================================
    // Cursor primitives
    // ========================================================================

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.bytes.len()
    }

    #[inline]
    fn advance(&mut self) -> u8 {
        let b = self.bytes[self.current];
        self.current += 1;
        b
    }

    /// Consume the next byte only if it is `expected`.
    #[inline]
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() != Some(expected) {
            return false;
        }
        self.current += 1;
        true
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.current).copied()
    }

    #[inline]
    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.current + 1).copied()
    }

    /// Move the cursor to `to`, counting the newlines passed over.
    fn skip_to(&mut self, to: usize) {
        let newlines = memchr::memchr_iter(LINE_FEED, &self.bytes[self.current..to]).count();
        self.line += newlines as u32;
        self.current = to;
    }

    #[inline]
    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    #[inline]
    fn lexeme_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.start as TextPos, self.current as TextPos)
    }

    // ========================================================================
    // Token emission
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.lexeme(), self.start_line, self.lexeme_span());
        self.tokens.push(token);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        let token = Token::new(kind, self.lexeme(), self.start_line, self.lexeme_span())
            .with_literal(literal);
        self.tokens.push(token);
    }

    /// Emit `double` if the next byte is `=`, otherwise `single`.
    fn add_one_or_two(&mut self, double: TokenKind, single: TokenKind) {
        let kind = if self.match_byte(EQUALS) { double } else { single };
        self.add_token(kind);
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(line = diagnostic.line, code = diagnostic.code, "{}", diagnostic.message_text);
        self.diagnostics.add(diagnostic);
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_slash(&mut self) {
        if self.match_byte(SLASH) {
            // Line comment: stop before the newline so it still bumps the line.
            let end = memchr::memchr(LINE_FEED, &self.bytes[self.current..])
                .map_or(self.bytes.len(), |offset| self.current + offset);
            self.current = end;
        } else if self.match_byte(ASTERISK) {
            self.skip_block_comment();
        } else {
            self.add_token(TokenKind::Slash);
        }
    }

    /// Skip to just past the first `*/`. Block comments do not nest.
    fn skip_block_comment(&mut self) {
        match memmem::find(&self.bytes[self.current..], BLOCK_COMMENT_CLOSE) {
            Some(offset) => {
                let close = self.current + offset;
                self.skip_to(close);
                self.current += BLOCK_COMMENT_CLOSE.len();
            }
            None => {
                self.skip_to(self.bytes.len());
                let diagnostic = Diagnostic::new(self.line, &messages::UNTERMINATED_BLOCK_COMMENT, &[])
                    .with_span(self.lexeme_span());
                self.error(diagnostic);
            }
        }
    }

    fn scan_string(&mut self) {
        match memchr::memchr(DOUBLE_QUOTE, &self.bytes[self.current..]) {
            Some(offset) => {
                let close = self.current + offset;
                self.skip_to(close);
                self.current += 1;
                let value = &self.source[self.start + 1..self.current - 1];
                self.add_literal_token(TokenKind::String, Literal::String(value.to_string()));
            }
            None => {
                self.skip_to(self.bytes.len());
                let diagnostic = Diagnostic::new(self.line, &messages::UNTERMINATED_STRING, &[])
                    .with_span(self.lexeme_span());
                self.error(diagnostic);
            }
        }
    }

    fn scan_number(&mut self) {
        self.skip_digits();

        // The dot belongs to the number only when a digit follows it.
        if self.peek() == Some(DOT) && self.peek_next().map_or(false, is_digit) {
            self.current += 1;
            self.skip_digits();
        }

        let text = self.lexeme();
        let value = text.parse::<f64>().unwrap_or_else(|err| {
            debug_assert!(false, "digit run {text:?} failed to parse: {err}");
            0.0
        });
        self.add_literal_token(TokenKind::Number, Literal::Number(value));
    }

    fn skip_digits(&mut self) {
        while self.peek().map_or(false, is_digit) {
            self.current += 1;
        }
    }

    fn scan_identifier(&mut self) {
        while self.peek().map_or(false, is_alpha_numeric) {
            self.current += 1;
        }
        let kind = TokenKind::from_keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn unexpected_character(&mut self) {
        // Swallow the whole character so the cursor stays on a char boundary.
        let ch = self.source[self.start..].chars().next().unwrap_or(NULL_CHARACTER as char);
        self.current = self.start + ch.len_utf8();

        let mut buf = [0u8; 4];
        let text = ch.encode_utf8(&mut buf);
        let diagnostic = Diagnostic::new(self.line, &messages::UNEXPECTED_CHARACTER_0, &[text])
            .with_span(self.lexeme_span());
        self.error(diagnostic);
    }
}

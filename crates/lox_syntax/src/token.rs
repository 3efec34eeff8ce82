//! Tokens produced by the scanner.

use crate::token_kind::TokenKind;
use lox_core::text::{TextPos, TextSpan};
use std::fmt;

/// The decoded payload of a literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    /// String contents without the surrounding quotes.
    String(String),
}

impl Literal {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(value) => Some(*value),
            Literal::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(value) => Some(value),
            Literal::Number(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the `.0` on integral values.
            Literal::Number(value) => write!(f, "{:?}", value),
            Literal::String(value) => f.write_str(value),
        }
    }
}

/// A scanned token. Never mutated once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text of the token. Empty for [`TokenKind::Eof`].
    pub lexeme: String,
    pub literal: Option<Literal>,
    /// 1-based line of the token's first character.
    pub line: u32,
    /// Byte span of the lexeme in the source.
    pub span: TextSpan,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, span: TextSpan) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// The end-of-input marker at byte offset `pos`.
    pub fn eof(line: u32, pos: TextPos) -> Self {
        Self::new(TokenKind::Eof, String::new(), line, TextSpan::empty(pos))
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme)?;
        match &self.literal {
            Some(literal) => write!(f, "{}", literal),
            None => f.write_str("null"),
        }
    }
}

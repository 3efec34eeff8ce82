//! TokenKind enum - every lexeme category the scanner can produce.
//!
//! The set is closed: punctuation and operators, the three literal classes,
//! the reserved words and the end-of-input marker.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // ========================================================================
    // Single-character tokens
    // ========================================================================
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // ========================================================================
    // One or two character tokens
    // ========================================================================
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // ========================================================================
    // Literals
    // ========================================================================
    Identifier,
    String,
    Number,

    // ========================================================================
    // Keywords
    // ========================================================================
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    /// End of input. Always the last token of a scan.
    Eof,
}

impl TokenKind {
    pub const FIRST_PUNCTUATION: TokenKind = TokenKind::LeftParen;
    pub const LAST_PUNCTUATION: TokenKind = TokenKind::LessEqual;
    pub const FIRST_LITERAL: TokenKind = TokenKind::Identifier;
    pub const LAST_LITERAL: TokenKind = TokenKind::Number;
    pub const FIRST_KEYWORD: TokenKind = TokenKind::And;
    pub const LAST_KEYWORD: TokenKind = TokenKind::While;

    /// Every reserved word with its kind.
    pub const KEYWORDS: [(&'static str, TokenKind); 16] = [
        ("and", TokenKind::And),
        ("class", TokenKind::Class),
        ("else", TokenKind::Else),
        ("false", TokenKind::False),
        ("for", TokenKind::For),
        ("fun", TokenKind::Fun),
        ("if", TokenKind::If),
        ("nil", TokenKind::Nil),
        ("or", TokenKind::Or),
        ("print", TokenKind::Print),
        ("return", TokenKind::Return),
        ("super", TokenKind::Super),
        ("this", TokenKind::This),
        ("true", TokenKind::True),
        ("var", TokenKind::Var),
        ("while", TokenKind::While),
    ];

    /// Whether this kind represents a reserved word.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_KEYWORD as u8 && v <= Self::LAST_KEYWORD as u8
    }

    /// Whether this kind represents punctuation or an operator.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_PUNCTUATION as u8 && v <= Self::LAST_PUNCTUATION as u8
    }

    /// Whether this kind is an identifier, string or number.
    #[inline]
    pub fn is_literal(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_LITERAL as u8 && v <= Self::LAST_LITERAL as u8
    }

    /// Look up a lexeme in the keyword table. The whole lexeme must match.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        keywords().get(text).copied()
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        if !self.is_keyword() {
            return None;
        }
        Self::KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::LeftParen => Some("("),
            TokenKind::RightParen => Some(")"),
            TokenKind::LeftBrace => Some("{"),
            TokenKind::RightBrace => Some("}"),
            TokenKind::Comma => Some(","),
            TokenKind::Dot => Some("."),
            TokenKind::Minus => Some("-"),
            TokenKind::Plus => Some("+"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Slash => Some("/"),
            TokenKind::Star => Some("*"),
            TokenKind::Bang => Some("!"),
            TokenKind::BangEqual => Some("!="),
            TokenKind::Equal => Some("="),
            TokenKind::EqualEqual => Some("=="),
            TokenKind::Greater => Some(">"),
            TokenKind::GreaterEqual => Some(">="),
            TokenKind::Less => Some("<"),
            TokenKind::LessEqual => Some("<="),
            _ => None,
        }
    }

    /// The upper-case name used in token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::Fun => "FUN",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        }
    }
}

/// The process-wide keyword table. Built on first use, read-only afterwards.
fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| TokenKind::KEYWORDS.iter().copied().collect())
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

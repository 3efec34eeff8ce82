//! Byte constants and ASCII classification used by the scanner.

pub const NULL_CHARACTER: u8 = b'\0';
pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const TAB: u8 = b'\t';
pub const SPACE: u8 = b' ';

pub const DOUBLE_QUOTE: u8 = b'"';
pub const ASTERISK: u8 = b'*';
pub const SLASH: u8 = b'/';
pub const DOT: u8 = b'.';
pub const EQUALS: u8 = b'=';
pub const UNDERSCORE: u8 = b'_';

/// The two-byte sequence that closes a block comment.
pub const BLOCK_COMMENT_CLOSE: &[u8] = b"*/";

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Whether `b` can start an identifier. ASCII only.
#[inline]
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == UNDERSCORE
}

/// Whether `b` can continue an identifier.
#[inline]
pub fn is_alpha_numeric(b: u8) -> bool {
    is_alpha(b) || is_digit(b)
}

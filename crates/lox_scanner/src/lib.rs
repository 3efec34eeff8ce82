//! lox_scanner: Lexer for lox source code.
//!
//! Turns source text into a flat, ordered sequence of tokens in one pass:
//! - Punctuation and one-or-two character operators (maximal munch)
//! - `//` line comments and non-nesting `/* */` block comments
//! - String and number literals with decoded payloads
//! - Identifiers and reserved words
//!
//! Malformed input never aborts a scan; it is reported through diagnostics.

mod char_codes;
mod scanner;

pub use scanner::{scan, ScanOutput, Scanner};

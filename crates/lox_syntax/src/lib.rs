//! lox_syntax: Token definitions for the lox front end.
//!
//! This crate defines the closed set of token kinds, the static keyword
//! table, and the immutable `Token` value the scanner emits.

pub mod token;
pub mod token_kind;

pub use token::{Literal, Token};
pub use token_kind::TokenKind;

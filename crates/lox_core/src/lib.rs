//! lox_core: Core utilities shared by the lox front end.
//!
//! Provides the source-location types that tokens and diagnostics carry,
//! and a line map for rendering source excerpts.

pub mod text;

pub use text::{LineMap, TextPos, TextSpan};

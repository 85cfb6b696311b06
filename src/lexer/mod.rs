//! A reference lexer for WHILE source text.
//!
//! The lexer is an external collaborator of the parser/interpreter/PAD core:
//! the parser only ever depends on the token shapes in [`crate::token`], never
//! on how they were produced. This module exists so the crate's own tests and
//! demo binary have end-to-end source text to feed the parser; hosts that
//! already own a lexer can ignore it entirely.

mod lexer;

pub use lexer::{scan, LexError};

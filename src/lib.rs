//! `while-core`: parser, tree-walking interpreter, and programs-as-data (PAD)
//! codec for the WHILE language (spec §1).
//!
//! The lexer is shipped only as a reference implementation for this crate's
//! own tests and demo binary (spec §1 "Out of scope"); a host that already
//! owns a lexer need only produce [`token::Token`]s.

pub mod ast;
pub mod cursor;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod pad;
pub mod parser;
pub mod token;
pub mod tree;

pub use ast::{Expr, Op, Program, Stmt, SwitchCase, SwitchDefault};
pub use error::{ErrorRecord, ErrorRegistry};
pub use interpreter::{interpret, InterpreterError, InterpreterOptions};
pub use pad::{display_pad, from_pad, to_pad, Pad, PadDecodeError, PadEncodeError, PadFormat};
pub use parser::{parse, ParserOptions};
pub use token::{Position, Token, TokenType};
pub use tree::Tree;

//! The explicit-stack tree-walking interpreter (spec §4.6).

mod interpreter;
mod store;

pub use interpreter::{interpret, InterpreterError, InterpreterOptions};

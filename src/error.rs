//! Position/error registry (spec §4.1, §7).
//!
//! The parser never raises: every syntactic problem is pushed onto an
//! [`ErrorRegistry`] as a flat `{position, message}` record, in insertion order,
//! never deduplicated (spec §3 "Error record").

use std::fmt;

use crate::token::{Position, Token};

/// The abstract error kinds of spec §7. Not part of the public surface — hosts
/// only ever see the rendered [`ErrorRecord`]; `DiagnosticKind` exists so the
/// parser's call sites stay declarative instead of hand-formatting strings
/// everywhere a diagnostic is raised.
#[derive(Debug, Clone)]
pub enum DiagnosticKind<'a> {
    UnexpectedToken { found: &'a Token, expected: &'a [&'a str] },
    UnexpectedEndOfInput { expected: &'a [&'a str] },
    UnexpectedValue { found: &'a Token, wanted: &'a str },
    Custom(String),
}

impl fmt::Display for DiagnosticKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnexpectedToken { found, expected } => write!(
                f,
                "Unexpected token '{}', expected one of [{}]",
                found.value,
                expected.join(", ")
            ),
            DiagnosticKind::UnexpectedEndOfInput { expected } => write!(
                f,
                "Unexpected end of input, expected one of [{}]",
                expected.join(", ")
            ),
            DiagnosticKind::UnexpectedValue { found, wanted } => {
                write!(f, "Unexpected value '{}', wanted {}", found.value, wanted)
            }
            DiagnosticKind::Custom(message) => write!(f, "{}", message),
        }
    }
}

/// `{position, message}` exactly as surfaced to hosts (spec §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub position: Position,
    pub message: String,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// Insertion-ordered, never-deduplicated accumulator of diagnostics.
#[derive(Debug, Default)]
pub struct ErrorRegistry {
    errors: Vec<ErrorRecord>,
}

impl ErrorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: Position, kind: DiagnosticKind<'_>) {
        let message = kind.to_string();
        log::error!("{} {}", position, message);
        self.errors.push(ErrorRecord { position, message });
    }

    pub fn push_custom(&mut self, position: Position, message: impl Into<String>) {
        self.push(position, DiagnosticKind::Custom(message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_vec(self) -> Vec<ErrorRecord> {
        self.errors
    }

    pub fn as_slice(&self) -> &[ErrorRecord] {
        &self.errors
    }
}

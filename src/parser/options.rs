//! Parser configuration (spec §6).

/// The parser's sole configuration surface. With `pure_only: true`, numeric
/// literals and `switch` statements are rejected with a diagnostic (spec §9
/// "Extended dialect gating" — centralized here rather than scattered through
/// the grammar).
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    pub pure_only: bool,
}

impl ParserOptions {
    pub fn pure() -> Self {
        Self { pure_only: true }
    }

    pub fn extended() -> Self {
        Self { pure_only: false }
    }
}

//! Character-at-a-time scanner producing the token shape [`crate::token::Token`]
//! consumed by the parser. Not part of the specified core contract (spec §1
//! "Out of scope"); shipped only so the crate's own tests and demo binary have
//! something to turn WHILE source text into tokens with.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

use crate::token::{Position, Token, TokenType};

static KEYWORDS: Lazy<HashMap<&'static str, ()>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for kw in ["read", "write", "if", "else", "while", "switch", "case", "default"] {
        m.insert(kw, ());
    }
    m
});

static OPERATIONS: Lazy<HashMap<&'static str, ()>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for op in ["hd", "tl", "cons"] {
        m.insert(op, ());
    }
    m
});

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("{0}: unexpected character '{1}'")]
    UnexpectedChar(Position, char),
}

struct Scanner {
    chars: Vec<char>,
    start: usize,
    current: usize,
    row: usize,
    col: usize,
    /// Position of the character at `start`, captured before it is consumed.
    tok_pos: Position,
    tokens: Vec<Token>,
}

/// Scans `source` into a token stream, or the first lexical error encountered.
pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
    let mut scanner = Scanner {
        chars: source.chars().collect(),
        start: 0,
        current: 0,
        row: 0,
        col: 0,
        tok_pos: Position::new(0, 0),
        tokens: Vec::new(),
    };
    scanner.run()?;
    Ok(scanner.tokens)
}

impl Scanner {
    fn run(&mut self) -> Result<(), LexError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.tok_pos = Position::new(self.row, self.col);
            self.scan_token()?;
        }
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn peek(&self) -> char {
        *self.chars.get(self.current).unwrap_or(&'\0')
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        if ch == '\n' {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    fn add_token(&mut self, token_type: TokenType, value: &str) {
        self.tokens.push(Token::new(token_type, value, self.tok_pos));
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let ch = self.advance();
        match ch {
            '{' | '}' | '(' | ')' | ';' => {
                let s = ch.to_string();
                self.add_token(TokenType::Symbol, &s);
            }
            ':' => {
                if self.match_char('=') {
                    self.add_token(TokenType::Symbol, ":=");
                } else {
                    self.add_token(TokenType::Symbol, ":");
                }
            }
            ' ' | '\t' | '\r' | '\n' => {}
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.word(),
            other => {
                return Err(LexError::UnexpectedChar(self.tok_pos, other));
            }
        }
        Ok(())
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        let value: String = self.source_slice();
        self.add_token(TokenType::Number, &value);
    }

    fn word(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }
        let value = self.source_slice();
        if KEYWORDS.contains_key(value.as_str()) {
            self.add_token(TokenType::Symbol, &value);
        } else if OPERATIONS.contains_key(value.as_str()) {
            self.add_token(TokenType::Operation, &value);
        } else {
            self.add_token(TokenType::Identifier, &value);
        }
    }

    fn source_slice(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn scans_identity_program() {
        let tokens = scan("ident read X { } write X").unwrap();
        assert_eq!(values(&tokens), vec!["ident", "read", "X", "{", "}", "write", "X"]);
        assert_eq!(tokens[0].token_type, TokenType::Identifier);
        assert_eq!(tokens[1].token_type, TokenType::Symbol);
    }

    #[test]
    fn distinguishes_operations_from_identifiers() {
        let tokens = scan("hd X").unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Operation);
        assert_eq!(tokens[1].token_type, TokenType::Identifier);
    }

    #[test]
    fn walrus_is_a_single_token() {
        let tokens = scan("X := Y").unwrap();
        assert_eq!(values(&tokens), vec!["X", ":=", "Y"]);
    }

    #[test]
    fn scans_number_literal() {
        let tokens = scan("Y := 3").unwrap();
        assert_eq!(tokens[2].token_type, TokenType::Number);
        assert_eq!(tokens[2].value, "3");
    }

    #[test]
    fn tracks_row_and_column_across_newlines() {
        let tokens = scan("X\nY").unwrap();
        assert_eq!(tokens[0].pos, Position::new(0, 0));
        assert_eq!(tokens[1].pos, Position::new(1, 0));
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let err = scan("X $ Y").unwrap_err();
        assert_eq!(err, LexError::UnexpectedChar(Position::new(0, 2), '$'));
    }
}

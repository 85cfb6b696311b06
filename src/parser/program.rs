//! Program parser (spec §4.5): `<name> read <input> { body } write <output>`.

use super::{ParseStatus, Parser};
use crate::ast::Program;
use crate::cursor::{ExpectOutcome, TokenMatch};
use crate::token::TokenType;

impl Parser {
    pub(crate) fn parse_program(&mut self) -> Program {
        let (name, input, intro_status) = self.parse_intro();

        let (body_status, body) = if intro_status == ParseStatus::Eoi {
            (ParseStatus::Eoi, Vec::new())
        } else {
            self.parse_block()
        };

        let (output, outro_status) = if body_status == ParseStatus::Eoi {
            (None, ParseStatus::Eoi)
        } else {
            self.parse_outro()
        };

        if outro_status != ParseStatus::Eoi && !self.cursor.is_at_end() {
            let pos = self.cursor.pos();
            self.errors.push_custom(pos, "Expected end of input");
        }

        let complete = name.is_some()
            && input.is_some()
            && output.is_some()
            && intro_status == ParseStatus::Ok
            && body_status == ParseStatus::Ok
            && outro_status == ParseStatus::Ok
            && body.iter().all(|s| s.is_complete());

        log::trace!("parsed program {:?} (complete={})", name, complete);
        Program { name, input, output, body, complete }
    }

    /// Handles the three degraded-opening cases of spec §4.5: missing name,
    /// missing `read`, and a program that opens directly with `{`.
    fn parse_intro(&mut self) -> (Option<String>, Option<String>, ParseStatus) {
        if matches!(self.cursor.peek(), Some(tok) if tok.value == "{") {
            let pos = self.cursor.pos();
            self.errors.push_custom(pos, "Missing program name");
            self.errors.push_custom(pos, "Missing input variable");
            return (None, None, ParseStatus::Error);
        }

        let name = match self.cursor.expect(&[TokenMatch::Type(TokenType::Identifier)], &mut self.errors) {
            ExpectOutcome::Ok(tok) => Some(tok.value),
            ExpectOutcome::Error => None,
            ExpectOutcome::Eoi => return (None, None, ParseStatus::Eoi),
        };

        // `read` missing but the input variable present directly (e.g. `p X { ... }`):
        // take the identifier as the input variable rather than letting two
        // independent `expect` calls each blindly consume one token (spec §4.5
        // "where possible, still capture the fields parsed"), mirroring the
        // symmetric bare-identifier handling in `parse_outro` below.
        let (input, input_status) = match self.cursor.peek() {
            Some(tok) if tok.value == "read" => {
                self.cursor.next();
                match self.cursor.expect(&[TokenMatch::Type(TokenType::Identifier)], &mut self.errors) {
                    ExpectOutcome::Ok(tok) => (Some(tok.value), ParseStatus::Ok),
                    ExpectOutcome::Error => (None, ParseStatus::Error),
                    ExpectOutcome::Eoi => return (name, None, ParseStatus::Eoi),
                }
            }
            Some(tok) if tok.token_type == TokenType::Identifier => {
                let pos = tok.pos;
                let value = tok.value.clone();
                self.cursor.next();
                self.errors.push_custom(pos, "Missing `read` keyword");
                (Some(value), ParseStatus::Error)
            }
            _ => match self.cursor.expect(&[TokenMatch::Lexeme("read")], &mut self.errors) {
                ExpectOutcome::Eoi => return (name, None, ParseStatus::Eoi),
                _ => (None, ParseStatus::Error),
            },
        };

        let status = if name.is_some() && input.is_some() && input_status == ParseStatus::Ok {
            ParseStatus::Ok
        } else {
            ParseStatus::Error
        };
        (name, input, status)
    }

    /// `write <output>`, tolerating a bare identifier in place of `write
    /// <output>` (spec §4.5: "if the leading identifier appears without
    /// `write`, `write` is reported missing and the identifier is taken as
    /// the output").
    fn parse_outro(&mut self) -> (Option<String>, ParseStatus) {
        match self.cursor.peek() {
            Some(tok) if tok.value == "write" => {
                self.cursor.next();
                match self.cursor.expect(&[TokenMatch::Type(TokenType::Identifier)], &mut self.errors) {
                    ExpectOutcome::Ok(tok) => (Some(tok.value), ParseStatus::Ok),
                    ExpectOutcome::Error => (None, ParseStatus::Error),
                    ExpectOutcome::Eoi => (None, ParseStatus::Eoi),
                }
            }
            Some(tok) if tok.token_type == TokenType::Identifier => {
                let pos = tok.pos;
                let value = tok.value.clone();
                self.cursor.next();
                self.errors.push_custom(pos, "Missing `write` keyword");
                (Some(value), ParseStatus::Error)
            }
            _ => match self.cursor.expect(&[TokenMatch::Lexeme("write")], &mut self.errors) {
                ExpectOutcome::Eoi => (None, ParseStatus::Eoi),
                _ => (None, ParseStatus::Error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::parser::options::ParserOptions;
    use crate::token::{Position, Token, TokenType};

    fn ident(name: &str, c: usize) -> Token {
        Token::new(TokenType::Identifier, name, Position::new(0, c))
    }
    fn sym(v: &str, c: usize) -> Token {
        Token::new(TokenType::Symbol, v, Position::new(0, c))
    }

    #[test]
    fn minimal_identity_program_is_complete() {
        // ident read X { } write X
        let toks = vec![
            ident("ident", 0),
            sym("read", 6),
            ident("X", 11),
            sym("{", 13),
            sym("}", 14),
            sym("write", 16),
            ident("X", 22),
        ];
        let mut p = Parser::new(toks, ParserOptions::default());
        let program = p.parse_program();
        assert!(program.complete);
        assert!(p.errors.is_empty());
        assert_eq!(program.name.as_deref(), Some("ident"));
        assert_eq!(program.input.as_deref(), Some("X"));
        assert_eq!(program.output.as_deref(), Some("X"));
        assert_eq!(program.complete, program.recompute_complete());
    }

    #[test]
    fn program_opening_with_brace_reports_two_missing_fields() {
        let toks = vec![sym("{", 0), sym("}", 1), sym("write", 3), ident("X", 9)];
        let mut p = Parser::new(toks, ParserOptions::default());
        let program = p.parse_program();
        assert!(!program.complete);
        assert!(program.name.is_none());
        assert!(program.input.is_none());
        assert_eq!(p.errors.len(), 2);
        assert_eq!(program.complete, program.recompute_complete());
    }

    #[test]
    fn missing_read_keyword_still_captures_input_variable() {
        // `p X { } write X` — no `read`, input variable follows the name directly.
        let toks = vec![
            ident("p", 0),
            ident("X", 2),
            sym("{", 4),
            sym("}", 5),
            sym("write", 7),
            ident("X", 13),
        ];
        let mut p = Parser::new(toks, ParserOptions::default());
        let program = p.parse_program();
        assert!(!program.complete);
        assert_eq!(program.input.as_deref(), Some("X"));
        assert_eq!(program.output.as_deref(), Some("X"));
        assert!(program.body.is_empty());
        assert_eq!(p.errors.len(), 1);
    }

    #[test]
    fn missing_write_keyword_still_captures_output() {
        let toks = vec![
            ident("p", 0),
            sym("read", 2),
            ident("X", 7),
            sym("{", 9),
            sym("}", 10),
            ident("Y", 12),
        ];
        let mut p = Parser::new(toks, ParserOptions::default());
        let program = p.parse_program();
        assert!(!program.complete);
        assert_eq!(program.output.as_deref(), Some("Y"));
        assert_eq!(p.errors.len(), 1);
    }

    #[test]
    fn trailing_token_is_diagnosed_but_does_not_fail_parse() {
        let toks = vec![
            ident("p", 0),
            sym("read", 2),
            ident("X", 7),
            sym("{", 9),
            sym("}", 10),
            sym("write", 12),
            ident("X", 18),
            sym(";", 19),
        ];
        let mut p = Parser::new(toks, ParserOptions::default());
        let program = p.parse_program();
        assert!(program.complete);
        assert_eq!(p.errors.len(), 1);
    }
}

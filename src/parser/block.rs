//! Block parser (spec §4.4): `{` then either `}` immediately or a statement
//! list, then `}`. Diagnostics are emitted for missing braces but the
//! statements parsed so far are still returned.

use super::{ParseStatus, Parser};
use crate::ast::Stmt;
use crate::cursor::{ExpectOutcome, TokenMatch};

impl Parser {
    /// Returns `(status, statements)`: `Ok` when both braces were found,
    /// `Error` when a brace was missing (but statements were still captured),
    /// `Eoi` when the stream ran out mid-block.
    pub(super) fn parse_block(&mut self) -> (ParseStatus, Vec<Stmt>) {
        let open = match self.cursor.expect(&[TokenMatch::Lexeme("{")], &mut self.errors) {
            ExpectOutcome::Ok(_) => ParseStatus::Ok,
            ExpectOutcome::Error => ParseStatus::Error,
            ExpectOutcome::Eoi => return (ParseStatus::Eoi, Vec::new()),
        };

        if matches!(self.cursor.peek(), Some(tok) if tok.value == "}") {
            self.cursor.next();
            return (open, Vec::new());
        }

        let (list_status, statements) = self.parse_stmt_list(&[TokenMatch::Lexeme("}")]);
        if list_status == ParseStatus::Eoi {
            return (ParseStatus::Eoi, statements);
        }

        let close = match self.cursor.expect(&[TokenMatch::Lexeme("}")], &mut self.errors) {
            ExpectOutcome::Ok(_) => ParseStatus::Ok,
            ExpectOutcome::Error => ParseStatus::Error,
            ExpectOutcome::Eoi => ParseStatus::Eoi,
        };

        let status = if open == ParseStatus::Ok && close == ParseStatus::Ok {
            ParseStatus::Ok
        } else if close == ParseStatus::Eoi || open == ParseStatus::Eoi {
            ParseStatus::Eoi
        } else {
            ParseStatus::Error
        };
        (status, statements)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ParseStatus, Parser};
    use crate::parser::options::ParserOptions;
    use crate::token::{Position, Token, TokenType};

    fn sym(v: &str, c: usize) -> Token {
        Token::new(TokenType::Symbol, v, Position::new(0, c))
    }

    #[test]
    fn empty_block_ok() {
        let mut p = Parser::new(vec![sym("{", 0), sym("}", 1)], ParserOptions::default());
        let (status, stmts) = p.parse_block();
        assert_eq!(status, ParseStatus::Ok);
        assert!(stmts.is_empty());
    }

    #[test]
    fn missing_closing_brace_still_returns_parsed_statements() {
        let ident = Token::new(TokenType::Identifier, "X", Position::new(0, 1));
        let assign = sym(":=", 2);
        let mut p = Parser::new(
            vec![sym("{", 0), ident.clone(), assign, ident],
            ParserOptions::default(),
        );
        let (status, stmts) = p.parse_block();
        assert_ne!(status, ParseStatus::Ok);
        assert_eq!(stmts.len(), 1);
    }
}

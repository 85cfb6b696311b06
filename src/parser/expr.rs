//! Expression parser (spec §4.2).
//!
//! `E ::= ident | '(' E ')' | hd E | tl E | cons E E | number`
//! (`number` only in the extended dialect).

use super::Parser;
use crate::ast::{Expr, Op};
use crate::cursor::{ExpectOutcome, TokenMatch};
use crate::error::DiagnosticKind;
use crate::token::TokenType;

impl Parser {
    /// Parses a single expression. Returns `None` (plus a diagnostic) when the
    /// leading token starts nothing recognized — the caller decides whether
    /// that makes the enclosing construct partial.
    pub(super) fn parse_expr(&mut self) -> Option<Expr> {
        let tok = self.cursor.peek()?.clone();
        match tok.token_type {
            TokenType::Identifier => {
                self.cursor.next();
                log::trace!("{} parsed identifier '{}'", tok.pos, tok.value);
                Some(Expr::Identifier { name: tok.value, pos: tok.pos })
            }
            TokenType::Number if !self.options.pure_only => {
                self.cursor.next();
                let n: u64 = tok.value.parse().unwrap_or(0);
                Some(Expr::TreeLiteral { tree: crate::tree::Tree::encode_number(n), pos: tok.pos })
            }
            TokenType::Number => {
                self.cursor.next();
                self.errors.push_custom(
                    tok.pos,
                    "Numeric literals are not permitted in pure-dialect programs",
                );
                None
            }
            TokenType::Operation if tok.value == "hd" || tok.value == "tl" => {
                self.cursor.next();
                let op = if tok.value == "hd" { Op::Hd } else { Op::Tl };
                let arg = self.parse_expr().map(Box::new);
                let complete = arg.as_deref().is_some_and(Self::operand_complete);
                Some(Expr::Operation { op, args: vec![arg], pos: tok.pos, complete })
            }
            TokenType::Operation if tok.value == "cons" => {
                self.cursor.next();
                let left = self.parse_expr().map(Box::new);
                let right = self.parse_expr().map(Box::new);
                let complete = left.as_deref().is_some_and(Self::operand_complete)
                    && right.as_deref().is_some_and(Self::operand_complete);
                Some(Expr::Operation { op: Op::Cons, args: vec![left, right], pos: tok.pos, complete })
            }
            TokenType::Symbol if tok.value == "(" => {
                self.cursor.next();
                let inner = self.parse_expr();
                match self.cursor.expect(&[TokenMatch::Lexeme(")")], &mut self.errors) {
                    ExpectOutcome::Ok(_) => {}
                    ExpectOutcome::Error | ExpectOutcome::Eoi => {
                        // Diagnosed by `expect`; the inner expression is still returned.
                    }
                }
                inner
            }
            _ => {
                self.errors.push(tok.pos, DiagnosticKind::Custom(
                    "Expected an expression or an identifier".to_string(),
                ));
                None
            }
        }
    }

    /// The operation-complete predicate of spec §4.2: an argument is "complete
    /// enough" if it is an identifier/tree literal, or is itself a complete
    /// operation/equality.
    fn operand_complete(expr: &Expr) -> bool {
        match expr {
            Expr::Identifier { .. } | Expr::TreeLiteral { .. } => true,
            Expr::Operation { complete, .. } | Expr::Equal { complete, .. } => *complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::parser::options::ParserOptions;
    use crate::token::{Position, Token};

    fn ident(name: &str, row: usize, col: usize) -> Token {
        Token::new(TokenType::Identifier, name, Position::new(row, col))
    }

    fn op(name: &str, row: usize, col: usize) -> Token {
        Token::new(TokenType::Operation, name, Position::new(row, col))
    }

    fn sym(name: &str, row: usize, col: usize) -> Token {
        Token::new(TokenType::Symbol, name, Position::new(row, col))
    }

    #[test]
    fn bare_identifier_is_complete() {
        let mut p = Parser::new(vec![ident("X", 0, 0)], ParserOptions::default());
        let e = p.parse_expr().unwrap();
        assert!(e.is_complete());
        assert!(p.errors.is_empty());
    }

    #[test]
    fn cons_of_two_identifiers_is_complete() {
        let mut p = Parser::new(
            vec![op("cons", 0, 0), ident("X", 0, 4), ident("Y", 0, 6)],
            ParserOptions::default(),
        );
        let e = p.parse_expr().unwrap();
        assert!(e.is_complete());
    }

    #[test]
    fn hd_with_missing_argument_is_incomplete() {
        let mut p = Parser::new(vec![op("hd", 0, 0)], ParserOptions::default());
        let e = p.parse_expr().unwrap();
        assert!(!e.is_complete());
        assert_eq!(p.errors.len(), 1);
    }

    #[test]
    fn missing_closing_paren_still_returns_inner_expr() {
        let mut p = Parser::new(
            vec![sym("(", 0, 0), ident("X", 0, 1)],
            ParserOptions::default(),
        );
        let e = p.parse_expr().unwrap();
        assert!(matches!(e, Expr::Identifier { .. }));
        assert_eq!(p.errors.len(), 1);
    }

    #[test]
    fn pure_only_rejects_numeric_literals() {
        let mut p = Parser::new(
            vec![Token::new(TokenType::Number, "3", Position::new(0, 0))],
            ParserOptions::pure(),
        );
        let e = p.parse_expr();
        assert!(e.is_none());
        assert_eq!(p.errors.len(), 1);
    }
}

//! Statement parser + statement-list recovery (spec §4.3).
//!
//! Dispatch is on the leading token: `if`, `while`, an identifier (assignment),
//! or (extended dialect) `switch`. Any other leading token is diagnosed and
//! the outer list drains to the next `;` or block terminator.

use super::{ParseStatus, Parser};
use crate::ast::{Expr, Stmt, SwitchCase, SwitchDefault};
use crate::cursor::{ExpectOutcome, TokenMatch};
use crate::error::DiagnosticKind;
use crate::token::TokenType;

fn expr_complete(expr: &Option<Expr>) -> bool {
    expr.as_ref().is_some_and(Expr::is_complete)
}

impl Parser {
    /// Parses a statement list up to (not including) any token in
    /// `terminators`, applying the per-statement recovery window of spec
    /// §4.3 between entries.
    pub(super) fn parse_stmt_list(&mut self, terminators: &[TokenMatch<'_>]) -> (ParseStatus, Vec<Stmt>) {
        let mut stmts = Vec::new();
        loop {
            if self.cursor.is_at_end() {
                return (ParseStatus::Eoi, stmts);
            }
            if let Some(tok) = self.cursor.peek() {
                if terminators.iter().any(|m| match m {
                    TokenMatch::Lexeme(l) => tok.value == *l,
                    TokenMatch::Type(t) => tok.token_type == *t,
                }) {
                    return (ParseStatus::Ok, stmts);
                }
            }

            let (status, stmt) = self.parse_stmt();
            if let Some(s) = stmt {
                stmts.push(s);
            }

            match status {
                ParseStatus::Eoi => return (ParseStatus::Eoi, stmts),
                ParseStatus::Error => {
                    let mut drain_set: Vec<TokenMatch<'_>> = terminators.to_vec();
                    drain_set.push(TokenMatch::Lexeme(";"));
                    self.cursor.consume_until(&drain_set);
                    if self.cursor.is_at_end() {
                        return (ParseStatus::Eoi, stmts);
                    }
                    if matches!(self.cursor.peek(), Some(tok) if tok.value == ";") {
                        self.cursor.next();
                    }
                }
                ParseStatus::Ok => {
                    // Trailing `;` after a well-formed statement is tolerated.
                    if matches!(self.cursor.peek(), Some(tok) if tok.value == ";") {
                        self.cursor.next();
                    }
                }
            }
        }
    }

    /// Parses a single statement. The cursor is guaranteed non-empty on
    /// entry (the list loop checks `is_at_end` first).
    fn parse_stmt(&mut self) -> (ParseStatus, Option<Stmt>) {
        let tok = self.cursor.peek().cloned().expect("checked non-empty by caller");
        match (tok.token_type, tok.value.as_str()) {
            (TokenType::Symbol, "if") => self.parse_if(),
            (TokenType::Symbol, "while") => self.parse_while(),
            (TokenType::Symbol, "switch") => self.parse_switch(),
            (TokenType::Identifier, _) => self.parse_assign(),
            _ => {
                self.errors.push(tok.pos, DiagnosticKind::Custom(
                    "Expected if while or an assignment statement".to_string(),
                ));
                (ParseStatus::Error, None)
            }
        }
    }

    fn parse_if(&mut self) -> (ParseStatus, Option<Stmt>) {
        let pos = self.cursor.peek().unwrap().pos;
        self.cursor.next();
        let condition = self.parse_expr();
        let (if_status, if_branch) = self.parse_block();

        let mut else_branch = Vec::new();
        let mut has_else = false;
        let mut status = if_status;
        if matches!(self.cursor.peek(), Some(tok) if tok.value == "else") {
            self.cursor.next();
            has_else = true;
            let (else_status, body) = self.parse_block();
            else_branch = body;
            status = match (if_status, else_status) {
                (ParseStatus::Eoi, _) | (_, ParseStatus::Eoi) => ParseStatus::Eoi,
                (ParseStatus::Ok, ParseStatus::Ok) => ParseStatus::Ok,
                _ => ParseStatus::Error,
            };
        }

        let complete = expr_complete(&condition)
            && if_status == ParseStatus::Ok
            && (!has_else || status == ParseStatus::Ok);

        log::trace!("{} parsed if statement (complete={})", pos, complete);
        (status, Some(Stmt::Cond {
            condition: condition.map(Box::new),
            if_branch,
            else_branch,
            pos,
            complete,
        }))
    }

    fn parse_while(&mut self) -> (ParseStatus, Option<Stmt>) {
        let pos = self.cursor.peek().unwrap().pos;
        self.cursor.next();
        let condition = self.parse_expr();
        let (status, body) = self.parse_block();
        let complete = expr_complete(&condition) && status == ParseStatus::Ok;
        (status, Some(Stmt::Loop { condition: condition.map(Box::new), body, pos, complete }))
    }

    fn parse_assign(&mut self) -> (ParseStatus, Option<Stmt>) {
        let ident_tok = self.cursor.next().expect("checked non-empty by caller");
        let pos = ident_tok.pos;
        let assign_status = match self.cursor.expect(&[TokenMatch::Lexeme(":=")], &mut self.errors) {
            ExpectOutcome::Ok(_) => ParseStatus::Ok,
            ExpectOutcome::Error => ParseStatus::Error,
            ExpectOutcome::Eoi => {
                return (ParseStatus::Eoi, Some(Stmt::Assign {
                    ident: ident_tok.value,
                    arg: None,
                    pos,
                    complete: false,
                }));
            }
        };
        let arg = self.parse_expr();
        let complete = assign_status == ParseStatus::Ok && expr_complete(&arg);
        (assign_status, Some(Stmt::Assign { ident: ident_tok.value, arg: arg.map(Box::new), pos, complete }))
    }

    fn parse_switch(&mut self) -> (ParseStatus, Option<Stmt>) {
        let pos = self.cursor.peek().unwrap().pos;
        self.cursor.next();
        if self.options.pure_only {
            self.errors.push_custom(pos, "Switch statements are not permitted in pure-dialect programs");
        }
        let condition = self.parse_expr();

        let open_status = match self.cursor.expect(&[TokenMatch::Lexeme("{")], &mut self.errors) {
            ExpectOutcome::Ok(_) => ParseStatus::Ok,
            ExpectOutcome::Error => ParseStatus::Error,
            ExpectOutcome::Eoi => ParseStatus::Eoi,
        };
        if open_status == ParseStatus::Eoi {
            return (ParseStatus::Eoi, Some(Stmt::Switch {
                condition: condition.map(Box::new),
                cases: Vec::new(),
                default: SwitchDefault { body: Vec::new(), complete: true },
                pos,
                complete: false,
            }));
        }

        let clause_terms = [TokenMatch::Lexeme("case"), TokenMatch::Lexeme("default"), TokenMatch::Lexeme("}")];
        let mut cases = Vec::new();
        let mut default: Option<SwitchDefault> = None;
        let mut status = open_status;

        loop {
            if self.cursor.is_at_end() {
                status = ParseStatus::Eoi;
                break;
            }
            let tok = self.cursor.peek().cloned().unwrap();
            if tok.value == "}" {
                break;
            }
            if tok.value == "case" {
                self.cursor.next();
                let cond = self.parse_expr();
                let colon_status = match self.cursor.expect(&[TokenMatch::Lexeme(":")], &mut self.errors) {
                    ExpectOutcome::Ok(_) => ParseStatus::Ok,
                    ExpectOutcome::Error => ParseStatus::Error,
                    ExpectOutcome::Eoi => ParseStatus::Eoi,
                };
                if colon_status == ParseStatus::Eoi {
                    status = ParseStatus::Eoi;
                    break;
                }
                let (body_status, body) = self.parse_stmt_list(&clause_terms);
                if default.is_some() {
                    self.errors.push_custom(tok.pos, "`case` clause follows the `default` clause");
                }
                let complete = expr_complete(&cond) && colon_status == ParseStatus::Ok && body_status == ParseStatus::Ok;
                cases.push(SwitchCase { cond: cond.map(Box::new), body, complete });
                if body_status == ParseStatus::Eoi {
                    status = ParseStatus::Eoi;
                    break;
                }
                if body_status == ParseStatus::Error {
                    status = ParseStatus::Error;
                }
            } else if tok.value == "default" {
                self.cursor.next();
                if default.is_some() {
                    self.errors.push_custom(tok.pos, "Multiple `default` clauses; keeping the last one");
                }
                let colon_status = match self.cursor.expect(&[TokenMatch::Lexeme(":")], &mut self.errors) {
                    ExpectOutcome::Ok(_) => ParseStatus::Ok,
                    ExpectOutcome::Error => ParseStatus::Error,
                    ExpectOutcome::Eoi => ParseStatus::Eoi,
                };
                if colon_status == ParseStatus::Eoi {
                    status = ParseStatus::Eoi;
                    break;
                }
                let (body_status, body) = self.parse_stmt_list(&clause_terms);
                let complete = colon_status == ParseStatus::Ok && body_status == ParseStatus::Ok;
                default = Some(SwitchDefault { body, complete });
                if body_status == ParseStatus::Eoi {
                    status = ParseStatus::Eoi;
                    break;
                }
                if body_status == ParseStatus::Error {
                    status = ParseStatus::Error;
                }
            } else {
                self.errors.push_custom(tok.pos, "Expected `case` or `default` inside switch");
                self.cursor.consume_until(&clause_terms);
                status = ParseStatus::Error;
            }
        }

        let close_status = if status == ParseStatus::Eoi {
            ParseStatus::Eoi
        } else {
            match self.cursor.expect(&[TokenMatch::Lexeme("}")], &mut self.errors) {
                ExpectOutcome::Ok(_) => status,
                ExpectOutcome::Error => ParseStatus::Error,
                ExpectOutcome::Eoi => ParseStatus::Eoi,
            }
        };

        let default = default.unwrap_or(SwitchDefault { body: Vec::new(), complete: true });
        let complete = expr_complete(&condition)
            && close_status == ParseStatus::Ok
            && cases.iter().all(|c| c.complete)
            && default.complete;

        (close_status, Some(Stmt::Switch { condition: condition.map(Box::new), cases, default, pos, complete }))
    }
}

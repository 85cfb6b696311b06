//! `to_pad`/`from_pad` (spec §4.7): programs translate to and from a small
//! self-describing value type built only from integers, symbols, and lists.

use std::collections::HashMap;

use thiserror::Error;

use crate::ast::{Expr, ExprSlot, Op, Program, Stmt};
use crate::token::Position;
use crate::tree::Tree;

/// The PAD value type: a canonical list encoding with no notion of source
/// position. `Sym` covers both keyword/operator tokens (`:=`, `if`, `hd`, …)
/// and the reserved literal `nil`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pad {
    Int(u64),
    Sym(String),
    List(Vec<Pad>),
}

impl Pad {
    fn list(items: Vec<Pad>) -> Pad {
        Pad::List(items)
    }

    fn sym(s: &str) -> Pad {
        Pad::Sym(s.to_string())
    }
}

/// A program can fail to encode when its AST contains a node the PAD
/// grammar of spec §4.7 has no shape for: `switch` is desugared by
/// downstream tools before reaching PAD (GLOSSARY "extended dialect"), and
/// `equal` is a reserved-but-unparsed variant (spec §9 Open Question (a)).
/// Spec §6 describes `to_pad` as total; returning `Result` here is a
/// deliberate deviation recorded in DESIGN.md.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PadEncodeError {
    #[error("cannot encode a switch statement into PAD form; switch is desugared before PAD encoding")]
    UnsupportedSwitch,
    #[error("cannot encode an `equal` expression into PAD form; it is never produced by the parser")]
    UnsupportedEqual,
    #[error("cannot encode an incomplete AST node into PAD form")]
    IncompleteNode,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PadDecodeError {
    #[error("malformed PAD input: {0}")]
    Malformed(String),
}

/// Assigns every identifier in a program a unique index in first-occurrence
/// order, with the input variable pinned to index 0 (spec §3 invariant (d),
/// §9 "Variable indexing for PAD").
struct IdentIndex {
    order: Vec<String>,
    indices: HashMap<String, u64>,
}

impl IdentIndex {
    fn new(input: &str) -> Self {
        let mut indices = HashMap::new();
        indices.insert(input.to_string(), 0);
        Self { order: vec![input.to_string()], indices }
    }

    fn index_of(&mut self, name: &str) -> u64 {
        if let Some(idx) = self.indices.get(name) {
            return *idx;
        }
        let idx = self.order.len() as u64;
        self.order.push(name.to_string());
        self.indices.insert(name.to_string(), idx);
        idx
    }

    fn walk_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.walk_stmt(stmt);
        }
    }

    fn walk_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { ident, arg, .. } => {
                self.index_of(ident);
                self.walk_expr_slot(arg);
            }
            Stmt::Cond { condition, if_branch, else_branch, .. } => {
                self.walk_expr_slot(condition);
                self.walk_stmts(if_branch);
                self.walk_stmts(else_branch);
            }
            Stmt::Loop { condition, body, .. } => {
                self.walk_expr_slot(condition);
                self.walk_stmts(body);
            }
            Stmt::Switch { condition, cases, default, .. } => {
                self.walk_expr_slot(condition);
                for case in cases {
                    self.walk_expr_slot(&case.cond);
                    self.walk_stmts(&case.body);
                }
                self.walk_stmts(&default.body);
            }
        }
    }

    fn walk_expr_slot(&mut self, slot: &ExprSlot) {
        if let Some(expr) = slot.as_deref() {
            self.walk_expr(expr);
        }
    }

    fn walk_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier { name, .. } => {
                if name != "nil" {
                    self.index_of(name);
                }
            }
            Expr::TreeLiteral { .. } => {}
            Expr::Operation { args, .. } => {
                for arg in args {
                    self.walk_expr_slot(arg);
                }
            }
            Expr::Equal { left, right, .. } => {
                self.walk_expr_slot(left);
                self.walk_expr_slot(right);
            }
        }
    }
}

/// Encodes `program` as its canonical PAD form (spec §4.7 "Encoding").
pub fn to_pad(program: &Program) -> Result<Pad, PadEncodeError> {
    let input = program.input.as_deref().ok_or(PadEncodeError::IncompleteNode)?;
    let output = program.output.as_deref().ok_or(PadEncodeError::IncompleteNode)?;

    let mut index = IdentIndex::new(input);
    index.walk_stmts(&program.body);
    let input_index = index.index_of(input);
    let output_index = index.index_of(output);

    let body = program
        .body
        .iter()
        .map(|stmt| encode_stmt(stmt, &mut index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Pad::list(vec![Pad::Int(input_index), Pad::list(body), Pad::Int(output_index)]))
}

fn encode_stmt(stmt: &Stmt, index: &mut IdentIndex) -> Result<Pad, PadEncodeError> {
    match stmt {
        Stmt::Assign { ident, arg, .. } => {
            let arg = arg.as_deref().ok_or(PadEncodeError::IncompleteNode)?;
            Ok(Pad::list(vec![Pad::sym(":="), Pad::Int(index.index_of(ident)), encode_expr(arg, index)?]))
        }
        Stmt::Cond { condition, if_branch, else_branch, .. } => {
            let condition = condition.as_deref().ok_or(PadEncodeError::IncompleteNode)?;
            let then = if_branch.iter().map(|s| encode_stmt(s, index)).collect::<Result<Vec<_>, _>>()?;
            let otherwise =
                else_branch.iter().map(|s| encode_stmt(s, index)).collect::<Result<Vec<_>, _>>()?;
            Ok(Pad::list(vec![
                Pad::sym("if"),
                encode_expr(condition, index)?,
                Pad::list(then),
                Pad::list(otherwise),
            ]))
        }
        Stmt::Loop { condition, body, .. } => {
            let condition = condition.as_deref().ok_or(PadEncodeError::IncompleteNode)?;
            let body = body.iter().map(|s| encode_stmt(s, index)).collect::<Result<Vec<_>, _>>()?;
            Ok(Pad::list(vec![Pad::sym("while"), encode_expr(condition, index)?, Pad::list(body)]))
        }
        Stmt::Switch { .. } => Err(PadEncodeError::UnsupportedSwitch),
    }
}

fn encode_expr(expr: &Expr, index: &mut IdentIndex) -> Result<Pad, PadEncodeError> {
    match expr {
        Expr::Identifier { name, .. } if name == "nil" => {
            Ok(Pad::list(vec![Pad::sym("quote"), Pad::sym("nil")]))
        }
        Expr::Identifier { name, .. } => Ok(Pad::list(vec![Pad::sym("var"), Pad::Int(index.index_of(name))])),
        Expr::TreeLiteral { tree, .. } => Ok(encode_tree(tree)),
        Expr::Operation { op, args, .. } => {
            let mut encoded = Vec::with_capacity(args.len());
            for arg in args {
                let arg = arg.as_deref().ok_or(PadEncodeError::IncompleteNode)?;
                encoded.push(encode_expr(arg, index)?);
            }
            let tag = match op {
                Op::Hd => "hd",
                Op::Tl => "tl",
                Op::Cons => "cons",
            };
            let mut items = vec![Pad::sym(tag)];
            items.extend(encoded);
            Ok(Pad::list(items))
        }
        Expr::Equal { .. } => Err(PadEncodeError::UnsupportedEqual),
    }
}

/// Trees (including the Church-like numeric literals of spec §3) encode as
/// nested `quote`/`cons` forms; a numeric literal `n` is the special case
/// where every left child is `nil`.
fn encode_tree(tree: &Tree) -> Pad {
    match tree {
        Tree::Nil => Pad::list(vec![Pad::sym("quote"), Pad::sym("nil")]),
        Tree::Pair(left, right) => {
            Pad::list(vec![Pad::sym("cons"), encode_tree(left), encode_tree(right)])
        }
    }
}

/// Column-style synthesis of spec §9 "Variable indexing for PAD": `0 ↦ A`,
/// `25 ↦ Z`, `26 ↦ AA`, …
fn synth_name(mut index: u64) -> String {
    let mut letters = Vec::new();
    loop {
        let rem = (index % 26) as u8;
        letters.push((b'A' + rem) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Decodes a PAD value back into a program AST (spec §4.7 "Decoding").
/// Identifier indices become synthesized names; the decoded AST is always
/// `complete` since the PAD grammar has no notion of a missing slot.
pub fn from_pad(pad: &Pad) -> Result<Program, PadDecodeError> {
    let items = expect_list(pad)?;
    let [input_pad, body_pad, output_pad] = items.as_slice() else {
        return Err(PadDecodeError::Malformed("program frame must have exactly three elements".into()));
    };
    let input_index = expect_int(input_pad)?;
    let output_index = expect_int(output_pad)?;
    let body_items = expect_list(body_pad)?;
    let body = body_items.iter().map(decode_stmt).collect::<Result<Vec<_>, _>>()?;

    Ok(Program {
        name: Some("decoded".to_string()),
        input: Some(synth_name(input_index)),
        output: Some(synth_name(output_index)),
        body,
        complete: true,
    })
}

fn decode_stmt(pad: &Pad) -> Result<Stmt, PadDecodeError> {
    let items = expect_list(pad)?;
    let head = items.first().and_then(pad_sym).ok_or_else(|| {
        PadDecodeError::Malformed("expected a command tag as the first list element".into())
    })?;
    match (head, items.as_slice()) {
        (":=", [_, idx_pad, expr_pad]) => {
            let ident = synth_name(expect_int(idx_pad)?);
            let arg = decode_expr(expr_pad)?;
            Ok(Stmt::Assign { ident, arg: Some(Box::new(arg)), pos: Position::default(), complete: true })
        }
        ("if", [_, cond_pad, then_pad, else_pad]) => {
            let condition = decode_expr(cond_pad)?;
            let if_branch = expect_list(then_pad)?.iter().map(decode_stmt).collect::<Result<Vec<_>, _>>()?;
            let else_branch =
                expect_list(else_pad)?.iter().map(decode_stmt).collect::<Result<Vec<_>, _>>()?;
            Ok(Stmt::Cond {
                condition: Some(Box::new(condition)),
                if_branch,
                else_branch,
                pos: Position::default(),
                complete: true,
            })
        }
        ("while", [_, cond_pad, body_pad]) => {
            let condition = decode_expr(cond_pad)?;
            let body = expect_list(body_pad)?.iter().map(decode_stmt).collect::<Result<Vec<_>, _>>()?;
            Ok(Stmt::Loop {
                condition: Some(Box::new(condition)),
                body,
                pos: Position::default(),
                complete: true,
            })
        }
        (other, _) => Err(PadDecodeError::Malformed(format!("unrecognized command tag `{other}`"))),
    }
}

fn decode_expr(pad: &Pad) -> Result<Expr, PadDecodeError> {
    let items = expect_list(pad)?;
    let head = items
        .first()
        .and_then(pad_sym)
        .ok_or_else(|| PadDecodeError::Malformed("expected an expression tag as the first list element".into()))?;
    match (head, items.as_slice()) {
        ("var", [_, idx_pad]) => {
            Ok(Expr::Identifier { name: synth_name(expect_int(idx_pad)?), pos: Position::default() })
        }
        ("quote", [_, Pad::Sym(s)]) if s == "nil" => {
            Ok(Expr::TreeLiteral { tree: Tree::Nil, pos: Position::default() })
        }
        ("hd", [_, a]) => Ok(Expr::Operation {
            op: Op::Hd,
            args: vec![Some(Box::new(decode_expr(a)?))],
            pos: Position::default(),
            complete: true,
        }),
        ("tl", [_, a]) => Ok(Expr::Operation {
            op: Op::Tl,
            args: vec![Some(Box::new(decode_expr(a)?))],
            pos: Position::default(),
            complete: true,
        }),
        ("cons", [_, l, r]) => Ok(Expr::Operation {
            op: Op::Cons,
            args: vec![Some(Box::new(decode_expr(l)?)), Some(Box::new(decode_expr(r)?))],
            pos: Position::default(),
            complete: true,
        }),
        (other, _) => Err(PadDecodeError::Malformed(format!("unrecognized expression tag `{other}`"))),
    }
}

fn expect_list(pad: &Pad) -> Result<&[Pad], PadDecodeError> {
    match pad {
        Pad::List(items) => Ok(items),
        other => Err(PadDecodeError::Malformed(format!("expected a list, found {other:?}"))),
    }
}

fn expect_int(pad: &Pad) -> Result<u64, PadDecodeError> {
    match pad {
        Pad::Int(n) => Ok(*n),
        other => Err(PadDecodeError::Malformed(format!("expected an integer, found {other:?}"))),
    }
}

fn pad_sym(pad: &Pad) -> Option<&str> {
    match pad {
        Pad::Sym(s) => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Box<Expr> {
        Box::new(Expr::Identifier { name: name.to_string(), pos: Position::default() })
    }

    #[test]
    fn scenario_one_encodes_assignment_program() {
        // prog read X { Y := X } write Y
        let program = Program {
            name: Some("prog".to_string()),
            input: Some("X".to_string()),
            output: Some("Y".to_string()),
            body: vec![Stmt::Assign {
                ident: "Y".to_string(),
                arg: Some(ident("X")),
                pos: Position::default(),
                complete: true,
            }],
            complete: true,
        };
        let pad = to_pad(&program).unwrap();
        let expected = Pad::list(vec![
            Pad::Int(0),
            Pad::list(vec![Pad::list(vec![Pad::sym(":="), Pad::Int(1), Pad::list(vec![Pad::sym("var"), Pad::Int(0)])])]),
            Pad::Int(1),
        ]);
        assert_eq!(pad, expected);
    }

    #[test]
    fn switch_statements_cannot_be_encoded() {
        use crate::ast::SwitchDefault;
        let program = Program {
            name: Some("p".to_string()),
            input: Some("X".to_string()),
            output: Some("X".to_string()),
            body: vec![Stmt::Switch {
                condition: Some(ident("X")),
                cases: Vec::new(),
                default: SwitchDefault { body: Vec::new(), complete: true },
                pos: Position::default(),
                complete: true,
            }],
            complete: true,
        };
        assert_eq!(to_pad(&program), Err(PadEncodeError::UnsupportedSwitch));
    }

    #[test]
    fn round_trip_preserves_structure_up_to_renaming() {
        let program = Program {
            name: Some("prog".to_string()),
            input: Some("X".to_string()),
            output: Some("Y".to_string()),
            body: vec![Stmt::Assign {
                ident: "Y".to_string(),
                arg: Some(ident("X")),
                pos: Position::default(),
                complete: true,
            }],
            complete: true,
        };
        let pad = to_pad(&program).unwrap();
        let decoded = from_pad(&pad).unwrap();
        assert_eq!(decoded.input.as_deref(), Some("A"));
        assert_eq!(decoded.output.as_deref(), Some("B"));
        assert_eq!(decoded.body.len(), 1);
        assert_eq!(to_pad(&decoded).unwrap(), pad);
    }

    #[test]
    fn synth_name_follows_spreadsheet_style_numbering() {
        assert_eq!(synth_name(0), "A");
        assert_eq!(synth_name(25), "Z");
        assert_eq!(synth_name(26), "AA");
        assert_eq!(synth_name(27), "AB");
    }

    #[test]
    fn decode_rejects_malformed_program_frame() {
        let pad = Pad::list(vec![Pad::Int(0)]);
        assert!(from_pad(&pad).is_err());
    }
}

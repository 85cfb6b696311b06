//! The AST model (spec §3 "AST"). Nodes are created by the parser and never
//! mutated afterward (spec §3 "Lifecycle").

use crate::token::Position;
use crate::tree::Tree;

/// An operator admitted by [`Expr::Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Hd,
    Tl,
    Cons,
}

impl Op {
    pub fn arity(self) -> usize {
        match self {
            Op::Hd | Op::Tl => 1,
            Op::Cons => 2,
        }
    }

    pub fn lexeme(self) -> &'static str {
        match self {
            Op::Hd => "hd",
            Op::Tl => "tl",
            Op::Cons => "cons",
        }
    }
}

/// A child expression slot, possibly `missing` after error recovery (spec §9
/// "Partial-AST pattern": `missing` is modeled as an explicit `None`-like
/// variant of the child slot).
pub type ExprSlot = Option<Box<Expr>>;

/// Expression nodes. `complete` is stored at construction time (spec §9 notes
/// it MAY be recomputed lazily instead; storing is the simpler equally valid
/// choice — see DESIGN.md).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier { name: String, pos: Position },
    /// Only produced in the extended dialect, via the numeric-literal Church
    /// encoding of spec §3.
    TreeLiteral { tree: Tree, pos: Position },
    Operation { op: Op, args: Vec<ExprSlot>, pos: Position, complete: bool },
    /// Reserved for an equality expression the AST type admits but the parser
    /// never emits (spec §9 Open Question (a)).
    Equal { left: ExprSlot, right: ExprSlot, pos: Position, complete: bool },
}

impl Expr {
    pub fn pos(&self) -> Position {
        match self {
            Expr::Identifier { pos, .. }
            | Expr::TreeLiteral { pos, .. }
            | Expr::Operation { pos, .. }
            | Expr::Equal { pos, .. } => *pos,
        }
    }

    /// Identifiers and tree literals are always complete; operations and
    /// equalities carry their own stored flag (spec §4.2 "operation-complete
    /// predicate").
    pub fn is_complete(&self) -> bool {
        match self {
            Expr::Identifier { .. } | Expr::TreeLiteral { .. } => true,
            Expr::Operation { complete, .. } | Expr::Equal { complete, .. } => *complete,
        }
    }
}

/// A child command slot, possibly `missing`.
pub type StmtSlot = Option<Box<Stmt>>;

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub cond: ExprSlot,
    pub body: Vec<Stmt>,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchDefault {
    pub body: Vec<Stmt>,
    pub complete: bool,
}

/// Command nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign { ident: String, arg: ExprSlot, pos: Position, complete: bool },
    Cond {
        condition: ExprSlot,
        if_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
        pos: Position,
        complete: bool,
    },
    Loop { condition: ExprSlot, body: Vec<Stmt>, pos: Position, complete: bool },
    /// Extended dialect only.
    Switch {
        condition: ExprSlot,
        cases: Vec<SwitchCase>,
        default: SwitchDefault,
        pos: Position,
        complete: bool,
    },
}

impl Stmt {
    pub fn pos(&self) -> Position {
        match self {
            Stmt::Assign { pos, .. }
            | Stmt::Cond { pos, .. }
            | Stmt::Loop { pos, .. }
            | Stmt::Switch { pos, .. } => *pos,
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Stmt::Assign { complete, .. }
            | Stmt::Cond { complete, .. }
            | Stmt::Loop { complete, .. }
            | Stmt::Switch { complete, .. } => *complete,
        }
    }
}

/// The top-level `<name> read <in> { … } write <out>` frame (spec §4.5).
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub body: Vec<Stmt>,
    pub complete: bool,
}

impl Program {
    /// Invariant (a) of spec §3: complete iff every expression/command in the
    /// transitive extent is complete and no slot is missing. This recomputes
    /// from the stored per-node flags plus presence of the frame fields
    /// themselves, matching the program-level completeness rule of spec §4.5.
    pub fn recompute_complete(&self) -> bool {
        self.name.is_some()
            && self.input.is_some()
            && self.output.is_some()
            && self.body.iter().all(Stmt::is_complete)
    }
}

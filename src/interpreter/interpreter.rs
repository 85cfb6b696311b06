//! Tree-walking interpreter (spec §4.6): an explicit-stack evaluator over the
//! AST. Both the command execution and the expression evaluation use a
//! heap-allocated LIFO of frames rather than host recursion, so a WHILE
//! program that loops or builds trees to unbounded depth cannot overflow the
//! interpreter's own call stack (spec §9 "Heap-allocated evaluation stack").

use thiserror::Error;

use crate::ast::{Expr, ExprSlot, Op, Program, Stmt};
use crate::tree::Tree;

use super::store::Store;

/// Structural interpreter failures (spec §7): these indicate a caller
/// contract violation (a malformed AST should not occur when the AST comes
/// from this crate's own parser), never a user program bug. `hd`/`tl` of
/// `nil` are defined as `nil` and are never errors.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InterpreterError {
    #[error("malformed AST: {0}")]
    MalformedAst(String),
    #[error("interpreter exceeded the configured step limit")]
    StepLimitExceeded,
}

/// Reserved for future use (spec §6); `max_steps` is the concrete realization
/// of the bounded-cancellation hook spec §5 describes without naming
/// (see DESIGN.md).
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpreterOptions {
    pub max_steps: Option<u64>,
}

enum CmdFrame<'p> {
    Block { remaining: &'p [Stmt] },
    Assign { ident: &'p str, arg: &'p Expr },
    Cond { condition: &'p Expr, if_branch: &'p [Stmt], else_branch: &'p [Stmt] },
    Loop { condition: &'p Expr, body: &'p [Stmt] },
}

/// Executes `program` against `input`, returning the output variable's final
/// binding (`nil` if it was never assigned) (spec §4.6, §6 "Interpreter entry
/// point").
pub fn interpret(
    program: &Program,
    input: Tree,
    options: InterpreterOptions,
) -> Result<Tree, InterpreterError> {
    let input_name = program
        .input
        .as_deref()
        .ok_or_else(|| InterpreterError::MalformedAst("program has no input variable".into()))?;
    let output_name = program
        .output
        .as_deref()
        .ok_or_else(|| InterpreterError::MalformedAst("program has no output variable".into()))?;

    let mut store = Store::new(input_name, input);
    let mut stack: Vec<CmdFrame> = vec![CmdFrame::Block { remaining: &program.body }];
    let mut steps: u64 = 0;

    while let Some(frame) = stack.pop() {
        steps += 1;
        if let Some(max) = options.max_steps {
            if steps > max {
                return Err(InterpreterError::StepLimitExceeded);
            }
        }

        match frame {
            CmdFrame::Block { remaining } => {
                if let Some((head, rest)) = remaining.split_first() {
                    if !rest.is_empty() {
                        stack.push(CmdFrame::Block { remaining: rest });
                    }
                    push_stmt_frame(&mut stack, head)?;
                }
            }
            CmdFrame::Assign { ident, arg } => {
                let value = eval_expr(arg, &store)?;
                store.set(ident, value);
            }
            CmdFrame::Cond { condition, if_branch, else_branch } => {
                let value = eval_expr(condition, &store)?;
                let branch = if !value.is_nil() { if_branch } else { else_branch };
                if !branch.is_empty() {
                    stack.push(CmdFrame::Block { remaining: branch });
                }
            }
            CmdFrame::Loop { condition, body } => {
                let value = eval_expr(condition, &store)?;
                if !value.is_nil() {
                    stack.push(CmdFrame::Loop { condition, body });
                    if !body.is_empty() {
                        stack.push(CmdFrame::Block { remaining: body });
                    }
                }
            }
        }
    }

    Ok(store.get(output_name))
}

fn push_stmt_frame<'p>(stack: &mut Vec<CmdFrame<'p>>, stmt: &'p Stmt) -> Result<(), InterpreterError> {
    match stmt {
        Stmt::Assign { ident, arg, .. } => {
            let arg = require_expr(arg, "assignment missing its right-hand side")?;
            stack.push(CmdFrame::Assign { ident, arg });
        }
        Stmt::Cond { condition, if_branch, else_branch, .. } => {
            let condition = require_expr(condition, "`if` missing its condition")?;
            stack.push(CmdFrame::Cond { condition, if_branch, else_branch });
        }
        Stmt::Loop { condition, body, .. } => {
            let condition = require_expr(condition, "`while` missing its condition")?;
            stack.push(CmdFrame::Loop { condition, body });
        }
        Stmt::Switch { .. } => {
            return Err(InterpreterError::MalformedAst(
                "switch statements are desugared before interpretation and are not directly executable"
                    .into(),
            ));
        }
    }
    Ok(())
}

fn require_expr<'p>(slot: &'p ExprSlot, message: &str) -> Result<&'p Expr, InterpreterError> {
    slot.as_deref().ok_or_else(|| InterpreterError::MalformedAst(message.to_string()))
}

/// One task of the expression evaluator's explicit work stack: either visit
/// an AST subtree, or apply an already-visited operation to the values its
/// children left on the value stack.
enum ExprTask<'e> {
    Visit(&'e Expr),
    Apply(Op),
}

fn eval_expr(expr: &Expr, store: &Store) -> Result<Tree, InterpreterError> {
    let mut work: Vec<ExprTask> = vec![ExprTask::Visit(expr)];
    let mut values: Vec<Tree> = Vec::new();

    while let Some(task) = work.pop() {
        match task {
            ExprTask::Visit(Expr::Identifier { name, .. }) => values.push(store.get(name)),
            ExprTask::Visit(Expr::TreeLiteral { tree, .. }) => values.push(tree.clone()),
            ExprTask::Visit(Expr::Operation { op, args, .. }) => {
                work.push(ExprTask::Apply(*op));
                for slot in args.iter().rev() {
                    let arg = require_expr(slot, "operation missing an argument")?;
                    work.push(ExprTask::Visit(arg));
                }
            }
            ExprTask::Visit(Expr::Equal { .. }) => {
                return Err(InterpreterError::MalformedAst(
                    "`equal` expressions are never emitted by the parser and are not executable".into(),
                ));
            }
            ExprTask::Apply(op) => {
                let pop = |values: &mut Vec<Tree>| {
                    values.pop().ok_or_else(|| {
                        InterpreterError::MalformedAst("operation applied to too few arguments".into())
                    })
                };
                match op {
                    Op::Hd => {
                        let a = pop(&mut values)?;
                        values.push(a.hd());
                    }
                    Op::Tl => {
                        let a = pop(&mut values)?;
                        values.push(a.tl());
                    }
                    Op::Cons => {
                        let r = pop(&mut values)?;
                        let l = pop(&mut values)?;
                        values.push(Tree::cons(l, r));
                    }
                }
            }
        }
    }

    values
        .pop()
        .ok_or_else(|| InterpreterError::MalformedAst("expression evaluated to no value".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Position;

    fn ident_expr(name: &str) -> Box<Expr> {
        Box::new(Expr::Identifier { name: name.to_string(), pos: Position::default() })
    }

    fn program(input: &str, output: &str, body: Vec<Stmt>) -> Program {
        Program {
            name: Some("p".to_string()),
            input: Some(input.to_string()),
            output: Some(output.to_string()),
            body,
            complete: true,
        }
    }

    #[test]
    fn identity_program_returns_input_unchanged() {
        let prog = program("X", "X", Vec::new());
        assert_eq!(interpret(&prog, Tree::Nil, InterpreterOptions::default()).unwrap(), Tree::Nil);
        let pair = Tree::cons(Tree::Nil, Tree::Nil);
        assert_eq!(
            interpret(&prog, pair.clone(), InterpreterOptions::default()).unwrap(),
            pair
        );
    }

    #[test]
    fn assignment_copies_input_to_output() {
        let body = vec![Stmt::Assign {
            ident: "Y".to_string(),
            arg: Some(ident_expr("X")),
            pos: Position::default(),
            complete: true,
        }];
        let prog = program("X", "Y", body);
        let input = Tree::cons(Tree::Nil, Tree::Nil);
        assert_eq!(interpret(&prog, input.clone(), InterpreterOptions::default()).unwrap(), input);
    }

    #[test]
    fn unset_output_variable_defaults_to_nil() {
        let prog = program("X", "Y", Vec::new());
        assert_eq!(interpret(&prog, Tree::Nil, InterpreterOptions::default()).unwrap(), Tree::Nil);
    }

    #[test]
    fn while_loop_builds_successor_chain() {
        // add read XY { X := hd XY; Y := tl XY; while X { Y := cons nil Y; X := tl X } } write Y
        let xy = ident_expr("XY");
        let body = vec![
            Stmt::Assign {
                ident: "X".to_string(),
                arg: Some(Box::new(Expr::Operation {
                    op: Op::Hd,
                    args: vec![Some(xy.clone())],
                    pos: Position::default(),
                    complete: true,
                })),
                pos: Position::default(),
                complete: true,
            },
            Stmt::Assign {
                ident: "Y".to_string(),
                arg: Some(Box::new(Expr::Operation {
                    op: Op::Tl,
                    args: vec![Some(xy)],
                    pos: Position::default(),
                    complete: true,
                })),
                pos: Position::default(),
                complete: true,
            },
            Stmt::Loop {
                condition: Some(ident_expr("X")),
                body: vec![
                    Stmt::Assign {
                        ident: "Y".to_string(),
                        arg: Some(Box::new(Expr::Operation {
                            op: Op::Cons,
                            args: vec![
                                Some(Box::new(Expr::Identifier {
                                    name: "nil".to_string(),
                                    pos: Position::default(),
                                })),
                                Some(ident_expr("Y")),
                            ],
                            pos: Position::default(),
                            complete: true,
                        })),
                        pos: Position::default(),
                        complete: true,
                    },
                    Stmt::Assign {
                        ident: "X".to_string(),
                        arg: Some(Box::new(Expr::Operation {
                            op: Op::Tl,
                            args: vec![Some(ident_expr("X"))],
                            pos: Position::default(),
                            complete: true,
                        })),
                        pos: Position::default(),
                        complete: true,
                    },
                ],
                pos: Position::default(),
                complete: true,
            },
        ];
        let prog = program("XY", "Y", body);
        let input = Tree::cons(Tree::encode_number(3), Tree::encode_number(2));
        let result = interpret(&prog, input, InterpreterOptions::default()).unwrap();
        assert_eq!(result, Tree::encode_number(5));
    }

    #[test]
    fn hd_tl_of_nil_are_nil_through_the_evaluator() {
        let body = vec![Stmt::Assign {
            ident: "Y".to_string(),
            arg: Some(Box::new(Expr::Operation {
                op: Op::Hd,
                args: vec![Some(ident_expr("X"))],
                pos: Position::default(),
                complete: true,
            })),
            pos: Position::default(),
            complete: true,
        }];
        let prog = program("X", "Y", body);
        assert_eq!(interpret(&prog, Tree::Nil, InterpreterOptions::default()).unwrap(), Tree::Nil);
    }

    #[test]
    fn step_limit_is_enforced() {
        let body = vec![Stmt::Loop {
            condition: Some(ident_expr("X")),
            body: Vec::new(),
            pos: Position::default(),
            complete: true,
        }];
        let prog = program("X", "X", body);
        let options = InterpreterOptions { max_steps: Some(10) };
        let err = interpret(&prog, Tree::encode_number(1), options).unwrap_err();
        assert_eq!(err, InterpreterError::StepLimitExceeded);
    }

    #[test]
    fn switch_node_is_a_malformed_ast_error() {
        use crate::ast::SwitchDefault;
        let body = vec![Stmt::Switch {
            condition: Some(ident_expr("X")),
            cases: Vec::new(),
            default: SwitchDefault { body: Vec::new(), complete: true },
            pos: Position::default(),
            complete: true,
        }];
        let prog = program("X", "X", body);
        assert!(matches!(
            interpret(&prog, Tree::Nil, InterpreterOptions::default()),
            Err(InterpreterError::MalformedAst(_))
        ));
    }
}

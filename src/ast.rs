use crate::diagnostic::Span;
use std::rc::Rc;

/// Operators taking two or more operands. `Add`, `Mul`, and `Eq` work on
/// integers; `And` and `Or` work on booleans and short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariadicOp {
    Add,
    Mul,
    Eq,
    And,
    Or,
}

/// Operators taking exactly two integer operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Sub,
    Div,
    Mod,
    Greater,
    Less,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Every syntactic form of the language. A program is an ordered sequence
/// of these, all evaluated against one shared global environment.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Bool(bool),
    Int(i64),
    Var(Rc<str>),
    PrintNum(Box<Expr>),
    PrintBool(Box<Expr>),
    Define {
        name: Rc<str>,
        value: Box<Expr>,
    },
    /// A closure literal. The body is reference-counted so every closure
    /// created from this node shares the program-owned AST.
    Fun {
        params: Vec<Rc<str>>,
        body: Rc<Expr>,
    },
    /// A closure body that opens with local `define`s before its result
    /// expression. Only ever appears as the body of a `Fun`.
    FunBody {
        defines: Vec<Expr>,
        result: Box<Expr>,
    },
    If {
        test: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Variadic {
        op: VariadicOp,
        operands: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

use std::fmt;
use std::rc::Rc;

use crate::ast::Expr;
use crate::interpreter::environment::Environment;

/// A runtime value. Integers and booleans are always disjoint kinds; there
/// is no implicit conversion between them anywhere in the evaluator.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Closure(Rc<Closure>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(left_int), Value::Integer(right_int)) => left_int == right_int,
            (Value::Boolean(left_bool), Value::Boolean(right_bool)) => left_bool == right_bool,
            (Value::Closure(left_fn), Value::Closure(right_fn)) => Rc::ptr_eq(left_fn, right_fn),
            _ => false,
        }
    }
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(numeric_value) = self {
            Some(*numeric_value)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(bool_value) = self {
            Some(*bool_value)
        } else {
            None
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Closure(_) => ValueKind::Closure,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(numeric_value) => write!(f, "{}", numeric_value),
            Value::Boolean(true) => write!(f, "#t"),
            Value::Boolean(false) => write!(f, "#f"),
            Value::Closure(_) => write!(f, "#<closure>"),
        }
    }
}

/// The kind of a value, used for type-mismatch reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Boolean,
    Closure,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "number"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Closure => write!(f, "function"),
        }
    }
}

/// A function value: parameter names, a shared body node, and the
/// environment that was active when the `fun` literal was evaluated. The
/// captured environment, not the call site's, is the parent of every
/// future call's local environment.
#[derive(Debug)]
pub struct Closure {
    pub params: Vec<Rc<str>>,
    pub body: Rc<Expr>,
    pub env: Rc<Environment>,
}

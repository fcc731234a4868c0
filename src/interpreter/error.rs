use crate::diagnostic::{Diagnostic, Label, Span};
use crate::value::ValueKind;

/// A runtime failure. `TypeMismatch` is the one class that announces itself
/// (the fixed `Type error!` line); every other variant stops the program
/// silently.
#[derive(Debug, Clone)]
pub enum InterpreterError {
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
        span: Span,
    },
    UndefinedVariable {
        name: String,
        span: Span,
    },
    Redefinition {
        name: String,
        span: Span,
    },
    ArityMismatch {
        expected: usize,
        found: usize,
        span: Span,
    },
    NotCallable {
        found: ValueKind,
        span: Span,
    },
    DivisionByZero {
        span: Span,
    },
}

impl InterpreterError {
    pub fn type_mismatch(expected: ValueKind, found: ValueKind, span: Span) -> Self {
        Self::TypeMismatch {
            expected,
            found,
            span,
        }
    }

    pub fn undefined_variable(name: impl Into<String>, span: Span) -> Self {
        Self::UndefinedVariable {
            name: name.into(),
            span,
        }
    }

    pub fn redefinition(name: impl Into<String>, span: Span) -> Self {
        Self::Redefinition {
            name: name.into(),
            span,
        }
    }

    /// True for operand-kind mismatches, the failure class that terminates
    /// the program with the fixed diagnostic and a success status.
    pub fn is_type_violation(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    pub fn span(&self) -> Span {
        match self {
            Self::TypeMismatch { span, .. } => *span,
            Self::UndefinedVariable { span, .. } => *span,
            Self::Redefinition { span, .. } => *span,
            Self::ArityMismatch { span, .. } => *span,
            Self::NotCallable { span, .. } => *span,
            Self::DivisionByZero { span } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::TypeMismatch {
                expected,
                found,
                span,
            } => Diagnostic::error(format!("expected a {}, found a {}", expected, found))
                .with_code("E0201")
                .with_label(Label::primary(*span, "wrong kind of operand")),
            Self::UndefinedVariable { name, span } => {
                Diagnostic::error(format!("undefined variable `{}`", name))
                    .with_code("E0202")
                    .with_label(Label::primary(*span, "not bound in any enclosing scope"))
            }
            Self::Redefinition { name, span } => {
                Diagnostic::error(format!("`{}` is already defined in this scope", name))
                    .with_code("E0203")
                    .with_label(Label::primary(*span, "second definition"))
            }
            Self::ArityMismatch {
                expected,
                found,
                span,
            } => Diagnostic::error(format!(
                "function takes {} argument(s) but {} were supplied",
                expected, found
            ))
            .with_code("E0204")
            .with_label(Label::primary(*span, "")),
            Self::NotCallable { found, span } => {
                Diagnostic::error(format!("cannot call a {}", found))
                    .with_code("E0205")
                    .with_label(Label::primary(*span, "not a function"))
            }
            Self::DivisionByZero { span } => Diagnostic::error("division by zero")
                .with_code("E0206")
                .with_label(Label::primary(*span, "divisor is zero")),
        }
    }
}

impl std::fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch {
                expected, found, ..
            } => write!(f, "Type mismatch: expected {}, found {}", expected, found),
            Self::UndefinedVariable { name, .. } => write!(f, "Undefined variable: {}", name),
            Self::Redefinition { name, .. } => write!(f, "Redefining variable: {}", name),
            Self::ArityMismatch {
                expected, found, ..
            } => write!(f, "Arity mismatch: expected {}, got {}", expected, found),
            Self::NotCallable { found, .. } => write!(f, "Not a function: {}", found),
            Self::DivisionByZero { .. } => write!(f, "Division by zero"),
        }
    }
}

impl std::error::Error for InterpreterError {}

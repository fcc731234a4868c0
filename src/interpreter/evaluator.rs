use crate::ast::{BinaryOp, Expr, ExprKind, VariadicOp};
use crate::diagnostic::Span;
use crate::value::{Closure, Value, ValueKind};
use super::environment::Environment;
use super::error::InterpreterError;
use super::parser::{ParseError, TokenParser};
use chumsky::Parser as _;
use std::io::Write;
use std::rc::Rc;

/// The two failure classes a caller can observe. Syntax errors abort before
/// any statement runs; runtime errors stop the program at the failing
/// statement, leaving earlier output in place.
#[derive(Debug)]
pub enum RunError {
    Syntax(ParseError),
    Runtime(InterpreterError),
}

/// Tree-walking evaluator. Type checks are always on; evaluation is eager
/// and depth-first except for `and`/`or` short-circuiting and `if` branch
/// selection, which skip the unchosen operands entirely.
pub struct Interpreter<'a> {
    global: Rc<Environment>,
    out: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self {
            global: Environment::global(),
            out,
        }
    }

    /// Evaluates each top-level form in order against the shared global
    /// environment, stopping at the first failure.
    pub fn run(&mut self, program: &[Expr]) -> Result<(), InterpreterError> {
        let global = Rc::clone(&self.global);
        for expr in program {
            self.eval(expr, &global)?;
        }
        Ok(())
    }

    fn eval(&mut self, expr: &Expr, env: &Rc<Environment>) -> Result<Value, InterpreterError> {
        match &expr.kind {
            ExprKind::Bool(value) => Ok(Value::Boolean(*value)),
            ExprKind::Int(value) => Ok(Value::Integer(*value)),

            ExprKind::Var(name) => env
                .lookup(name)
                .ok_or_else(|| InterpreterError::undefined_variable(name.to_string(), expr.span)),

            ExprKind::PrintNum(operand) => {
                let value = self.eval_integer(operand, env)?;
                writeln!(self.out, "{}", value).ok();
                Ok(Value::Integer(value))
            }

            ExprKind::PrintBool(operand) => {
                let value = self.eval_boolean(operand, env)?;
                writeln!(self.out, "{}", if value { "#t" } else { "#f" }).ok();
                Ok(Value::Boolean(value))
            }

            ExprKind::Define { name, value } => {
                let evaluated = self.eval(value, env)?;
                if !env.define(Rc::clone(name), evaluated.clone()) {
                    return Err(InterpreterError::redefinition(name.to_string(), expr.span));
                }
                Ok(evaluated)
            }

            ExprKind::Fun { params, body } => Ok(Value::Closure(Rc::new(Closure {
                params: params.clone(),
                body: Rc::clone(body),
                env: Rc::clone(env),
            }))),

            ExprKind::FunBody { defines, result } => {
                for define in defines {
                    self.eval(define, env)?;
                }
                self.eval(result, env)
            }

            ExprKind::If {
                test,
                then_branch,
                else_branch,
            } => {
                // Exactly one branch is evaluated; the other is skipped
                // even when it would itself fail.
                if self.eval_boolean(test, env)? {
                    self.eval(then_branch, env)
                } else {
                    self.eval(else_branch, env)
                }
            }

            ExprKind::Variadic { op, operands } => self.eval_variadic(*op, operands, env),

            ExprKind::Binary { op, left, right } => {
                self.eval_binary(*op, left, right, expr.span, env)
            }

            ExprKind::Not(operand) => {
                let value = self.eval_boolean(operand, env)?;
                Ok(Value::Boolean(!value))
            }

            ExprKind::Call { callee, args } => self.eval_call(callee, args, expr.span, env),
        }
    }

    fn eval_variadic(
        &mut self,
        op: VariadicOp,
        operands: &[Expr],
        env: &Rc<Environment>,
    ) -> Result<Value, InterpreterError> {
        match op {
            VariadicOp::Add => {
                let mut sum = 0i64;
                for operand in operands {
                    sum += self.eval_integer(operand, env)?;
                }
                Ok(Value::Integer(sum))
            }
            VariadicOp::Mul => {
                let mut product = 1i64;
                for operand in operands {
                    product *= self.eval_integer(operand, env)?;
                }
                Ok(Value::Integer(product))
            }
            VariadicOp::Eq => {
                // Every operand is evaluated before any kind check, then
                // all are compared against the first.
                let values = operands
                    .iter()
                    .map(|operand| self.eval(operand, env))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut ints = Vec::with_capacity(values.len());
                for (value, operand) in values.iter().zip(operands) {
                    ints.push(Self::expect_integer(value, operand.span)?);
                }
                Ok(Value::Boolean(ints.iter().all(|v| *v == ints[0])))
            }
            VariadicOp::And => {
                for operand in operands {
                    if !self.eval_boolean(operand, env)? {
                        return Ok(Value::Boolean(false));
                    }
                }
                Ok(Value::Boolean(true))
            }
            VariadicOp::Or => {
                for operand in operands {
                    if self.eval_boolean(operand, env)? {
                        return Ok(Value::Boolean(true));
                    }
                }
                Ok(Value::Boolean(false))
            }
        }
    }

    fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        span: Span,
        env: &Rc<Environment>,
    ) -> Result<Value, InterpreterError> {
        // Both operands are evaluated before either kind check.
        let left_value = self.eval(left, env)?;
        let right_value = self.eval(right, env)?;
        let lhs = Self::expect_integer(&left_value, left.span)?;
        let rhs = Self::expect_integer(&right_value, right.span)?;

        match op {
            BinaryOp::Sub => Ok(Value::Integer(lhs - rhs)),
            BinaryOp::Div => {
                if rhs == 0 {
                    return Err(InterpreterError::DivisionByZero { span });
                }
                Ok(Value::Integer(floor_div(lhs, rhs)))
            }
            BinaryOp::Mod => {
                if rhs == 0 {
                    return Err(InterpreterError::DivisionByZero { span });
                }
                Ok(Value::Integer(floor_mod(lhs, rhs)))
            }
            BinaryOp::Greater => Ok(Value::Boolean(lhs > rhs)),
            BinaryOp::Less => Ok(Value::Boolean(lhs < rhs)),
        }
    }

    fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        span: Span,
        env: &Rc<Environment>,
    ) -> Result<Value, InterpreterError> {
        // The callee is checked before any argument is evaluated.
        let callee_value = self.eval(callee, env)?;
        let closure = match callee_value {
            Value::Closure(closure) => closure,
            other => {
                return Err(InterpreterError::NotCallable {
                    found: other.kind(),
                    span: callee.span,
                });
            }
        };

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval(arg, env)?);
        }

        if arg_values.len() != closure.params.len() {
            return Err(InterpreterError::ArityMismatch {
                expected: closure.params.len(),
                found: arg_values.len(),
                span,
            });
        }

        // The call's scope hangs off the closure's captured environment,
        // not the caller's.
        let local = Environment::with_parent(Rc::clone(&closure.env));
        for (param, value) in closure.params.iter().zip(arg_values) {
            if !local.define(Rc::clone(param), value) {
                return Err(InterpreterError::redefinition(param.to_string(), span));
            }
        }

        self.eval(&closure.body, &local)
    }

    fn eval_integer(
        &mut self,
        expr: &Expr,
        env: &Rc<Environment>,
    ) -> Result<i64, InterpreterError> {
        let value = self.eval(expr, env)?;
        Self::expect_integer(&value, expr.span)
    }

    fn eval_boolean(
        &mut self,
        expr: &Expr,
        env: &Rc<Environment>,
    ) -> Result<bool, InterpreterError> {
        let value = self.eval(expr, env)?;
        Self::expect_boolean(&value, expr.span)
    }

    fn expect_integer(value: &Value, span: Span) -> Result<i64, InterpreterError> {
        value
            .as_integer()
            .ok_or_else(|| InterpreterError::type_mismatch(ValueKind::Integer, value.kind(), span))
    }

    fn expect_boolean(value: &Value, span: Span) -> Result<bool, InterpreterError> {
        value
            .as_boolean()
            .ok_or_else(|| InterpreterError::type_mismatch(ValueKind::Boolean, value.kind(), span))
    }
}

/// Integer quotient rounding toward negative infinity. `/` and `mod` share
/// this convention: the remainder carries the divisor's sign and
/// `floor_div(a, b) * b + floor_mod(a, b) == a` for every nonzero `b`.
fn floor_div(lhs: i64, rhs: i64) -> i64 {
    let quotient = lhs / rhs;
    if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
        quotient - 1
    } else {
        quotient
    }
}

fn floor_mod(lhs: i64, rhs: i64) -> i64 {
    let remainder = lhs % rhs;
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        remainder + rhs
    } else {
        remainder
    }
}

/// Lexes and parses a complete source text. Returns the ordered program or
/// the syntax error that aborted it; no partial tree survives an error.
pub fn parse_program(source: &str) -> Result<Vec<Expr>, ParseError> {
    let tokens = match crate::lexer::lexer().parse(source).into_output() {
        Some(tokens) => tokens,
        None => return Err(ParseError::new("malformed input", Span::dummy())),
    };
    TokenParser::from_lexer_output(tokens, source.len()).parse_program()
}

/// Runs a complete source text against a fresh global environment, writing
/// print output to `out`. A type violation additionally writes the fixed
/// `Type error!` line to `out` at the moment the program stops; every other
/// runtime failure is reported only through the returned error.
pub fn parse_and_run(source: &str, out: &mut dyn Write) -> Result<(), RunError> {
    let program = parse_program(source).map_err(RunError::Syntax)?;

    let mut interpreter = Interpreter::new(out);
    match interpreter.run(&program) {
        Ok(()) => Ok(()),
        Err(error) => {
            if error.is_type_violation() {
                writeln!(out, "Type error!").ok();
            }
            Err(RunError::Runtime(error))
        }
    }
}

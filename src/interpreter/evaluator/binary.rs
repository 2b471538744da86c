use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, ExecResult},
        value::{
            class::ADD_METHOD,
            compare,
            core::{Closure, Object, ObjectHolder},
        },
    },
};

/// Evaluates a binary operation.
///
/// The operand expressions are passed unevaluated so that `and`/`or` can
/// short-circuit; every other operator evaluates both sides left to right and
/// routes to a specialized handler.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand expression.
/// - `right`: Right operand expression.
/// - `closure`: The current scope.
/// - `ctx`: Evaluation context.
/// - `line`: Line number for error reporting.
///
/// # Errors
/// Unwinds with a [`RuntimeError`] on unsupported operand types, division by
/// zero, overflow, or a failed comparison.
pub(in crate::interpreter) fn eval_binary(op: BinaryOperator,
                                          left: &Expr,
                                          right: &Expr,
                                          closure: &mut Closure,
                                          ctx: &mut Context,
                                          line: usize)
                                          -> ExecResult {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Sub,
    };

    match op {
        And => {
            let lhs = left.eval(closure, ctx)?;
            if !lhs.is_true() {
                return Ok(ObjectHolder::from(false));
            }
            let rhs = right.eval(closure, ctx)?;
            Ok(ObjectHolder::from(rhs.is_true()))
        },
        Or => {
            let lhs = left.eval(closure, ctx)?;
            if lhs.is_true() {
                return Ok(ObjectHolder::from(true));
            }
            let rhs = right.eval(closure, ctx)?;
            Ok(ObjectHolder::from(rhs.is_true()))
        },

        Add => {
            let lhs = left.eval(closure, ctx)?;
            let rhs = right.eval(closure, ctx)?;
            eval_add(&lhs, &rhs, ctx, line)
        },
        Sub | Mul => {
            let lhs = left.eval(closure, ctx)?;
            let rhs = right.eval(closure, ctx)?;
            eval_numeric(op, &lhs, &rhs, line)
        },
        Div => {
            let lhs = left.eval(closure, ctx)?;
            let rhs = right.eval(closure, ctx)?;
            eval_div(&lhs, &rhs, line)
        },

        Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
            let lhs = left.eval(closure, ctx)?;
            let rhs = right.eval(closure, ctx)?;
            let result = match op {
                Equal => compare::equal(&lhs, &rhs, ctx, line)?,
                NotEqual => compare::not_equal(&lhs, &rhs, ctx, line)?,
                Less => compare::less(&lhs, &rhs, ctx, line)?,
                Greater => compare::greater(&lhs, &rhs, ctx, line)?,
                LessEqual => compare::less_or_equal(&lhs, &rhs, ctx, line)?,
                _ => compare::greater_or_equal(&lhs, &rhs, ctx, line)?,
            };
            Ok(ObjectHolder::from(result))
        },
    }
}

/// Evaluates `+`: numeric addition, string concatenation, or dispatch to a
/// one-parameter `__add__` on a left-hand class instance, in that order.
fn eval_add(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut Context, line: usize) -> ExecResult {
    match (lhs.get(), rhs.get()) {
        (Some(Object::Number(a)), Some(Object::Number(b))) => {
            let sum = a.checked_add(*b).ok_or(RuntimeError::Overflow { line })?;
            Ok(ObjectHolder::from(sum))
        },
        (Some(Object::String(a)), Some(Object::String(b))) => {
            Ok(ObjectHolder::from(format!("{a}{b}")))
        },
        _ if lhs.has_method(ADD_METHOD, 1) => Ok(lhs.call(ADD_METHOD, &[rhs.clone()], ctx, line)?),
        _ => Err(type_error(BinaryOperator::Add, lhs, rhs, line).into()),
    }
}

/// Evaluates `-` and `*`, which accept numbers only.
fn eval_numeric(op: BinaryOperator, lhs: &ObjectHolder, rhs: &ObjectHolder, line: usize)
                -> ExecResult {
    let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) else {
        return Err(type_error(op, lhs, rhs, line).into());
    };

    let result = match op {
        BinaryOperator::Sub => a.checked_sub(b),
        _ => a.checked_mul(b),
    };
    let result = result.ok_or(RuntimeError::Overflow { line })?;

    Ok(ObjectHolder::from(result))
}

/// Evaluates `/`. The divisor is checked first: it must be a number and must
/// not be zero; only then is the dividend required to be a number.
fn eval_div(lhs: &ObjectHolder, rhs: &ObjectHolder, line: usize) -> ExecResult {
    let Some(divisor) = rhs.as_number() else {
        return Err(RuntimeError::TypeError { details: format!("Divisor must be a number, not {}",
                                                              rhs.type_name()),
                                             line }.into());
    };
    if divisor == 0 {
        return Err(RuntimeError::DivisionByZero { line }.into());
    }

    let Some(dividend) = lhs.as_number() else {
        return Err(type_error(BinaryOperator::Div, lhs, rhs, line).into());
    };

    let quotient = dividend.checked_div(divisor)
                           .ok_or(RuntimeError::Overflow { line })?;
    Ok(ObjectHolder::from(quotient))
}

/// Builds the unsupported-operand error for an arithmetic operator.
fn type_error(op: BinaryOperator, lhs: &ObjectHolder, rhs: &ObjectHolder, line: usize)
              -> RuntimeError {
    RuntimeError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                               lhs.type_name(),
                                               rhs.type_name()),
                              line }
}

use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::Context,
        value::{
            class::{EQ_METHOD, LT_METHOD},
            core::{Object, ObjectHolder},
        },
    },
};

/// Applies `check` to the native ordering of two same-kind primitives, or
/// returns `None` when the operands are not both booleans, both numbers, or
/// both strings.
fn compare_primitives(lhs: &ObjectHolder,
                      rhs: &ObjectHolder,
                      check: impl Fn(Ordering) -> bool)
                      -> Option<bool> {
    match (lhs.get(), rhs.get()) {
        (Some(Object::Bool(a)), Some(Object::Bool(b))) => Some(check(a.cmp(b))),
        (Some(Object::Number(a)), Some(Object::Number(b))) => Some(check(a.cmp(b))),
        (Some(Object::String(a)), Some(Object::String(b))) => Some(check(a.cmp(b))),
        _ => None,
    }
}

/// Tests two values for equality.
///
/// A class instance on the left with a one-parameter `__eq__` method decides
/// the answer itself; the method's result is coerced through truthiness.
/// Otherwise two primitives of the same kind compare natively, and two empty
/// holders are equal.
///
/// # Errors
/// Returns [`RuntimeError::IncomparableValues`] when none of the rules apply,
/// or any error raised by a `__eq__` body.
pub fn equal(lhs: &ObjectHolder,
             rhs: &ObjectHolder,
             ctx: &mut Context,
             line: usize)
             -> Result<bool, RuntimeError> {
    if lhs.has_method(EQ_METHOD, 1) {
        let verdict = lhs.call(EQ_METHOD, &[rhs.clone()], ctx, line)?;
        return Ok(verdict.is_true());
    }

    if let Some(result) = compare_primitives(lhs, rhs, Ordering::is_eq) {
        return Ok(result);
    }

    if lhs.is_none() && rhs.is_none() {
        return Ok(true);
    }

    Err(RuntimeError::IncomparableValues { line })
}

/// Tests whether `lhs` orders strictly before `rhs`.
///
/// A class instance on the left with a one-parameter `__lt__` method decides
/// the answer itself; the method's result is coerced through truthiness.
/// Otherwise two primitives of the same kind compare natively (`False` is
/// less than `True` for booleans).
///
/// # Errors
/// Returns [`RuntimeError::IncomparableValues`] when none of the rules apply,
/// or any error raised by a `__lt__` body.
pub fn less(lhs: &ObjectHolder,
            rhs: &ObjectHolder,
            ctx: &mut Context,
            line: usize)
            -> Result<bool, RuntimeError> {
    if lhs.has_method(LT_METHOD, 1) {
        let verdict = lhs.call(LT_METHOD, &[rhs.clone()], ctx, line)?;
        return Ok(verdict.is_true());
    }

    if let Some(result) = compare_primitives(lhs, rhs, Ordering::is_lt) {
        return Ok(result);
    }

    Err(RuntimeError::IncomparableValues { line })
}

/// The negation of [`equal`].
///
/// # Errors
/// Propagates the errors of [`equal`].
pub fn not_equal(lhs: &ObjectHolder,
                 rhs: &ObjectHolder,
                 ctx: &mut Context,
                 line: usize)
                 -> Result<bool, RuntimeError> {
    Ok(!equal(lhs, rhs, ctx, line)?)
}

/// [`less`] or [`equal`], in that order, short-circuiting on the first hit.
///
/// # Errors
/// Propagates the errors of [`less`] and [`equal`].
pub fn less_or_equal(lhs: &ObjectHolder,
                     rhs: &ObjectHolder,
                     ctx: &mut Context,
                     line: usize)
                     -> Result<bool, RuntimeError> {
    Ok(less(lhs, rhs, ctx, line)? || equal(lhs, rhs, ctx, line)?)
}

/// The negation of [`less_or_equal`].
///
/// # Errors
/// Propagates the errors of [`less_or_equal`].
pub fn greater(lhs: &ObjectHolder,
               rhs: &ObjectHolder,
               ctx: &mut Context,
               line: usize)
               -> Result<bool, RuntimeError> {
    Ok(!less_or_equal(lhs, rhs, ctx, line)?)
}

/// The negation of [`less`].
///
/// # Errors
/// Propagates the errors of [`less`].
pub fn greater_or_equal(lhs: &ObjectHolder,
                        rhs: &ObjectHolder,
                        ctx: &mut Context,
                        line: usize)
                        -> Result<bool, RuntimeError> {
    Ok(!less(lhs, rhs, ctx, line)?)
}

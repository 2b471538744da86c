/// Binary operation evaluation.
///
/// Routes each operator to its handler: checked integer arithmetic, string
/// concatenation and `__add__` dispatch for `+`, short-circuit logic for
/// `and`/`or`, and the comparison functions for the relational operators.
pub mod binary;
/// Core execution engine.
///
/// Declares the [`core::Context`], the [`core::Unwind`] control signal that
/// keeps `return` distinct from runtime errors, and the `execute`/`eval`
/// implementations that walk the AST.
pub mod core;

pub use self::core::{Context, ExecResult, Unwind};

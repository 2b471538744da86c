/// Classes, instances and method dispatch.
///
/// Declares [`class::Class`], [`class::Method`] and [`class::ClassInstance`],
/// the parent-chain method lookup, and the dispatcher that builds the
/// per-call closure binding `self` and the formal parameters.
pub mod class;
/// Comparison operations over holders.
///
/// The equality and ordering functions, including dispatch through the
/// `__eq__`/`__lt__` hooks and the identities that derive the remaining four
/// comparisons from those two.
pub mod compare;
/// Core value representation.
///
/// Declares the [`core::Object`] tagged union, the shared
/// [`core::ObjectHolder`] handle, truthiness, and value rendering.
pub mod core;

pub use class::{Class, ClassInstance, Method};
pub use self::core::{Closure, Object, ObjectHolder};

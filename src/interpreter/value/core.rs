use std::{collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::Context,
        value::class::{Class, ClassInstance, STR_METHOD},
    },
};

/// A flat mapping from names to values, representing one scope.
///
/// Scopes are not nested lexically: a method body runs against a fresh
/// closure holding `self` and the bound formal parameters, and the only way
/// to reach anything else is explicit qualification through `self.`.
pub type Closure = HashMap<String, ObjectHolder>;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, method returns, and conditional evaluations. The absent value
/// (`None`) is not a variant; it is an empty [`ObjectHolder`].
#[derive(Debug)]
pub enum Object {
    /// A 64-bit signed integer value.
    Number(i64),
    /// A string value.
    String(String),
    /// A boolean value (`True` or `False`).
    Bool(bool),
    /// A class declared by a `class` definition.
    Class(Rc<Class>),
    /// An instance of a class, with its own mutable field map.
    Instance(ClassInstance),
}

/// A possibly-empty shared handle to a runtime value.
///
/// Every value in a running program is addressed through a holder. Cloning a
/// holder shares the underlying value rather than copying it; this is what
/// makes field mutation through `self` visible to every other holder of the
/// same instance. The empty holder is the language's `None`.
#[derive(Debug, Clone, Default)]
pub struct ObjectHolder(Option<Rc<Object>>);

impl ObjectHolder {
    /// Returns the empty holder, the language's `None`.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Returns `true` if the holder is empty.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the held value, or `None` for the empty holder.
    #[must_use]
    pub fn get(&self) -> Option<&Object> {
        self.0.as_deref()
    }

    /// Returns the held class instance, if the holder holds one.
    #[must_use]
    pub fn as_instance(&self) -> Option<&ClassInstance> {
        match self.get() {
            Some(Object::Instance(instance)) => Some(instance),
            _ => None,
        }
    }

    /// Returns the held number, if the holder holds one.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self.get() {
            Some(Object::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Computes the truth value of the held object.
    ///
    /// The empty holder, classes, class instances, `False`, `0` and the empty
    /// string are falsy; everything else is truthy. A class instance is
    /// always falsy, even one defining `__str__` or comparison hooks.
    #[must_use]
    pub fn is_true(&self) -> bool {
        match self.get() {
            None | Some(Object::Class(_) | Object::Instance(_)) => false,
            Some(Object::Bool(value)) => *value,
            Some(Object::Number(value)) => *value != 0,
            Some(Object::String(value)) => !value.is_empty(),
        }
    }

    /// Returns a short name for the held object's type, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.get() {
            None => "none",
            Some(Object::Number(_)) => "number",
            Some(Object::String(_)) => "string",
            Some(Object::Bool(_)) => "bool",
            Some(Object::Class(_)) => "class",
            Some(Object::Instance(_)) => "instance",
        }
    }

    /// Produces the printed form of the held object.
    ///
    /// - The empty holder renders as `None`.
    /// - Numbers render in decimal, strings as their raw bytes, booleans as
    ///   `True`/`False`, classes as `Class <name>`.
    /// - A class instance with a 0-parameter `__str__` method renders as that
    ///   method's result; without one it renders as its address.
    ///
    /// # Parameters
    /// - `ctx`: Evaluation context, needed when `__str__` runs user code.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] if a `__str__` call fails.
    pub fn render(&self, ctx: &mut Context, line: usize) -> Result<String, RuntimeError> {
        let Some(object) = self.get() else {
            return Ok(String::from("None"));
        };

        match object {
            Object::Number(value) => Ok(value.to_string()),
            Object::String(value) => Ok(value.clone()),
            Object::Bool(true) => Ok(String::from("True")),
            Object::Bool(false) => Ok(String::from("False")),
            Object::Class(class) => Ok(format!("Class {}", class.name())),
            Object::Instance(instance) => {
                if instance.has_method(STR_METHOD, 0) {
                    self.call(STR_METHOD, &[], ctx, line)?.render(ctx, line)
                } else {
                    Ok(format!("{:p}", std::ptr::from_ref(instance)))
                }
            },
        }
    }
}

impl From<Object> for ObjectHolder {
    fn from(object: Object) -> Self {
        Self(Some(Rc::new(object)))
    }
}

impl From<i64> for ObjectHolder {
    fn from(value: i64) -> Self {
        Object::Number(value).into()
    }
}

impl From<bool> for ObjectHolder {
    fn from(value: bool) -> Self {
        Object::Bool(value).into()
    }
}

impl From<String> for ObjectHolder {
    fn from(value: String) -> Self {
        Object::String(value).into()
    }
}

impl From<&str> for ObjectHolder {
    fn from(value: &str) -> Self {
        Object::String(value.to_owned()).into()
    }
}

impl From<Rc<Class>> for ObjectHolder {
    fn from(class: Rc<Class>) -> Self {
        Object::Class(class).into()
    }
}

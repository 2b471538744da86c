use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, Unwind},
        value::core::{Closure, Object, ObjectHolder},
    },
};

/// Constructor hook, run by instantiation when present with matching arity.
pub const INIT_METHOD: &str = "__init__";
/// Stringification hook, used by `print` and `str()`.
pub const STR_METHOD: &str = "__str__";
/// Equality hook, used by `==` and `!=`.
pub const EQ_METHOD: &str = "__eq__";
/// Ordering hook, used by `<` and the comparisons derived from it.
pub const LT_METHOD: &str = "__lt__";
/// Addition hook, used by `+` when the left operand is an instance.
pub const ADD_METHOD: &str = "__add__";

/// The name the dispatcher binds the receiver to in every method body.
const SELF_VAR: &str = "self";

/// A method attached to a class: a name, the formal parameter names, and the
/// body to execute. `self` is not a formal parameter; the dispatcher binds it.
#[derive(Debug)]
pub struct Method {
    /// The name of the method.
    pub name:          String,
    /// The parameter names, in call order.
    pub formal_params: Vec<String>,
    /// The body executed when the method is called.
    pub body:          Statement,
}

/// A class declared by a `class` definition. Immutable after creation.
#[derive(Debug)]
pub struct Class {
    name:    String,
    methods: Vec<Method>,
    parent:  Option<Rc<Class>>,
}

impl Class {
    /// Creates a class from its name, methods and optional parent.
    #[must_use]
    pub fn new(name: String, methods: Vec<Method>, parent: Option<Rc<Self>>) -> Self {
        Self { name,
               methods,
               parent }
    }

    /// Returns the class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a method by name, searching own methods in declaration order
    /// first and then walking the parent chain. The first match wins.
    #[must_use]
    pub fn get_method(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|method| method.name == name)
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.get_method(name)))
    }
}

/// An instance of a class: a class reference plus a mutable field map.
///
/// The field map is shared by every holder of the instance, so a mutation
/// made through `self` inside a method is visible to the caller.
#[derive(Debug)]
pub struct ClassInstance {
    class:  Rc<Class>,
    fields: RefCell<Closure>,
}

impl ClassInstance {
    /// Creates an instance of `class` with no fields assigned yet.
    #[must_use]
    pub fn new(class: Rc<Class>) -> Self {
        Self { class,
               fields: RefCell::new(Closure::new()) }
    }

    /// Returns the instance's class.
    #[must_use]
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Returns `true` if method lookup finds `method` with exactly
    /// `argument_count` formal parameters.
    #[must_use]
    pub fn has_method(&self, method: &str, argument_count: usize) -> bool {
        self.class
            .get_method(method)
            .is_some_and(|found| found.formal_params.len() == argument_count)
    }

    /// Reads a field, or `None` if it has never been assigned.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<ObjectHolder> {
        self.fields.borrow().get(name).cloned()
    }

    /// Assigns a field, creating or replacing it.
    pub fn set_field(&self, name: String, value: ObjectHolder) {
        self.fields.borrow_mut().insert(name, value);
    }
}

impl ObjectHolder {
    /// Returns `true` if the holder holds a class instance with a method of
    /// the given name and parameter count. Always `false` for anything that
    /// is not an instance.
    #[must_use]
    pub fn has_method(&self, method: &str, argument_count: usize) -> bool {
        self.as_instance()
            .is_some_and(|instance| instance.has_method(method, argument_count))
    }

    /// Calls a method on the held class instance.
    ///
    /// The method body runs against a fresh closure seeded with `self` bound
    /// to a share of this holder and each formal parameter bound to the
    /// corresponding argument, positionally.
    ///
    /// # Parameters
    /// - `method`: The method name.
    /// - `args`: The evaluated arguments, in call order.
    /// - `ctx`: Evaluation context.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] if the holder is not a class instance, if
    /// lookup does not find the method with a matching parameter count, or if
    /// the method body fails.
    pub fn call(&self,
                method: &str,
                args: &[ObjectHolder],
                ctx: &mut Context,
                line: usize)
                -> Result<ObjectHolder, RuntimeError> {
        let Some(Object::Instance(instance)) = self.get() else {
            return Err(RuntimeError::NotAnInstance { line });
        };

        let found = instance.class()
                            .get_method(method)
                            .filter(|found| found.formal_params.len() == args.len());
        let Some(found) = found else {
            return Err(RuntimeError::UnknownMethod { name: method.to_owned(),
                                                     line });
        };

        let mut local = Closure::new();
        local.insert(SELF_VAR.to_owned(), self.clone());
        for (param, arg) in found.formal_params.iter().zip(args) {
            local.insert(param.clone(), arg.clone());
        }

        match found.body.execute(&mut local, ctx) {
            Ok(value) => Ok(value),
            // The body is a method-body node, which already turns a return
            // unwind into its result; a stray unwind still means "returned".
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
        }
    }
}

use std::{io::Write, rc::Rc};

use crate::{
    ast::{Expr, Statement, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::binary::eval_binary,
        value::{
            class::{ClassInstance, INIT_METHOD},
            core::{Closure, Object, ObjectHolder},
        },
    },
};

/// Stores the services available to every executing node.
///
/// The interpreter is strictly single-threaded and synchronous, so the
/// context is small: its one job is to hand out the output sink that `print`
/// and value rendering write to. Scopes are not part of the context; each
/// method body gets its own closure from the dispatcher.
pub struct Context<'out> {
    output: &'out mut dyn Write,
}

impl<'out> Context<'out> {
    /// Creates a context writing program output to `output`.
    pub fn new(output: &'out mut dyn Write) -> Self {
        Self { output }
    }

    /// Returns the output sink.
    pub fn output(&mut self) -> &mut dyn Write {
        self.output
    }
}

/// The reason an execution did not produce a value in the ordinary way.
///
/// A `return` statement unwinds through every enclosing statement until the
/// method body catches it; a runtime error unwinds all the way out. Keeping
/// the two as separate variants is what guarantees an error inside a method
/// is never mistaken for its return value.
#[derive(Debug)]
pub enum Unwind {
    /// A `return` carrying the method's result.
    Return(ObjectHolder),
    /// A runtime failure.
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Result type used by the evaluator.
///
/// Every `execute`/`eval` either produces a holder or unwinds with an
/// [`Unwind`].
pub type ExecResult = Result<ObjectHolder, Unwind>;

impl Statement {
    /// Executes the statement against a scope and a context.
    ///
    /// Statements that bind something return the stored holder; suites and
    /// definitions return the empty holder. A `return` statement does not
    /// return at all: it unwinds to the nearest enclosing method body.
    ///
    /// # Errors
    /// Unwinds with [`Unwind::Error`] on any runtime failure, or with
    /// [`Unwind::Return`] when a `return` executes.
    pub fn execute(&self, closure: &mut Closure, ctx: &mut Context) -> ExecResult {
        match self {
            Self::Assignment { var, value, .. } => {
                let value = value.eval(closure, ctx)?;
                closure.insert(var.clone(), value.clone());
                Ok(value)
            },
            Self::FieldAssignment { object,
                                    field,
                                    value,
                                    line, } => {
                let target = object.eval(closure, ctx)?;
                let Some(instance) = target.as_instance() else {
                    return Err(RuntimeError::NotAnInstance { line: *line }.into());
                };
                let value = value.eval(closure, ctx)?;
                instance.set_field(field.clone(), value.clone());
                Ok(value)
            },
            Self::Print { args, line } => {
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    let value = arg.eval(closure, ctx)?;
                    rendered.push(value.render(ctx, *line)?);
                }
                writeln!(ctx.output(), "{}", rendered.join(" "))
                    .map_err(|_| RuntimeError::Output { line: *line })?;
                Ok(ObjectHolder::none())
            },
            Self::Expression { expr, .. } => expr.eval(closure, ctx),
            Self::Return { expr, .. } => Err(Unwind::Return(expr.eval(closure, ctx)?)),
            Self::ClassDefinition { class, .. } => {
                closure.insert(class.name().to_owned(), ObjectHolder::from(Rc::clone(class)));
                Ok(ObjectHolder::none())
            },
            Self::IfElse { condition,
                           then_body,
                           else_body,
                           .. } => {
                if condition.eval(closure, ctx)?.is_true() {
                    then_body.execute(closure, ctx)
                } else if let Some(else_body) = else_body {
                    else_body.execute(closure, ctx)
                } else {
                    Ok(ObjectHolder::none())
                }
            },
            Self::Compound { statements, .. } => {
                for statement in statements {
                    statement.execute(closure, ctx)?;
                }
                Ok(ObjectHolder::none())
            },
            Self::MethodBody { body, .. } => match body.execute(closure, ctx) {
                Ok(_) => Ok(ObjectHolder::none()),
                Err(Unwind::Return(value)) => Ok(value),
                Err(error) => Err(error),
            },
        }
    }
}

impl Expr {
    /// Evaluates the expression against a scope and a context.
    ///
    /// # Errors
    /// Unwinds with [`Unwind::Error`] on any runtime failure. A `return`
    /// unwind can also pass through here when a dispatched method body is on
    /// the call stack.
    pub fn eval(&self, closure: &mut Closure, ctx: &mut Context) -> ExecResult {
        match self {
            Self::Literal { value, .. } => Ok(value.clone()),
            Self::Variable { ids, line } => eval_variable(ids, *line, closure),
            Self::MethodCall { object,
                               method,
                               args,
                               line, } => {
                let target = object.eval(closure, ctx)?;
                if target.has_method(method, args.len()) {
                    let values = eval_args(args, closure, ctx)?;
                    Ok(target.call(method, &values, ctx, *line)?)
                } else {
                    // A missing method, an arity mismatch, or a receiver
                    // that is no instance at all: the call evaluates to
                    // None, with the arguments left unevaluated.
                    Ok(ObjectHolder::none())
                }
            },
            Self::NewInstance { class, args, line } => {
                let instance =
                    ObjectHolder::from(Object::Instance(ClassInstance::new(Rc::clone(class))));
                if instance.has_method(INIT_METHOD, args.len()) {
                    let values = eval_args(args, closure, ctx)?;
                    instance.call(INIT_METHOD, &values, ctx, *line)?;
                }
                Ok(instance)
            },
            Self::Stringify { argument, line } => {
                let value = argument.eval(closure, ctx)?;
                let rendered = value.render(ctx, *line)?;
                Ok(ObjectHolder::from(rendered))
            },
            Self::BinaryOp { left,
                             op,
                             right,
                             line, } => eval_binary(*op, left, right, closure, ctx, *line),
            Self::UnaryOp { op: UnaryOperator::Not,
                            expr,
                            .. } => {
                let value = expr.eval(closure, ctx)?;
                Ok(ObjectHolder::from(!value.is_true()))
            },
        }
    }
}

/// Resolves a variable or a dotted chain of field reads.
///
/// The first name resolves in the closure; each further name reads a field
/// off the class instance the previous step produced.
fn eval_variable(ids: &[String], line: usize, closure: &mut Closure) -> ExecResult {
    let Some((first, fields)) = ids.split_first() else {
        return Ok(ObjectHolder::none());
    };

    let mut holder = closure.get(first)
                            .cloned()
                            .ok_or_else(|| RuntimeError::UnknownVariable { name: first.clone(),
                                                                           line })?;
    for name in fields {
        let Some(instance) = holder.as_instance() else {
            return Err(RuntimeError::NotAnInstance { line }.into());
        };
        let field = instance.field(name)
                            .ok_or_else(|| RuntimeError::UnknownField { name: name.clone(),
                                                                        line })?;
        holder = field;
    }

    Ok(holder)
}

/// Evaluates call arguments left to right.
fn eval_args(args: &[Expr], closure: &mut Closure, ctx: &mut Context)
             -> Result<Vec<ObjectHolder>, Unwind> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(arg.eval(closure, ctx)?);
    }
    Ok(values)
}

//! # picopy
//!
//! picopy is an interpreter for a tiny, dynamically typed,
//! indentation-structured scripting language written in Rust. It supports
//! integer and string literals, booleans, `None`, variables and dotted field
//! access, user-defined classes with single inheritance and instance
//! methods, `print`, arithmetic, string concatenation, comparisons,
//! short-circuit boolean logic, `if`/`else`, `return`, and method dispatch
//! through the `__init__`, `__str__`, `__eq__`, `__lt__` and `__add__`
//! hooks.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::interpreter::{
    evaluator::{Context, Unwind},
    lexer::Lexer,
    parser::Parser,
    value::Closure,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to AST nodes for error reporting.
/// - Enables extensible and robust handling of parsed code.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while turning source
/// text into tokens, building the AST, or executing it. It standardizes
/// error reporting and carries detailed information about failures,
/// including source line numbers for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation. It exposes the
/// building blocks behind [`run_program`].
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for tokenizing, parsing and executing user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Runs a whole program, writing its output to the given sink.
///
/// The source is tokenized, parsed into its root compound statement, and
/// executed against a fresh global scope. Output produced by `print`
/// statements goes to `output` as the program runs.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error encountered. Anything
/// printed before the failing statement has already been written to the
/// sink.
///
/// # Examples
/// ```
/// let mut output: Vec<u8> = Vec::new();
/// picopy::run_program("print 1 + 2 * 3", &mut output).unwrap();
///
/// assert_eq!(output, b"7\n");
/// ```
pub fn run_program(source: &str, output: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let lexer = Lexer::new(source)?;
    let program = Parser::new(lexer).parse_program()?;

    let mut context = Context::new(output);
    let mut globals = Closure::new();

    match program.execute(&mut globals, &mut context) {
        // A return unwind cannot escape a parsed program; the parser
        // rejects `return` outside of method bodies.
        Ok(_) | Err(Unwind::Return(_)) => Ok(()),
        Err(Unwind::Error(error)) => Err(Box::new(error)),
    }
}

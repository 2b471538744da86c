/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, executes statements and expressions,
/// performs arithmetic and logical operations, dispatches method calls, and
/// writes program output through the context. It is the core execution engine
/// of the interpreter.
///
/// # Responsibilities
/// - Executes AST nodes, performing all supported operations.
/// - Dispatches methods through classes, including the dunder hooks.
/// - Keeps the `return` control signal distinct from runtime errors.
/// - Reports runtime errors such as division by zero or invalid operations.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to meaningful language elements such as numbers, strings,
/// identifiers, operators and keywords — plus the synthetic tokens that carry
/// the indentation structure. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into buffered tokens.
/// - Manufactures `Newline`/`Indent`/`Dedent` tokens from whitespace context.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of statements and
/// expressions. Class definitions are resolved while parsing, so every
/// instantiation site already references its class.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (statements, expressions).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Supports classes with inheritance, method calls, assignments, and more.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation:
/// numbers, strings, booleans, classes and class instances, all addressed
/// through a shared, possibly-empty holder. It also provides truthiness,
/// rendering, comparisons and method dispatch.
///
/// # Responsibilities
/// - Defines the `Object` union and the `ObjectHolder` handle.
/// - Implements classes, instances, field storage and method lookup.
/// - Provides comparison operations including the dunder hooks.
pub mod value;

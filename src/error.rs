/// Lexical errors.
///
/// Defines all error types that can occur while turning source text into a
/// token stream. Lexer errors include unexpected characters, numeric literals
/// that do not fit the value type, and token expectations raised through the
/// lexer's `expect*` API.
pub mod lexer_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the abstract syntax
/// tree from the token stream. Parse errors include syntax mistakes,
/// references to undeclared classes, and `return` statements outside of a
/// method body.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include things like division by zero, unknown
/// variables or fields, type mismatches, and invalid operations.
pub mod runtime_error;

pub use lexer_error::LexerError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

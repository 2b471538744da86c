/// Parser state and program structure.
///
/// Declares the [`core::Parser`], the program and suite entry points, the
/// parse-time class table, and the small token helpers the other parser
/// modules share.
pub mod core;
/// Expression parsing.
///
/// The precedence ladder from logical OR down to atoms, name chains, call
/// trailers and the `str()` special form.
pub mod expression;
/// Statement parsing.
///
/// Class definitions with their method blocks, `if`/`else`, `print`,
/// `return`, and the assignment-versus-expression disambiguation.
pub mod statement;

pub use self::core::Parser;

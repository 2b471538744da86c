use crate::error::LexerError;

#[derive(Debug)]
/// Represents all errors that can occur while parsing the token stream.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Referenced a class name that has not been declared.
    UnknownClass {
        /// The name of the class.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` statement appeared outside of a method body.
    ReturnOutsideMethod {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Some other kind of parse error, with a custom message.
    Other {
        /// Details about the parse error.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A lexer error raised while the parser advanced the token stream.
    Lexer(LexerError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },
            Self::UnknownClass { name, line } => {
                write!(f, "Error on line {line}: Unknown class '{name}'.")
            },
            Self::ReturnOutsideMethod { line } => {
                write!(f, "Error on line {line}: 'return' outside of a method body.")
            },
            Self::Other { message, line } => write!(f, "Error on line {line}: {message}"),
            Self::Lexer(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        Self::Lexer(e)
    }
}

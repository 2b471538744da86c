#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to read a field that has not been assigned.
    UnknownField {
        /// The name of the field.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to use a value that is not a class instance where one is
    /// required, e.g. in a dotted field chain.
    NotAnInstance {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a method that does not exist or whose parameter count does not
    /// match the number of arguments.
    UnknownMethod {
        /// The name of the method.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Compared two values that have no common comparison.
    IncomparableValues {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing to the output sink failed.
    Output {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::UnknownField { name, line } => {
                write!(f, "Error on line {line}: Unknown field '{name}'.")
            },
            Self::NotAnInstance { line } => {
                write!(f, "Error on line {line}: Value is not a class instance.")
            },
            Self::UnknownMethod { name, line } => write!(f,
                                                         "Error on line {line}: No method '{name}' with a matching number of parameters."),
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::IncomparableValues { line } => {
                write!(f, "Error on line {line}: Values cannot be compared.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::Output { line } => {
                write!(f, "Error on line {line}: Failed to write to the output stream.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}

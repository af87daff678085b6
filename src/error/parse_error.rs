use thiserror::Error;

/// Represents all errors that can occur during parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// Description of the token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name was required, for example after `let`, `func` or `for`.
    #[error("Error on line {line}: Expected identifier, found {found}.")]
    ExpectedIdentifier {
        /// Description of the token found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `import` was not followed by a quoted path.
    #[error("Error on line {line}: Expected a quoted path after 'import'.")]
    ExpectedImportString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Expressions or statements are nested deeper than the parser allows.
    #[error("Error on line {line}: Program is nested too deeply.")]
    TooDeep {
        /// The source line where the limit was reached.
        line: usize,
    },
    /// The left side of an indexed assignment is not a plain identifier.
    #[error("Error on line {line}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
}

use thiserror::Error;

use crate::error::{LexError, ParseError};

/// Represents all errors that can occur during evaluation and runtime.
///
/// Every variant is fatal: the running program stops and the error is reported
/// by the caller. Lenient cases such as reading an unknown variable are not
/// errors and never reach this type.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Called a name that is neither built in, native nor user defined.
    #[error("Error: Undefined function '{name}'.")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// An indexed assignment used a negative index.
    #[error("Error: Negative array index {index}.")]
    NegativeIndex {
        /// The truncated index.
        index: i64,
    },
    /// An array could not grow to hold the requested element.
    #[error("Error: Array cannot grow to {len} elements.")]
    ArrayTooLarge {
        /// The length the array would have needed.
        len: usize,
    },
    /// `import "<name>.h"` named a module that is not registered.
    #[error("Error: Unknown native module '{name}'.")]
    UnknownNativeModule {
        /// The module name derived from the path.
        name: String,
    },
    /// An imported source unit could not be loaded.
    #[error("Error: Could not import '{path}': {source}")]
    ImportFailed {
        /// The path given to `import`.
        path:   String,
        /// The loader failure.
        source: std::io::Error,
    },
    /// An imported source unit failed to tokenize.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// An imported source unit failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program executed `raise`.
    #[error("Error: {message}")]
    Raised {
        /// The stringified operand of `raise`.
        message: String,
    },
    /// Writing program output or a file failed.
    #[error("Error: I/O failure: {details}.")]
    Io {
        /// Details about the failure.
        details: String,
    },
    /// Function calls nested deeper than the interpreter allows.
    #[error("Error: Call depth limit of {depth} exceeded.")]
    CallDepthExceeded {
        /// The configured limit.
        depth: usize,
    },
}

impl From<std::io::Error> for RuntimeError {
    fn from(error: std::io::Error) -> Self {
        Self::Io { details: error.to_string() }
    }
}

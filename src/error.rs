use thiserror::Error;

/// Lexing errors.
///
/// Raised while turning source text into tokens, for example on a character
/// that does not start any token.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree from
/// tokens: missing delimiters, unexpected tokens and premature end of input.
pub mod parse_error;
/// Binary codec errors.
///
/// Covers both directions of the two binary formats. Decoding fails on bad
/// headers, unknown tags, truncated input or invalid payloads. Encoding fails
/// when a string does not fit the 16-bit length prefix or the sink fails.
pub mod codec_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// functions, type mismatches, invalid index assignments, failed imports and
/// program-raised errors.
pub mod runtime_error;

pub use codec_error::{DecodeError, EncodeError};
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error produced by the toolchain, from reading a file to running it.
#[derive(Debug, Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens did not form a valid program.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A binary artifact could not be read.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A binary artifact could not be written.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A source or artifact file could not be accessed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

/// Represents all errors that can occur while reading a binary artifact.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input ended in the middle of a record.
    #[error("Unexpected end of input while reading {what}.")]
    UnexpectedEof {
        /// The item that was being read.
        what: &'static str,
    },
    /// The image does not start with `SPC\0`.
    #[error("Not a Splice AST image: bad magic.")]
    BadMagic,
    /// The image was written by an unsupported format version.
    #[error("Unsupported AST image version {version}.")]
    UnsupportedVersion {
        /// The version byte found in the header.
        version: u8,
    },
    /// A node record starts with an unknown tag.
    #[error("Unknown node tag {tag:#04x}.")]
    UnknownTag {
        /// The tag byte.
        tag: u8,
    },
    /// A token record starts with an unknown opcode.
    #[error("Unknown opcode {opcode:#04x}.")]
    UnknownOpcode {
        /// The opcode byte.
        opcode: u8,
    },
    /// An operator node carries a symbol outside the operator set.
    #[error("Unknown operator '{symbol}'.")]
    UnknownOperator {
        /// The symbol found.
        symbol: String,
    },
    /// The null sentinel appeared where a child node is required.
    #[error("Missing required child in {node} node.")]
    UnexpectedNull {
        /// The kind of node being decoded.
        node: &'static str,
    },
    /// A string payload is not valid UTF-8.
    #[error("String payload is not valid UTF-8.")]
    InvalidUtf8,
    /// A number token payload could not be parsed.
    #[error("Invalid number literal '{text}'.")]
    InvalidNumber {
        /// The payload text.
        text: String,
    },
    /// Nodes are nested deeper than the decoder allows.
    #[error("AST image is nested too deeply.")]
    TooDeep,
    /// The underlying reader failed.
    #[error("I/O error while decoding: {0}")]
    Io(#[from] std::io::Error),
}

/// Represents all errors that can occur while writing a binary artifact.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A string is longer than the 16-bit length prefix can describe.
    #[error("String of {len} bytes exceeds the 65535 byte limit.")]
    StringTooLong {
        /// The byte length of the string.
        len: usize,
    },
    /// A list has more items than the 32-bit count prefix can describe.
    #[error("List of {len} items exceeds the 32-bit count limit.")]
    TooManyItems {
        /// The number of items.
        len: usize,
    },
    /// The tree is nested deeper than an image may be.
    #[error("Syntax tree is nested too deeply to encode.")]
    TooDeep,
    /// The underlying writer failed.
    #[error("I/O error while encoding: {0}")]
    Io(#[from] std::io::Error),
}

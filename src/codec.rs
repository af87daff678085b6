//! Binary persistence of programs.
//!
//! Two formats exist. The AST image (`.spc`) stores a parsed syntax tree and
//! can be executed without the parser. The opcode token stream (`.spbc`) is
//! the older format: it stores the lexed tokens, and loading it runs the
//! parser again. Both formats are little-endian and prefix strings with a
//! 16-bit byte length.

use crate::error::{DecodeError, EncodeError};

pub(crate) mod bytes;
/// AST image format (`.spc`).
pub mod image;
/// Opcode token stream format (`.spbc`).
pub mod opcode;

/// Result type used by all decoders.
pub type DecodeResult<T> = Result<T, DecodeError>;
/// Result type used by all encoders.
pub type EncodeResult<T> = Result<T, EncodeError>;

pub use image::{decode_image, encode_image, read_image, write_image};
pub use opcode::{decode_tokens, encode_tokens, read_tokens, write_tokens};

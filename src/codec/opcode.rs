//! The opcode token stream is a flat sequence of records, one per token:
//!
//! ```text
//! opcode           u8
//! [len, bytes]     u16 length + payload, literals only
//! ```
//!
//! Number payloads hold the decimal text of the value. There is no header and
//! no end marker.

use std::io::{Read, Write};

use log::debug;

use crate::{
    codec::{
        DecodeResult, EncodeResult,
        bytes::{ByteSource, ByteWriter, SliceSource, StreamSource},
    },
    error::DecodeError,
    interpreter::lexer::Token,
};

pub const OP_LET: u8 = 0x01;
pub const OP_PRINT: u8 = 0x02;
pub const OP_RAISE: u8 = 0x03;
pub const OP_WARN: u8 = 0x04;
pub const OP_INFO: u8 = 0x05;
pub const OP_WHILE: u8 = 0x06;
pub const OP_IF: u8 = 0x07;
pub const OP_ELSE: u8 = 0x08;
pub const OP_FUNC: u8 = 0x09;
pub const OP_RETURN: u8 = 0x0A;
pub const OP_IMPORT: u8 = 0x0B;
pub const OP_FOR: u8 = 0x0C;
pub const OP_IN: u8 = 0x0D;
pub const OP_TRUE: u8 = 0x0E;
pub const OP_FALSE: u8 = 0x0F;
pub const OP_AND: u8 = 0x10;
pub const OP_OR: u8 = 0x11;
pub const OP_NOT: u8 = 0x12;

pub const OP_ASSIGN: u8 = 0x20;
pub const OP_PLUS: u8 = 0x21;
pub const OP_MINUS: u8 = 0x22;
pub const OP_MULTIPLY: u8 = 0x23;
pub const OP_DIVIDE: u8 = 0x24;
pub const OP_LT: u8 = 0x25;
pub const OP_GT: u8 = 0x26;
pub const OP_LE: u8 = 0x27;
pub const OP_GE: u8 = 0x28;
pub const OP_EQ: u8 = 0x29;
pub const OP_NEQ: u8 = 0x2A;

pub const OP_SEMICOLON: u8 = 0x30;
pub const OP_COMMA: u8 = 0x31;
pub const OP_DOT: u8 = 0x32;

pub const OP_LPAREN: u8 = 0x40;
pub const OP_RPAREN: u8 = 0x41;
pub const OP_LBRACE: u8 = 0x42;
pub const OP_RBRACE: u8 = 0x43;
pub const OP_LBRACKET: u8 = 0x44;
pub const OP_RBRACKET: u8 = 0x45;

pub const OP_NUMBER: u8 = 0x50;
pub const OP_STRING: u8 = 0x51;
pub const OP_IDENTIFIER: u8 = 0x52;
pub const OP_IMPORT_STRING: u8 = 0x53;

/// Opcodes of tokens without a payload.
const PLAIN_TOKENS: [(u8, Token); 38] = [(OP_LET, Token::Let),
                                         (OP_PRINT, Token::Print),
                                         (OP_RAISE, Token::Raise),
                                         (OP_WARN, Token::Warn),
                                         (OP_INFO, Token::Info),
                                         (OP_WHILE, Token::While),
                                         (OP_IF, Token::If),
                                         (OP_ELSE, Token::Else),
                                         (OP_FUNC, Token::Func),
                                         (OP_RETURN, Token::Return),
                                         (OP_IMPORT, Token::Import),
                                         (OP_FOR, Token::For),
                                         (OP_IN, Token::In),
                                         (OP_TRUE, Token::True),
                                         (OP_FALSE, Token::False),
                                         (OP_AND, Token::And),
                                         (OP_OR, Token::Or),
                                         (OP_NOT, Token::Not),
                                         (OP_ASSIGN, Token::Assign),
                                         (OP_PLUS, Token::Plus),
                                         (OP_MINUS, Token::Minus),
                                         (OP_MULTIPLY, Token::Star),
                                         (OP_DIVIDE, Token::Slash),
                                         (OP_LT, Token::Less),
                                         (OP_GT, Token::Greater),
                                         (OP_LE, Token::LessEqual),
                                         (OP_GE, Token::GreaterEqual),
                                         (OP_EQ, Token::EqualEqual),
                                         (OP_NEQ, Token::BangEqual),
                                         (OP_SEMICOLON, Token::Semicolon),
                                         (OP_COMMA, Token::Comma),
                                         (OP_DOT, Token::Dot),
                                         (OP_LPAREN, Token::LParen),
                                         (OP_RPAREN, Token::RParen),
                                         (OP_LBRACE, Token::LBrace),
                                         (OP_RBRACE, Token::RBrace),
                                         (OP_LBRACKET, Token::LBracket),
                                         (OP_RBRACKET, Token::RBracket)];

/// Writes a token stream. [`Token::Eof`] and tokens that the lexer skips are
/// not encoded.
///
/// # Errors
/// Fails if a payload exceeds 65535 bytes or the writer fails.
pub fn write_tokens<W: Write>(out: W, tokens: &[(Token, usize)]) -> EncodeResult<()> {
    let mut out = ByteWriter::new(out);

    for (token, _) in tokens {
        match token {
            Token::Number(value) => {
                out.write_u8(OP_NUMBER)?;
                out.write_str(&value.to_string())?;
            },
            Token::Str(text) => {
                out.write_u8(OP_STRING)?;
                out.write_str(text)?;
            },
            Token::Identifier(name) => {
                out.write_u8(OP_IDENTIFIER)?;
                out.write_str(name)?;
            },
            Token::ImportStr(path) => {
                out.write_u8(OP_IMPORT_STRING)?;
                out.write_str(path)?;
            },
            Token::Eof | Token::Comment | Token::NewLine | Token::Ignored => {},
            plain => {
                if let Some((opcode, _)) = PLAIN_TOKENS.iter().find(|(_, t)| t == plain) {
                    out.write_u8(*opcode)?;
                }
            },
        }
    }

    Ok(())
}

/// Encodes a token stream into memory.
///
/// # Errors
/// Fails if a payload exceeds 65535 bytes.
///
/// # Example
/// ```
/// use splice::{codec::encode_tokens, interpreter::lexer::tokenize};
///
/// let tokens = tokenize("print 1;").unwrap();
/// let bytes = encode_tokens(&tokens).unwrap();
///
/// assert_eq!(bytes, vec![0x02, 0x50, 1, 0, b'1', 0x30]);
/// ```
pub fn encode_tokens(tokens: &[(Token, usize)]) -> EncodeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    write_tokens(&mut bytes, tokens)?;
    Ok(bytes)
}

/// Reads a token stream from any reader until it is exhausted.
///
/// # Errors
/// Fails on an unknown opcode, a truncated record, an invalid payload, or a
/// reader failure.
pub fn read_tokens<R: Read>(input: R) -> DecodeResult<Vec<Token>> {
    decode_with(StreamSource::new(input))
}

/// Decodes a token stream held in memory.
///
/// # Errors
/// Same as [`read_tokens`].
pub fn decode_tokens(bytes: &[u8]) -> DecodeResult<Vec<Token>> {
    decode_with(SliceSource::new(bytes))
}

fn decode_with<S: ByteSource>(mut source: S) -> DecodeResult<Vec<Token>> {
    let mut tokens = Vec::new();

    while let Some(opcode) = source.try_read_u8()? {
        let token = match opcode {
            OP_NUMBER => {
                let text = source.read_str("number literal")?;
                let value = text.parse::<f64>().map_err(|_| DecodeError::InvalidNumber { text })?;
                Token::Number(value)
            },
            OP_STRING => Token::Str(source.read_str("string literal")?),
            OP_IDENTIFIER => Token::Identifier(source.read_str("identifier")?),
            OP_IMPORT_STRING => Token::ImportStr(source.read_str("import string")?),
            _ => PLAIN_TOKENS.iter()
                             .find(|(code, _)| *code == opcode)
                             .map(|(_, token)| token.clone())
                             .ok_or(DecodeError::UnknownOpcode { opcode })?,
        };
        tokens.push(token);
    }

    debug!("read {} tokens from opcode stream", tokens.len());
    Ok(tokens)
}

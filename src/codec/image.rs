//! Layout of an AST image:
//!
//! ```text
//! "SPC\0"          4 bytes magic
//! version          u8, currently 1
//! node             recursive record
//! ```
//!
//! A node record is a tag byte followed by the node's fields in a fixed order.
//! Numbers are `f64`, strings are `u16` length-prefixed, lists are prefixed by
//! a `u32` count, and a missing optional child is the single byte `0xFF`.

use std::{
    io::{Read, Write},
    rc::Rc,
};

use log::debug;

use crate::{
    ast::{FunctionDef, MAX_NESTING, Node, Operator},
    codec::{
        DecodeResult, EncodeResult,
        bytes::{ByteSource, ByteWriter, SliceSource, StreamSource},
    },
    error::{DecodeError, EncodeError},
};

/// File signature of an AST image.
pub const MAGIC: [u8; 4] = *b"SPC\0";
/// Current format version.
pub const VERSION: u8 = 1;

const TAG_NUMBER: u8 = 0;
const TAG_STRING: u8 = 1;
const TAG_IDENTIFIER: u8 = 2;
const TAG_BINARY_OP: u8 = 3;
const TAG_LET: u8 = 4;
const TAG_ASSIGN: u8 = 5;
const TAG_PRINT: u8 = 6;
const TAG_READ: u8 = 7;
const TAG_WRITE: u8 = 8;
const TAG_RAISE: u8 = 9;
const TAG_WARN: u8 = 10;
const TAG_INFO: u8 = 11;
const TAG_WHILE: u8 = 12;
const TAG_IF: u8 = 13;
const TAG_BLOCK: u8 = 14;
const TAG_FUNC_DEF: u8 = 15;
const TAG_CALL: u8 = 16;
const TAG_RETURN: u8 = 17;
const TAG_IMPORT: u8 = 18;
const TAG_FOR: u8 = 19;
const TAG_ARRAY_LITERAL: u8 = 20;
const TAG_INDEX: u8 = 21;
const TAG_INDEX_ASSIGN: u8 = 22;
const TAG_NULL: u8 = 0xFF;

/// Writes `root` as an AST image to `out`.
///
/// Encoding recurses along the tree. Trees up to [`MAX_NESTING`] deep need
/// the stack of [`with_interpreter_stack`](crate::with_interpreter_stack).
///
/// # Errors
/// Fails if the tree is deeper than [`MAX_NESTING`], a string exceeds 65535
/// bytes, a list exceeds `u32::MAX` items, or the writer fails.
pub fn write_image<W: Write>(out: W, root: &Node) -> EncodeResult<()> {
    if root.depth() > MAX_NESTING {
        return Err(EncodeError::TooDeep);
    }

    let mut encoder = ImageEncoder { out: ByteWriter::new(out) };
    for byte in MAGIC {
        encoder.out.write_u8(byte)?;
    }
    encoder.out.write_u8(VERSION)?;
    encoder.write_node(root)
}

/// Encodes `root` into an in-memory AST image.
///
/// # Errors
/// Same as [`write_image`], minus writer failures.
///
/// # Example
/// ```
/// use splice::{ast::Node, codec::encode_image};
///
/// let bytes = encode_image(&Node::Number(1.0)).unwrap();
///
/// assert_eq!(&bytes[..5], b"SPC\0\x01");
/// assert_eq!(bytes[5], 0);
/// assert_eq!(bytes.len(), 14);
/// ```
pub fn encode_image(root: &Node) -> EncodeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    write_image(&mut bytes, root)?;
    Ok(bytes)
}

/// Reads an AST image from any reader.
///
/// Decoding recurses along the tree. Images up to [`MAX_NESTING`] deep need
/// the stack of [`with_interpreter_stack`](crate::with_interpreter_stack).
///
/// # Errors
/// Fails on a bad header, an unknown tag or operator, a missing required
/// child, invalid UTF-8, excessive nesting, or truncated input.
pub fn read_image<R: Read>(input: R) -> DecodeResult<Node> {
    decode_with(StreamSource::new(input))
}

/// Decodes an AST image held in memory.
///
/// # Errors
/// Same as [`read_image`].
///
/// # Example
/// ```
/// use splice::{
///     ast::Node,
///     codec::{decode_image, encode_image},
/// };
///
/// let root = Node::Block(vec![Node::Print(Box::new(Node::Str("hi".into())))]);
/// let bytes = encode_image(&root).unwrap();
///
/// assert_eq!(decode_image(&bytes).unwrap(), root);
/// ```
pub fn decode_image(bytes: &[u8]) -> DecodeResult<Node> {
    let root = decode_with(SliceSource::new(bytes))?;
    debug!("decoded AST image of {} bytes", bytes.len());
    Ok(root)
}

fn decode_with<S: ByteSource>(source: S) -> DecodeResult<Node> {
    let mut decoder = ImageDecoder { source, depth: 0 };

    let mut magic = [0; 4];
    decoder.source.read_into(&mut magic, "magic")?;
    if magic != MAGIC {
        return Err(DecodeError::BadMagic);
    }
    let version = decoder.source.read_u8("version")?;
    if version != VERSION {
        return Err(DecodeError::UnsupportedVersion { version });
    }

    decoder.read_required("root").map(|node| *node)
}

struct ImageEncoder<W> {
    out: ByteWriter<W>,
}

impl<W: Write> ImageEncoder<W> {
    fn write_optional(&mut self, node: Option<&Node>) -> EncodeResult<()> {
        match node {
            Some(node) => self.write_node(node),
            None => self.out.write_u8(TAG_NULL),
        }
    }

    fn write_list(&mut self, nodes: &[Node]) -> EncodeResult<()> {
        self.out.write_count(nodes.len())?;
        nodes.iter().try_for_each(|node| self.write_node(node))
    }

    fn write_tagged(&mut self, tag: u8, child: &Node) -> EncodeResult<()> {
        self.out.write_u8(tag)?;
        self.write_node(child)
    }

    fn write_node(&mut self, node: &Node) -> EncodeResult<()> {
        match node {
            Node::Number(value) => {
                self.out.write_u8(TAG_NUMBER)?;
                self.out.write_f64(*value)
            },
            Node::Str(text) => {
                self.out.write_u8(TAG_STRING)?;
                self.out.write_str(text)
            },
            Node::Identifier(name) => {
                self.out.write_u8(TAG_IDENTIFIER)?;
                self.out.write_str(name)
            },
            Node::BinaryOp { op, left, right } => {
                self.out.write_u8(TAG_BINARY_OP)?;
                self.out.write_str(op.symbol())?;
                self.write_node(left)?;
                self.write_optional(right.as_deref())
            },
            Node::Let { name, value } | Node::Assign { name, value } => {
                let tag = if matches!(node, Node::Let { .. }) { TAG_LET } else { TAG_ASSIGN };
                self.out.write_u8(tag)?;
                self.out.write_str(name)?;
                self.write_node(value)
            },
            Node::Print(expr) => self.write_tagged(TAG_PRINT, expr),
            Node::Read(path) => self.write_tagged(TAG_READ, path),
            Node::Raise(expr) => self.write_tagged(TAG_RAISE, expr),
            Node::Warn(expr) => self.write_tagged(TAG_WARN, expr),
            Node::Info(expr) => self.write_tagged(TAG_INFO, expr),
            Node::Write { path, value } => {
                self.write_tagged(TAG_WRITE, path)?;
                self.write_optional(value.as_deref())
            },
            Node::While { condition, body } => {
                self.write_tagged(TAG_WHILE, condition)?;
                self.write_node(body)
            },
            Node::If { condition,
                       then_branch,
                       else_branch, } => {
                self.write_tagged(TAG_IF, condition)?;
                self.write_node(then_branch)?;
                self.write_optional(else_branch.as_deref())
            },
            Node::Block(statements) => {
                self.out.write_u8(TAG_BLOCK)?;
                self.write_list(statements)
            },
            Node::FuncDef(def) => {
                self.out.write_u8(TAG_FUNC_DEF)?;
                self.out.write_str(&def.name)?;
                self.out.write_count(def.params.len())?;
                for param in &def.params {
                    self.out.write_str(param)?;
                }
                self.write_node(&def.body)
            },
            Node::Call { name, args } => {
                self.out.write_u8(TAG_CALL)?;
                self.out.write_str(name)?;
                self.write_list(args)
            },
            Node::Return(value) => {
                self.out.write_u8(TAG_RETURN)?;
                self.write_optional(value.as_deref())
            },
            Node::Import(path) => {
                self.out.write_u8(TAG_IMPORT)?;
                self.out.write_str(path)
            },
            Node::For { var,
                        start,
                        end,
                        body, } => {
                self.out.write_u8(TAG_FOR)?;
                self.out.write_str(var)?;
                self.write_node(start)?;
                self.write_node(end)?;
                self.write_node(body)
            },
            Node::ArrayLiteral(elements) => {
                self.out.write_u8(TAG_ARRAY_LITERAL)?;
                self.write_list(elements)
            },
            Node::Index { target, index } => {
                self.write_tagged(TAG_INDEX, target)?;
                self.write_node(index)
            },
            Node::IndexAssign { target, index, value } => {
                self.write_tagged(TAG_INDEX_ASSIGN, target)?;
                self.write_node(index)?;
                self.write_node(value)
            },
        }
    }
}

struct ImageDecoder<S> {
    source: S,
    depth:  usize,
}

impl<S: ByteSource> ImageDecoder<S> {
    fn read_optional(&mut self) -> DecodeResult<Option<Node>> {
        let tag = self.source.read_u8("node tag")?;
        if tag == TAG_NULL {
            return Ok(None);
        }

        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(DecodeError::TooDeep);
        }
        let node = self.read_node(tag)?;
        self.depth -= 1;

        Ok(Some(node))
    }

    fn read_required(&mut self, parent: &'static str) -> DecodeResult<Box<Node>> {
        self.read_optional()?
            .map(Box::new)
            .ok_or(DecodeError::UnexpectedNull { node: parent })
    }

    fn read_boxed_optional(&mut self) -> DecodeResult<Option<Box<Node>>> {
        Ok(self.read_optional()?.map(Box::new))
    }

    fn read_list(&mut self, parent: &'static str) -> DecodeResult<Vec<Node>> {
        let count = self.source.read_u32("list count")?;
        // The count is untrusted; grow as records actually arrive.
        let mut nodes = Vec::new();
        for _ in 0..count {
            nodes.push(*self.read_required(parent)?);
        }
        Ok(nodes)
    }

    fn read_node(&mut self, tag: u8) -> DecodeResult<Node> {
        let node = match tag {
            TAG_NUMBER => Node::Number(self.source.read_f64("number")?),
            TAG_STRING => Node::Str(self.source.read_str("string")?),
            TAG_IDENTIFIER => Node::Identifier(self.source.read_str("identifier")?),
            TAG_BINARY_OP => {
                let symbol = self.source.read_str("operator")?;
                let op = Operator::from_symbol(&symbol).ok_or(DecodeError::UnknownOperator { symbol })?;
                Node::BinaryOp { op,
                                 left: self.read_required("binary operation")?,
                                 right: self.read_boxed_optional()? }
            },
            TAG_LET => Node::Let { name:  self.source.read_str("variable name")?,
                                   value: self.read_required("let")?, },
            TAG_ASSIGN => Node::Assign { name:  self.source.read_str("variable name")?,
                                         value: self.read_required("assignment")?, },
            TAG_PRINT => Node::Print(self.read_required("print")?),
            TAG_READ => Node::Read(self.read_required("read")?),
            TAG_WRITE => Node::Write { path:  self.read_required("write")?,
                                       value: self.read_boxed_optional()?, },
            TAG_RAISE => Node::Raise(self.read_required("raise")?),
            TAG_WARN => Node::Warn(self.read_required("warn")?),
            TAG_INFO => Node::Info(self.read_required("info")?),
            TAG_WHILE => Node::While { condition: self.read_required("while")?,
                                       body:      self.read_required("while")?, },
            TAG_IF => Node::If { condition:   self.read_required("if")?,
                                 then_branch: self.read_required("if")?,
                                 else_branch: self.read_boxed_optional()?, },
            TAG_BLOCK => Node::Block(self.read_list("block")?),
            TAG_FUNC_DEF => {
                let name = self.source.read_str("function name")?;
                let count = self.source.read_u32("parameter count")?;
                let mut params = Vec::new();
                for _ in 0..count {
                    params.push(self.source.read_str("parameter name")?);
                }
                let body = *self.read_required("function definition")?;
                Node::FuncDef(Rc::new(FunctionDef { name, params, body }))
            },
            TAG_CALL => Node::Call { name: self.source.read_str("function name")?,
                                     args: self.read_list("call")?, },
            TAG_RETURN => Node::Return(self.read_boxed_optional()?),
            TAG_IMPORT => Node::Import(self.source.read_str("import path")?),
            TAG_FOR => Node::For { var:   self.source.read_str("loop variable")?,
                                   start: self.read_required("for")?,
                                   end:   self.read_required("for")?,
                                   body:  self.read_required("for")?, },
            TAG_ARRAY_LITERAL => Node::ArrayLiteral(self.read_list("array literal")?),
            TAG_INDEX => Node::Index { target: self.read_required("index")?,
                                       index:  self.read_required("index")?, },
            TAG_INDEX_ASSIGN => Node::IndexAssign { target: self.read_required("index assignment")?,
                                                    index:  self.read_required("index assignment")?,
                                                    value:  self.read_required("index assignment")?, },
            _ => return Err(DecodeError::UnknownTag { tag }),
        };

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(body: &[u8]) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.push(VERSION);
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn unary_not_stores_null_right() {
        let node = Node::BinaryOp { op:    Operator::Not,
                                    left:  Box::new(Node::Number(0.0)),
                                    right: None, };
        let bytes = encode_image(&node).unwrap();

        assert_eq!(bytes[5..9], [TAG_BINARY_OP, 1, 0, b'!']);
        assert_eq!(bytes.last(), Some(&TAG_NULL));
        assert_eq!(decode_image(&bytes).unwrap(), node);
    }

    #[test]
    fn rejects_bad_header() {
        assert!(matches!(decode_image(b"SPB\0\x01\x00"), Err(DecodeError::BadMagic)));
        assert!(matches!(decode_image(b"SPC\0\x02\x00"),
                         Err(DecodeError::UnsupportedVersion { version: 2 })));
    }

    #[test]
    fn rejects_unknown_tag_and_operator() {
        assert!(matches!(decode_image(&image(&[23])), Err(DecodeError::UnknownTag { tag: 23 })));

        let bad_op = image(&[TAG_BINARY_OP, 1, 0, b'^']);
        assert!(matches!(decode_image(&bad_op), Err(DecodeError::UnknownOperator { .. })));
    }

    #[test]
    fn rejects_null_for_required_child() {
        let bytes = image(&[TAG_PRINT, TAG_NULL]);
        assert!(matches!(decode_image(&bytes),
                         Err(DecodeError::UnexpectedNull { node: "print" })));
    }

    fn nested_prints(depth: usize) -> Node {
        (1..depth).fold(Node::Number(0.0), |node, _| Node::Print(Box::new(node)))
    }

    #[test]
    fn nesting_limit_is_shared_with_the_parser() {
        let accepted = crate::with_interpreter_stack(|| {
                           let root = nested_prints(MAX_NESTING);
                           let bytes = encode_image(&root).unwrap();
                           decode_image(&bytes).unwrap() == root
                       }).unwrap();
        assert!(accepted);

        let refused = crate::with_interpreter_stack(|| {
                          matches!(encode_image(&nested_prints(MAX_NESTING + 1)),
                                   Err(EncodeError::TooDeep))
                      }).unwrap();
        assert!(refused);
    }

    #[test]
    fn rejects_excessive_nesting() {
        let mut body = vec![TAG_PRINT; MAX_NESTING];
        body.push(TAG_NUMBER);
        body.extend_from_slice(&0f64.to_le_bytes());
        let bytes = image(&body);

        let rejected = crate::with_interpreter_stack(|| {
                           matches!(decode_image(&bytes), Err(DecodeError::TooDeep))
                       }).unwrap();
        assert!(rejected);
    }

    #[test]
    fn stream_and_slice_agree() {
        let root = Node::Block(vec![Node::Let { name:  "a".into(),
                                                value: Box::new(Node::ArrayLiteral(vec![Node::Number(1.0)])), }]);
        let bytes = encode_image(&root).unwrap();

        assert_eq!(read_image(&bytes[..]).unwrap(), decode_image(&bytes).unwrap());
    }
}

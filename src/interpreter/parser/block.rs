use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement},
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. Parsing continues until a
/// closing `}` token is encountered. Stray `;` tokens are skipped.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
/// - `line`: Line number of the opening brace.
/// - `depth`: Nesting depth of the enclosing construct.
///
/// # Returns
/// A `Node::Block` containing all parsed statements.
///
/// # Errors
/// Returns `UnexpectedEndOfInput` when the input ends before the closing brace.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, line: usize, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some((Token::Semicolon, _)) => {
                tokens.next();
            },
            Some((Token::Eof, eof_line)) => {
                return Err(ParseError::UnexpectedEndOfInput { line: *eof_line });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
            Some(_) => statements.push(parse_statement(tokens, depth)?),
        }
    }

    Ok(Node::Block(statements))
}

/// Parses the body of an `if`, `else` or `while`.
///
/// A body starting with `{` is a block; anything else is a single statement.
pub fn parse_body<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LBrace, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        return parse_block(tokens, line, depth);
    }

    parse_statement(tokens, depth)
}

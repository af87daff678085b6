use std::iter::Peekable;

use log::debug;

use crate::{
    ast::{MAX_NESTING, Node},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or, block::parse_body, statement::parse_statement,
            utils::nested,
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// Statements are parsed until the token stream is exhausted or reaches
/// [`Token::Eof`]. Stray `;` tokens between statements are skipped. The result
/// is always a [`Node::Block`] holding the top-level statements in order.
///
/// The resulting tree is at most [`MAX_NESTING`] deep, so every parsed
/// program can be stored as an AST image.
///
/// # Parameters
/// - `tokens`: The `(Token, line)` pairs produced by a lexer.
///
/// # Returns
/// The root block of the program.
///
/// # Errors
/// Returns the first [`ParseError`] encountered. There is no recovery.
/// Programs nested deeper than [`MAX_NESTING`] fail with `TooDeep`.
///
/// # Example
/// ```
/// use splice::{
///     ast::Node,
///     interpreter::{lexer::tokenize, parser::core::parse_program},
/// };
///
/// let tokens = tokenize("print 1; print 2").unwrap();
/// let Node::Block(statements) = parse_program(&tokens).unwrap() else {
///     unreachable!()
/// };
///
/// assert_eq!(statements.len(), 2);
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Node> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        match iter.peek() {
            None | Some((Token::Eof, _)) => break,
            Some((Token::Semicolon, _)) => {
                iter.next();
            },
            Some((_, line)) => {
                let line = *line;
                let statement = parse_statement(&mut iter, 0)?;
                // Long operator chains grow the tree without deepening the
                // parser's own recursion.
                if statement.depth() >= MAX_NESTING {
                    return Err(ParseError::TooDeep { line });
                }
                statements.push(statement);
            },
        }
    }

    debug!("parsed {} top-level statements", statements.len());
    Ok(Node::Block(statements))
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `depth`: Nesting depth of the enclosing construct.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// Returns `TooDeep` when the expression is nested inside too many others.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let depth = nested(tokens, depth)?;
    parse_logical_or(tokens, depth)
}

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if <condition> <body>
///     else if <condition> <body>
///     else <body>
/// ```
/// A body is a braced block or a single statement. Every `else if` becomes an
/// `If` node nested in the else branch of the previous one.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `depth`: Nesting depth of the enclosing construct.
///
/// # Returns
/// A `Node::If` representing the whole chain.
///
/// # Errors
/// Propagates any errors from condition or body parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let depth = nested(tokens, depth)?;
    let condition = parse_expression(tokens, depth)?;
    let then_branch = parse_body(tokens, depth)?;

    let else_branch = match tokens.peek() {
        Some((Token::Else, _)) => {
            tokens.next();

            if let Some((Token::If, _)) = tokens.peek() {
                tokens.next();
                Some(Box::new(parse_if(tokens, depth)?))
            } else {
                Some(Box::new(parse_body(tokens, depth)?))
            }
        },

        _ => None,
    };

    Ok(Node::If { condition: Box::new(condition),
                  then_branch: Box::new(then_branch),
                  else_branch })
}

use std::iter::Peekable;

use crate::{
    ast::{Node, Operator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect_closing_paren, expect_token, nested, parse_comma_separated},
        },
    },
};

/// Parses prefix operators.
///
/// - `!x` (or `not x`) becomes a `BinaryOp` with [`Operator::Not`] and no
///   right operand.
/// - `-x` becomes `-1 * x`.
///
/// Prefix operators may be stacked (`!!x`, `--x`). Their operand is a postfix
/// expression, so `-a[0]` negates the element.
///
/// Grammar: `unary := ("!" | "-") unary | postfix`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `depth`: Nesting depth of the enclosing construct.
///
/// # Returns
/// The parsed expression.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let depth = nested(tokens, depth)?;
    match tokens.peek() {
        Some((Token::Not, _)) => {
            tokens.next();
            let operand = parse_unary(tokens, depth)?;
            Ok(Node::BinaryOp { op:    Operator::Not,
                                left:  Box::new(operand),
                                right: None, })
        },
        Some((Token::Minus, _)) => {
            tokens.next();
            let operand = parse_unary(tokens, depth)?;
            Ok(Node::BinaryOp { op:    Operator::Mul,
                                left:  Box::new(Node::Number(-1.0)),
                                right: Some(Box::new(operand)), })
        },
        _ => parse_postfix(tokens, depth),
    }
}

/// Parses a primary expression followed by any number of `[index]` suffixes.
///
/// Grammar: `postfix := primary ("[" expression "]")*`
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_primary(tokens, depth)?;

    while let Some((Token::LBracket, _)) = tokens.peek() {
        tokens.next();
        let index = parse_expression(tokens, depth)?;
        expect_token(tokens, &Token::RBracket)?;

        node = Node::Index { target: Box::new(node),
                             index:  Box::new(index), };
    }

    Ok(node)
}

/// Parses a primary expression.
///
/// Handles:
/// - number and string literals,
/// - `true` and `false`, lowered to `1` and `0`,
/// - identifiers and calls `name(args)`,
/// - `read(path)` and `write(path[, value])`,
/// - parenthesized expressions,
/// - array literals `[a, b, c]`.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `depth`: Nesting depth of the enclosing construct.
///
/// # Returns
/// A primary expression node.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the stream ends.
/// - `UnexpectedToken` for tokens that cannot start an expression.
/// - `ExpectedClosingParen` for unbalanced parentheses.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(value), _)) => Ok(Node::Number(*value)),
        Some((Token::Str(text), _)) => Ok(Node::Str(text.clone())),
        Some((Token::True, _)) => Ok(Node::Number(1.0)),
        Some((Token::False, _)) => Ok(Node::Number(0.0)),
        Some((Token::Identifier(name), _)) => {
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                return parse_call(tokens, name, depth);
            }
            Ok(Node::Identifier(name.clone()))
        },
        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens, depth)?;
            expect_closing_paren(tokens)?;
            Ok(expr)
        },
        Some((Token::LBracket, _)) => {
            let elements = parse_comma_separated(tokens,
                                                 |tokens| parse_expression(tokens, depth),
                                                 &Token::RBracket)?;
            Ok(Node::ArrayLiteral(elements))
        },
        Some((Token::Eof, line)) => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                               line:  *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses the argument list of a call, positioned after `(`.
///
/// `read` and `write` are recognized here and produce their own nodes; every
/// other name becomes a `Node::Call` resolved at runtime.
fn parse_call<'a, I>(tokens: &mut Peekable<I>, name: &str, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match name {
        "read" => {
            let path = parse_expression(tokens, depth)?;
            expect_closing_paren(tokens)?;
            Ok(Node::Read(Box::new(path)))
        },
        "write" => {
            let path = parse_expression(tokens, depth)?;
            let value = if let Some((Token::Comma, _)) = tokens.peek() {
                tokens.next();
                Some(Box::new(parse_expression(tokens, depth)?))
            } else {
                None
            };
            expect_closing_paren(tokens)?;
            Ok(Node::Write { path: Box::new(path),
                             value })
        },
        _ => {
            let args = parse_comma_separated(tokens,
                                             |tokens| parse_expression(tokens, depth),
                                             &Token::RParen)?;
            Ok(Node::Call { name: name.to_string(),
                            args })
        },
    }
}

use std::iter::Peekable;

use crate::{
    ast::{Node, Operator},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `depth`: Nesting depth of the enclosing construct.
///
/// # Returns
/// A left-associative `Node::BinaryOp` tree, or the operand itself.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, depth, parse_logical_and, &[Operator::Or])
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, depth, parse_equality, &[Operator::And])
}

/// Parses equality comparisons.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, depth, parse_relational, &[Operator::Equal, Operator::NotEqual])
}

/// Parses ordering comparisons.
///
/// The rule is: `relational := additive (("<" | ">" | "<=" | ">=") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           depth,
                           parse_additive,
                           &[Operator::Less,
                             Operator::Greater,
                             Operator::LessEqual,
                             Operator::GreaterEqual])
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, depth, parse_multiplicative, &[Operator::Add, Operator::Sub])
}

/// Parses multiplication and division expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, depth, parse_unary, &[Operator::Mul, Operator::Div])
}

/// Parses one precedence level of left-associative binary operators.
///
/// Operands are parsed with `next`, the level directly above. The tree grows
/// to the left inside a loop, so long operator chains do not deepen the call
/// stack.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 depth: usize,
                                 next: fn(&mut Peekable<I>, usize) -> ParseResult<Node>,
                                 operators: &[Operator])
                                 -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = next(tokens, depth)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && operators.contains(&op)
        {
            tokens.next();
            let right = next(tokens, depth)?;
            left = Node::BinaryOp { op,
                                    left: Box::new(left),
                                    right: Some(Box::new(right)) };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to the binary operator it denotes, if any.
///
/// `!` is not included; it is handled by the unary level.
///
/// # Example
/// ```
/// use splice::{
///     ast::Operator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Star), Some(Operator::Mul));
/// assert_eq!(token_to_binary_operator(&Token::Not), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<Operator> {
    match token {
        Token::Plus => Some(Operator::Add),
        Token::Minus => Some(Operator::Sub),
        Token::Star => Some(Operator::Mul),
        Token::Slash => Some(Operator::Div),
        Token::Less => Some(Operator::Less),
        Token::Greater => Some(Operator::Greater),
        Token::LessEqual => Some(Operator::LessEqual),
        Token::GreaterEqual => Some(Operator::GreaterEqual),
        Token::EqualEqual => Some(Operator::Equal),
        Token::BangEqual => Some(Operator::NotEqual),
        Token::And => Some(Operator::And),
        Token::Or => Some(Operator::Or),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> Node {
        let tokens = tokenize(source).unwrap();
        parse_logical_or(&mut tokens.iter().peekable(), 0).unwrap()
    }

    fn binary(op: Operator, left: Node, right: Node) -> Node {
        Node::BinaryOp { op,
                         left: Box::new(left),
                         right: Some(Box::new(right)) }
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(parse("1 + 2 * 3"),
                   binary(Operator::Add,
                          Node::Number(1.0),
                          binary(Operator::Mul, Node::Number(2.0), Node::Number(3.0))));
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(parse("8 - 4 - 2"),
                   binary(Operator::Sub,
                          binary(Operator::Sub, Node::Number(8.0), Node::Number(4.0)),
                          Node::Number(2.0)));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(parse("a || b && c"),
                   binary(Operator::Or,
                          Node::Identifier("a".into()),
                          binary(Operator::And,
                                 Node::Identifier("b".into()),
                                 Node::Identifier("c".into()))));
    }

    #[test]
    fn comparison_below_arithmetic() {
        assert_eq!(parse("x + 1 < 2 == 1"),
                   binary(Operator::Equal,
                          binary(Operator::Less,
                                 binary(Operator::Add,
                                        Node::Identifier("x".into()),
                                        Node::Number(1.0)),
                                 Node::Number(2.0)),
                          Node::Number(1.0)));
    }
}

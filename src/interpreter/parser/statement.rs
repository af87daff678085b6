use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FunctionDef, Node},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{parse_block, parse_body},
            core::{ParseResult, parse_expression, parse_if},
            utils::{expect_token, nested, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// The statement kind is chosen by its leading token:
/// - `let`, `print`, `raise`, `warn`, `info`,
/// - `while`, `if`, `for`,
/// - `func`, `return`, `import`,
/// - `{` for a nested block.
///
/// Anything else is parsed as an expression. An expression followed by `=`
/// turns into an assignment when it is an identifier or an index expression.
///
/// A trailing `;` is optional and consumed if present.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
/// - `depth`: Nesting depth of the enclosing construct, 0 at the top level.
///
/// # Returns
/// The parsed statement node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let depth = nested(tokens, depth)?;
    let Some((token, line)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    let statement = match token {
        Token::Let => {
            tokens.next();
            parse_let(tokens, depth)?
        },
        Token::Print => {
            tokens.next();
            Node::Print(Box::new(parse_expression(tokens, depth)?))
        },
        Token::Raise => {
            tokens.next();
            Node::Raise(Box::new(parse_expression(tokens, depth)?))
        },
        Token::Warn => {
            tokens.next();
            Node::Warn(Box::new(parse_expression(tokens, depth)?))
        },
        Token::Info => {
            tokens.next();
            Node::Info(Box::new(parse_expression(tokens, depth)?))
        },
        Token::While => {
            tokens.next();
            let condition = parse_expression(tokens, depth)?;
            let body = parse_body(tokens, depth)?;
            Node::While { condition: Box::new(condition),
                          body:      Box::new(body), }
        },
        Token::If => {
            tokens.next();
            parse_if(tokens, depth)?
        },
        Token::For => {
            tokens.next();
            parse_for(tokens, depth)?
        },
        Token::Func => {
            tokens.next();
            parse_function_definition(tokens, depth)?
        },
        Token::Return => {
            tokens.next();
            parse_return(tokens, depth)?
        },
        Token::Import => {
            tokens.next();
            parse_import(tokens, line)?
        },
        Token::LBrace => {
            tokens.next();
            parse_block(tokens, line, depth)?
        },
        _ => parse_expression_statement(tokens, line, depth)?,
    };

    if let Some((Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }

    Ok(statement)
}

/// Parses `let <identifier> = <expression>`, positioned after `let`.
///
/// # Errors
/// Returns a `ParseError` if the identifier or `=` is missing, or the
/// expression is malformed.
fn parse_let<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;
    expect_token(tokens, &Token::Assign)?;
    let value = parse_expression(tokens, depth)?;

    Ok(Node::Let { name,
                   value: Box::new(value) })
}

/// Parses `for <identifier> in <start> . <end> { body }`, positioned after
/// `for`.
///
/// The range is inclusive on both ends. Neither bound may contain a bare `.`,
/// since the dot separates them.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let var = parse_identifier(tokens)?;
    expect_token(tokens, &Token::In)?;
    let start = parse_expression(tokens, depth)?;
    expect_token(tokens, &Token::Dot)?;
    let end = parse_expression(tokens, depth)?;
    let line = expect_token(tokens, &Token::LBrace)?;
    let body = parse_block(tokens, line, depth)?;

    Ok(Node::For { var,
                   start: Box::new(start),
                   end: Box::new(end),
                   body: Box::new(body) })
}

/// Parses a function definition.
///
/// A definition has the form `func <name>(<param>, ...) { body }` and is
/// positioned after `func`. Parameters are plain identifiers.
///
/// # Returns
/// A `Node::FuncDef` sharing its definition through an `Rc`.
///
/// # Errors
/// Returns a `ParseError` if the name, parameter list or body is malformed.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;
    expect_token(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    let line = expect_token(tokens, &Token::LBrace)?;
    let body = parse_block(tokens, line, depth)?;

    Ok(Node::FuncDef(Rc::new(FunctionDef { name, params, body })))
}

/// Parses `return [expression]`, positioned after `return`.
///
/// The value is absent when `return` is directly followed by `;`, `}` or the
/// end of input.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        None | Some((Token::Semicolon | Token::RBrace | Token::Eof, _)) => Ok(Node::Return(None)),
        Some(_) => Ok(Node::Return(Some(Box::new(parse_expression(tokens, depth)?)))),
    }
}

/// Parses `import "<path>"`, positioned after `import`.
///
/// # Errors
/// Returns `ExpectedImportString` if no import string follows.
fn parse_import<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::ImportStr(path), _)) => Ok(Node::Import(path.clone())),
        Some((_, line)) => Err(ParseError::ExpectedImportString { line: *line }),
        None => Err(ParseError::ExpectedImportString { line }),
    }
}

/// Parses an expression statement, or an assignment if `=` follows.
///
/// - `name = value` becomes `Node::Assign`.
/// - `target[index] = value` becomes `Node::IndexAssign`.
///
/// # Errors
/// Returns `InvalidAssignmentTarget` when `=` follows any other expression.
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>,
                                     line: usize,
                                     depth: usize)
                                     -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens, depth)?;

    if !matches!(tokens.peek(), Some((Token::Assign, _))) {
        return Ok(expr);
    }
    tokens.next();
    let value = Box::new(parse_expression(tokens, depth)?);

    match expr {
        Node::Identifier(name) => Ok(Node::Assign { name, value }),
        Node::Index { target, index } => Ok(Node::IndexAssign { target, index, value }),
        _ => Err(ParseError::InvalidAssignmentTarget { line }),
    }
}

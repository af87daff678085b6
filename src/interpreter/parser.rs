/// Binary operator parsing.
///
/// Implements the precedence levels from logical `||` down to multiplication.
/// Every level is left-associative and builds its tree iteratively.
pub mod binary;

/// Block and body parsing.
///
/// Handles `{ ... }` statement sequences and the bodies of `if` and `while`,
/// which may also be a single statement.
pub mod block;

/// Core parser logic and entry points.
///
/// Includes the program entry point, expression parsing and `if` chains.
pub mod core;

/// Statement parsing.
///
/// Recognizes statements by their leading token and falls back to expression
/// statements, which also covers plain and indexed assignment.
pub mod statement;

/// Unary, postfix and primary expression parsing.
///
/// Handles `!`, unary minus, indexing, calls, literals, `read` and `write`.
pub mod unary;

/// Parser utility functions.
///
/// Provides helpers for expected tokens, identifiers and comma-separated lists.
pub mod utils;

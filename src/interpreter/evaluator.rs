/// Binary operator evaluation logic.
///
/// Handles every operator of the language: arithmetic, string concatenation,
/// comparisons and logical operators, including the unary `!`.
pub mod binary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, statement execution, expression evaluation
/// and the `Flow` type that carries `return` out of nested statements.
pub mod core;

/// Evaluation of `for` loops over inclusive integer ranges.
pub mod for_loop;

/// Function evaluation.
///
/// Resolves call names against builtins, natives and user functions, and
/// runs user functions with stack-discipline parameter binding.
pub mod function;

/// `import` of source units and native modules.
pub mod import;

/// Array indexing and indexed assignment.
pub mod index;

/// Program I/O: `print`, `info`, `warn`, `raise`, `read`, `write` and
/// `input`.
pub mod io;

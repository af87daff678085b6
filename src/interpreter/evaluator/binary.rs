/// Operator dispatch.
///
/// Chooses between string concatenation, string equality and the numeric
/// operators based on the operator and the operand types.
pub mod core;

/// Arithmetic on numbers.
pub mod scalar;

/// Equality and relational comparison.
pub mod comparison;

/// Logical operators on truthiness.
pub mod logic;

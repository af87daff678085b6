/// Built-in functions of the language.
///
/// Implements `len`, `append` and `input`. They are resolved by name at call
/// time, around the native registry.
pub mod builtin;

/// Call resolution and user-defined function calls.
pub mod core;

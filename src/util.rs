/// Numeric formatting and coercion helpers.
///
/// Numbers are the only scalar type in the language, and strings take part in
/// arithmetic by converting their numeric prefix. This module holds the two
/// conversions that define how numbers become text and text becomes numbers,
/// plus the truncation used for loop bounds and array indices.
pub mod num;

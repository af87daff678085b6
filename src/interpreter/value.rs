/// Growable array objects.
///
/// Defines the `Array` type behind `Value::Object`. Arrays track an explicit
/// capacity that doubles from four as elements are appended or assigned past
/// the end, and they fill gaps from sparse assignment with zeros.
pub mod array;

pub mod core;

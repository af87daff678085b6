use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    interpreter::value::array::Array,
    util::num::{format_number, to_number},
};

/// Nesting depth after which arrays are printed as `[...]`.
const DISPLAY_DEPTH: usize = 32;

/// Arrays currently being printed, outermost first.
type DisplayPath = Vec<*const RefCell<Array>>;

/// Represents a runtime value in the interpreter.
///
/// Numbers and strings are copied on assignment. Objects are shared: copying
/// a `Value::Object` copies the reference, so every holder sees updates made
/// through any of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string value.
    Str(String),
    /// A reference to a heap array.
    Object(Rc<RefCell<Array>>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Number(if v { 1.0 } else { 0.0 })
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Object(Rc::new(RefCell::new(v)))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Array::from(v).into()
    }
}

impl Value {
    /// The number zero, the default result of most statements.
    pub const ZERO: Self = Self::Number(0.0);

    /// Converts the value to a number.
    ///
    /// Strings convert through their numeric prefix and arrays convert to
    /// zero. This conversion never fails.
    ///
    /// # Example
    /// ```
    /// use splice::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("12abc").as_number(), 12.0);
    /// assert_eq!(Value::from(vec![Value::Number(1.0)]).as_number(), 0.0);
    /// ```
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Str(s) => to_number(s),
            Self::Object(_) => 0.0,
        }
    }

    /// Whether the value counts as true in a condition: its number is nonzero.
    ///
    /// `NaN` is nonzero and therefore true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        self.as_number() != 0.0
    }

    /// Whether the value is a string.
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Returns the shared array, if the value is an object.
    #[must_use]
    pub fn as_array(&self) -> Option<&Rc<RefCell<Array>>> {
        match self {
            Self::Object(array) => Some(array),
            _ => None,
        }
    }

    /// Name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Object(_) => "array",
        }
    }

    /// An array that already encloses itself on `path` prints as `[...]`.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, path: &mut DisplayPath) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Object(array) => {
                let ptr = Rc::as_ptr(array);
                if path.len() >= DISPLAY_DEPTH || path.contains(&ptr) {
                    return write!(f, "[...]");
                }
                path.push(ptr);
                write!(f, "[")?;
                for (i, item) in array.borrow().items().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f, path)?;
                }
                path.pop();
                write!(f, "]")
            },
        }
    }
}

impl fmt::Display for Value {
    /// Formats the value the way `print` shows it.
    ///
    /// Numbers use the general six-digit notation, strings are written as is,
    /// and arrays list their elements in brackets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::from("hi").to_string(), "hi");

        let nested = Value::from(vec![Value::Number(1.0),
                                      Value::from("a"),
                                      Value::from(vec![Value::Number(0.5)])]);
        assert_eq!(nested.to_string(), "[1, a, [0.5]]");
    }

    #[test]
    fn self_containing_array_display_terminates() {
        let array = Value::from(Array::new());
        if let Some(inner) = array.as_array() {
            inner.borrow_mut().push(array.clone()).unwrap();
        }
        assert_eq!(array.to_string(), "[[...]]");

        if let Some(inner) = array.as_array() {
            inner.borrow_mut().push(array.clone()).unwrap();
        }
        assert_eq!(array.to_string(), "[[...], [...]]");

        // Break the cycles so the test does not leak.
        if let Some(inner) = array.as_array() {
            inner.borrow_mut().set(0, Value::ZERO).unwrap();
            inner.borrow_mut().set(1, Value::ZERO).unwrap();
        }
    }

    #[test]
    fn shared_arrays_are_printed_in_full() {
        let shared = Value::from(vec![Value::Number(1.0)]);
        let outer = Value::from(vec![shared.clone(), shared]);

        assert_eq!(outer.to_string(), "[[1], [1]]");
    }

    #[test]
    fn objects_are_shared() {
        let a = Value::from(Array::new());
        let b = a.clone();
        if let Some(array) = b.as_array() {
            array.borrow_mut().push(Value::Number(1.0)).unwrap();
        }

        assert_eq!(a.to_string(), "[1]");
    }

    #[test]
    fn truthiness() {
        assert!(Value::Number(-1.0).is_truthy());
        assert!(!Value::from("0").is_truthy());
        assert!(Value::from("3 apples").is_truthy());
        assert!(!Value::from(Vec::<Value>::new()).is_truthy());
    }
}

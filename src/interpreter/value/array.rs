use std::collections::TryReserveError;

use crate::interpreter::value::core::Value;

/// Capacity of an array that grows from empty.
pub const INITIAL_CAPACITY: usize = 4;

/// A growable sequence of values with an explicit capacity.
///
/// The capacity is part of the language's observable model rather than an
/// allocation detail: it starts at the literal's element count, and whenever
/// an append or an index assignment needs room it doubles, starting from
/// [`INITIAL_CAPACITY`]. `len() <= capacity()` always holds.
#[derive(Debug, Clone, Default)]
pub struct Array {
    items:    Vec<Value>,
    capacity: usize,
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        let capacity = items.len();
        Self { items, capacity }
    }
}

impl Array {
    /// Creates an empty array with zero capacity.
    #[must_use]
    pub const fn new() -> Self {
        Self { items:    Vec::new(),
               capacity: 0, }
    }

    /// Number of stored elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The stored elements.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Returns a copy of the element at `index`, or `None` when the index is
    /// negative or past the end.
    ///
    /// # Example
    /// ```
    /// use splice::interpreter::value::{array::Array, core::Value};
    ///
    /// let array = Array::from(vec![Value::Number(7.0)]);
    ///
    /// assert_eq!(array.get(0), Some(Value::Number(7.0)));
    /// assert_eq!(array.get(1), None);
    /// assert_eq!(array.get(-1), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: i64) -> Option<Value> {
        usize::try_from(index).ok().and_then(|i| self.items.get(i)).cloned()
    }

    /// Appends a value, doubling the capacity when full.
    ///
    /// # Errors
    /// Fails if the grown array cannot be allocated.
    ///
    /// # Example
    /// ```
    /// use splice::interpreter::value::{array::Array, core::Value};
    ///
    /// let mut array = Array::new();
    /// array.push(Value::Number(1.0)).unwrap();
    ///
    /// assert_eq!(array.len(), 1);
    /// assert_eq!(array.capacity(), 4);
    /// ```
    pub fn push(&mut self, value: Value) -> Result<(), TryReserveError> {
        if self.items.len() >= self.capacity {
            self.grow_to(self.items.len())?;
        }
        self.items.push(value);
        Ok(())
    }

    /// Stores `value` at `index`.
    ///
    /// Assigning past the end extends the array; the elements between the old
    /// end and `index` become number zero.
    ///
    /// # Errors
    /// Fails if the grown array cannot be allocated. The array is unchanged
    /// in that case.
    ///
    /// # Example
    /// ```
    /// use splice::interpreter::value::{array::Array, core::Value};
    ///
    /// let mut array = Array::new();
    /// array.set(5, Value::Number(9.0)).unwrap();
    ///
    /// assert_eq!(array.len(), 6);
    /// assert_eq!(array.capacity(), 8);
    /// assert_eq!(array.get(3), Some(Value::Number(0.0)));
    /// ```
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), TryReserveError> {
        if index < self.items.len() {
            self.items[index] = value;
            return Ok(());
        }

        if index >= self.capacity {
            self.grow_to(index)?;
        }
        self.items.resize(index, Value::Number(0.0));
        self.items.push(value);
        Ok(())
    }

    /// Doubles the capacity until `index` fits.
    fn grow_to(&mut self, index: usize) -> Result<(), TryReserveError> {
        let mut capacity = self.capacity;
        while capacity <= index {
            capacity = if capacity == 0 {
                INITIAL_CAPACITY
            } else {
                capacity.saturating_mul(2)
            };
        }
        self.items.try_reserve_exact(capacity - self.items.len())?;
        self.capacity = capacity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_capacity_matches_count() {
        let array = Array::from(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(array.capacity(), 2);
    }

    #[test]
    fn appends_double_capacity() {
        let mut array = Array::from(vec![Value::Number(1.0), Value::Number(2.0)]);
        array.push(Value::Number(3.0)).unwrap();
        assert_eq!(array.capacity(), 4);

        for i in 0..2 {
            array.push(Value::Number(f64::from(i))).unwrap();
        }
        assert_eq!(array.len(), 5);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn overwrite_keeps_length() {
        let mut array = Array::from(vec![Value::Number(1.0)]);
        array.set(0, Value::Str("x".into())).unwrap();

        assert_eq!(array.items(), &[Value::Str("x".into())]);
        assert_eq!(array.capacity(), 1);
    }

    #[test]
    fn impossible_growth_fails_cleanly() {
        let mut array = Array::from(vec![Value::Number(1.0)]);

        assert!(array.set(usize::MAX / 2, Value::ZERO).is_err());
        assert_eq!(array.len(), 1);
        assert_eq!(array.capacity(), 1);
    }
}

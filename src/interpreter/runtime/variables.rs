use crate::interpreter::value::core::Value;

/// A flat table of `(name, value)` slots.
///
/// Later slots shadow earlier ones with the same name. There are no nested
/// scopes: a function call records [`VariableTable::len`] before binding its
/// parameters and calls [`VariableTable::truncate`] with it afterwards.
///
/// # Example
/// ```
/// use splice::interpreter::{runtime::VariableTable, value::core::Value};
///
/// let mut vars = VariableTable::new();
/// vars.set("x", Value::Number(1.0));
///
/// let saved = vars.len();
/// vars.bind("x", Value::Number(2.0));
/// assert_eq!(vars.get("x"), Some(&Value::Number(2.0)));
///
/// vars.truncate(saved);
/// assert_eq!(vars.get("x"), Some(&Value::Number(1.0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    slots: Vec<(String, Value)>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Returns the value of the most recent slot named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|i| &self.slots[i].1)
    }

    /// Overwrites the most recent slot named `name`, or pushes a new slot if
    /// there is none.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.position(name) {
            Some(i) => self.slots[i].1 = value,
            None => self.slots.push((name.to_string(), value)),
        }
    }

    /// Pushes a new slot even if the name already exists.
    pub fn bind(&mut self, name: &str, value: Value) {
        self.slots.push((name.to_string(), value));
    }

    /// Number of slots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table has no slots.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Discards every slot above `len`.
    pub fn truncate(&mut self, len: usize) {
        self.slots.truncate(len);
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().rposition(|(slot, _)| slot == name)
    }
}

use std::{collections::HashMap, rc::Rc};

use crate::ast::FunctionDef;

/// User-defined functions by name.
///
/// Definitions are shared with the syntax tree that declared them, so
/// registering a function never copies its body. Defining a name again
/// replaces the earlier definition.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Rc<FunctionDef>>,
}

impl FunctionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { functions: HashMap::new() }
    }

    /// Registers `def` under its own name.
    pub fn define(&mut self, def: Rc<FunctionDef>) {
        self.functions.insert(def.name.clone(), def);
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.functions.get(name).cloned()
    }

    /// Whether a function with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of defined functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no function is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;

    fn def(name: &str, body: f64) -> Rc<FunctionDef> {
        Rc::new(FunctionDef { name:   name.into(),
                              params: Vec::new(),
                              body:   Node::Block(vec![Node::Return(Some(Box::new(Node::Number(body))))]), })
    }

    #[test]
    fn last_definition_wins() {
        let mut functions = FunctionTable::new();
        functions.define(def("f", 1.0));
        functions.define(def("f", 2.0));

        assert_eq!(functions.len(), 1);
        assert_eq!(functions.get("f"), Some(def("f", 2.0)));
        assert!(!functions.contains("g"));
    }
}

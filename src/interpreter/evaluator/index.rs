use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::truncate,
};

impl Context {
    /// Evaluates `target[index]`.
    ///
    /// The index is truncated toward zero. Reading outside the array,
    /// including at a negative index, yields number zero.
    ///
    /// # Errors
    /// Returns `TypeError` if the target is not an array.
    pub(crate) fn eval_index(&mut self, target: &Node, index: &Node) -> EvalResult<Value> {
        let target = self.evaluate(target)?;
        let index = truncate(self.evaluate(index)?.as_number());

        let Some(array) = target.as_array() else {
            return Err(RuntimeError::TypeError { details: format!("cannot index a {}",
                                                                  target.type_name()), });
        };
        let item = array.borrow().get(index);
        Ok(item.unwrap_or(Value::ZERO))
    }

    /// Evaluates `name[index] = value`.
    ///
    /// The array is looked up before the index and the value are evaluated.
    /// Assigning past the end grows the array and fills the gap with zeros.
    ///
    /// # Returns
    /// Number 1.
    ///
    /// # Errors
    /// - `TypeError` if the target is not a plain identifier, or the variable
    ///   does not hold an array.
    /// - `NegativeIndex` if the truncated index is below zero.
    /// - `ArrayTooLarge` if the array cannot grow to reach the index.
    pub(crate) fn eval_index_assign(&mut self,
                                    target: &Node,
                                    index: &Node,
                                    value: &Node)
                                    -> EvalResult<Value> {
        let Node::Identifier(name) = target else {
            return Err(RuntimeError::TypeError { details: format!("cannot assign into a {} expression",
                                                                  target.kind()), });
        };
        let array = match self.variables.get(name) {
            Some(Value::Object(array)) => array.clone(),
            Some(other) => {
                return Err(RuntimeError::TypeError { details: format!("'{name}' is a {}, not an array",
                                                                      other.type_name()), });
            },
            None => {
                return Err(RuntimeError::TypeError { details: format!("'{name}' is not an array") });
            },
        };

        let index = truncate(self.evaluate(index)?.as_number());
        let value = self.evaluate(value)?;

        let Ok(index) = usize::try_from(index) else {
            return Err(RuntimeError::NegativeIndex { index });
        };
        array.borrow_mut()
             .set(index, value)
             .map_err(|_| RuntimeError::ArrayTooLarge { len: index.saturating_add(1) })?;

        Ok(Value::Number(1.0))
    }
}

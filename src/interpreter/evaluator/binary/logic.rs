use crate::{
    ast::Operator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a logical operator.
    ///
    /// Operands are truthy when their number is nonzero. `!` only looks at
    /// the left operand.
    ///
    /// # Example
    /// ```
    /// use splice::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let yes = Value::Number(2.0);
    /// let no = Value::from("0");
    ///
    /// assert_eq!(Context::eval_logic(Operator::Or, &yes, &no), Value::Number(1.0));
    /// assert_eq!(Context::eval_logic(Operator::And, &yes, &no), Value::Number(0.0));
    /// ```
    #[must_use]
    pub fn eval_logic(op: Operator, left: &Value, right: &Value) -> Value {
        match op {
            Operator::And => Value::from(left.is_truthy() && right.is_truthy()),
            Operator::Or => Value::from(left.is_truthy() || right.is_truthy()),
            Operator::Not => Value::from(!left.is_truthy()),
            _ => Value::ZERO,
        }
    }
}

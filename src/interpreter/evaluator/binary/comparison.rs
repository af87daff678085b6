use crate::{
    ast::Operator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// For `==` and `!=`, the stringified operands are compared when either
    /// operand is a string, so `"1" == 1` holds and `"1.0" == 1` does not.
    /// Every other comparison converts both operands to numbers. Any
    /// comparison involving `NaN` is false except `!=`.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    ///
    /// # Returns
    /// Number 1 if the comparison holds, number 0 otherwise.
    ///
    /// # Example
    /// ```
    /// use splice::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Number(3.0);
    /// let b = Value::from("5");
    ///
    /// assert_eq!(Context::eval_comparison(Operator::Less, &a, &b), Value::Number(1.0));
    /// assert_eq!(Context::eval_comparison(Operator::Equal, &a, &b), Value::Number(0.0));
    /// ```
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn eval_comparison(op: Operator, left: &Value, right: &Value) -> Value {
        if matches!(op, Operator::Equal | Operator::NotEqual) && (left.is_str() || right.is_str()) {
            let equal = left.to_string() == right.to_string();
            return Value::from(equal == (op == Operator::Equal));
        }

        let (l, r) = (left.as_number(), right.as_number());
        let holds = match op {
            Operator::Equal => l == r,
            Operator::NotEqual => l != r,
            Operator::Less => l < r,
            Operator::Greater => l > r,
            Operator::LessEqual => l <= r,
            Operator::GreaterEqual => l >= r,
            _ => false,
        };
        Value::from(holds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_equality() {
        let one = Value::Number(1.0);
        assert_eq!(Context::eval_comparison(Operator::Equal, &Value::from("1"), &one),
                   Value::Number(1.0));
        assert_eq!(Context::eval_comparison(Operator::NotEqual, &Value::from("ab"), &Value::from("ab")),
                   Value::Number(0.0));
    }

    #[test]
    fn nan_is_unequal() {
        let nan = Value::Number(f64::NAN);
        assert_eq!(Context::eval_comparison(Operator::Equal, &nan, &nan), Value::Number(0.0));
        assert_eq!(Context::eval_comparison(Operator::NotEqual, &nan, &nan), Value::Number(1.0));
    }
}

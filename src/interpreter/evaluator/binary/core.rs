use crate::{
    ast::Operator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Both operands have already been evaluated; no operator short-circuits.
    /// A unary `!` arrives here with a right operand of number zero.
    ///
    /// - `+` concatenates the stringified operands when either is a string.
    /// - `==` and `!=` compare the stringified operands when either is a
    ///   string.
    /// - Everything else converts both operands to numbers.
    ///
    /// Comparisons and logical operators yield 1 or 0.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The result value. Operators never fail.
    ///
    /// # Example
    /// ```
    /// use splice::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(Operator::Add, &Value::Number(1.0), &Value::from("2"));
    /// assert_eq!(sum, Value::from("12"));
    ///
    /// let product = Context::eval_binary(Operator::Mul, &Value::from("3"), &Value::Number(4.0));
    /// assert_eq!(product, Value::Number(12.0));
    /// ```
    #[must_use]
    pub fn eval_binary(op: Operator, left: &Value, right: &Value) -> Value {
        use Operator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, Not, NotEqual, Or,
            Sub,
        };

        match op {
            Add if left.is_str() || right.is_str() => Value::Str(format!("{left}{right}")),
            Add | Sub | Mul | Div => {
                Value::Number(Self::eval_arithmetic(op, left.as_number(), right.as_number()))
            },
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },
            And | Or | Not => Self::eval_logic(op, left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn concatenation_formats_numbers() {
        assert_eq!(Context::eval_binary(Operator::Add, &Value::from("x"), &num(1.0)),
                   Value::from("x1"));
        assert_eq!(Context::eval_binary(Operator::Add, &num(0.5), &Value::from("!")),
                   Value::from("0.5!"));
    }

    #[test]
    fn strings_coerce_for_arithmetic() {
        assert_eq!(Context::eval_binary(Operator::Sub, &Value::from("10"), &num(4.0)), num(6.0));
        assert_eq!(Context::eval_binary(Operator::Mul, &Value::from("abc"), &num(4.0)), num(0.0));
    }

    #[test]
    fn unary_not() {
        assert_eq!(Context::eval_binary(Operator::Not, &num(0.0), &Value::ZERO), num(1.0));
        assert_eq!(Context::eval_binary(Operator::Not, &Value::from("2"), &Value::ZERO), num(0.0));
    }
}

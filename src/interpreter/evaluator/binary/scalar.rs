use crate::{ast::Operator, interpreter::evaluator::core::Context};

impl Context {
    /// Applies an arithmetic operator to two numbers.
    ///
    /// Division follows IEEE 754: dividing by zero gives an infinity or `NaN`
    /// rather than an error.
    ///
    /// # Example
    /// ```
    /// use splice::{ast::Operator, interpreter::evaluator::core::Context};
    ///
    /// assert_eq!(Context::eval_arithmetic(Operator::Div, 7.0, 2.0), 3.5);
    /// assert!(Context::eval_arithmetic(Operator::Div, 1.0, 0.0).is_infinite());
    /// ```
    #[must_use]
    pub fn eval_arithmetic(op: Operator, left: f64, right: f64) -> f64 {
        match op {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => left / right,
            _ => 0.0,
        }
    }
}

use crate::{
    ast::Node,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
    util::num::{i64_to_f64, truncate},
};

impl Context {
    /// Executes `for <var> in <start> . <end> { body }`.
    ///
    /// Both bounds are evaluated once and truncated toward zero. The loop
    /// counts upward over the inclusive range, storing the counter in `var`
    /// before each run of the body. The variable is stored like an
    /// assignment, so it overwrites an existing variable of the same name and
    /// keeps its last value after the loop. An empty range does not touch it.
    ///
    /// # Parameters
    /// - `var`: Loop variable name.
    /// - `start`: Lower bound expression.
    /// - `end`: Upper bound expression.
    /// - `body`: Loop body.
    ///
    /// # Returns
    /// [`Flow::Return`] if the body executed `return`, otherwise
    /// [`Flow::Normal`].
    ///
    /// # Example
    /// ```
    /// use splice::{
    ///     ast::Node,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::new();
    /// let body = Node::Block(Vec::new());
    ///
    /// context.execute_for("i", &Node::Number(1.9), &Node::Number(3.2), &body).unwrap();
    /// assert_eq!(context.variable("i"), Value::Number(3.0));
    /// ```
    pub fn execute_for(&mut self,
                       var: &str,
                       start: &Node,
                       end: &Node,
                       body: &Node)
                       -> EvalResult<Flow> {
        let start = truncate(self.evaluate(start)?.as_number());
        let end = truncate(self.evaluate(end)?.as_number());

        for counter in start..=end {
            self.variables.set(var, Value::Number(i64_to_f64(counter)));
            if let Flow::Return(value) = self.execute(body)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }
}

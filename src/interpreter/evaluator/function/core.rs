use log::trace;

use crate::{
    ast::{FunctionDef, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            function::builtin,
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context and the evaluated arguments.
type BuiltinFn = fn(&mut Context, &[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// A call whose argument count does not fit is not an error: the name is
/// resolved further as if the builtin did not exist.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    AtMost(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtMost(m) => n <= m,
        }
    }
}

struct BuiltinDef {
    name:  &'static str,
    arity: Arity,
    func:  BuiltinFn,
}

/// Builtins that take precedence over natives.
static LEADING_BUILTINS: &[BuiltinDef] =
    &[BuiltinDef { name:  "len",
                   arity: Arity::Exact(1),
                   func:  builtin::len, },
      BuiltinDef { name:  "append",
                   arity: Arity::Exact(2),
                   func:  builtin::append, }];

/// Builtins that natives may shadow.
static TRAILING_BUILTINS: &[BuiltinDef] = &[BuiltinDef { name:  "input",
                                                         arity: Arity::AtMost(1),
                                                         func:  builtin::input, }];

fn find_builtin(table: &'static [BuiltinDef], name: &str, argc: usize) -> Option<BuiltinFn> {
    table.iter()
         .find(|b| b.name == name && b.arity.check(argc))
         .map(|b| b.func)
}

impl Context {
    /// Evaluates a function call.
    ///
    /// The name is resolved in a fixed order:
    /// 1. `len` with one argument and `append` with two,
    /// 2. the native registry,
    /// 3. `input` with at most one argument,
    /// 4. user-defined functions.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `args`: Argument expressions, not yet evaluated.
    ///
    /// # Returns
    /// The function result.
    ///
    /// # Errors
    /// Returns `UndefinedFunction` if nothing matches, or any error raised
    /// by the arguments or the function itself.
    pub(crate) fn eval_call(&mut self, name: &str, args: &[Node]) -> EvalResult<Value> {
        if let Some(func) = find_builtin(LEADING_BUILTINS, name, args.len()) {
            let values = self.evaluate_all(args)?;
            return func(self, &values);
        }

        if let Some(native) = self.natives.get(name) {
            let values = self.evaluate_all(args)?;
            trace!("calling native '{name}' with {} arguments", values.len());
            return native(&values);
        }

        if let Some(func) = find_builtin(TRAILING_BUILTINS, name, args.len()) {
            let values = self.evaluate_all(args)?;
            return func(self, &values);
        }

        let def = self.functions
                      .get(name)
                      .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string() })?;
        self.call_user_defined_function(&def, args)
    }

    /// Executes a user-defined function.
    ///
    /// Only as many arguments as the function has parameters are evaluated;
    /// extra arguments are ignored entirely. Missing arguments are number
    /// zero. Each parameter is bound as a new variable on top of the table,
    /// and the table is truncated back to its previous length when the call
    /// ends, whether it returned, fell off the end or failed.
    ///
    /// # Returns
    /// The returned value, or number zero if the body ends without `return`.
    ///
    /// # Errors
    /// Returns `CallDepthExceeded` when calls nest deeper than the context
    /// allows.
    fn call_user_defined_function(&mut self, def: &FunctionDef, args: &[Node]) -> EvalResult<Value> {
        if self.depth >= self.max_call_depth() {
            return Err(RuntimeError::CallDepthExceeded { depth: self.max_call_depth() });
        }

        let mut values = Vec::with_capacity(def.params.len());
        for i in 0..def.params.len() {
            let value = match args.get(i) {
                Some(arg) => self.evaluate(arg)?,
                None => Value::ZERO,
            };
            values.push(value);
        }

        let saved = self.variables.len();
        for (param, value) in def.params.iter().zip(values) {
            self.variables.bind(param, value);
        }
        trace!("calling '{}' at depth {}", def.name, self.depth + 1);

        self.depth += 1;
        let flow = self.execute(&def.body);
        self.depth -= 1;
        self.variables.truncate(saved);

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::ZERO),
        }
    }

    /// Evaluates argument expressions from left to right.
    fn evaluate_all(&mut self, args: &[Node]) -> EvalResult<Vec<Value>> {
        args.iter().map(|arg| self.evaluate(arg)).collect()
    }
}

use std::{
    io::{self, BufRead, Write},
    rc::Rc,
};

use log::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        runtime::{
            FsLoader, FunctionTable, ModuleRegistry, NativeFn, NativeRegistry, SourceLoader,
            VariableTable,
        },
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested user function calls.
///
/// Sized for the stack of [`with_interpreter_stack`](crate::with_interpreter_stack).
pub const MAX_CALL_DEPTH: usize = 5_000;

/// How a statement finished.
///
/// `return` unwinds through every enclosing statement as `Flow::Return`
/// until it reaches the function call, or the top level of the program.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` was executed with this value.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// The context owns everything a running program can observe: variables,
/// user functions, natives, native modules, the loader used by `import` and
/// the three I/O streams. Separate contexts share nothing.
///
/// ## Usage
///
/// A context is created once per program run and configured through its
/// builder methods:
///
/// ```
/// use splice::{
///     interpreter::{evaluator::core::Context, value::core::Value},
///     parse_source,
/// };
///
/// let program = parse_source("let x = 6 * 7;").unwrap();
/// let mut context = Context::new().with_output(Vec::new());
///
/// context.run(&program).unwrap();
/// assert_eq!(context.variable("x"), Value::Number(42.0));
/// ```
pub struct Context {
    /// Variable slots, most recent last.
    pub variables:      VariableTable,
    /// User-defined functions.
    pub functions:      FunctionTable,
    /// Natives callable by name.
    pub natives:        NativeRegistry,
    /// Native modules available to `import "<name>.h"`.
    pub modules:        ModuleRegistry,
    loader:             Box<dyn SourceLoader>,
    pub(crate) out:     Box<dyn Write>,
    pub(crate) err:     Box<dyn Write>,
    pub(crate) input:   Box<dyn BufRead>,
    pub(crate) depth:   usize,
    max_call_depth:     usize,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a context reading and writing the process's standard streams
    /// and importing from the file system.
    #[must_use]
    pub fn new() -> Self {
        Self { variables:      VariableTable::new(),
               functions:      FunctionTable::new(),
               natives:        NativeRegistry::new(),
               modules:        ModuleRegistry::new(),
               loader:         Box::new(FsLoader),
               out:            Box::new(io::stdout()),
               err:            Box::new(io::stderr()),
               input:          Box::new(io::BufReader::new(io::stdin())),
               depth:          0,
               max_call_depth: MAX_CALL_DEPTH, }
    }

    /// Sends `print` and `info` output to `out`.
    #[must_use]
    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Sends `warn` and `raise` output to `err`.
    #[must_use]
    pub fn with_error_output(mut self, err: impl Write + 'static) -> Self {
        self.err = Box::new(err);
        self
    }

    /// Reads `input()` lines from `input`.
    #[must_use]
    pub fn with_input(mut self, input: impl BufRead + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Loads imported source units through `loader`.
    #[must_use]
    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Sets the maximum nesting of user function calls.
    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Makes `func` callable from Splice code as `name`.
    pub fn register_native(&mut self, name: &str, func: NativeFn) {
        self.natives.register(name, func);
    }

    /// Makes the module `name` available to `import "<name>.h"`.
    pub fn register_module(&mut self, name: &str, functions: &[(&str, NativeFn)]) {
        self.modules.register(name, functions);
    }

    pub(crate) fn loader(&self) -> &dyn SourceLoader {
        self.loader.as_ref()
    }

    pub(crate) const fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Returns the current value of a variable.
    ///
    /// Unknown variables read as number zero.
    #[must_use]
    pub fn variable(&self, name: &str) -> Value {
        self.variables.get(name).cloned().unwrap_or(Value::ZERO)
    }

    /// Runs a whole program.
    ///
    /// A `return` at the top level stops the program early. Output streams
    /// are flushed before returning, also when the program fails.
    ///
    /// Evaluation recurses along the tree and through user calls. Run deep
    /// programs inside [`with_interpreter_stack`](crate::with_interpreter_stack).
    ///
    /// # Errors
    /// Returns the first runtime error; statements after it do not run.
    pub fn run(&mut self, program: &Node) -> EvalResult<()> {
        let result = self.execute(program);
        self.out.flush()?;
        self.err.flush()?;

        if let Flow::Return(value) = result? {
            trace!("program returned {value}");
        }
        Ok(())
    }

    /// Executes a statement.
    ///
    /// Blocks run their statements in order and stop at the first `return`,
    /// which is passed on to the caller as [`Flow::Return`]. Expression nodes
    /// are evaluated and their value is discarded.
    ///
    /// # Parameters
    /// - `node`: Statement to execute.
    ///
    /// # Returns
    /// [`Flow::Return`] if a `return` was executed, otherwise
    /// [`Flow::Normal`].
    pub fn execute(&mut self, node: &Node) -> EvalResult<Flow> {
        match node {
            Node::Block(statements) => {
                for statement in statements {
                    if let Flow::Return(value) = self.execute(statement)? {
                        return Ok(Flow::Return(value));
                    }
                }
            },
            Node::Let { name, value } | Node::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.variables.set(name, value);
            },
            Node::Print(expr) => {
                let text = self.evaluate(expr)?.to_string();
                self.print(&text)?;
            },
            Node::Info(expr) => {
                let text = self.evaluate(expr)?.to_string();
                self.info(&text)?;
            },
            Node::Warn(expr) => {
                let text = self.evaluate(expr)?.to_string();
                self.warn(&text)?;
            },
            Node::Raise(expr) => {
                let text = self.evaluate(expr)?.to_string();
                return Err(self.raise(text));
            },
            Node::Write { path, value } => self.write_file(path, value.as_deref())?,
            Node::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
            },
            Node::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.evaluate(condition)?.is_truthy() {
                    return self.execute(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.execute(else_branch);
                }
            },
            Node::For { var,
                        start,
                        end,
                        body, } => return self.execute_for(var, start, end, body),
            Node::FuncDef(def) => {
                trace!("defining function '{}'", def.name);
                self.functions.define(Rc::clone(def));
            },
            Node::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::ZERO,
                };
                return Ok(Flow::Return(value));
            },
            Node::Import(path) => self.import(path)?,
            _ => {
                self.evaluate(node)?;
            },
        }

        Ok(Flow::Normal)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Statement nodes
    /// are accepted as well: they are executed and yield number zero.
    ///
    /// # Parameters
    /// - `node`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Example
    /// ```
    /// use splice::{
    ///     ast::{Node, Operator},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::new();
    /// let sum = Node::BinaryOp { op:    Operator::Add,
    ///                            left:  Box::new(Node::Str("x".into())),
    ///                            right: Some(Box::new(Node::Number(1.0))), };
    ///
    /// assert_eq!(context.evaluate(&sum).unwrap(), Value::from("x1"));
    /// ```
    pub fn evaluate(&mut self, node: &Node) -> EvalResult<Value> {
        match node {
            Node::Number(n) => Ok(Value::Number(*n)),
            Node::Str(s) => Ok(Value::Str(s.clone())),
            Node::Identifier(name) => Ok(self.variable(name)),
            Node::BinaryOp { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = match right {
                    Some(right) => self.evaluate(right)?,
                    None => Value::ZERO,
                };
                Ok(Self::eval_binary(*op, &left, &right))
            },
            Node::Read(path) => self.read_file(path),
            Node::Call { name, args } => self.eval_call(name, args),
            Node::ArrayLiteral(elements) => {
                let items = elements.iter()
                                    .map(|element| self.evaluate(element))
                                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(items))
            },
            Node::Index { target, index } => self.eval_index(target, index),
            Node::IndexAssign { target,
                                index,
                                value, } => self.eval_index_assign(target, index, value),
            _ => {
                self.execute(node)?;
                Ok(Value::ZERO)
            },
        }
    }
}

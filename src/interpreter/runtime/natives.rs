use std::collections::HashMap;

use crate::interpreter::{evaluator::core::EvalResult, value::core::Value};

/// Signature of a native function.
///
/// A native receives the evaluated arguments of the call and returns a value
/// or a runtime error, which stops the program like any other.
pub type NativeFn = fn(&[Value]) -> EvalResult<Value>;

/// Natives every new registry starts with.
static DEFAULT_NATIVES: &[(&str, NativeFn)] = &[("noop", noop)];

/// Returns zero and ignores its arguments.
#[allow(clippy::unnecessary_wraps)]
fn noop(_args: &[Value]) -> EvalResult<Value> {
    Ok(Value::ZERO)
}

/// Normalises a native name: surrounding whitespace is removed and ASCII
/// letters are lower-cased.
///
/// # Example
/// ```
/// use splice::interpreter::runtime::natives::normalize_name;
///
/// assert_eq!(normalize_name("  Sqrt "), "sqrt");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Native functions by normalised name.
///
/// Registration and lookup both normalise the name, so `Noop`, `noop` and
/// ` NOOP ` all refer to the same native. Registering a name again replaces
/// the earlier function.
#[derive(Debug, Clone)]
pub struct NativeRegistry {
    natives: HashMap<String, NativeFn>,
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeRegistry {
    /// Creates a registry holding the default natives.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self { natives: HashMap::new() };
        for (name, func) in DEFAULT_NATIVES {
            registry.register(name, *func);
        }
        registry
    }

    /// Registers `func` under the normalised `name`.
    pub fn register(&mut self, name: &str, func: NativeFn) {
        self.natives.insert(normalize_name(name), func);
    }

    /// Looks up a native, normalising `name` first.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.natives.get(&normalize_name(name)).copied()
    }

    /// Number of registered natives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.natives.len()
    }

    /// Whether no native is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.natives.is_empty()
    }
}

/// Named tables of natives, registered by `import "<name>.h"`.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Vec<(String, NativeFn)>>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { modules: HashMap::new() }
    }

    /// Adds or replaces the module `name`.
    ///
    /// # Example
    /// ```
    /// use splice::interpreter::{
    ///     evaluator::core::EvalResult,
    ///     runtime::ModuleRegistry,
    ///     value::core::Value,
    /// };
    ///
    /// fn answer(_: &[Value]) -> EvalResult<Value> {
    ///     Ok(Value::Number(42.0))
    /// }
    ///
    /// let mut modules = ModuleRegistry::new();
    /// modules.register("deep", &[("answer", answer)]);
    ///
    /// assert_eq!(modules.get("deep").map(<[_]>::len), Some(1));
    /// assert!(modules.get("shallow").is_none());
    /// ```
    pub fn register(&mut self, name: &str, functions: &[(&str, NativeFn)]) {
        let table = functions.iter()
                             .map(|(name, func)| ((*name).to_string(), *func))
                             .collect();
        self.modules.insert(name.to_string(), table);
    }

    /// Returns the functions of module `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[(String, NativeFn)]> {
        self.modules.get(name).map(Vec::as_slice)
    }
}

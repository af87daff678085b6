use std::{path::Path, rc::Rc};

use log::debug;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::tokenize,
        parser::core::parse_program,
    },
};

impl Context {
    /// Executes `import "<path>"`.
    ///
    /// A path ending in `.h` names a native module: its file name without the
    /// extension is looked up in the module registry and every function of
    /// the module is registered as a native.
    ///
    /// Any other path names a source unit. It is loaded through the context's
    /// loader, tokenized and parsed on its own, and only its top-level
    /// function definitions are registered. Its other statements never run.
    ///
    /// # Errors
    /// - `UnknownNativeModule` if no module has the requested name.
    /// - `ImportFailed` if the loader cannot provide the unit.
    /// - `Lex` or `Parse` if the unit is not a valid program.
    pub fn import(&mut self, path: &str) -> EvalResult<()> {
        if let Some(module) = native_module_name(path) {
            return self.import_native_module(module);
        }

        let source = self.loader()
                         .load(path)
                         .map_err(|source| RuntimeError::ImportFailed { path: path.to_string(),
                                                                        source })?;
        let tokens = tokenize(&source)?;
        let program = parse_program(&tokens)?;

        let Node::Block(statements) = program else {
            return Ok(());
        };
        let mut count = 0;
        for statement in statements {
            if let Node::FuncDef(def) = statement {
                self.functions.define(Rc::clone(&def));
                count += 1;
            }
        }
        debug!("imported {count} functions from '{path}'");

        Ok(())
    }

    fn import_native_module(&mut self, name: &str) -> EvalResult<()> {
        let Some(functions) = self.modules.get(name) else {
            return Err(RuntimeError::UnknownNativeModule { name: name.to_string() });
        };
        let functions = functions.to_vec();

        for (function, func) in &functions {
            self.natives.register(function, *func);
        }
        debug!("imported {} natives from module '{name}'", functions.len());

        Ok(())
    }
}

/// Returns the module name for a native import path, or `None` for source
/// units.
///
/// ```text
/// "math.h"          -> Some("math")
/// "include/io.h"    -> Some("io")
/// "lib.sp"          -> None
/// ```
fn native_module_name(path: &str) -> Option<&str> {
    path.strip_suffix(".h")?;
    Path::new(path).file_stem().and_then(|stem| stem.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_names() {
        assert_eq!(native_module_name("math.h"), Some("math"));
        assert_eq!(native_module_name("include/io.h"), Some("io"));
        assert_eq!(native_module_name("lib.sp"), None);
        assert_eq!(native_module_name("header"), None);
    }
}

use std::{fs, io::Write};

use log::{debug, trace};

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Writes a `print` line to the output stream.
    pub(crate) fn print(&mut self, text: &str) -> EvalResult<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Writes an `info` line to the output stream.
    pub(crate) fn info(&mut self, text: &str) -> EvalResult<()> {
        writeln!(self.out, "[INFO] {text}")?;
        Ok(())
    }

    /// Writes a `warn` line to the error stream.
    ///
    /// The output stream is flushed first so that both streams stay in
    /// program order when they share a terminal.
    pub(crate) fn warn(&mut self, text: &str) -> EvalResult<()> {
        self.out.flush()?;
        writeln!(self.err, "[WARN] {text}")?;
        Ok(())
    }

    /// Reports a `raise` on the error stream and returns the error that stops
    /// the program.
    pub(crate) fn raise(&mut self, message: String) -> RuntimeError {
        let reported = self.out
                           .flush()
                           .and_then(|()| writeln!(self.err, "[ERROR] {message}"));
        match reported {
            Ok(()) => RuntimeError::Raised { message },
            Err(e) => e.into(),
        }
    }

    /// Evaluates `read(path)`.
    ///
    /// The path is stringified and the whole file is returned as a string.
    /// A file that cannot be read yields the empty string. Bytes that are not
    /// valid UTF-8 are replaced.
    pub(crate) fn read_file(&mut self, path: &Node) -> EvalResult<Value> {
        let path = self.evaluate(path)?.to_string();

        match fs::read(&path) {
            Ok(bytes) => {
                trace!("read {} bytes from '{path}'", bytes.len());
                Ok(Value::Str(String::from_utf8_lossy(&bytes).into_owned()))
            },
            Err(e) => {
                debug!("read('{path}') failed: {e}");
                Ok(Value::Str(String::new()))
            },
        }
    }

    /// Executes `write(path[, value])`.
    ///
    /// The file is created or truncated and receives the stringified value,
    /// or `0` when no value is given.
    ///
    /// # Errors
    /// - `TypeError` if the path is not a string.
    /// - `Io` if the file cannot be written.
    pub(crate) fn write_file(&mut self, path: &Node, value: Option<&Node>) -> EvalResult<()> {
        let path = match self.evaluate(path)? {
            Value::Str(path) => path,
            other => {
                return Err(RuntimeError::TypeError { details: format!("write() path must be a string, got {}",
                                                                      other.type_name()), });
            },
        };
        let text = match value {
            Some(value) => self.evaluate(value)?.to_string(),
            None => Value::ZERO.to_string(),
        };

        fs::write(&path, text.as_bytes()).map_err(|e| RuntimeError::Io { details: format!("cannot write '{path}': {e}") })?;
        trace!("wrote {} bytes to '{path}'", text.len());
        Ok(())
    }

    /// Reads one line for `input()`, without its line terminator.
    ///
    /// The prompt, if any, is written to the output stream without a newline.
    /// At the end of input the result is the empty string.
    pub(crate) fn read_line(&mut self, prompt: Option<&str>) -> EvalResult<String> {
        if let Some(prompt) = prompt {
            write!(self.out, "{prompt}")?;
        }
        self.out.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

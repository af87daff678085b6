#![allow(dead_code)]

use std::{cell::RefCell, io, rc::Rc};

use splice::{error::Error, interpreter::evaluator::core::Context, parse_source, with_interpreter_stack};

/// A writer whose bytes stay readable after the context takes ownership.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Everything a finished run produced.
pub struct Outcome {
    pub stdout: String,
    pub stderr: String,
    pub result: Result<(), Error>,
}

/// Runs `src` in the context built by `setup`, capturing both output streams.
///
/// Everything happens on the interpreter's own thread, so the context is
/// built there too.
pub fn run_in(setup: impl FnOnce() -> Context + Send, src: &str) -> Outcome {
    with_interpreter_stack(|| {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let mut context = setup().with_output(out.clone()).with_error_output(err.clone());

        let result = parse_source(src).and_then(|program| context.run(&program).map_err(Error::from));

        Outcome { stdout: out.contents(),
                  stderr: err.contents(),
                  result }
    }).unwrap()
}

/// Runs `src` in a fresh context with empty input, capturing both output
/// streams.
pub fn run(src: &str) -> Outcome {
    run_in(|| Context::new().with_input(io::empty()), src)
}

pub fn assert_success(src: &str) {
    if let Err(e) = run(src).result {
        panic!("Script failed: {e}");
    }
}

pub fn assert_failure(src: &str) {
    if run(src).result.is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

/// Asserts that `src` succeeds and prints exactly `expected` to stdout.
pub fn assert_output(src: &str, expected: &str) {
    let outcome = run(src);
    if let Err(e) = outcome.result {
        panic!("Script failed: {e}\nstdout so far:\n{}", outcome.stdout);
    }
    assert_eq!(outcome.stdout, expected, "unexpected output for:\n{src}");
}

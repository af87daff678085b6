//! # splice
//!
//! splice is a small scripting language toolchain written in Rust.
//! It tokenizes, parses and evaluates Splice programs, and persists them in
//! two binary forms: an AST image (`.spc`) and an opcode token stream
//! (`.spbc`).

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{fs, io, panic, path::Path, thread};

use log::{debug, info};

use crate::{
    ast::Node,
    error::Error,
    interpreter::{
        evaluator::core::Context,
        lexer::{tokenize, tokenize_bytecode},
        parser::core::parse_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum, the closed `Operator` set and
/// `FunctionDef`. The tree is built by the parser, walked by the evaluator
/// and persisted by the image codec.
///
/// # Responsibilities
/// - Defines one node kind per language construct.
/// - Keeps every child exclusively owned so the tree is acyclic.
/// - Shares function definitions with the function table through `Rc`.
pub mod ast;
/// Binary persistence of programs.
///
/// # Responsibilities
/// - Encodes and decodes the `.spc` AST image.
/// - Encodes and decodes the `.spbc` opcode token stream.
/// - Rejects truncated or malformed input without panicking.
pub mod codec;
/// Provides unified error types for every phase.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// encoding, decoding or running a program. Messages carry the source line
/// where one is known.
///
/// # Responsibilities
/// - Defines one error enum per phase.
/// - Aggregates them in the crate-level `Error`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, the runtime tables, value
/// representations and evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, runtime and evaluator.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// General numeric utilities.
///
/// # Responsibilities
/// - Formats numbers the way programs print them.
/// - Converts text to numbers by its longest numeric prefix.
/// - Converts between `f64` and integer types at the language's boundaries.
pub mod util;

/// Stack size of the thread used by [`with_interpreter_stack`].
pub const INTERPRETER_STACK_SIZE: usize = 512 * 1024 * 1024;

/// Runs `f` on a thread with an [`INTERPRETER_STACK_SIZE`] byte stack and
/// returns its result.
///
/// Parsing, the image codec and evaluation recurse along the syntax tree and
/// through nested function calls. Their limits, [`ast::MAX_NESTING`] and
/// [`MAX_CALL_DEPTH`](interpreter::evaluator::core::MAX_CALL_DEPTH), are sized
/// for this stack. The main thread of a process, and test threads even more
/// so, hold far less.
///
/// A panic inside `f` is resumed on the calling thread.
///
/// # Errors
/// Returns an error if the thread cannot be spawned.
///
/// # Example
/// ```
/// use splice::{interpreter::evaluator::core::Context, parse_source, with_interpreter_stack};
///
/// let source = "func depth(n) { if n == 0 { return 0; } return 1 + depth(n - 1); } let d = depth(2000)";
/// let depth = with_interpreter_stack(|| {
///                 let program = parse_source(source).unwrap();
///                 let mut context = Context::new();
///                 context.run(&program).unwrap();
///                 context.variable("d").as_number()
///             }).unwrap();
///
/// assert_eq!(depth, 2000.0);
/// ```
pub fn with_interpreter_stack<F, R>(f: F) -> io::Result<R>
    where F: FnOnce() -> R + Send,
          R: Send
{
    thread::scope(|scope| {
        let handle = thread::Builder::new().name("splice-interpreter".to_string())
                                           .stack_size(INTERPRETER_STACK_SIZE)
                                           .spawn_scoped(scope, f)?;
        match handle.join() {
            Ok(value) => Ok(value),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

/// Binary artifact formats produced by [`build_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// AST image, `.spc`.
    Image,
    /// Opcode token stream, `.spbc`.
    Bytecode,
}

impl OutputFormat {
    /// Chooses the format from a file's extension.
    ///
    /// # Example
    /// ```
    /// use std::path::Path;
    ///
    /// use splice::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path(Path::new("out.spc")), Some(OutputFormat::Image));
    /// assert_eq!(OutputFormat::from_path(Path::new("out.spbc")), Some(OutputFormat::Bytecode));
    /// assert_eq!(OutputFormat::from_path(Path::new("out.txt")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "spc" => Some(Self::Image),
            "spbc" => Some(Self::Bytecode),
            _ => None,
        }
    }
}

/// Tokenizes and parses source text.
///
/// # Example
/// ```
/// use splice::{ast::Node, parse_source};
///
/// let program = parse_source("print 1 + 2").unwrap();
/// assert!(matches!(program, Node::Block(statements) if statements.len() == 1));
///
/// assert!(parse_source("print (1").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Node, Error> {
    let tokens = tokenize(source)?;
    Ok(parse_program(&tokens)?)
}

/// Decodes an opcode token stream and parses it.
pub fn parse_bytecode(bytes: &[u8]) -> Result<Node, Error> {
    let tokens = tokenize_bytecode(bytes)?;
    Ok(parse_program(&tokens)?)
}

/// Compiles source text to an AST image.
pub fn compile_image(source: &str) -> Result<Vec<u8>, Error> {
    let program = parse_source(source)?;
    Ok(codec::encode_image(&program)?)
}

/// Compiles source text to an opcode token stream.
///
/// The source must tokenize; it is not parsed.
pub fn compile_bytecode(source: &str) -> Result<Vec<u8>, Error> {
    let tokens = tokenize(source)?;
    Ok(codec::encode_tokens(&tokens)?)
}

/// Runs source text in a fresh context on the standard streams.
///
/// The program is parsed and run inside [`with_interpreter_stack`].
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use splice::run_source;
///
/// // Unknown variables read as zero.
/// assert!(run_source("let result = x + 2").is_ok());
///
/// // Calling an unknown function stops the program.
/// assert!(run_source("let y = missing(1)").is_err());
/// ```
pub fn run_source(source: &str) -> Result<(), Error> {
    with_interpreter_stack(|| -> Result<(), Error> {
        let program = parse_source(source)?;
        Context::new().run(&program)?;
        Ok(())
    })?
}

/// Loads a program the way `splice run` does.
///
/// - A path ending in `.spc` is read as an AST image.
/// - A path ending in `.spbc` is read as an opcode token stream.
/// - Any other existing file is read as source text.
/// - Anything else is taken to be source text itself.
pub fn load_program(input: &str) -> Result<Node, Error> {
    let path = Path::new(input);

    let program = match path.extension().and_then(|ext| ext.to_str()) {
        Some("spc") => {
            let bytes = fs::read(path)?;
            info!("loading AST image '{input}'");
            codec::decode_image(&bytes)?
        },
        Some("spbc") => {
            let bytes = fs::read(path)?;
            info!("loading bytecode '{input}'");
            parse_bytecode(&bytes)?
        },
        _ if path.is_file() => {
            info!("loading source file '{input}'");
            parse_source(&fs::read_to_string(path)?)?
        },
        _ => {
            debug!("treating the input as source text");
            parse_source(input)?
        },
    };

    Ok(program)
}

/// Compiles the source file `input` into `output` in the given format.
pub fn build_file(input: &Path, output: &Path, format: OutputFormat) -> Result<(), Error> {
    let source = fs::read_to_string(input)?;

    let bytes = match format {
        OutputFormat::Image => compile_image(&source)?,
        OutputFormat::Bytecode => compile_bytecode(&source)?,
    };
    fs::write(output, &bytes)?;

    info!("wrote {} bytes to '{}'", bytes.len(), output.display());
    Ok(())
}

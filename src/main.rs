use std::{path::PathBuf, process};

use clap::{CommandFactory, Parser, Subcommand, error::ErrorKind};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use splice::{
    OutputFormat, build_file,
    error::{Error, RuntimeError},
    interpreter::evaluator::core::Context,
    load_program, with_interpreter_stack,
};

/// splice runs Splice scripts and compiles them to binary artifacts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Increases log output; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a program.
    ///
    /// INPUT may be an AST image (.spc), a bytecode file (.spbc), a source
    /// file, or source text.
    Run {
        input: String,
    },
    /// Compiles a source file to an AST image (.spc) or bytecode (.spbc),
    /// chosen by the extension of OUTPUT.
    Build {
        input:  PathBuf,
        output: PathBuf,
    },
}

const fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = SimpleLogger::new().with_level(level_filter(args.verbose)).init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let result = match args.command {
        Command::Run { input } => with_interpreter_stack(move || {
                                      load_program(&input).and_then(|program| {
                                                              Context::new().run(&program)
                                                                            .map_err(Error::from)
                                                          })
                                  }),
        Command::Build { input, output } => {
            let Some(format) = OutputFormat::from_path(&output) else {
                Args::command().error(ErrorKind::InvalidValue,
                                      format!("cannot tell the output format of '{}': expected a .spc or .spbc extension",
                                              output.display()))
                               .exit();
            };
            with_interpreter_stack(move || build_file(&input, &output, format))
        },
    };

    match result.unwrap_or_else(|e| Err(Error::from(e))) {
        Ok(()) => {},
        // Already reported on stderr by the program itself.
        Err(Error::Runtime(RuntimeError::Raised { .. })) => process::exit(1),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}

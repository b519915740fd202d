mod cli;
mod repl;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lox_core::{
    interpreter::{run, run_file, prelude::Interpreter},
    utils::prelude::Error,
};

/// Tree-walking interpreter for the Lox scripting language.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to execute; with no script an interactive session starts
    script: Option<PathBuf>,

    /// Print the scanned token stream before executing
    #[arg(long, default_value_t = false)]
    print_tokens: bool,

    /// Print the parsed program in its debug form before executing
    #[arg(long, default_value_t = false)]
    print_ast: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match args.script {
        Some(path) => run_script(path, args.print_tokens, args.print_ast),
        None => match repl::start(args.print_tokens, args.print_ast) {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        }
    }
}

fn run_script(path: PathBuf, print_tokens: bool, print_ast: bool) -> ExitCode {
    let mut interpreter = Interpreter::with_stdout();

    let diagnostics = if print_tokens || print_ast {
        // The debug dumps need the source up front, so skip the
        // streaming entry point.
        let src = match std::fs::read_to_string(&path) {
            Ok(src) => src,
            Err(err) => {
                cli::print_diagnostics(&[Error::StdIo { err: err.kind() }]);
                return ExitCode::FAILURE;
            }
        };

        if print_tokens {
            cli::print_tokens(&src);
        }
        if print_ast {
            cli::print_ast(&src);
        }

        run(path, &src, &mut interpreter)
    } else {
        run_file(path, &mut interpreter)
    };

    cli::print_diagnostics(&diagnostics);

    // Scanner and parser trouble makes the run a failure; a runtime
    // error is reported but does not change the exit status.
    let had_error = diagnostics
        .iter()
        .any(|diagnostic| !matches!(diagnostic, Error::Runtime { .. }));

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

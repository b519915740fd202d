use std::io::Write;
use std::path::PathBuf;

use lox_core::interpreter::{run, prelude::Interpreter};

use crate::cli;

const PROMPT: &str = "> ";

/// Interactive prompt. One interpreter lives for the whole session, so
/// globals and functions defined on earlier lines stay available, and a
/// line that fails (to parse or to run) does not poison the next one.
pub fn start(print_tokens: bool, print_ast: bool) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let mut interpreter = Interpreter::with_stdout();

    println!("Lox {}", env!("CARGO_PKG_VERSION"));
    println!("Type .exit or press Ctrl+D to leave.");

    loop {
        let mut input = String::new();

        print!("{PROMPT}");
        std::io::stdout().flush()?;

        if stdin.read_line(&mut input)? == 0 {
            // Ctrl+D
            println!();
            return Ok(());
        }

        if let Some('\n') = input.chars().next_back() {
            input.pop();
        }
        if let Some('\r') = input.chars().next_back() {
            input.pop();
        }

        match input.as_str() {
            "" => {},
            ".exit" => return Ok(()),
            _ => {
                if print_tokens {
                    cli::print_tokens(&input);
                }
                if print_ast {
                    cli::print_ast(&input);
                }

                let diagnostics = run(PathBuf::from("<repl>"), &input, &mut interpreter);
                cli::print_diagnostics(&diagnostics);
            }
        }
    }
}

use std::io::IsTerminal;

use termcolor::{BufferWriter, ColorChoice};

use lox_core::{
    lexer::prelude::lex,
    parser::prelude::parse_module,
    utils::prelude::Error,
};

pub(crate) fn print_diagnostics(diagnostics: &[Error]) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    for diagnostic in diagnostics {
        diagnostic.pretty(&mut buffer);
    }

    buffer_writer
        .print(&buffer)
        .expect("Writing diagnostics to stderr");
}

/// `--print-tokens`: the raw token stream with byte spans, followed by
/// any lexical errors.
pub(crate) fn print_tokens(src: &str) {
    let (tokens, errors) = lex(src);

    for (start, token, end) in tokens {
        println!("{start:>4}..{end:<4} {token:?}");
    }

    for error in errors {
        let (message, _) = error.details();
        println!("{:>4}..{:<4} error: {message}", error.location.start, error.location.end);
    }
}

/// `--print-ast`: every parsed statement in its debug form.
pub(crate) fn print_ast(src: &str) {
    let parsed = parse_module(src);

    for statement in &parsed.program.statements {
        println!("{statement}");
    }
}

pub(crate) fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

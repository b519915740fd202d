pub mod error;
pub mod interpreter;
pub mod native;
pub mod output;

pub mod prelude {
    pub use super::{
        error::*,
        interpreter::*,
        output::*
    };
}

use std::path::PathBuf;

use utf8_chars::BufReadCharsExt;

use crate::{
    parser::prelude::{parse_module, parse_module_from_stream, Parsed},
    utils::prelude::Error,
};
use self::prelude::Interpreter;

/// Parses and executes `src` against the given interpreter. All
/// diagnostics come back in the returned vector; the caller decides how
/// to render them and what they mean for the exit status.
///
/// Statements that parsed cleanly are executed even when other parts of
/// the source did not: a syntax error early in the input does not
/// silence the valid statements after it.
pub fn run(path: PathBuf, src: &str, interpreter: &mut Interpreter) -> Vec<Error> {
    let parsed = parse_module(src);

    finish_run(path, src.to_string(), parsed, interpreter)
}

/// Like [`run`], but lexes the file while it is being read instead of
/// loading it up front. The source text is still accumulated on the
/// side, diagnostics need it to render their excerpts.
pub fn run_file(path: PathBuf, interpreter: &mut Interpreter) -> Vec<Error> {
    let file = match std::fs::File::open(&path) {
        Ok(file) => file,
        Err(err) => return vec![Error::StdIo { err: err.kind() }],
    };

    let file_size = file.metadata().map(|meta| meta.len() as usize).unwrap_or(0);

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);

    let stream = reader
        .chars()
        .map_while(Result::ok)
        .map(|c| {
            src.push(c);
            c
        });

    let parsed = parse_module_from_stream(stream);

    finish_run(path, src, parsed, interpreter)
}

fn finish_run(
    path: PathBuf,
    src: String,
    parsed: Parsed,
    interpreter: &mut Interpreter,
) -> Vec<Error> {
    let mut diagnostics = vec![];

    if !parsed.errors.is_empty() {
        diagnostics.push(Error::Parse {
            path: path.clone(),
            src: src.clone(),
            errors: parsed.errors,
        });
    }

    if let Err(error) = interpreter.interpret(&parsed.program) {
        diagnostics.push(Error::Runtime { path, src, error });
    }

    diagnostics
}

#[cfg(test)]
mod tests;

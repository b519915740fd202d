use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnexpectedCharacter { ch: char },
    UnterminatedString,
    UnterminatedBlockComment,
    MalformedNumber,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (String, Vec<String>) {
        match self.error {
            LexicalErrorType::UnexpectedCharacter { ch } => {
                (format!("Unexpected character `{ch}`"), vec![])
            },
            LexicalErrorType::UnterminatedString => {
                ("Unterminated string".into(), vec![
                    "The opening `\"` here never finds its closing quote.".into()
                ])
            },
            LexicalErrorType::UnterminatedBlockComment => {
                ("Unterminated block comment".into(), vec![
                    "A `/*` comment runs to the end of the file without a matching `*/`.".into()
                ])
            },
            LexicalErrorType::MalformedNumber => {
                ("Malformed number literal".into(), vec![])
            }
        }
    }
}

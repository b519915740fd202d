use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    ExpectedExpression { token: Token },
    InvalidAssignmentTarget,
    MissingSemicolon,
    MissingClosingBrace,
    TooManyParameters,
    TooManyArguments,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    UnexpectedEof,
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected an identifier".into(), vec![]),
            ParseErrorType::ExpectedExpression { token } => {
                (format!("Expected an expression, found {}", describe(token)), vec![])
            },
            ParseErrorType::InvalidAssignmentTarget => {
                ("Invalid assignment target".into(), vec![
                    "Only a variable can appear on the left of `=`.".into()
                ])
            },
            ParseErrorType::MissingSemicolon => ("Missing `;`".into(), vec![]),
            ParseErrorType::MissingClosingBrace => ("Missing `}`".into(), vec![]),
            ParseErrorType::TooManyParameters => {
                ("Too many parameters".into(), vec![
                    "A function can take at most 255 parameters.".into()
                ])
            },
            ParseErrorType::TooManyArguments => {
                ("Too many arguments".into(), vec![
                    "A call can pass at most 255 arguments.".into()
                ])
            },
            ParseErrorType::UnexpectedToken { token, expected } => {
                let messages = std::iter::once(format!("Found {}, expected one of: ", describe(token)))
                    .chain(expected.iter().map(|s| format!("- `{s}`")))
                    .collect();

                ("Not expected this".into(), messages)
            },
            ParseErrorType::UnexpectedEof => ("Unexpected end of file".into(), vec![]),
            ParseErrorType::LexError { error } => error.details()
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(_) => "a number".to_string(),
        Token::String(_) => "a string".to_string(),
        Token::Identifier(_) => "an identifier".to_string(),
        Token::Eof => "the end of the file".to_string(),
        _ if token.is_keyword() => format!("the keyword `{}`", token.as_literal()),
        _ => format!("`{}`", token.as_literal())
    }
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}

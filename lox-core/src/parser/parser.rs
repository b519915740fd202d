use crate::{
    lexer::prelude::{LexResult, Lexer, Spanned, Token},
    utils::prelude::SrcSpan,
};
use super::ast::{Parsed, Program};
use super::error::{parse_error, ParseError, ParseErrorType};

pub trait Parse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: super::ast::Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub errors: Vec<ParseError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    /// Advances the token window by one. Lexical errors surfacing from
    /// the stream are recorded as diagnostics and skipped, so the parser
    /// only ever sees well-formed tokens.
    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        loop {
            match self.tokens.next() {
                Some(Err(error)) => {
                    self.errors.push(ParseError {
                        error: ParseErrorType::LexError { error },
                        span: error.location,
                    });
                },
                Some(Ok(tok)) => {
                    next = Some(tok);

                    break;
                },
                None => {
                    break;
                }
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next.take();

        t
    }

    pub fn at_end(&self) -> bool {
        matches!(self.current_token, Some((_, Token::Eof, _)) | None)
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }

    pub fn parse(&mut self) -> Parsed {
        let program = Program::parse_with_recovery(self);

        Parsed {
            program,
            errors: std::mem::take(&mut self.errors),
        }
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![token.as_literal()],
                    },
                    SrcSpan { start, end }
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Identifier(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent,
                    SrcSpan { start, end }
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }

    /// True when the current token matches, without consuming it.
    pub fn check(&self, token: &Token) -> bool {
        matches!(&self.current_token, Some((_, tok, _)) if tok == token)
    }

    /// Skips ahead to a likely statement boundary after a syntax error:
    /// past the next `;`, or up to a token that begins a declaration or
    /// statement.
    pub fn synchronize(&mut self) {
        loop {
            if self.at_end() {
                return;
            }

            if let Some((_, Token::Semicolon, _)) = self.next_token() {
                return;
            }

            match &self.current_token {
                Some((_, token, _)) if matches!(
                    token,
                    Token::Class
                        | Token::For
                        | Token::Fun
                        | Token::If
                        | Token::Print
                        | Token::Return
                        | Token::Var
                        | Token::While
                ) => return,
                _ => {}
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Assignment,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
    Call,
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Equal => Self::Assignment,
            Token::Or => Self::Or,
            Token::And => Self::And,
            Token::BangEqual | Token::EqualEqual => Self::Equality,
            Token::Greater | Token::GreaterEqual |
            Token::Less | Token::LessEqual => Self::Comparison,
            Token::Minus | Token::Plus => Self::Term,
            Token::Slash | Token::Star => Self::Factor,
            Token::LeftParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

/// Parses a whole source string. Never fails as a whole: recovery keeps
/// going after each syntax error and everything that parsed cleanly ends
/// up in the returned program alongside the collected diagnostics.
pub fn parse_module(src: &str) -> Parsed {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse()
}

/// Same as [`parse_module`] but fed from a char stream, for drivers that
/// lex a file while reading it.
pub fn parse_module_from_stream(stream: impl Iterator<Item = char>) -> Parsed {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);

    parser.parse()
}

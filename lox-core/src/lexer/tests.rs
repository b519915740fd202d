use super::prelude::{lex, Lexer, LexicalError, LexicalErrorType, Token};

fn lexer_for(input: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
    Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)))
}

#[test]
fn test_punctuation_and_operators() {
    let input = "( ) { } , . - + ; * / ? : ! != = == < <= > >=";

    let tokens = vec![
        Token::LeftParen,
        Token::RightParen,
        Token::LeftBrace,
        Token::RightBrace,
        Token::Comma,
        Token::Dot,
        Token::Minus,
        Token::Plus,
        Token::Semicolon,
        Token::Star,
        Token::Slash,
        Token::Question,
        Token::Colon,
        Token::Bang,
        Token::BangEqual,
        Token::Equal,
        Token::EqualEqual,
        Token::Less,
        Token::LessEqual,
        Token::Greater,
        Token::GreaterEqual,
        Token::Eof,
    ];

    let mut lexer = lexer_for(input);

    for (idx, token) in tokens.iter().enumerate() {
        let (_, next_token, _) = match lexer.next_token() {
            Ok(next_token) => next_token,
            Err(err) => panic!("stopped at {token:?} ({idx}): {err:?}"),
        };

        assert_eq!(
            *token, next_token,
            "Next token does not match expected token ({next_token:?}, {token:?}) at {idx}"
        );
    }
}

#[test]
fn test_keywords_and_identifiers() {
    let input = "and class else false fun for if nil or print return super this true var while andd _under score_99";

    let tokens = vec![
        Token::And,
        Token::Class,
        Token::Else,
        Token::False,
        Token::Fun,
        Token::For,
        Token::If,
        Token::Nil,
        Token::Or,
        Token::Print,
        Token::Return,
        Token::Super,
        Token::This,
        Token::True,
        Token::Var,
        Token::While,
        Token::Identifier("andd".into()),
        Token::Identifier("_under".into()),
        Token::Identifier("score_99".into()),
        Token::Eof,
    ];

    let mut lexer = lexer_for(input);

    for token in &tokens {
        let (_, next_token, _) = lexer.next_token().expect("lexing failed");
        assert_eq!(*token, next_token);
    }
}

#[test]
fn test_numbers() {
    let input = "0 7 42 3.14 0.5 1. 12.suffix";

    let tokens = vec![
        Token::Number(0.0),
        Token::Number(7.0),
        Token::Number(42.0),
        Token::Number(3.14),
        Token::Number(0.5),
        // The dot after `1` is not followed by a digit, so it lexes as
        // a separate token, same for `12.suffix`.
        Token::Number(1.0),
        Token::Dot,
        Token::Number(12.0),
        Token::Dot,
        Token::Identifier("suffix".into()),
        Token::Eof,
    ];

    let mut lexer = lexer_for(input);

    for token in &tokens {
        let (_, next_token, _) = lexer.next_token().expect("lexing failed");
        assert_eq!(*token, next_token);
    }
}

#[test]
fn test_strings() {
    let input = "\"hello\" \"multi\nline\" \"\"";

    let tokens = vec![
        Token::String("hello".into()),
        Token::String("multi\nline".into()),
        Token::String("".into()),
        Token::Eof,
    ];

    let mut lexer = lexer_for(input);

    for token in &tokens {
        let (_, next_token, _) = lexer.next_token().expect("lexing failed");
        assert_eq!(*token, next_token);
    }
}

#[test]
fn test_comments_are_skipped() {
    let input = r#"
        // a line comment
        1 // trailing
        /* a block
           comment */ 2
        3 /* tight */4
    "#;

    let tokens = vec![
        Token::Number(1.0),
        Token::Number(2.0),
        Token::Number(3.0),
        Token::Number(4.0),
        Token::Eof,
    ];

    let mut lexer = lexer_for(input);

    for token in &tokens {
        let (_, next_token, _) = lexer.next_token().expect("lexing failed");
        assert_eq!(*token, next_token);
    }
}

#[test]
fn test_slash_is_still_division() {
    let input = "8 / 2";

    let tokens = vec![
        Token::Number(8.0),
        Token::Slash,
        Token::Number(2.0),
        Token::Eof,
    ];

    let mut lexer = lexer_for(input);

    for token in &tokens {
        let (_, next_token, _) = lexer.next_token().expect("lexing failed");
        assert_eq!(*token, next_token);
    }
}

#[test]
fn test_unexpected_character() {
    let mut lexer = lexer_for("1 @ 2");

    assert_eq!(lexer.next_token(), Ok((0, Token::Number(1.0), 1)));

    let err = lexer.next_token().expect_err("expected a lexical error");
    assert_eq!(
        err.error,
        LexicalErrorType::UnexpectedCharacter { ch: '@' }
    );

    // The lexer recovers and picks up after the bad character.
    assert_eq!(lexer.next_token(), Ok((4, Token::Number(2.0), 5)));
    assert!(matches!(lexer.next_token(), Ok((_, Token::Eof, _))));
}

#[test]
fn test_unterminated_string() {
    let mut lexer = lexer_for("\"never closed");

    let err = lexer.next_token().expect_err("expected a lexical error");
    assert_eq!(err.error, LexicalErrorType::UnterminatedString);
    assert_eq!(err.location.start, 0);

    assert!(matches!(lexer.next_token(), Ok((_, Token::Eof, _))));
}

#[test]
fn test_unterminated_block_comment() {
    let mut lexer = lexer_for("1 /* runs off");

    assert_eq!(lexer.next_token(), Ok((0, Token::Number(1.0), 1)));

    let err = lexer.next_token().expect_err("expected a lexical error");
    assert_eq!(err.error, LexicalErrorType::UnterminatedBlockComment);
    assert_eq!(err.location.start, 2);
}

#[test]
fn test_spans_are_byte_offsets() {
    let input = "var answer = 42;";
    //           0123456789012345

    let expected = vec![
        (0, Token::Var, 3),
        (4, Token::Identifier("answer".into()), 10),
        (11, Token::Equal, 12),
        (13, Token::Number(42.0), 15),
        (15, Token::Semicolon, 16),
    ];

    let mut lexer = lexer_for(input);

    for spanned in &expected {
        assert_eq!(*spanned, lexer.next_token().expect("lexing failed"));
    }
}

#[test]
fn test_lex_is_total() {
    // Whatever the input, `lex` terminates with exactly one Eof token.
    let inputs = [
        "",
        "   \t\r\n",
        "@#@#@#",
        "\"open",
        "/* open",
        "var x = 1; print x;",
    ];

    for input in inputs {
        let (tokens, _errors) = lex(input);

        let (_, last, _) = tokens.last().expect("token list was empty");
        assert_eq!(*last, Token::Eof, "input {input:?}");
        assert_eq!(
            tokens.iter().filter(|(_, token, _)| *token == Token::Eof).count(),
            1,
            "input {input:?}"
        );
    }
}

#[test]
fn test_errors_accumulate_while_lexing_continues() {
    let (tokens, errors) = lex("@ 1 # 2 $");

    let kinds = tokens.into_iter().map(|(_, token, _)| token).collect::<Vec<Token>>();
    assert_eq!(
        kinds,
        vec![Token::Number(1.0), Token::Number(2.0), Token::Eof]
    );

    let kinds = errors.into_iter().map(|err| err.error).collect::<Vec<LexicalErrorType>>();
    assert_eq!(
        kinds,
        vec![
            LexicalErrorType::UnexpectedCharacter { ch: '@' },
            LexicalErrorType::UnexpectedCharacter { ch: '#' },
            LexicalErrorType::UnexpectedCharacter { ch: '$' },
        ]
    );
}

#[test]
fn test_errors_carry_spans() {
    let (_, errors) = lex("    @");

    assert_eq!(
        errors,
        vec![LexicalError {
            error: LexicalErrorType::UnexpectedCharacter { ch: '@' },
            location: crate::utils::prelude::SrcSpan { start: 4, end: 5 },
        }]
    );
}

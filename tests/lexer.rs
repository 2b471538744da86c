use picopy::{
    error::LexerError,
    interpreter::lexer::{Lexer, Token, TokenKind},
};

/// Collects the whole token stream of `source`, ending with `Eof`.
fn tokens_of(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source).expect("lexing failed");
    let mut tokens = vec![lexer.current().clone()];
    while *lexer.current() != Token::Eof {
        tokens.push(lexer.next().expect("lexing failed"));
    }
    tokens
}

/// Checks the stream laws every input must satisfy: indentation closes, the
/// stream ends with `Newline Dedent* Eof`, and `Newline` never repeats.
fn assert_stream_laws(source: &str) {
    let tokens = tokens_of(source);

    let indents = tokens.iter().filter(|t| **t == Token::Indent).count();
    let dedents = tokens.iter().filter(|t| **t == Token::Dedent).count();
    assert_eq!(indents, dedents, "indentation must close in {source:?}");

    assert_eq!(tokens.last(), Some(&Token::Eof), "stream must end with Eof in {source:?}");
    assert_eq!(tokens.iter().filter(|t| **t == Token::Eof).count(), 1);

    if tokens.len() > 1 {
        let mut tail = tokens.iter().rev().skip(1);
        let mut before_eof = tail.next();
        while before_eof == Some(&Token::Dedent) {
            before_eof = tail.next();
        }
        assert_eq!(before_eof,
                   Some(&Token::Newline),
                   "Eof must be preceded by a Newline and its Dedents in {source:?}");
    }

    for pair in tokens.windows(2) {
        assert!(!matches!(pair, [Token::Newline, Token::Newline]),
                "double Newline in {source:?}");
    }
}

#[test]
fn stream_laws_hold() {
    assert_stream_laws("");
    assert_stream_laws("x = 1\n");
    assert_stream_laws("x = 1");
    assert_stream_laws("  print 1\n");
    assert_stream_laws("if 1:\n  print 1\n");
    assert_stream_laws("if 1:\n  if 2:\n    if 3:\n      print 1\n");
    assert_stream_laws("class A:\n  def f():\n    return 1\nx = 1\n");
    assert_stream_laws("print 1\n\n\n\nprint 2\n");
    assert_stream_laws("# nothing but comments\n# another\n");
    assert_stream_laws("if 1:\n  print 1\n  \nprint 2\n");
    assert_stream_laws("if 1:\n  print 1");
}

#[test]
fn simple_statement_stream() {
    assert_eq!(tokens_of("x = 1\n"),
               vec![Token::Id("x".to_owned()),
                    Token::Char(b'='),
                    Token::Number(1),
                    Token::Newline,
                    Token::Eof]);
}

#[test]
fn empty_input_is_just_eof() {
    assert_eq!(tokens_of(""), vec![Token::Eof]);
}

#[test]
fn indentation_becomes_indent_and_dedent() {
    assert_eq!(tokens_of("if 1:\n  print 1\n"),
               vec![Token::If,
                    Token::Number(1),
                    Token::Char(b':'),
                    Token::Newline,
                    Token::Indent,
                    Token::Print,
                    Token::Number(1),
                    Token::Newline,
                    Token::Dedent,
                    Token::Eof]);
}

#[test]
fn an_indented_first_line_opens_a_level() {
    assert_eq!(tokens_of("  print 1\n"),
               vec![Token::Indent,
                    Token::Print,
                    Token::Number(1),
                    Token::Newline,
                    Token::Dedent,
                    Token::Eof]);
}

#[test]
fn blank_lines_do_not_stack_newlines_or_shift_indent() {
    assert_eq!(tokens_of("print 1\n\n   \nprint 2\n"),
               vec![Token::Print,
                    Token::Number(1),
                    Token::Newline,
                    Token::Print,
                    Token::Number(2),
                    Token::Newline,
                    Token::Eof]);
}

#[test]
fn leading_blank_lines_produce_no_tokens() {
    assert_eq!(tokens_of("\n\nprint 1\n"),
               vec![Token::Print, Token::Number(1), Token::Newline, Token::Eof]);
}

#[test]
fn dedents_close_several_levels_at_once() {
    let tokens = tokens_of("class A:\n  def f():\n    return 1\nx = 1\n");
    let run = tokens.windows(3)
                    .any(|w| matches!(w, [Token::Dedent, Token::Dedent, Token::Id(name)] if name == "x"));
    assert!(run, "expected two Dedents before the top-level statement, got {tokens:?}");
}

#[test]
fn comments_are_transparent() {
    let with_comments = "x = 1 # assign\n# whole line\nif x:\n  print x # print it\n";
    let without = "x = 1\nif x:\n  print x\n";
    assert_eq!(tokens_of(with_comments), tokens_of(without));
}

#[test]
fn keywords_are_recognized() {
    assert_eq!(tokens_of("class return if else def print and or not None True False foo\n"),
               vec![Token::Class,
                    Token::Return,
                    Token::If,
                    Token::Else,
                    Token::Def,
                    Token::Print,
                    Token::And,
                    Token::Or,
                    Token::Not,
                    Token::None,
                    Token::True,
                    Token::False,
                    Token::Id("foo".to_owned()),
                    Token::Newline,
                    Token::Eof]);
}

#[test]
fn compound_operators_win_over_single_chars() {
    assert_eq!(tokens_of("== != <= >= = ! < >\n"),
               vec![Token::Eq,
                    Token::NotEq,
                    Token::LessOrEq,
                    Token::GreaterOrEq,
                    Token::Char(b'='),
                    Token::Char(b'!'),
                    Token::Char(b'<'),
                    Token::Char(b'>'),
                    Token::Newline,
                    Token::Eof]);
}

#[test]
fn punctuation_lexes_as_char_tokens() {
    assert_eq!(tokens_of(". , : ( ) + - * /\n"),
               vec![Token::Char(b'.'),
                    Token::Char(b','),
                    Token::Char(b':'),
                    Token::Char(b'('),
                    Token::Char(b')'),
                    Token::Char(b'+'),
                    Token::Char(b'-'),
                    Token::Char(b'*'),
                    Token::Char(b'/'),
                    Token::Newline,
                    Token::Eof]);
}

/// Extracts the single string token of a one-string input.
fn single_string(source: &str) -> String {
    let strings: Vec<String> = tokens_of(source).into_iter()
                                                .filter_map(|token| match token {
                                                    Token::String(value) => Some(value),
                                                    _ => None,
                                                })
                                                .collect();
    assert_eq!(strings.len(), 1, "expected one string token in {source:?}");
    strings.into_iter().next().expect("checked above")
}

#[test]
fn string_escapes_are_resolved() {
    assert_eq!(single_string(r#""a\nb""#), "a\nb");
    assert_eq!(single_string(r#""a\tb\rc""#), "a\tb\rc");
    assert_eq!(single_string(r#""say \"hi\"""#), "say \"hi\"");
    assert_eq!(single_string(r#"'it\'s'"#), "it's");
    assert_eq!(single_string(r#""a\\b""#), "a\\b");
    assert_eq!(single_string(r#"'double "quotes" inside'"#), "double \"quotes\" inside");
}

#[test]
fn unknown_escapes_drop_both_characters() {
    assert_eq!(single_string(r#""a\qb""#), "ab");
}

#[test]
fn unterminated_string_seals_the_stream() {
    assert_eq!(tokens_of(r#"x = "abc"#),
               vec![Token::Id("x".to_owned()), Token::Char(b'='), Token::Newline, Token::Eof]);
}

#[test]
fn oversized_number_is_an_error() {
    assert!(matches!(Lexer::new("99999999999999999999"),
                     Err(LexerError::NumberOverflow { .. })));
}

#[test]
fn unknown_characters_are_errors() {
    assert!(matches!(Lexer::new("@"),
                     Err(LexerError::UnexpectedCharacter { found: '@', .. })));
    assert!(matches!(Lexer::new("\tprint 1"),
                     Err(LexerError::UnexpectedCharacter { found: '\t', .. })));
}

#[test]
fn carriage_returns_are_rejected() {
    let mut lexer = Lexer::new("a\r\n").expect("the first token lexes");
    assert!(matches!(lexer.next(), Err(LexerError::UnexpectedCharacter { found: '\r', .. })));
}

#[test]
fn string_literals_may_span_lines() {
    let mut lexer = Lexer::new("s = 'a\nb'\n@").expect("the first token lexes");
    let error = loop {
        match lexer.next() {
            Ok(_) => {},
            Err(error) => break error,
        }
    };
    // The error sits on line 3: the literal on lines 1-2 kept the count.
    assert!(matches!(error, LexerError::UnexpectedCharacter { found: '@', line: 3 }));
}

#[test]
fn expect_api_checks_kind_and_value() {
    let mut lexer = Lexer::new("x = 1").expect("lexing failed");

    assert!(lexer.expect(TokenKind::Id).is_ok());
    assert!(lexer.expect(TokenKind::Number).is_err());
    assert!(lexer.expect_value(&Token::Id("x".to_owned())).is_ok());
    assert!(lexer.expect_value(&Token::Id("y".to_owned())).is_err());

    assert!(lexer.expect_next(TokenKind::Char).is_ok());
    assert!(lexer.expect_next_value(&Token::Number(1)).is_ok());

    assert_eq!(lexer.next().expect("lexing failed"), Token::Newline);
    assert_eq!(lexer.next().expect("lexing failed"), Token::Eof);
    // The stream stays on Eof once sealed.
    assert_eq!(lexer.next().expect("lexing failed"), Token::Eof);
    assert_eq!(*lexer.current(), Token::Eof);
}

#[test]
fn tokens_render_like_their_tags() {
    assert_eq!(Token::Number(7).to_string(), "Number{7}");
    assert_eq!(Token::Id("x".to_owned()).to_string(), "Id{x}");
    assert_eq!(Token::Char(b'+').to_string(), "Char{+}");
    assert_eq!(Token::String("ab".to_owned()).to_string(), "String{ab}");
    assert_eq!(Token::Eq.to_string(), "Eq");
    assert_eq!(Token::Dedent.to_string(), "Dedent");
}

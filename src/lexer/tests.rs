//! Unit tests for the lexer module.
//!
//! Covers names and keywords, numeric and string literals, operators,
//! row/column tracking, chunked input and the error paths.

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::{tokenize, Lexer, LexerConfig, DEFAULT_SOURCE_NAME},
    tokens::{lookup_keyword, TokenKind, TokenTag},
};

fn tags(source: &str) -> Vec<TokenTag> {
    tokenize(source, None)
        .unwrap()
        .tokens()
        .iter()
        .map(|token| token.tag())
        .collect()
}

fn spans(source: &str) -> Vec<(usize, usize, usize)> {
    tokenize(source, None)
        .unwrap()
        .tokens()
        .iter()
        .map(|token| (token.row(), token.column(), token.length()))
        .collect()
}

#[test]
fn test_tokenize_empty_input() {
    let lex_out = tokenize("", None).unwrap();

    assert_eq!(lex_out.name(), DEFAULT_SOURCE_NAME);
    assert_eq!(lex_out.tokens().len(), 1);
    assert_eq!(lex_out.tokens()[0].kind, TokenKind::EOF);
    assert_eq!(lex_out.tokens()[0].span, crate::Span::new(0, 0, 0));
}

#[test]
fn test_tokenize_keywords() {
    let source = "let if else true false not or and match while for break continue return";

    assert_eq!(
        tags(source),
        vec![
            TokenTag::Let,
            TokenTag::If,
            TokenTag::Else,
            TokenTag::True,
            TokenTag::False,
            TokenTag::Not,
            TokenTag::Or,
            TokenTag::And,
            TokenTag::Match,
            TokenTag::While,
            TokenTag::For,
            TokenTag::Break,
            TokenTag::Continue,
            TokenTag::Return,
            TokenTag::EOF,
        ]
    );
}

#[test]
fn test_keyword_prefixes_are_names() {
    let lex_out = tokenize("iffy lets nothing android", None).unwrap();
    let tokens = lex_out.tokens();

    assert_eq!(tokens[0].name(), Some(&b"iffy"[..]));
    assert_eq!(tokens[1].name(), Some(&b"lets"[..]));
    assert_eq!(tokens[2].name(), Some(&b"nothing"[..]));
    assert_eq!(tokens[3].name(), Some(&b"android"[..]));
}

#[test]
fn test_tokenize_names_and_numbers() {
    let lex_out = tokenize(" __cache__ VAR_2 47agent ak47 api32sucks", None).unwrap();
    let tokens = lex_out.tokens();

    assert_eq!(tokens.len(), 7);

    assert_eq!(tokens[0].name(), Some(&b"__cache__"[..]));
    assert_eq!((tokens[0].row(), tokens[0].column(), tokens[0].length()), (0, 1, 9));

    assert_eq!(tokens[1].name(), Some(&b"VAR_2"[..]));
    assert_eq!((tokens[1].row(), tokens[1].column(), tokens[1].length()), (0, 11, 5));

    assert_eq!(tokens[2].number(), Some(47));
    assert_eq!((tokens[2].row(), tokens[2].column(), tokens[2].length()), (0, 17, 2));

    assert_eq!(tokens[3].name(), Some(&b"agent"[..]));
    assert_eq!((tokens[3].row(), tokens[3].column(), tokens[3].length()), (0, 19, 5));

    assert_eq!(tokens[4].name(), Some(&b"ak47"[..]));
    assert_eq!((tokens[4].row(), tokens[4].column(), tokens[4].length()), (0, 25, 4));

    assert_eq!(tokens[5].name(), Some(&b"api32sucks"[..]));
    assert_eq!((tokens[5].row(), tokens[5].column(), tokens[5].length()), (0, 30, 10));

    assert_eq!(tokens[6].kind, TokenKind::EOF);
    assert_eq!((tokens[6].row(), tokens[6].column(), tokens[6].length()), (0, 40, 0));
}

#[test]
fn test_tokenize_relational_operators() {
    let source = " == = != > < >= <= ";

    assert_eq!(
        tags(source),
        vec![
            TokenTag::Equ,
            TokenTag::Assign,
            TokenTag::Neq,
            TokenTag::GreaterThan,
            TokenTag::LessThan,
            TokenTag::Gte,
            TokenTag::Lte,
            TokenTag::EOF,
        ]
    );
    assert_eq!(
        spans(source),
        vec![
            (0, 1, 2),
            (0, 4, 1),
            (0, 6, 2),
            (0, 9, 1),
            (0, 11, 1),
            (0, 13, 2),
            (0, 16, 2),
            (0, 19, 0),
        ]
    );
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        tags("a<=b==c>d=1"),
        vec![
            TokenTag::Name,
            TokenTag::Lte,
            TokenTag::Name,
            TokenTag::Equ,
            TokenTag::Name,
            TokenTag::GreaterThan,
            TokenTag::Name,
            TokenTag::Assign,
            TokenTag::NumericLiteral,
            TokenTag::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        tags("()[]{}+-*/%^;"),
        vec![
            TokenTag::LeftParen,
            TokenTag::RightParen,
            TokenTag::LeftBracket,
            TokenTag::RightBracket,
            TokenTag::LeftBrace,
            TokenTag::RightBrace,
            TokenTag::Plus,
            TokenTag::Minus,
            TokenTag::Asterisk,
            TokenTag::Slash,
            TokenTag::Percent,
            TokenTag::Exponent,
            TokenTag::Semicolon,
            TokenTag::EOF,
        ]
    );
}

#[test]
fn test_multi_line_positions() {
    let source = "   if age >= 18 { \r\n  \n  title = \"adult\";  \n} \r\n";
    let lex_out = tokenize(source, None).unwrap();
    let tokens = lex_out.tokens();

    let expected = vec![
        (TokenTag::If, 0, 3, 2),
        (TokenTag::Name, 0, 6, 3),
        (TokenTag::Gte, 0, 10, 2),
        (TokenTag::NumericLiteral, 0, 13, 2),
        (TokenTag::LeftBrace, 0, 16, 1),
        (TokenTag::Name, 2, 2, 5),
        (TokenTag::Assign, 2, 8, 1),
        (TokenTag::StringLiteral, 2, 10, 7),
        (TokenTag::Semicolon, 2, 17, 1),
        (TokenTag::RightBrace, 3, 0, 1),
        (TokenTag::EOF, 4, 0, 0),
    ];

    let actual = tokens
        .iter()
        .map(|token| (token.tag(), token.row(), token.column(), token.length()))
        .collect::<Vec<_>>();

    assert_eq!(actual, expected);
    assert_eq!(tokens[7].string(), Some(&b"adult"[..]));
}

#[test]
fn test_bare_carriage_return_is_a_line_break() {
    assert_eq!(spans("a\rb\r"), vec![(0, 0, 1), (1, 0, 1), (2, 0, 0)]);
}

#[test]
fn test_string_literal_payload() {
    let lex_out = tokenize("\"tab\there\" \"\"", None).unwrap();
    let tokens = lex_out.tokens();

    assert_eq!(tokens[0].string(), Some(&b"tab\there"[..]));
    assert_eq!(tokens[0].length(), 10);
    assert_eq!(tokens[1].string(), Some(&b""[..]));
    assert_eq!((tokens[1].column(), tokens[1].length()), (11, 2));
}

#[test]
fn test_string_literal_with_line_break_fails() {
    for source in ["var = \"Hello\n", "var = \"Hello\r\n"] {
        let error = tokenize(source, None).unwrap_err();

        assert_eq!(error.get_error_name(), "UnexpectedByte");
        assert_eq!(error.get_position().row, 1);
        assert_eq!(error.get_position().col, 13);
    }

    let error = tokenize("var = \"Hello\n", None).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Lexer error: Unexpected byte '\\n' at shell:1:13"
    );
}

#[test]
fn test_unexpected_byte() {
    let error = tokenize("x = 1 @ 2;", Some("main.me".to_string())).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnexpectedByte { byte: b'@' });
    assert_eq!(error.to_string(), "Lexer error: Unexpected byte '@' at main.me:1:7");
}

#[test]
fn test_bang_requires_equal_sign() {
    let error = tokenize("a ! b", None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UnexpectedByte { byte: b' ' });
    assert_eq!(error.get_position().col, 4);

    let error = tokenize("a !", None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UnexpectedEndOfInput);
    assert_eq!(error.get_position().col, 4);
}

#[test]
fn test_number_overflow() {
    let lex_out = tokenize("18446744073709551615", None).unwrap();
    assert_eq!(lex_out.tokens()[0].number(), Some(u64::MAX));

    let error = tokenize("x = 18446744073709551616;", None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::NumberOverflow);
    assert_eq!(error.get_position().col, 5);
}

#[test]
fn test_unterminated_string_closes_at_end_of_input() {
    let lex_out = tokenize("x = \"open", None).unwrap();
    let tokens = lex_out.tokens();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[2].string(), Some(&b"open"[..]));
    assert_eq!(tokens[2].length(), 5);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_strict_strings_rejects_unterminated_string() {
    let mut lexer = Lexer::with_config(LexerConfig {
        strict_strings: true,
        ..LexerConfig::default()
    });

    let error = lexer.scan_buffer(b"x = \"open").unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position().col, 5);

    lexer.reset();
    let lex_out = lexer.scan_buffer(b"x = \"closed\";").unwrap();
    assert_eq!(lex_out.tokens()[2].string(), Some(&b"closed"[..]));
}

#[test]
fn test_chunked_feed_matches_single_buffer() {
    let source = "if total >= 100 { label = \"big\"; } else { label = \"small\"; }\r\n";
    let expected = tokenize(source, None).unwrap();

    for chunk_size in 1..8 {
        let mut lexer = Lexer::new();
        for chunk in source.as_bytes().chunks(chunk_size) {
            lexer.feed(chunk).unwrap();
        }
        let lex_out = lexer.finalize().unwrap();

        assert_eq!(lex_out.tokens(), expected.tokens());
        assert_eq!(lex_out.source(), source.as_bytes());
    }
}

#[test]
fn test_crlf_split_across_chunks() {
    let mut lexer = Lexer::new();
    lexer.feed(b"a\r").unwrap();
    lexer.feed(b"\nb").unwrap();
    let lex_out = lexer.finalize().unwrap();

    assert_eq!(lex_out.tokens()[1].row(), 1);
    assert_eq!(lex_out.tokens()[1].column(), 0);
}

#[test]
fn test_tokenize_is_deterministic() {
    let source = "x = (1 + foo) * \"bar\";\n{ y = not x; }";

    let first = tokenize(source, None).unwrap();
    let second = tokenize(source, None).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_lexer_is_reusable_after_finalize() {
    let mut lexer = Lexer::new();

    let first = lexer.scan_buffer(b"a = 1;\n").unwrap();
    let second = lexer.scan_buffer(b"b = 2;").unwrap();

    assert_eq!(first.tokens().len(), 5);
    assert_eq!(second.tokens()[0].name(), Some(&b"b"[..]));
    assert_eq!(second.tokens()[0].row(), 0);
    assert_eq!(second.source(), b"b = 2;");
}

#[test]
fn test_error_is_retained_until_reset() {
    let mut lexer = Lexer::new();

    let error = lexer.feed(b"x = $").unwrap_err();
    assert!(lexer.failed());
    assert_eq!(lexer.error(), Some(&error));

    assert_eq!(lexer.feed(b"1;").unwrap_err(), error);
    assert_eq!(lexer.finalize().unwrap_err(), error);

    lexer.reset();
    assert!(lexer.error().is_none());

    let lex_out = lexer.scan_buffer(b"x = 1;").unwrap();
    assert_eq!(lex_out.tokens().len(), 5);
}

#[test]
fn test_source_name() {
    let mut lexer = Lexer::with_config(LexerConfig {
        source_name: Some("conf.me".to_string()),
        ..LexerConfig::default()
    });
    assert_eq!(lexer.source_name(), "conf.me");

    lexer.set_source_name("other.me");
    let error = lexer.scan_buffer(b"#").unwrap_err();
    assert_eq!(error.get_position().source, "other.me");
}

#[test]
fn test_token_display() {
    let lex_out = tokenize("x 47 \"a\\b\" = if", None).unwrap();
    let rendered = lex_out
        .tokens()
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>();

    assert_eq!(
        rendered,
        vec![
            "<Name \"x\">",
            "<NumericLiteral 47>",
            "<StringLiteral \"a\\\\b\">",
            "<Keyword '='>",
            "<Keyword 'if'>",
            "<Keyword EOF>",
        ]
    );
}

#[test]
fn test_token_seq_dump() {
    let lex_out = tokenize("x = 1;", None).unwrap();

    assert_eq!(
        lex_out.tokens().dump(None),
        "<TokSeq(5): [<Name \"x\">, <Keyword '='>, <NumericLiteral 1>, <Keyword ';'>, <Keyword EOF>]>"
    );
    assert_eq!(
        lex_out.tokens().dump(Some(2)),
        "<TokSeq(5): [\n  <Name \"x\">,\n  <Keyword '='>,\n  <NumericLiteral 1>,\n  <Keyword ';'>,\n  <Keyword EOF>\n]>"
    );
}

#[test]
fn test_out_of_memory_reports_current_position() {
    let mut lexer = Lexer::new();
    lexer.feed(b"ab\ncd").unwrap();

    let error = lexer.out_of_memory();
    assert_eq!(error.get_error_name(), "NoEnoughMemory");
    assert_eq!(error.get_position().row, 2);
    assert_eq!(error.get_position().col, 3);
    assert_eq!(error.to_string(), "Lexer error: No enough memory at shell:2:3");
}

#[test]
fn test_generated_names_scan_as_one_token() {
    const FIRST: &[u8] = b"_aeilnorstwxzAZ";
    const REST: &[u8] = b"_aefhilnorstuxzAZ059";

    for length in 1..=6 {
        for seed in 0..200usize {
            let mut name = vec![FIRST[seed % FIRST.len()]];
            let mut state = seed;
            for _ in 1..length {
                state = state.wrapping_mul(31).wrapping_add(7);
                name.push(REST[state % REST.len()]);
            }

            let source = String::from_utf8(name.clone()).unwrap();
            let lex_out = tokenize(&source, None).unwrap();
            let tokens = lex_out.tokens();

            assert_eq!(tokens.len(), 2, "{:?}", source);
            assert_eq!(tokens[0].length(), length, "{:?}", source);
            assert_eq!(tokens[1].tag(), TokenTag::EOF);

            match lookup_keyword(&name) {
                Some(keyword) => assert_eq!(tokens[0].kind, keyword, "{:?}", source),
                None => assert_eq!(tokens[0].name(), Some(&name[..]), "{:?}", source),
            }
        }
    }
}

#[test]
fn test_generated_digit_strings_scan_as_one_number() {
    let mut values = vec![0u64, 1, 9, 10, 99, 100, 4_294_967_296, u64::MAX];
    let mut state = 1u64;
    for _ in 0..200 {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        values.push(state >> (state % 61));
    }

    for value in values {
        for zeros in 0..3 {
            let digits = format!("{}{}", "0".repeat(zeros), value);
            let lex_out = tokenize(&digits, None).unwrap();
            let tokens = lex_out.tokens();

            assert_eq!(tokens.len(), 2, "{}", digits);
            assert_eq!(tokens[0].number(), Some(value), "{}", digits);
            assert_eq!(tokens[0].length(), digits.len(), "{}", digits);
        }
    }
}

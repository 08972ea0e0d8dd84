use super::lexer::{TokenKind, lex, unescape};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .expect("lex failed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn lexes_pattern_tokens() {
    assert_eq!(
        kinds("(add left: (num)* @a_list) @root"),
        vec![
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::RParen,
            TokenKind::Star,
            TokenKind::Capture,
            TokenKind::RParen,
            TokenKind::Capture,
        ]
    );
}

#[test]
fn skips_whitespace_and_comments() {
    assert_eq!(
        kinds("; leading comment\n(a ; trailing\n  \"x\")"),
        vec![
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Str,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn string_with_escaped_quote_is_one_token() {
    let source = r#""say \"hi\"""#;
    let tokens = lex(source).expect("lex failed");
    assert_eq!(tokens.len(), 1);
    assert_eq!(unescape(tokens[0].text(source)), r#"say "hi""#);
}

#[test]
fn unescape_handles_control_escapes() {
    assert_eq!(unescape(r#""a\nb\tc\\d""#), "a\nb\tc\\d");
}

#[test]
fn rejects_unknown_characters() {
    let err = lex("(a # b)").expect_err("should fail");
    assert_eq!(err.offset, 3);
    insta::assert_snapshot!(err.to_string(), @"unexpected input `#` (at byte 3)");
}

//! Lexer shared by the S-expression tree and query syntaxes.
//!
//! Produces span-based tokens; text is sliced from the source only when needed.

use std::ops::Range;

use logos::Logos;

use crate::QueryError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip(r"([ \t\r\n\f]+|;[^\n]*)", allow_greedy = true))]
pub(crate) enum TokenKind {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(":")]
    Colon,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("?")]
    Question,

    /// `@name`
    #[regex(r"@[A-Za-z_][A-Za-z0-9_.\-]*")]
    Capture,

    /// Node kinds, field names and the `_` wildcard.
    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*")]
    Ident,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Tokenizes `source`, failing on the first character no token accepts.
pub(crate) fn lex(source: &str) -> Result<Vec<Token>, QueryError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                return Err(QueryError::new(
                    format!("unexpected input `{}`", lexer.slice()),
                    span.start,
                ));
            }
        }
    }

    Ok(tokens)
}

/// Strips the quotes of a `Str` token and resolves its escapes.
pub(crate) fn unescape(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

//! Tokenizer for Swift source.
//!
//! Raw tokenization is done by `logos`. Strings, comments and raw strings
//! need context the regex engine cannot express (nesting, interpolation,
//! custom delimiters), so those start from a single-character token and a
//! callback scans the rest by hand. A second pass hands whitespace and
//! comments to neighbouring tokens: trailing trivia runs up to the next line
//! break, everything after it leads the next token.

use logos::{Lexer, Logos};

use super::error::{ParseError, ParseErrorReason};
use super::kind::{SyntaxKind, is_keyword};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LexErrorKind {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedBlockComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlashKind {
    LineComment,
    BlockComment,
    Operator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoundKind {
    Pound,
    RawString,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
enum RawToken {
    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[regex(r"\n|\r\n|\r")]
    Newline,

    #[token("\u{FEFF}")]
    ByteOrderMark,

    #[token("/", slash)]
    Slash(SlashKind),

    #[token("#", pound)]
    Pound(PoundKind),

    #[token("\"", string_literal)]
    Str,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Word,

    #[regex(r"`[\p{XID_Start}_]\p{XID_Continue}*`")]
    #[regex(r"\$\p{XID_Continue}+")]
    SpecialIdentifier,

    #[regex(r"[0-9][0-9_]*", number)]
    Number,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("@")]
    At,

    // `/` is handled by `slash` so comments win over division.
    #[regex(r"[=\-+!*%<>&|^~?\\]+")]
    Operator,
}

/// Extend a run of digits with a radix prefix, fraction or exponent.
/// Only consumes a suffix that is complete, so `1.description` stays a
/// number followed by a member access.
fn number(lex: &mut Lexer<RawToken>) {
    let digits = lex.slice();
    let rest = lex.remainder().as_bytes();
    let is_digit = |b: &u8| b.is_ascii_digit() || *b == b'_';

    if digits == "0" {
        let radix_digit: Option<fn(&u8) -> bool> = match rest.first() {
            Some(&(b'x' | b'X')) => Some(|b| b.is_ascii_hexdigit() || *b == b'_'),
            Some(&(b'b' | b'B')) => Some(|b| matches!(*b, b'0' | b'1' | b'_')),
            Some(&(b'o' | b'O')) => Some(|b| matches!(*b, b'0'..=b'7' | b'_')),
            _ => None,
        };
        if let Some(accept) = radix_digit {
            let len = rest[1..].iter().take_while(|&b| accept(b)).count();
            if len > 0 {
                lex.bump(1 + len);
            }
            return;
        }
    }

    let mut n = 0;
    if rest.first() == Some(&b'.') && rest.get(1).is_some_and(u8::is_ascii_digit) {
        n = 1 + rest[1..].iter().take_while(|&b| is_digit(b)).count();
    }
    if matches!(rest.get(n), Some(&(b'e' | b'E'))) {
        let mut m = n + 1;
        if matches!(rest.get(m), Some(&(b'+' | b'-'))) {
            m += 1;
        }
        if rest.get(m).is_some_and(u8::is_ascii_digit) {
            n = m + rest[m..].iter().take_while(|&b| is_digit(b)).count();
        }
    }
    lex.bump(n);
}

fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'=' | b'-' | b'+' | b'!' | b'*' | b'%' | b'<' | b'>' | b'&' | b'|' | b'^' | b'~' | b'?'
            | b'\\' | b'/'
    )
}

fn slash(lex: &mut Lexer<RawToken>) -> Result<SlashKind, LexErrorKind> {
    let rest = lex.remainder();
    if rest.starts_with('/') {
        let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
        lex.bump(end);
        return Ok(SlashKind::LineComment);
    }
    if rest.starts_with('*') {
        let consumed = scan_block_comment(rest)?;
        lex.bump(consumed);
        return Ok(SlashKind::BlockComment);
    }
    // A `/*` or `//` inside an operator run still starts a comment.
    let bytes = rest.as_bytes();
    let mut n = 0;
    while n < bytes.len() && is_operator_byte(bytes[n]) {
        if bytes[n] == b'/' && matches!(bytes.get(n + 1), Some(&(b'/' | b'*'))) {
            break;
        }
        n += 1;
    }
    lex.bump(n);
    Ok(SlashKind::Operator)
}

/// `rest` starts right after the opening `/`, at the `*`.
fn scan_block_comment(rest: &str) -> Result<usize, LexErrorKind> {
    let bytes = rest.as_bytes();
    let mut depth = 1usize;
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return Ok(i);
            }
        } else {
            i += 1;
        }
    }
    Err(LexErrorKind::UnterminatedBlockComment)
}

fn pound(lex: &mut Lexer<RawToken>) -> Result<PoundKind, LexErrorKind> {
    let rest = lex.remainder();
    let extra = rest.bytes().take_while(|b| *b == b'#').count();
    if rest.as_bytes().get(extra) != Some(&b'"') {
        return Ok(PoundKind::Pound);
    }
    let consumed = scan_string(&rest[extra + 1..], extra + 1)?;
    lex.bump(extra + 1 + consumed);
    Ok(PoundKind::RawString)
}

fn string_literal(lex: &mut Lexer<RawToken>) -> Result<(), LexErrorKind> {
    let consumed = scan_string(lex.remainder(), 0)?;
    lex.bump(consumed);
    Ok(())
}

/// Scan a string body. `rest` starts right after the opening quote and
/// `hashes` is the raw-string delimiter count. Returns the number of bytes
/// up to and including the closing delimiter.
fn scan_string(rest: &str, hashes: usize) -> Result<usize, LexErrorKind> {
    let multiline = rest.starts_with("\"\"");
    let start = if multiline { 2 } else { 0 };
    let quotes = if multiline { "\"\"\"" } else { "\"" };
    let closing = format!("{quotes}{}", "#".repeat(hashes));
    let escape = format!("\\{}", "#".repeat(hashes));

    let bytes = rest.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        let tail = &bytes[i..];
        if tail.starts_with(closing.as_bytes()) {
            return Ok(i + closing.len());
        }
        if tail.starts_with(escape.as_bytes()) {
            i += escape.len();
            match bytes.get(i) {
                Some(&b'(') => i = scan_interpolation(rest, i + 1)?,
                Some(&(b'\n' | b'\r')) if !multiline => {
                    return Err(LexErrorKind::UnterminatedString);
                }
                Some(_) => i += 1,
                None => return Err(LexErrorKind::UnterminatedString),
            }
            continue;
        }
        if !multiline && matches!(bytes[i], b'\n' | b'\r') {
            return Err(LexErrorKind::UnterminatedString);
        }
        i += 1;
    }
    Err(LexErrorKind::UnterminatedString)
}

/// Skip an interpolated expression. `start` is just past the `(`; returns
/// the index just past the matching `)`.
fn scan_interpolation(text: &str, start: usize) -> Result<usize, LexErrorKind> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            b'"' => i += 1 + scan_string(&text[i + 1..], 0)?,
            b'#' => {
                let hashes = text[i..].bytes().take_while(|b| *b == b'#').count();
                if bytes.get(i + hashes) == Some(&b'"') {
                    let body = i + hashes + 1;
                    i = body + scan_string(&text[body..], hashes)?;
                } else {
                    i += hashes;
                }
            }
            _ => i += 1,
        }
    }
    Err(LexErrorKind::UnterminatedString)
}

fn classify(raw: RawToken, text: &str) -> SyntaxKind {
    match raw {
        RawToken::Whitespace => SyntaxKind::Whitespace,
        RawToken::Newline => SyntaxKind::Newline,
        RawToken::ByteOrderMark => SyntaxKind::ByteOrderMark,
        RawToken::Slash(SlashKind::LineComment) => SyntaxKind::LineComment,
        RawToken::Slash(SlashKind::BlockComment) => SyntaxKind::BlockComment,
        RawToken::Slash(SlashKind::Operator) | RawToken::Operator => SyntaxKind::Operator,
        RawToken::Pound(PoundKind::Pound) => SyntaxKind::Pound,
        RawToken::Pound(PoundKind::RawString) | RawToken::Str => SyntaxKind::StringLiteral,
        RawToken::Word if is_keyword(text) => SyntaxKind::Keyword,
        RawToken::Word | RawToken::SpecialIdentifier => SyntaxKind::Identifier,
        RawToken::Number => SyntaxKind::NumberLiteral,
        RawToken::LParen => SyntaxKind::LParen,
        RawToken::RParen => SyntaxKind::RParen,
        RawToken::LBracket => SyntaxKind::LBracket,
        RawToken::RBracket => SyntaxKind::RBracket,
        RawToken::LBrace => SyntaxKind::LBrace,
        RawToken::RBrace => SyntaxKind::RBrace,
        RawToken::Comma => SyntaxKind::Comma,
        RawToken::Colon => SyntaxKind::Colon,
        RawToken::Semicolon => SyntaxKind::Semicolon,
        RawToken::Dot => SyntaxKind::Dot,
        RawToken::At => SyntaxKind::At,
    }
}

/// Returns `true` if `name` can be written bare as a Swift identifier:
/// one identifier token, not a keyword, no backticks.
pub fn is_identifier(name: &str) -> bool {
    let mut lexer = RawToken::lexer(name);
    matches!(lexer.next(), Some(Ok(RawToken::Word)))
        && lexer.span().len() == name.len()
        && !is_keyword(name)
}

/// A piece of whitespace or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Trivia<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// A significant token with the trivia it owns and the byte offset of its
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexed<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: usize,
    pub leading: Vec<Trivia<'a>>,
    pub trailing: Vec<Trivia<'a>>,
}

impl Lexed<'_> {
    pub fn has_newline_before(&self) -> bool {
        self.leading.iter().any(|t| t.kind == SyntaxKind::Newline)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tokens<'a> {
    pub tokens: Vec<Lexed<'a>>,
    /// Trivia after the last token.
    pub tail: Vec<Trivia<'a>>,
}

/// Split `source` into tokens that, together with `tail`, own all of its
/// trivia.
pub(crate) fn tokenize(source: &str) -> Result<Tokens<'_>, ParseError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens: Vec<Lexed> = Vec::new();
    let mut pending: Vec<Trivia> = Vec::new();
    // True while still on the line of the last token: trivia is trailing.
    let mut same_line = false;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let unexpected = || {
            ParseError::new(
                span.start,
                ParseErrorReason::UnexpectedCharacter(
                    source[span.start..].chars().next().unwrap_or('\u{FFFD}'),
                ),
            )
        };
        let raw = result.map_err(|kind| match kind {
            LexErrorKind::UnterminatedString => {
                ParseError::new(span.start, ParseErrorReason::UnterminatedString)
            }
            LexErrorKind::UnterminatedBlockComment => {
                ParseError::new(span.start, ParseErrorReason::UnterminatedBlockComment)
            }
            LexErrorKind::UnexpectedCharacter => unexpected(),
        })?;
        if raw == RawToken::ByteOrderMark && span.start != 0 {
            return Err(unexpected());
        }
        let text = &source[span.clone()];

        match classify(raw, text) {
            SyntaxKind::Newline => {
                same_line = false;
                pending.push(Trivia {
                    kind: SyntaxKind::Newline,
                    text,
                });
            }
            kind if kind.is_trivia() => {
                let trivia = Trivia { kind, text };
                match tokens.last_mut() {
                    Some(last) if same_line => last.trailing.push(trivia),
                    _ => pending.push(trivia),
                }
            }
            kind => {
                tokens.push(Lexed {
                    kind,
                    text,
                    offset: span.start,
                    leading: std::mem::take(&mut pending),
                    trailing: Vec::new(),
                });
                same_line = true;
            }
        }
    }

    Ok(Tokens {
        tokens,
        tail: pending,
    })
}

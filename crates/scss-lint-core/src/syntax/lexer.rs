//! Lazy, lossless tokenizer for SCSS source text.
//!
//! The tokenizer never fails: malformed input (an unterminated string,
//! comment, interpolation or `url(`, or a stray control character) becomes a
//! [`TokenKind::Error`] token and scanning continues after it. Concatenating
//! the text of every produced token reproduces the input exactly.

use super::token::{Position, Span, Token, TokenKind};

/// Iterator over the tokens of a source text.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: Position,
}

/// Starts tokenizing `text`.
///
/// The returned iterator is lazy and finite; it yields `None` once the end of
/// input is reached.
#[must_use]
pub fn tokenize(text: &str) -> Tokenizer<'_> {
    Tokenizer {
        src: text,
        pos: Position::START,
    }
}

impl<'a> Tokenizer<'a> {
    /// Position of the next token.
    #[must_use]
    pub fn position(&self) -> Position {
        self.pos
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let start = self.pos;
        let text = &self.src[start.offset..start.offset + len];
        let mut end = start;
        for ch in text.chars() {
            if ch == '\n' {
                end.line += 1;
                end.column = 1;
            } else {
                end.column += 1;
            }
        }
        end.offset += len;
        self.pos = end;
        Token {
            kind,
            text,
            span: Span::new(start, end),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos.offset..];
        let first = rest.chars().next()?;
        let (kind, len) = scan(rest, first);
        Some(self.emit(kind, len.max(first.len_utf8())))
    }
}

/// Classifies the token at the start of `rest` and returns its byte length.
fn scan(rest: &str, first: char) -> (TokenKind, usize) {
    let after = &rest[first.len_utf8()..];
    match first {
        c if is_whitespace(c) => (
            TokenKind::Whitespace,
            rest.find(|ch| !is_whitespace(ch)).unwrap_or(rest.len()),
        ),
        '/' if after.starts_with('/') => (
            TokenKind::LineComment,
            rest.find(['\n', '\r']).unwrap_or(rest.len()),
        ),
        '/' if after.starts_with('*') => match after[1..].find("*/") {
            Some(end) => (TokenKind::BlockComment, end + 4),
            None => (TokenKind::Error, rest.len()),
        },
        '"' | '\'' => scan_string(rest, first),
        '@' if starts_ident(after) => (TokenKind::AtKeyword, 1 + name_len(after)),
        '$' if starts_ident(after) => (TokenKind::Variable, 1 + name_len(after)),
        '#' if after.starts_with('{') => scan_interpolation(rest),
        '#' if after.starts_with(is_name_char) => (TokenKind::Hash, 1 + name_len(after)),
        c if c.is_ascii_digit() => (TokenKind::Number, number_len(rest)),
        '.' if after.starts_with(|ch: char| ch.is_ascii_digit()) => {
            (TokenKind::Number, number_len(rest))
        }
        '-' if after.starts_with(|ch: char| ch.is_ascii_digit())
            || (after.starts_with('.') && after[1..].starts_with(|ch: char| ch.is_ascii_digit())) =>
        {
            (TokenKind::Number, 1 + number_len(after))
        }
        _ if starts_ident(rest) => scan_ident(rest),
        '>' | '+' | '~' => (TokenKind::Combinator, 1),
        c if c.is_ascii_punctuation() => (TokenKind::Punct, 1),
        c => (TokenKind::Error, c.len_utf8()),
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

/// Whether `s` begins an identifier (`foo`, `-foo`, `--foo`, `\31 0`).
fn starts_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some('-') => matches!(chars.next(), Some(c) if is_name_start(c) || c == '-' || c == '\\'),
        Some('\\') => matches!(chars.next(), Some(c) if c != '\n'),
        Some(c) => is_name_start(c),
        None => false,
    }
}

/// Length of the run of name characters (and escapes) at the start of `s`.
fn name_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some((j, escaped)) if escaped != '\n' => {
                    len = j + escaped.len_utf8();
                    continue;
                }
                _ => break,
            }
        }
        if !is_name_char(ch) {
            break;
        }
        len = i + ch.len_utf8();
    }
    len
}

/// Length of an unsigned number with its optional unit.
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    let unit = &s[i..];
    if unit.starts_with('%') {
        i + 1
    } else if unit.starts_with(is_name_start) {
        i + name_len(unit)
    } else {
        i
    }
}

fn scan_string(rest: &str, quote: char) -> (TokenKind, usize) {
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '\n' | '\r' => return (TokenKind::Error, i),
            c if c == quote => return (TokenKind::String, i + 1),
            _ => {}
        }
    }
    (TokenKind::Error, rest.len())
}

fn scan_interpolation(rest: &str) -> (TokenKind, usize) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, ch)) = chars.next() {
        if let Some(q) = quote {
            if ch == '\\' {
                chars.next();
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (TokenKind::Interpolation, i + 1);
                }
            }
            _ => {}
        }
    }
    (TokenKind::Error, rest.len())
}

fn scan_ident(rest: &str) -> (TokenKind, usize) {
    let len = name_len(rest);
    let ident = &rest[..len];
    let after = &rest[len..];
    if ident.eq_ignore_ascii_case("url") && after.starts_with('(') {
        let inner = after[1..].trim_start_matches(is_whitespace);
        if !inner.starts_with(['"', '\'']) {
            return scan_url(rest, len + 1);
        }
    }
    (TokenKind::Ident, len)
}

/// Scans an unquoted `url(...)`; `open_end` is the offset just past `(`.
fn scan_url(rest: &str, open_end: usize) -> (TokenKind, usize) {
    for (i, ch) in rest[open_end..].char_indices() {
        match ch {
            ')' => return (TokenKind::Url, open_end + i + 1),
            '\n' | '\r' => return (TokenKind::Error, open_end + i),
            _ => {}
        }
    }
    (TokenKind::Error, rest.len())
}

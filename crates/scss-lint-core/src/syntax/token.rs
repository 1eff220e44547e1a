//! Lexical tokens and source positions.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in characters (1-indexed).
    pub column: usize,
}

impl Position {
    /// Position of the first byte of an input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };
}

/// A half-open region of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// First position covered.
    pub start: Position,
    /// Position just past the end.
    pub end: Position,
}

impl Span {
    /// Creates a span from two positions.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Byte range covered by this span.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start.offset..self.end.offset
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Returns true for an empty span.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Kinds of lexical tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Identifier such as `color`, `-webkit-box` or `--custom`.
    Ident,
    /// `@media`, `@include`, ...
    AtKeyword,
    /// `$variable`.
    Variable,
    /// `#fff` or `#main`.
    Hash,
    /// Quoted string, delimiters included.
    String,
    /// Number with an optional unit suffix: `0`, `1.5em`, `50%`.
    Number,
    /// Unquoted `url(...)`.
    Url,
    /// `#{...}` with balanced braces.
    Interpolation,
    /// Any single punctuation character.
    Punct,
    /// `>`, `+` or `~`.
    Combinator,
    /// `// ...` up to, not including, the line break.
    LineComment,
    /// `/* ... */`.
    BlockComment,
    /// Run of spaces, tabs and line breaks.
    Whitespace,
    /// Malformed input the tokenizer could not classify.
    Error,
}

/// A token borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token kind.
    pub kind: TokenKind,
    /// Exact source text.
    pub text: &'a str,
    /// Location in the source.
    pub span: Span,
}

impl Token<'_> {
    /// Whitespace or a comment.
    #[must_use]
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Whitespace run.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Either comment form.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Punctuation token with the given character.
    #[must_use]
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.len() == c.len_utf8() && self.text.starts_with(c)
    }

    /// Identifier with the given text, compared ASCII case-insensitively.
    #[must_use]
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text.eq_ignore_ascii_case(name)
    }

    /// Byte offset of the first character.
    #[must_use]
    pub fn start(&self) -> usize {
        self.span.start.offset
    }

    /// Byte offset just past the last character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.span.end.offset
    }

    /// Human-readable reason for an [`TokenKind::Error`] token.
    #[must_use]
    pub fn error_reason(&self) -> &'static str {
        if self.text.starts_with('"') || self.text.starts_with('\'') {
            "unterminated string"
        } else if self.text.starts_with("/*") {
            "unterminated block comment"
        } else if self.text.starts_with("#{") {
            "unterminated interpolation"
        } else if self
            .text
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("url("))
        {
            "unterminated url()"
        } else {
            "unexpected character"
        }
    }
}

/// Concatenates token texts.
#[must_use]
pub fn join_text(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect()
}

/// Span covering a non-empty token slice.
#[must_use]
pub fn tokens_span(tokens: &[Token<'_>]) -> Option<Span> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(Span::new(first.span.start, last.span.end))
}

/// Strips leading and trailing trivia from a token slice.
#[must_use]
pub fn trim_trivia<'t, 'a>(tokens: &'t [Token<'a>]) -> &'t [Token<'a>] {
    let start = tokens
        .iter()
        .position(|t| !t.is_trivia())
        .unwrap_or(tokens.len());
    let end = tokens
        .iter()
        .rposition(|t| !t.is_trivia())
        .map_or(start, |i| i + 1);
    &tokens[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::tokenize;

    #[test]
    fn trim_trivia_strips_both_ends() {
        let tokens: Vec<_> = tokenize("  a b /* c */ ").collect();
        let trimmed = trim_trivia(&tokens);
        assert_eq!(join_text(trimmed), "a b");
    }

    #[test]
    fn trim_trivia_of_only_trivia_is_empty() {
        let tokens: Vec<_> = tokenize("  /* c */\n").collect();
        assert!(trim_trivia(&tokens).is_empty());
    }

    #[test]
    fn error_reasons() {
        let tokens: Vec<_> = tokenize("a: \"open").collect();
        let error = tokens.iter().find(|t| t.kind == TokenKind::Error).unwrap();
        assert_eq!(error.error_reason(), "unterminated string");
    }
}

//! Declaration values and helpers for inspecting them.
//!
//! Values keep their raw token sequence. The helpers here give rules a
//! structured view (numbers with units, colour literals, function calls,
//! space-separated parts) without changing what gets serialized.

use super::token::{join_text, tokens_span, Span, Token, TokenKind};

/// Raw value tokens of a declaration.
#[derive(Debug, Clone, Default)]
pub struct Value<'a> {
    /// Tokens from the first to the last non-whitespace token.
    pub tokens: Vec<Token<'a>>,
}

/// A numeric literal split into magnitude and unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number<'a> {
    /// Numeric value.
    pub value: f64,
    /// Unit suffix, possibly empty (`px`, `em`, `%`).
    pub unit: &'a str,
}

/// A function call located in a token slice, by token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    /// Index of the function name.
    pub name: usize,
    /// Index of `(`.
    pub open: usize,
    /// Index of the matching `)`, if any.
    pub close: Option<usize>,
}

impl<'a> Value<'a> {
    /// Creates a value from its tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens }
    }

    /// Whether there are no value tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Source text.
    #[must_use]
    pub fn text(&self) -> String {
        join_text(&self.tokens)
    }

    /// Span of the value.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        tokens_span(&self.tokens)
    }

    /// Function calls in the value, nested calls included.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        find_calls(&self.tokens)
    }

    /// Numeric literals with their token index.
    #[must_use]
    pub fn numbers(&self) -> Vec<(usize, Number<'a>)> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Number)
            .filter_map(|(i, t)| split_number(t.text).map(|n| (i, n)))
            .collect()
    }

    /// Hash tokens that look like hex colour literals.
    #[must_use]
    pub fn hex_colors(&self) -> Vec<Token<'a>> {
        self.tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Hash && is_hex_color(t.text))
            .copied()
            .collect()
    }

    /// Span of `!important`, if present.
    #[must_use]
    pub fn important(&self) -> Option<Span> {
        important_in(&self.tokens)
    }

    /// Top-level parts separated by whitespace.
    #[must_use]
    pub fn parts(&self) -> Vec<&[Token<'a>]> {
        top_level_parts(&self.tokens)
    }
}

/// Splits `"12.5px"` into `12.5` and `"px"`.
#[must_use]
pub fn split_number(text: &str) -> Option<Number<'_>> {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }
    let value = text[..end].parse::<f64>().ok()?;
    Some(Number {
        value,
        unit: &text[end..],
    })
}

/// Whether `text` is `#` followed by 3, 4, 6 or 8 hex digits.
#[must_use]
pub fn is_hex_color(text: &str) -> bool {
    text.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
    })
}

/// Finds every `name(` call, nested calls included, in source order.
#[must_use]
pub fn find_calls(tokens: &[Token<'_>]) -> Vec<Call> {
    let mut calls = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Ident {
            continue;
        }
        let Some(open) = tokens.get(i + 1) else {
            continue;
        };
        if !open.is_punct('(') || open.start() != token.end() {
            continue;
        }
        calls.push(Call {
            name: i,
            open: i + 1,
            close: matching_paren(tokens, i + 1),
        });
    }
    calls
}

fn matching_paren(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.is_punct('(') {
            depth += 1;
        } else if token.is_punct(')') {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

impl Call {
    /// Function name, lower-cased.
    #[must_use]
    pub fn name(&self, tokens: &[Token<'_>]) -> String {
        tokens[self.name].text.to_ascii_lowercase()
    }

    /// Whether the token at `index` lies between the parentheses.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index > self.open && self.close.map_or(true, |close| index < close)
    }

    /// Comma-separated arguments with surrounding whitespace trimmed.
    #[must_use]
    pub fn args<'t, 'a>(&self, tokens: &'t [Token<'a>]) -> Vec<&'t [Token<'a>]> {
        let end = self.close.unwrap_or(tokens.len());
        let inner = &tokens[self.open + 1..end];
        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, token) in inner.iter().enumerate() {
            if token.is_punct('(') {
                depth += 1;
            } else if token.is_punct(')') {
                depth = depth.saturating_sub(1);
            } else if token.is_punct(',') && depth == 0 {
                args.push(super::token::trim_trivia(&inner[start..i]));
                start = i + 1;
            }
        }
        let last = super::token::trim_trivia(&inner[start..]);
        if !last.is_empty() || !args.is_empty() {
            args.push(last);
        }
        args
    }
}

/// Span of `!important` (case-insensitive, whitespace allowed after `!`).
#[must_use]
pub fn important_in(tokens: &[Token<'_>]) -> Option<Span> {
    for (i, token) in tokens.iter().enumerate() {
        if !token.is_punct('!') {
            continue;
        }
        let next = tokens[i + 1..].iter().find(|t| !t.is_whitespace())?;
        if next.is_ident("important") {
            return Some(Span::new(token.span.start, next.span.end));
        }
    }
    None
}

/// Splits tokens on whitespace outside parentheses; trivia is dropped.
#[must_use]
pub fn top_level_parts<'t, 'a>(tokens: &'t [Token<'a>]) -> Vec<&'t [Token<'a>]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (i, token) in tokens.iter().enumerate() {
        if token.is_trivia() && depth == 0 {
            if let Some(s) = start.take() {
                parts.push(&tokens[s..i]);
            }
            continue;
        }
        if token.is_punct('(') {
            depth += 1;
        } else if token.is_punct(')') {
            depth = depth.saturating_sub(1);
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        parts.push(&tokens[s..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::tokenize;

    fn value(text: &str) -> Value<'_> {
        Value::new(tokenize(text).collect())
    }

    #[test]
    fn splits_numbers() {
        assert_eq!(
            split_number("12.5px"),
            Some(Number {
                value: 12.5,
                unit: "px"
            })
        );
        assert_eq!(split_number("-0"), Some(Number { value: 0.0, unit: "" }));
        assert_eq!(split_number("50%").map(|n| n.unit), Some("%"));
        assert_eq!(split_number("px"), None);
    }

    #[test]
    fn recognizes_hex_colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#FFFFFF80"));
        assert!(!is_hex_color("#ffff0"));
        assert!(!is_hex_color("#main"));
    }

    #[test]
    fn finds_nested_calls() {
        let v = value("darken(rgba(0, 0, 0, 0.5), 10%)");
        let calls = v.calls();
        let names: Vec<_> = calls.iter().map(|c| c.name(&v.tokens)).collect();
        assert_eq!(names, vec!["darken", "rgba"]);
        let args = calls[1].args(&v.tokens);
        assert_eq!(args.len(), 4);
        assert_eq!(join_text(args[3]), "0.5");
        assert!(calls[0].contains(calls[1].name));
    }

    #[test]
    fn call_requires_adjacent_paren() {
        let v = value("a (b)");
        assert!(v.calls().is_empty());
    }

    #[test]
    fn top_level_parts_respect_parens() {
        let v = value("0 calc(1px + 2px)  auto");
        let parts: Vec<_> = v.parts().into_iter().map(join_text).collect();
        assert_eq!(parts, vec!["0", "calc(1px + 2px)", "auto"]);
    }

    #[test]
    fn detects_important() {
        assert!(value("red ! IMPORTANT").important().is_some());
        assert!(value("red").important().is_none());
    }
}

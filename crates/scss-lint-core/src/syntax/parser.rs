//! Recursive-descent parser producing a lossless [`Stylesheet`].
//!
//! Statements are classified by scanning ahead at parenthesis depth zero for
//! the first `{`, `;` or `}`. A `{` makes the statement a rule set; otherwise a
//! top-level `:` makes it a declaration. Anything else is kept as a
//! [`Bogus`] node and reported, so the rest of the file still parses.

use super::cst::{
    AtRule, Block, Bogus, Comment, Declaration, Empty, Node, RuleSet, SelectorList, Stylesheet,
};
use super::lexer::tokenize;
use super::token::{Span, Token, TokenKind};
use super::value::Value;
use serde::Serialize;

/// A recoverable syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
    /// Where it went wrong.
    pub span: Span,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Output of the parser: a tree plus every error met on the way.
#[derive(Debug, Clone)]
pub struct Parse<'a> {
    /// The tree. Always complete, even when `errors` is non-empty.
    pub stylesheet: Stylesheet<'a>,
    /// Syntax errors in source order.
    pub errors: Vec<ParseError>,
}

impl Parse<'_> {
    /// Returns true if the input parsed without errors.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses a token stream.
pub fn parse<'a>(tokens: impl IntoIterator<Item = Token<'a>>) -> Parse<'a> {
    let mut parser = Parser {
        tokens: tokens.into_iter().collect(),
        pos: 0,
        errors: Vec::new(),
    };
    for token in &parser.tokens {
        if token.kind == TokenKind::Error {
            parser
                .errors
                .push(ParseError::new(token.error_reason(), token.span));
        }
    }
    let (children, trailing) = parser.items(0, 0, false);
    let mut errors = parser.errors;
    errors.sort_by_key(|e| (e.span.start.offset, e.span.end.offset));
    Parse {
        stylesheet: Stylesheet { children, trailing },
        errors,
    }
}

/// Tokenizes and parses `text`.
#[must_use]
pub fn parse_str(text: &str) -> Parse<'_> {
    parse(tokenize(text))
}

/// How a statement scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Brace,
    Semicolon,
    Close,
    Eof,
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn take_whitespace(&mut self) -> Vec<Token<'a>> {
        let start = self.pos;
        while self.peek().is_some_and(|t| t.is_whitespace()) {
            self.pos += 1;
        }
        self.tokens[start..self.pos].to_vec()
    }

    /// Parses statements until `}` (inside a block) or end of input.
    ///
    /// Returns the statements and the whitespace left before the terminator.
    fn items(
        &mut self,
        level: usize,
        depth: usize,
        in_block: bool,
    ) -> (Vec<Node<'a>>, Vec<Token<'a>>) {
        let mut children = Vec::new();
        loop {
            let leading = self.take_whitespace();
            let Some(token) = self.peek() else {
                return (children, leading);
            };
            if token.is_punct('}') {
                if in_block {
                    return (children, leading);
                }
                self.pos += 1;
                self.errors
                    .push(ParseError::new("unexpected `}`", token.span));
                children.push(Node::Bogus(Bogus {
                    leading,
                    tokens: vec![token],
                    level,
                }));
            } else if token.is_comment() {
                self.pos += 1;
                children.push(Node::Comment(Comment {
                    leading,
                    token,
                    level,
                }));
            } else if token.is_punct(';') {
                self.pos += 1;
                children.push(Node::Empty(Empty {
                    leading,
                    semicolon: token,
                    level,
                }));
            } else if token.kind == TokenKind::AtKeyword {
                children.push(self.at_rule(leading, level, depth));
            } else {
                children.push(self.statement(leading, level, depth));
            }
        }
    }

    /// Finds the statement terminator at parenthesis depth zero.
    fn scan(&self, from: usize) -> (usize, Stop) {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(from) {
            if token.kind != TokenKind::Punct {
                continue;
            }
            match token.text {
                "(" | "[" => depth += 1,
                ")" | "]" => depth = depth.saturating_sub(1),
                "{" if depth == 0 => return (i, Stop::Brace),
                ";" if depth == 0 => return (i, Stop::Semicolon),
                "}" if depth == 0 => return (i, Stop::Close),
                _ => {}
            }
        }
        (self.tokens.len(), Stop::Eof)
    }

    fn top_level_colon(&self, from: usize, to: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens[from..to].iter().enumerate() {
            if token.is_punct('(') || token.is_punct('[') {
                depth += 1;
            } else if token.is_punct(')') || token.is_punct(']') {
                depth = depth.saturating_sub(1);
            } else if token.is_punct(':') && depth == 0 {
                return Some(from + i);
            }
        }
        None
    }

    /// Index just past the last non-whitespace token in `from..to`.
    fn trim_end(&self, from: usize, to: usize) -> usize {
        self.tokens[from..to]
            .iter()
            .rposition(|t| !t.is_whitespace())
            .map_or(from, |i| from + i + 1)
    }

    /// Index just past the last token in `from..to` that is neither whitespace nor a comment.
    fn trim_trivia_end(&self, from: usize, to: usize) -> usize {
        self.tokens[from..to]
            .iter()
            .rposition(|t| !t.is_trivia())
            .map_or(from, |i| from + i + 1)
    }

    fn statement(&mut self, leading: Vec<Token<'a>>, level: usize, depth: usize) -> Node<'a> {
        let start = self.pos;
        let (stop, kind) = self.scan(start);
        if kind == Stop::Brace {
            return self.rule_set(leading, stop, level, depth);
        }
        match self.top_level_colon(start, stop) {
            Some(colon) if self.trim_trivia_end(start, colon) > start => {
                self.declaration(leading, colon, stop, kind, level)
            }
            Some(colon) => {
                let span = self.tokens[colon].span;
                self.errors
                    .push(ParseError::new("missing property before `:`", span));
                self.bogus(leading, stop, kind, level)
            }
            None => {
                let has_error_token = self.tokens[start..stop]
                    .iter()
                    .any(|t| t.kind == TokenKind::Error);
                if !has_error_token {
                    let end = self.trim_end(start, stop);
                    let span = Span::new(
                        self.tokens[start].span.start,
                        self.tokens[end.max(start + 1) - 1].span.end,
                    );
                    self.errors.push(ParseError::new("expected declaration", span));
                }
                self.bogus(leading, stop, kind, level)
            }
        }
    }

    /// Skips to the statement boundary, consuming a `;` terminator.
    fn bogus(&mut self, leading: Vec<Token<'a>>, stop: usize, kind: Stop, level: usize) -> Node<'a> {
        let end = if kind == Stop::Semicolon {
            stop + 1
        } else {
            self.trim_end(self.pos, stop)
        };
        let tokens = self.tokens[self.pos..end].to_vec();
        self.pos = end;
        Node::Bogus(Bogus {
            leading,
            tokens,
            level,
        })
    }

    fn rule_set(
        &mut self,
        leading: Vec<Token<'a>>,
        brace: usize,
        level: usize,
        depth: usize,
    ) -> Node<'a> {
        let selectors = SelectorList::new(self.tokens[self.pos..brace].to_vec());
        if selectors.selectors.is_empty() {
            self.errors
                .push(ParseError::new("missing selector before `{`", self.tokens[brace].span));
        }
        self.pos = brace;
        let block = self.block(level, depth + 1);
        Node::RuleSet(RuleSet {
            leading,
            selectors,
            block,
            level,
            depth: depth + 1,
        })
    }

    /// Parses `{ ... }` starting at the current `{`.
    fn block(&mut self, level: usize, depth: usize) -> Block<'a> {
        let open = self.tokens[self.pos];
        self.pos += 1;
        let (children, trailing) = self.items(level + 1, depth, true);
        let close = self.bump();
        if close.is_none() {
            self.errors.push(ParseError::new("unclosed block", open.span));
        }
        Block {
            open,
            children,
            trailing,
            close,
        }
    }

    fn declaration(
        &mut self,
        leading: Vec<Token<'a>>,
        colon: usize,
        stop: usize,
        kind: Stop,
        level: usize,
    ) -> Node<'a> {
        let property_end = self.trim_trivia_end(self.pos, colon);
        let property = self.tokens[self.pos..property_end].to_vec();
        let before_colon = self.tokens[property_end..colon].to_vec();

        let mut value_start = colon + 1;
        while value_start < stop && self.tokens[value_start].is_whitespace() {
            value_start += 1;
        }
        let value_end = self.trim_end(value_start, stop);
        let after_colon = self.tokens[colon + 1..value_start].to_vec();
        let value = Value::new(self.tokens[value_start..value_end].to_vec());

        let (before_semicolon, semicolon) = if kind == Stop::Semicolon {
            self.pos = stop + 1;
            (
                self.tokens[value_end..stop].to_vec(),
                Some(self.tokens[stop]),
            )
        } else {
            self.pos = value_end;
            (Vec::new(), None)
        };

        Node::Declaration(Declaration {
            leading,
            property,
            before_colon,
            colon: self.tokens[colon],
            after_colon,
            value,
            before_semicolon,
            semicolon,
            level,
        })
    }

    fn at_rule(&mut self, leading: Vec<Token<'a>>, level: usize, depth: usize) -> Node<'a> {
        let keyword = self.tokens[self.pos];
        let prelude_start = self.pos + 1;
        let (stop, kind) = self.scan(prelude_start);
        match kind {
            Stop::Brace => {
                let prelude = self.tokens[prelude_start..stop].to_vec();
                self.pos = stop;
                let block = self.block(level, depth);
                Node::AtRule(AtRule {
                    leading,
                    keyword,
                    prelude,
                    block: Some(block),
                    semicolon: None,
                    level,
                })
            }
            Stop::Semicolon => {
                let prelude = self.tokens[prelude_start..stop].to_vec();
                self.pos = stop + 1;
                Node::AtRule(AtRule {
                    leading,
                    keyword,
                    prelude,
                    block: None,
                    semicolon: Some(self.tokens[stop]),
                    level,
                })
            }
            Stop::Close | Stop::Eof => {
                let end = self.trim_end(prelude_start, stop);
                let prelude = self.tokens[prelude_start..end].to_vec();
                self.pos = end;
                Node::AtRule(AtRule {
                    leading,
                    keyword,
                    prelude,
                    block: None,
                    semicolon: None,
                    level,
                })
            }
        }
    }
}

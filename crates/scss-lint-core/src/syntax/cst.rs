//! Concrete syntax tree.
//!
//! Every token produced by the tokenizer is owned by exactly one node, so
//! writing the tree back out with [`Stylesheet::to_source`] reproduces the
//! input byte for byte. Whitespace preceding a statement is kept as that
//! statement's `leading` trivia; comments standing between statements are
//! [`Comment`] nodes of their own.

use super::token::{join_text, tokens_span, trim_trivia, Position, Span, Token, TokenKind};
use super::value::Value;
use std::fmt;

/// Root of a parsed file.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet<'a> {
    /// Top-level statements.
    pub children: Vec<Node<'a>>,
    /// Whitespace after the last statement.
    pub trailing: Vec<Token<'a>>,
}

/// A statement in a stylesheet or block body.
#[derive(Debug, Clone)]
pub enum Node<'a> {
    /// `selector { ... }`
    RuleSet(RuleSet<'a>),
    /// `property: value;`
    Declaration(Declaration<'a>),
    /// `@keyword prelude;` or `@keyword prelude { ... }`
    AtRule(AtRule<'a>),
    /// A comment standing on its own between statements.
    Comment(Comment<'a>),
    /// A stray `;`.
    Empty(Empty<'a>),
    /// Tokens skipped during error recovery.
    Bogus(Bogus<'a>),
}

/// A `{ ... }` body.
#[derive(Debug, Clone)]
pub struct Block<'a> {
    /// The `{` token.
    pub open: Token<'a>,
    /// Statements inside the block.
    pub children: Vec<Node<'a>>,
    /// Whitespace before the closing brace.
    pub trailing: Vec<Token<'a>>,
    /// The `}` token; `None` when the block is never closed.
    pub close: Option<Token<'a>>,
}

/// A selector list followed by a block.
#[derive(Debug, Clone)]
pub struct RuleSet<'a> {
    /// Whitespace before the selector.
    pub leading: Vec<Token<'a>>,
    /// Selector prelude.
    pub selectors: SelectorList<'a>,
    /// Rule body.
    pub block: Block<'a>,
    /// Number of enclosing blocks.
    pub level: usize,
    /// Selector nesting depth; 1 for a top-level rule set.
    pub depth: usize,
}

/// Comma-separated selectors.
#[derive(Debug, Clone)]
pub struct SelectorList<'a> {
    /// Every token between the leading trivia and `{`.
    pub tokens: Vec<Token<'a>>,
    /// Individual selectors with surrounding trivia and commas removed.
    pub selectors: Vec<Selector<'a>>,
}

/// One complex selector such as `.nav > a:hover`.
#[derive(Debug, Clone)]
pub struct Selector<'a> {
    /// Selector tokens.
    pub tokens: Vec<Token<'a>>,
}

/// A property declaration (also used for `$variable: value;`).
#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    /// Whitespace before the property.
    pub leading: Vec<Token<'a>>,
    /// Property name tokens, usually a single identifier or variable.
    pub property: Vec<Token<'a>>,
    /// Trivia between the property and the colon.
    pub before_colon: Vec<Token<'a>>,
    /// The `:` token.
    pub colon: Token<'a>,
    /// Whitespace between the colon and the value.
    pub after_colon: Vec<Token<'a>>,
    /// Declaration value.
    pub value: Value<'a>,
    /// Whitespace between the value and the semicolon.
    pub before_semicolon: Vec<Token<'a>>,
    /// The terminating `;`, if present.
    pub semicolon: Option<Token<'a>>,
    /// Number of enclosing blocks.
    pub level: usize,
}

/// An at-rule such as `@media`, `@include` or `@extend`.
#[derive(Debug, Clone)]
pub struct AtRule<'a> {
    /// Whitespace before the keyword.
    pub leading: Vec<Token<'a>>,
    /// The `@keyword` token.
    pub keyword: Token<'a>,
    /// Tokens between the keyword and `{` or `;`.
    pub prelude: Vec<Token<'a>>,
    /// Body, for block at-rules.
    pub block: Option<Block<'a>>,
    /// The terminating `;`, for statement at-rules.
    pub semicolon: Option<Token<'a>>,
    /// Number of enclosing blocks.
    pub level: usize,
}

/// A stand-alone comment.
#[derive(Debug, Clone)]
pub struct Comment<'a> {
    /// Whitespace before the comment.
    pub leading: Vec<Token<'a>>,
    /// The comment token.
    pub token: Token<'a>,
    /// Number of enclosing blocks.
    pub level: usize,
}

/// A stray semicolon.
#[derive(Debug, Clone)]
pub struct Empty<'a> {
    /// Whitespace before the semicolon.
    pub leading: Vec<Token<'a>>,
    /// The `;` token.
    pub semicolon: Token<'a>,
    /// Number of enclosing blocks.
    pub level: usize,
}

/// Tokens the parser skipped while recovering from a syntax error.
#[derive(Debug, Clone)]
pub struct Bogus<'a> {
    /// Whitespace before the skipped tokens.
    pub leading: Vec<Token<'a>>,
    /// The skipped tokens.
    pub tokens: Vec<Token<'a>>,
    /// Number of enclosing blocks.
    pub level: usize,
}

impl<'a> Stylesheet<'a> {
    /// Serializes the tree back to source text.
    #[must_use]
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for token in self.tokens() {
            out.push_str(token.text);
        }
        out
    }

    /// All tokens of the tree in source order.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        for child in &self.children {
            child.collect_tokens(&mut tokens);
        }
        tokens.extend_from_slice(&self.trailing);
        tokens
    }
}

impl fmt::Display for Stylesheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens() {
            f.write_str(token.text)?;
        }
        Ok(())
    }
}

impl<'a> Node<'a> {
    /// Whitespace before the node.
    #[must_use]
    pub fn leading(&self) -> &[Token<'a>] {
        match self {
            Self::RuleSet(n) => &n.leading,
            Self::Declaration(n) => &n.leading,
            Self::AtRule(n) => &n.leading,
            Self::Comment(n) => &n.leading,
            Self::Empty(n) => &n.leading,
            Self::Bogus(n) => &n.leading,
        }
    }

    /// Number of enclosing blocks.
    #[must_use]
    pub fn level(&self) -> usize {
        match self {
            Self::RuleSet(n) => n.level,
            Self::Declaration(n) => n.level,
            Self::AtRule(n) => n.level,
            Self::Comment(n) => n.level,
            Self::Empty(n) => n.level,
            Self::Bogus(n) => n.level,
        }
    }

    /// Nested block, if this node has one.
    #[must_use]
    pub fn block(&self) -> Option<&Block<'a>> {
        match self {
            Self::RuleSet(n) => Some(&n.block),
            Self::AtRule(n) => n.block.as_ref(),
            _ => None,
        }
    }

    /// Appends all tokens of the node, leading trivia included.
    pub fn collect_tokens(&self, out: &mut Vec<Token<'a>>) {
        out.extend_from_slice(self.leading());
        self.collect_content(out);
    }

    /// Appends all tokens of the node except its leading trivia.
    pub fn collect_content(&self, out: &mut Vec<Token<'a>>) {
        match self {
            Self::RuleSet(n) => {
                out.extend_from_slice(&n.selectors.tokens);
                n.block.collect_tokens(out);
            }
            Self::Declaration(n) => {
                out.extend_from_slice(&n.property);
                out.extend_from_slice(&n.before_colon);
                out.push(n.colon);
                out.extend_from_slice(&n.after_colon);
                out.extend_from_slice(&n.value.tokens);
                out.extend_from_slice(&n.before_semicolon);
                out.extend(n.semicolon);
            }
            Self::AtRule(n) => {
                out.push(n.keyword);
                out.extend_from_slice(&n.prelude);
                if let Some(block) = &n.block {
                    block.collect_tokens(out);
                }
                out.extend(n.semicolon);
            }
            Self::Comment(n) => out.push(n.token),
            Self::Empty(n) => out.push(n.semicolon),
            Self::Bogus(n) => out.extend_from_slice(&n.tokens),
        }
    }

    /// Span of the node without its leading trivia.
    #[must_use]
    pub fn content_span(&self) -> Option<Span> {
        let mut tokens = Vec::new();
        self.collect_content(&mut tokens);
        tokens_span(&tokens)
    }

    /// Source text of the node without its leading trivia.
    #[must_use]
    pub fn content_text(&self) -> String {
        let mut tokens = Vec::new();
        self.collect_content(&mut tokens);
        join_text(&tokens)
    }

    /// Whether the leading trivia contains a line break.
    #[must_use]
    pub fn starts_line(&self) -> bool {
        trivia_has_newline(self.leading())
    }
}

impl<'a> Block<'a> {
    /// Appends the tokens of the block, braces included.
    pub fn collect_tokens(&self, out: &mut Vec<Token<'a>>) {
        out.push(self.open);
        for child in &self.children {
            child.collect_tokens(out);
        }
        out.extend_from_slice(&self.trailing);
        out.extend(self.close);
    }

    /// Number of declarations directly in this block.
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.children
            .iter()
            .filter(|c| matches!(c, Node::Declaration(_)))
            .count()
    }
}

impl<'a> SelectorList<'a> {
    /// Builds a selector list from its prelude tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        let mut selectors = Vec::new();
        let mut depth = 0usize;
        let mut current = Vec::new();
        for token in &tokens {
            match token.text {
                "(" | "[" if token.kind == TokenKind::Punct => depth += 1,
                ")" | "]" if token.kind == TokenKind::Punct => depth = depth.saturating_sub(1),
                "," if token.kind == TokenKind::Punct && depth == 0 => {
                    push_selector(&mut selectors, &current);
                    current.clear();
                    continue;
                }
                _ => {}
            }
            current.push(*token);
        }
        push_selector(&mut selectors, &current);
        Self { tokens, selectors }
    }

    /// Whitespace between the last selector token and `{`.
    #[must_use]
    pub fn trailing_whitespace(&self) -> &[Token<'a>] {
        let end = self
            .tokens
            .iter()
            .rposition(|t| !t.is_whitespace())
            .map_or(0, |i| i + 1);
        &self.tokens[end..]
    }

    /// Selector text with surrounding whitespace removed.
    #[must_use]
    pub fn text(&self) -> String {
        join_text(trim_trivia(&self.tokens))
    }
}

fn push_selector<'a>(selectors: &mut Vec<Selector<'a>>, tokens: &[Token<'a>]) {
    let trimmed = trim_trivia(tokens);
    if !trimmed.is_empty() {
        selectors.push(Selector {
            tokens: trimmed.to_vec(),
        });
    }
}

impl Selector<'_> {
    /// Selector source text.
    #[must_use]
    pub fn text(&self) -> String {
        join_text(&self.tokens)
    }
}

impl<'a> Declaration<'a> {
    /// Property name as written.
    #[must_use]
    pub fn property_name(&self) -> String {
        join_text(&self.property)
    }

    /// Whether this declares a `$variable`.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.property.len() == 1 && self.property[0].kind == TokenKind::Variable
    }

    /// Lower-cased property name with any vendor prefix removed.
    #[must_use]
    pub fn normalized_property(&self) -> String {
        let name = self.property_name().to_ascii_lowercase();
        for prefix in ["-webkit-", "-moz-", "-ms-", "-o-"] {
            if let Some(rest) = name.strip_prefix(prefix) {
                return rest.to_string();
            }
        }
        name
    }

    /// Byte offset where the value (or, for an empty value, the colon) ends.
    #[must_use]
    pub fn value_end(&self) -> usize {
        self.value
            .tokens
            .last()
            .or(self.after_colon.last())
            .map_or(self.colon.end(), Token::end)
    }
}

impl<'a> AtRule<'a> {
    /// Keyword without the `@`, lower-cased.
    #[must_use]
    pub fn name(&self) -> String {
        self.keyword.text[1..].to_ascii_lowercase()
    }

    /// Whitespace between the last prelude token and `{`.
    #[must_use]
    pub fn prelude_trailing_whitespace(&self) -> &[Token<'a>] {
        let end = self
            .prelude
            .iter()
            .rposition(|t| !t.is_whitespace())
            .map_or(0, |i| i + 1);
        &self.prelude[end..]
    }
}

/// Whether any whitespace token in `trivia` contains a line break.
#[must_use]
pub fn trivia_has_newline(trivia: &[Token<'_>]) -> bool {
    trivia
        .iter()
        .any(|t| t.is_whitespace() && t.text.contains('\n'))
}

/// Number of line breaks in a run of trivia.
#[must_use]
pub fn trivia_newlines(trivia: &[Token<'_>]) -> usize {
    trivia
        .iter()
        .filter(|t| t.is_whitespace())
        .map(|t| t.text.matches('\n').count())
        .sum()
}

/// Indentation of a line: the text after the last line break of some trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent<'a> {
    /// Spaces and tabs after the line break.
    pub text: &'a str,
    /// Where that text sits; empty when the line is not indented.
    pub span: Span,
}

/// Indentation following the last line break in `trivia`.
///
/// Returns `None` when the trivia contains no line break.
#[must_use]
pub fn indentation_of<'a>(trivia: &[Token<'a>]) -> Option<Indent<'a>> {
    let token = trivia
        .iter()
        .rev()
        .find(|t| t.is_whitespace() && t.text.contains('\n'))?;
    let newline = token.text.rfind('\n')?;
    let text = &token.text[newline + 1..];
    let start = Position {
        offset: token.end() - text.len(),
        line: token.span.end.line,
        column: 1,
    };
    Some(Indent {
        text,
        span: Span::new(start, token.span.end),
    })
}

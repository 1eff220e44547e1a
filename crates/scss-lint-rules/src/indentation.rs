//! Rule enforcing block-level indentation.
//!
//! # Rationale
//!
//! Consistent indentation makes the nesting structure of a stylesheet
//! visible at a glance. Every line that starts a statement is indented by
//! one unit per enclosing block; closing braces line up with the statement
//! that opened the block.
//!
//! # Configuration
//!
//! - `width`: Spaces per level (default: 2, range 1..=8)
//! - `style`: `"space"` or `"tab"` (default: `"space"`); `width` is ignored for tabs
//!
//! Continuation lines of a multi-line selector list are indented like the
//! rule they belong to. Lines inside values are not checked.

use crate::registry::ConfigurableRule;
use scss_lint_core::fix::Edit;
use scss_lint_core::syntax::visit::{walk_at_rule, walk_block, walk_rule_set};
use scss_lint_core::syntax::{
    indentation_of, AtRule, Block, Indent, Node, RuleSet, Stylesheet, Token, Visit,
};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for indentation.
pub const CODE: &str = "SL001";

/// Rule name for indentation.
pub const NAME: &str = "indentation";

/// Character used for one level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    /// `width` spaces per level.
    Space,
    /// One tab per level.
    Tab,
}

/// Enforces one indentation unit per block level.
#[derive(Debug, Clone)]
pub struct Indentation {
    /// Spaces per level when indenting with spaces.
    pub width: usize,
    /// Spaces or tabs.
    pub style: IndentStyle,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for Indentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Indentation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 2,
            style: IndentStyle::Space,
            severity: Severity::Warning,
        }
    }

    /// Sets the number of spaces per level.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the indentation character.
    #[must_use]
    pub fn style(mut self, style: IndentStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn expected(&self, level: usize) -> String {
        match self.style {
            IndentStyle::Space => " ".repeat(self.width * level),
            IndentStyle::Tab => "\t".repeat(level),
        }
    }
}

impl Rule for Indentation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Indents nested lines by a fixed unit per block level"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = IndentVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for Indentation {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let width = options.usize_in("width", 2, 1, 8)?;
        let style = match options.choice("style", "space", &["space", "tab"])? {
            "tab" => IndentStyle::Tab,
            _ => IndentStyle::Space,
        };
        Ok(Self::new().width(width).style(style))
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct IndentVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a Indentation,
    violations: Vec<Violation>,
}

impl IndentVisitor<'_> {
    fn check_line(&mut self, indent: Indent<'_>, level: usize, what: &str) {
        let expected = self.rule.expected(level);
        if indent.text == expected {
            return;
        }
        let message = format!(
            "Expected {what} to be indented by {}, found {}",
            describe(&expected),
            describe(indent.text)
        );
        let fix = Fix::new(
            format!("Indent by {}", describe(&expected)),
            vec![Edit::replace(indent.span.range(), expected)],
        );
        self.violations
            .push(self.rule.violation(self.ctx, indent.span, message).with_fix(fix));
    }

    fn check_children(&mut self, children: &[Node<'_>]) {
        for child in children {
            if let Some(indent) = indentation_of(child.leading()) {
                self.check_line(indent, child.level(), "line");
            }
        }
    }

    fn check_close(&mut self, block: &Block<'_>, level: usize) {
        if block.close.is_none() {
            return;
        }
        if let Some(indent) = indentation_of(&block.trailing) {
            self.check_line(indent, level, "`}`");
        }
    }

    fn check_selector_lines(&mut self, tokens: &[Token<'_>], level: usize) {
        let Some(last) = tokens.iter().rposition(|t| !t.is_whitespace()) else {
            return;
        };
        for token in &tokens[..last] {
            if let Some(indent) = indentation_of(std::slice::from_ref(token)) {
                self.check_line(indent, level, "selector");
            }
        }
    }
}

impl<'ast> Visit<'ast> for IndentVisitor<'_> {
    fn visit_stylesheet(&mut self, node: &'ast Stylesheet<'ast>) {
        self.check_children(&node.children);
        for child in &node.children {
            self.visit_node(child);
        }
    }

    fn visit_rule_set(&mut self, node: &'ast RuleSet<'ast>) {
        self.check_selector_lines(&node.selectors.tokens, node.level);
        self.check_close(&node.block, node.level);
        walk_rule_set(self, node);
    }

    fn visit_at_rule(&mut self, node: &'ast AtRule<'ast>) {
        if let Some(block) = &node.block {
            self.check_close(block, node.level);
        }
        walk_at_rule(self, node);
    }

    fn visit_block(&mut self, node: &'ast Block<'ast>) {
        self.check_children(&node.children);
        walk_block(self, node);
    }
}

fn describe(indent: &str) -> String {
    let spaces = indent.chars().filter(|c| *c == ' ').count();
    let tabs = indent.chars().filter(|c| *c == '\t').count();
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("1 {word}")
        } else {
            format!("{n} {word}s")
        }
    };
    match (spaces, tabs) {
        (0, 0) => "nothing".to_string(),
        (s, 0) => plural(s, "space"),
        (0, t) => plural(t, "tab"),
        (s, t) => format!("{} and {}", plural(s, "space"), plural(t, "tab")),
    }
}

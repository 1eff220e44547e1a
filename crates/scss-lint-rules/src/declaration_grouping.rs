//! Rule enforcing the line layout of rule bodies.
//!
//! # Rationale
//!
//! A rule with a single declaration reads best on one line:
//!
//! ```scss
//! .icon { display: inline-block; }
//! ```
//!
//! Anything larger puts every statement on its own line and the closing
//! brace on a line of its own:
//!
//! ```scss
//! .icon {
//!   display: inline-block;
//!   width: 1em;
//! }
//! ```
//!
//! A comment may trail a statement on the same line, and `@else` may follow
//! the `}` of its `@if`.
//!
//! # Configuration
//!
//! - `single_line`: Require the one-line form for single-declaration rules (default: true)

use crate::registry::ConfigurableRule;
use scss_lint_core::fix::Edit;
use scss_lint_core::syntax::visit::walk_rule_set;
use scss_lint_core::syntax::{trivia_has_newline, Node, RuleSet, Span, Stylesheet, Visit};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for declaration-grouping.
pub const CODE: &str = "SL005";

/// Rule name for declaration-grouping.
pub const NAME: &str = "declaration-grouping";

/// Enforces one-line single-declaration rules and one statement per line otherwise.
#[derive(Debug, Clone)]
pub struct DeclarationGrouping {
    /// Require `.a { b: c; }` for single-declaration rules.
    pub single_line: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DeclarationGrouping {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationGrouping {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            single_line: true,
            severity: Severity::Warning,
        }
    }

    /// Sets whether single-declaration rules must fit on one line.
    #[must_use]
    pub fn single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for DeclarationGrouping {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Puts single-declaration rules on one line and other statements on their own lines"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = GroupingVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for DeclarationGrouping {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let single_line = options.bool("single_line", true)?;
        Ok(Self::new().single_line(single_line))
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct GroupingVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a DeclarationGrouping,
    violations: Vec<Violation>,
}

impl GroupingVisitor<'_> {
    fn report(&mut self, span: Span, message: &str, fix: Fix) {
        self.violations
            .push(self.rule.violation(self.ctx, span, message).with_fix(fix));
    }

    fn is_single_line_candidate(&self, node: &RuleSet<'_>) -> bool {
        if !self.rule.single_line {
            return false;
        }
        match node.block.children.as_slice() {
            [child @ Node::Declaration(_)] => !child.content_text().contains('\n'),
            _ => false,
        }
    }

    fn check_single_line(&mut self, node: &RuleSet<'_>) {
        let block = &node.block;
        let Some(close) = block.close else {
            return;
        };
        let child = &block.children[0];
        let leading = child.leading();
        if !(leading.len() == 1 && leading[0].text == " ") {
            let Some(span) = child.content_span() else {
                return;
            };
            let fix = Fix::new(
                "Put the declaration on the rule's line",
                vec![Edit::replace_trivia(leading, span.start.offset, " ")],
            );
            self.report(span, "Expected a single-declaration rule on one line", fix);
        }
        let trailing = &block.trailing;
        if !(trailing.len() == 1 && trailing[0].text == " ") {
            let fix = Fix::new(
                "Put `}` on the declaration's line",
                vec![Edit::replace_trivia(trailing, close.start(), " ")],
            );
            self.report(close.span, "Expected `}` on the same line as the declaration", fix);
        }
    }

    fn check_multi_line(&mut self, node: &RuleSet<'_>) {
        let block = &node.block;
        let Some(close) = block.close else {
            return;
        };
        if block.children.is_empty() {
            return;
        }
        for (i, child) in block.children.iter().enumerate() {
            if child.starts_line() || may_share_line(&block.children, i) {
                continue;
            }
            let Some(span) = child.content_span() else {
                continue;
            };
            let fix = Fix::new(
                "Start a new line",
                vec![Edit::replace_trivia(child.leading(), span.start.offset, "\n")],
            );
            self.report(span, "Expected statement on its own line", fix);
        }
        if !trivia_has_newline(&block.trailing) {
            let fix = Fix::new(
                "Move `}` to its own line",
                vec![Edit::replace_trivia(&block.trailing, close.start(), "\n")],
            );
            self.report(close.span, "Expected `}` on its own line", fix);
        }
    }
}

/// Trailing comments, `@else` after its `@if` block, and stray semicolons.
fn may_share_line(children: &[Node<'_>], i: usize) -> bool {
    match &children[i] {
        Node::Comment(_) => i > 0,
        Node::Empty(_) => true,
        Node::AtRule(at) if at.name() == "else" => {
            i > 0 && matches!(&children[i - 1], Node::AtRule(prev) if prev.block.is_some())
        }
        _ => false,
    }
}

impl<'ast> Visit<'ast> for GroupingVisitor<'_> {
    fn visit_rule_set(&mut self, node: &'ast RuleSet<'ast>) {
        if self.is_single_line_candidate(node) {
            self.check_single_line(node);
        } else {
            self.check_multi_line(node);
        }
        walk_rule_set(self, node);
    }
}

//! Rule requiring one blank line before a rule that follows a sibling.
//!
//! # Rationale
//!
//! A blank line between rules separates unrelated blocks visually. More
//! than one blank line adds nothing. Rules directly after a comment are
//! exempt so a comment stays attached to the rule it describes, and
//! `@else` stays on the line of its `@if`.

use crate::registry::ConfigurableRule;
use scss_lint_core::fix::Edit;
use scss_lint_core::syntax::visit::walk_block;
use scss_lint_core::syntax::{
    indentation_of, trivia_newlines, Block, Node, Stylesheet, Visit,
};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for empty-line-between-rules.
pub const CODE: &str = "SL015";

/// Rule name for empty-line-between-rules.
pub const NAME: &str = "empty-line-between-rules";

/// Requires exactly one blank line before a block that follows a sibling.
#[derive(Debug, Clone)]
pub struct EmptyLineBetweenRules {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for EmptyLineBetweenRules {
    fn default() -> Self {
        Self::new()
    }
}

impl EmptyLineBetweenRules {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for EmptyLineBetweenRules {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires one blank line before a rule that follows another statement"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = BlankLineVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for EmptyLineBetweenRules {
    fn from_options(_options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new())
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

/// Rule sets and block at-rules other than `@else`.
fn needs_separation(node: &Node<'_>) -> bool {
    match node {
        Node::RuleSet(_) => true,
        Node::AtRule(at) => at.block.is_some() && at.name() != "else",
        _ => false,
    }
}

struct BlankLineVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a EmptyLineBetweenRules,
    violations: Vec<Violation>,
}

impl BlankLineVisitor<'_> {
    fn check_children(&mut self, children: &[Node<'_>]) {
        for pair in children.windows(2) {
            let [previous, node] = pair else {
                continue;
            };
            if matches!(previous, Node::Comment(_)) || !needs_separation(node) {
                continue;
            }
            let leading = node.leading();
            let newlines = trivia_newlines(leading);
            if newlines == 2 {
                continue;
            }
            let Some(span) = node.content_span() else {
                continue;
            };
            let start = span.start.offset;
            let edit = match (leading.first(), indentation_of(leading)) {
                (Some(first), Some(indent)) => {
                    Edit::replace(first.start()..indent.span.start.offset, "\n\n")
                }
                _ => Edit::replace_trivia(leading, start, "\n\n"),
            };
            let message = if newlines > 2 {
                "Expected exactly one blank line before rule"
            } else {
                "Expected a blank line before rule"
            };
            self.violations.push(
                self.rule
                    .violation(self.ctx, span, message)
                    .with_fix(Fix::new("Separate rules with one blank line", vec![edit])),
            );
        }
    }
}

impl<'ast> Visit<'ast> for BlankLineVisitor<'_> {
    fn visit_stylesheet(&mut self, node: &'ast Stylesheet<'ast>) {
        self.check_children(&node.children);
        for child in &node.children {
            self.visit_node(child);
        }
    }

    fn visit_block(&mut self, node: &'ast Block<'ast>) {
        self.check_children(&node.children);
        walk_block(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, fix, messages};

    fn fix_code(code: &str) -> String {
        fix(&EmptyLineBetweenRules::new(), code)
    }

    #[test]
    fn test_adjacent_rules() {
        let code = ".a { color: red; }\n.b { color: blue; }\n";
        let violations = check(&EmptyLineBetweenRules::new(), code);
        assert_eq!(messages(&violations), vec!["Expected a blank line before rule"]);
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(fix_code(code), ".a { color: red; }\n\n.b { color: blue; }\n");
    }

    #[test]
    fn test_nested_rule_after_declaration() {
        let code = ".a {\n  color: red;\n  .b { color: blue; }\n}";
        assert_eq!(fix_code(code), ".a {\n  color: red;\n\n  .b { color: blue; }\n}");
    }

    #[test]
    fn test_too_many_blank_lines() {
        let code = ".a { b: c; }\n\n\n\n.d { e: f; }";
        assert_eq!(
            messages(&check(&EmptyLineBetweenRules::new(), code)),
            vec!["Expected exactly one blank line before rule"]
        );
        assert_eq!(fix_code(code), ".a { b: c; }\n\n.d { e: f; }");
    }

    #[test]
    fn test_same_line_rules() {
        assert_eq!(fix_code(".a { b: c; } .d { e: f; }"), ".a { b: c; }\n\n.d { e: f; }");
    }

    #[test]
    fn test_exemptions() {
        let rule = EmptyLineBetweenRules::new();
        assert!(check(&rule, ".a { b: c; }").is_empty());
        assert!(check(&rule, ".a { b: c; }\n// about d\n.d { e: f; }").is_empty());
        assert!(check(&rule, "@if $a { b: c; } @else { b: d; }").is_empty());
        assert!(check(&rule, ".a {\n  b: c;\n  d: e;\n}").is_empty());
        assert!(check(&rule, ".a {\n  .b { c: d; }\n}").is_empty());
    }

    #[test]
    fn test_media_blocks_are_separated() {
        let code = ".a { b: c; }\n@media print { .a { b: d; } }";
        assert_eq!(check(&EmptyLineBetweenRules::new(), code).len(), 1);
    }
}

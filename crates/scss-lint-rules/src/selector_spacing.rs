//! Rule enforcing spacing around selector punctuation.
//!
//! # Rationale
//!
//! `.a, .b {` reads consistently across a codebase; `.a ,.b{` does not.
//! This rule requires exactly one space before the opening brace of a rule
//! or block at-rule, no space before a selector comma and one space (or a
//! line break) after it.
//!
//! A space before a pseudo-class colon (`a :hover`) changes the meaning of
//! the selector, so it is reported but never fixed.

use crate::registry::ConfigurableRule;
use scss_lint_core::fix::Edit;
use scss_lint_core::syntax::visit::{walk_at_rule, walk_rule_set};
use scss_lint_core::syntax::{AtRule, Block, RuleSet, Span, Stylesheet, Token, TokenKind, Visit};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for selector-spacing.
pub const CODE: &str = "SL002";

/// Rule name for selector-spacing.
pub const NAME: &str = "selector-spacing";

/// Enforces spacing before `{` and around selector commas.
#[derive(Debug, Clone)]
pub struct SelectorSpacing {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for SelectorSpacing {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorSpacing {
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

impl Rule for SelectorSpacing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires one space before `{` and after selector commas"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = SpacingVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for SelectorSpacing {
    fn from_options(_options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new())
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct SpacingVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a SelectorSpacing,
    violations: Vec<Violation>,
}

impl SpacingVisitor<'_> {
    fn report(&mut self, span: Span, message: &str, fix: Option<Fix>) {
        let mut violation = self.rule.violation(self.ctx, span, message);
        if let Some(fix) = fix {
            violation = violation.with_fix(fix);
        }
        self.violations.push(violation);
    }

    /// Exactly one space between the prelude and `{`.
    fn check_brace(&mut self, trailing: &[Token<'_>], block: &Block<'_>) {
        if trailing.len() == 1 && trailing[0].text == " " {
            return;
        }
        let edit = Edit::replace_trivia(trailing, block.open.start(), " ");
        let fix = Fix::new("Put one space before `{`", vec![edit]);
        self.report(block.open.span, "Expected one space before `{`", Some(fix));
    }

    fn check_commas(&mut self, tokens: &[Token<'_>]) {
        let Some(last) = tokens.iter().rposition(|t| !t.is_trivia()) else {
            return;
        };
        let mut depth = 0usize;
        for (i, token) in tokens.iter().enumerate() {
            if token.is_punct('(') || token.is_punct('[') {
                depth += 1;
                continue;
            }
            if token.is_punct(')') || token.is_punct(']') {
                depth = depth.saturating_sub(1);
                continue;
            }
            if depth > 0 || !token.is_punct(',') || i >= last {
                continue;
            }

            if let Some(before) = i.checked_sub(1).map(|j| tokens[j]) {
                if before.is_whitespace() {
                    let fix = Fix::new(
                        "Remove whitespace before `,`",
                        vec![Edit::delete(before.span.range())],
                    );
                    self.report(before.span, "Unexpected whitespace before `,`", Some(fix));
                }
            }

            match tokens.get(i + 1) {
                Some(after) if after.is_whitespace() => {
                    if after.text != " " && !after.text.contains('\n') {
                        let fix = Fix::replace(
                            "Put one space after `,`",
                            after.span.range(),
                            " ",
                        );
                        self.report(after.span, "Expected one space after `,`", Some(fix));
                    }
                }
                _ => {
                    let fix = Fix::insert("Put one space after `,`", token.end(), " ");
                    self.report(token.span, "Expected one space after `,`", Some(fix));
                }
            }
        }
    }

    fn check_pseudo_colons(&mut self, tokens: &[Token<'_>]) {
        for (i, token) in tokens.iter().enumerate().skip(2) {
            if !token.is_punct(':') || !tokens[i - 1].is_whitespace() {
                continue;
            }
            let before = tokens[i - 2];
            if before.kind == TokenKind::Combinator || before.is_punct(',') || before.is_punct(':')
            {
                continue;
            }
            self.report(
                tokens[i - 1].span,
                "Unexpected whitespace before pseudo-selector `:`",
                None,
            );
        }
    }
}

impl<'ast> Visit<'ast> for SpacingVisitor<'_> {
    fn visit_rule_set(&mut self, node: &'ast RuleSet<'ast>) {
        let selectors = &node.selectors;
        self.check_brace(selectors.trailing_whitespace(), &node.block);
        self.check_commas(&selectors.tokens);
        self.check_pseudo_colons(&selectors.tokens);
        walk_rule_set(self, node);
    }

    fn visit_at_rule(&mut self, node: &'ast AtRule<'ast>) {
        if let Some(block) = &node.block {
            self.check_brace(node.prelude_trailing_whitespace(), block);
        }
        walk_at_rule(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, fix, messages};

    fn check_code(code: &str) -> Vec<Violation> {
        check(&SelectorSpacing::new(), code)
    }

    #[test]
    fn test_well_spaced() {
        assert!(check_code(".a, .b { c: d; }\n@media print { .e { f: g; } }").is_empty());
        assert!(check_code(".a,\n.b {\n  c: d;\n}").is_empty());
    }

    #[test]
    fn test_missing_space_before_brace() {
        let violations = check_code(".a{ c: d; }");
        assert_eq!(messages(&violations), vec!["Expected one space before `{`"]);
        assert_eq!(violations[0].location.column, 3);
        assert_eq!(fix(&SelectorSpacing::new(), ".a{ c: d; }"), ".a { c: d; }");
    }

    #[test]
    fn test_extra_space_or_newline_before_brace() {
        let rule = SelectorSpacing::new();
        assert_eq!(fix(&rule, ".a   { c: d; }"), ".a { c: d; }");
        assert_eq!(fix(&rule, ".a\n{ c: d; }"), ".a { c: d; }");
        assert_eq!(fix(&rule, "@media print{ .a { c: d; } }"), "@media print { .a { c: d; } }");
        assert_eq!(fix(&rule, "@font-face{ src: x; }"), "@font-face { src: x; }");
    }

    #[test]
    fn test_comma_spacing() {
        let code = ".a ,.b,  .c { d: e; }";
        assert_eq!(
            messages(&check_code(code)),
            vec![
                "Unexpected whitespace before `,`",
                "Expected one space after `,`",
                "Expected one space after `,`",
            ]
        );
        assert_eq!(fix(&SelectorSpacing::new(), code), ".a, .b, .c { d: e; }");
    }

    #[test]
    fn test_commas_inside_parentheses_are_ignored() {
        assert!(check_code(".a:not(.b,.c) { d: e; }").is_empty());
    }

    #[test]
    fn test_space_before_pseudo_is_report_only() {
        let violations = check_code("a :hover { b: c; }");
        assert_eq!(
            messages(&violations),
            vec!["Unexpected whitespace before pseudo-selector `:`"]
        );
        assert!(!violations[0].is_fixable());
        assert!(check_code("a > :first-child { b: c; }").is_empty());
        assert!(check_code("a::before, :hover { b: c; }").is_empty());
    }
}

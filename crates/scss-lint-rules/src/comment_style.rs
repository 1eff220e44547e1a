//! Rule preferring `//` comments over `/* */`.
//!
//! # Rationale
//!
//! Block comments are copied into the compiled CSS; line comments are not.
//! Section headings and `/*! ... */` license banners are meant to survive
//! compilation and are allowed.
//!
//! # Configuration
//!
//! - `allow_headings`: Allow block comments that are section headings
//!   (a banner line of `=`, `-`, `*`, ...) (default: true)
//!
//! Only a single-line comment that ends its line is fixed; anything else
//! would need reflowing.

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::{Comment, Stylesheet, TokenKind, Visit};
use scss_lint_core::utils::{comment_body, is_heading_comment};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for comment-style.
pub const CODE: &str = "SL016";

/// Rule name for comment-style.
pub const NAME: &str = "comment-style";

/// Prefers `//` comments over `/* */`.
#[derive(Debug, Clone)]
pub struct CommentStyle {
    /// Allow heading block comments.
    pub allow_headings: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for CommentStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentStyle {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_headings: true,
            severity: Severity::Warning,
        }
    }

    /// Sets whether heading comments may use `/* */`.
    #[must_use]
    pub fn allow_headings(mut self, allow: bool) -> Self {
        self.allow_headings = allow;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for CommentStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Prefers `//` comments over `/* */`, except headings"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = CommentVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for CommentStyle {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let allow = options.bool("allow_headings", true)?;
        Ok(Self::new().allow_headings(allow))
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct CommentVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a CommentStyle,
    violations: Vec<Violation>,
}

impl CommentVisitor<'_> {
    fn ends_line(&self, offset: usize) -> bool {
        let rest = self.ctx.content.get(offset..).unwrap_or_default();
        let rest = rest.trim_start_matches([' ', '\t']);
        rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n")
    }
}

impl<'ast> Visit<'ast> for CommentVisitor<'_> {
    fn visit_comment(&mut self, node: &'ast Comment<'ast>) {
        let token = node.token;
        if token.kind != TokenKind::BlockComment || token.text.starts_with("/*!") {
            return;
        }
        if self.rule.allow_headings && is_heading_comment(token.text) {
            return;
        }
        let mut violation = self.rule.violation(
            self.ctx,
            token.span,
            "Use `//` comments instead of `/* */`",
        );
        if !token.text.contains('\n') && self.ends_line(token.end()) {
            let body = comment_body(token.text).trim();
            let replacement = if body.is_empty() {
                "//".to_string()
            } else {
                format!("// {body}")
            };
            violation = violation.with_fix(Fix::replace(
                "Convert to a line comment",
                token.span.range(),
                replacement,
            ));
        }
        self.violations.push(violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, fix};

    fn fix_code(code: &str) -> String {
        fix(&CommentStyle::new(), code)
    }

    #[test]
    fn test_converts_single_line_comments() {
        assert_eq!(fix_code("/* Buttons */\n.btn { a: b; }"), "// Buttons\n.btn { a: b; }");
        assert_eq!(
            fix_code(".a {\n  b: c; /* why */\n}"),
            ".a {\n  b: c; // why\n}"
        );
        assert_eq!(fix_code("/**/"), "//");
    }

    #[test]
    fn test_comment_followed_by_code_is_report_only() {
        let violations = check(&CommentStyle::new(), "/* a */ .b { c: d; }");
        assert_eq!(violations.len(), 1);
        assert!(!violations[0].is_fixable());
    }

    #[test]
    fn test_multi_line_comment_is_report_only() {
        let violations = check(&CommentStyle::new(), "/* one\n   two */\n.a { b: c; }");
        assert_eq!(violations.len(), 1);
        assert!(!violations[0].is_fixable());
    }

    #[test]
    fn test_headings_and_banners() {
        let code = "/* ==========\n   Layout\n   ========== */\n/*! v1.0 | MIT */\n// ok\n";
        assert!(check(&CommentStyle::new(), code).is_empty());
        let strict = CommentStyle::new().allow_headings(false);
        assert_eq!(check(&strict, code).len(), 1);
    }
}

//! Rule requiring the shortest form of box shorthands.
//!
//! # Rationale
//!
//! `margin: 0 0 0 0` and `margin: 0` are equivalent. Box shorthands repeat
//! values by position (top, right, bottom, left), so trailing values that
//! duplicate their counterpart can always be dropped:
//!
//! - `a b c b` → `a b c`
//! - `a b a` → `a b`
//! - `a a` → `a`
//!
//! Values with `!important`, commas, `/` or comments are not touched.

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::token::join_text;
use scss_lint_core::syntax::{Declaration, Stylesheet, Visit};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for shorthand-values.
pub const CODE: &str = "SL014";

/// Rule name for shorthand-values.
pub const NAME: &str = "shorthand-values";

const BOX_PROPERTIES: &[&str] = &[
    "margin",
    "padding",
    "border-width",
    "border-style",
    "border-color",
    "border-radius",
    "inset",
    "scroll-margin",
    "scroll-padding",
];

/// Requires box shorthands to drop redundant trailing values.
#[derive(Debug, Clone)]
pub struct ShorthandValues {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ShorthandValues {
    fn default() -> Self {
        Self::new()
    }
}

impl ShorthandValues {
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

impl Rule for ShorthandValues {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the shortest equivalent form of box shorthand values"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = ShorthandVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for ShorthandValues {
    fn from_options(_options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new())
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

/// Drops trailing values that repeat their box counterpart.
fn shorten(parts: &[String]) -> usize {
    let same = |a: usize, b: usize| parts[a].eq_ignore_ascii_case(&parts[b]);
    let mut len = parts.len();
    if len == 4 && same(3, 1) {
        len = 3;
    }
    if len == 3 && same(2, 0) {
        len = 2;
    }
    if len == 2 && same(1, 0) {
        len = 1;
    }
    len
}

struct ShorthandVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a ShorthandValues,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for ShorthandVisitor<'_> {
    fn visit_declaration(&mut self, node: &'ast Declaration<'ast>) {
        let property = node.normalized_property();
        if !BOX_PROPERTIES.contains(&property.as_str()) {
            return;
        }
        let tokens = &node.value.tokens;
        if tokens.iter().any(|t| {
            t.is_comment() || t.is_punct('!') || t.is_punct(',') || t.is_punct('/')
        }) {
            return;
        }
        let parts: Vec<String> = node.value.parts().into_iter().map(join_text).collect();
        if !(2..=4).contains(&parts.len()) {
            return;
        }
        let len = shorten(&parts);
        if len == parts.len() {
            return;
        }
        let Some(span) = node.value.span() else {
            return;
        };
        let shorter = parts[..len].join(" ");
        let message = format!(
            "`{}: {}` can be written as `{}: {shorter}`",
            node.property_name(),
            node.value.text(),
            node.property_name()
        );
        let fix = Fix::replace(format!("Shorten to `{shorter}`"), span.range(), shorter);
        self.violations
            .push(self.rule.violation(self.ctx, span, message).with_fix(fix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, fix};

    fn fix_code(code: &str) -> String {
        fix(&ShorthandValues::new(), code)
    }

    #[test]
    fn test_shortens_repeated_values() {
        assert_eq!(fix_code(".a { margin: 0 0 0 0; }"), ".a { margin: 0; }");
        assert_eq!(fix_code(".a { padding: 1px 2px 3px 2px; }"), ".a { padding: 1px 2px 3px; }");
        assert_eq!(fix_code(".a { padding: 1px 2px 1px 2px; }"), ".a { padding: 1px 2px; }");
        assert_eq!(fix_code(".a { border-color: red RED; }"), ".a { border-color: red; }");
    }

    #[test]
    fn test_message() {
        let violations = check(&ShorthandValues::new(), ".a { margin: 0px 0px 0px 0px; }");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "`margin: 0px 0px 0px 0px` can be written as `margin: 0px`"
        );
    }

    #[test]
    fn test_minimal_forms_pass() {
        let rule = ShorthandValues::new();
        assert!(check(&rule, ".a { margin: 1px 2px 3px 4px; padding: 0 auto; }").is_empty());
        assert!(check(&rule, ".a { margin: 0 $gutter calc(1px + 2px) $gutter; }").len() == 1);
    }

    #[test]
    fn test_skipped_values() {
        let rule = ShorthandValues::new();
        assert!(check(&rule, ".a { margin: 0 0 !important; }").is_empty());
        assert!(check(&rule, ".a { border-radius: 1px 1px / 2px 2px; }").is_empty());
        assert!(check(&rule, ".a { border: 0 0; }").is_empty());
        assert!(check(&rule, ".a { margin: 0; }").is_empty());
    }

    #[test]
    fn test_vendor_prefixed_property() {
        assert_eq!(
            fix_code(".a { -webkit-border-radius: 3px 3px; }"),
            ".a { -webkit-border-radius: 3px; }"
        );
    }
}

//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::{Span, Stylesheet};
use crate::types::{Severity, Violation};

/// A lint rule over a parsed stylesheet.
///
/// Rules are pure: they read the tree and the file context and return
/// violations. They never see each other's results, so disabling one rule
/// cannot change what another reports.
///
/// # Example
///
/// ```ignore
/// use scss_lint_core::{FileContext, Rule, Violation};
/// use scss_lint_core::syntax::{Stylesheet, Visit};
///
/// pub struct NoIdSelectors;
///
/// impl Rule for NoIdSelectors {
///     fn name(&self) -> &'static str { "no-id-selectors" }
///     fn code(&self) -> &'static str { "SL099" }
///
///     fn check(&self, ctx: &FileContext, sheet: &Stylesheet) -> Vec<Violation> {
///         let mut visitor = IdVisitor::new(self, ctx);
///         visitor.visit_stylesheet(sheet);
///         visitor.violations
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "zero-unit").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SL009").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether violations of this rule may carry an automatic fix.
    fn fixable(&self) -> bool {
        false
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `sheet` - The parsed syntax tree of the file
    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation>;

    /// Builds a violation of this rule at `span`.
    fn violation(&self, ctx: &FileContext<'_>, span: Span, message: impl Into<String>) -> Violation
    where
        Self: Sized,
    {
        Violation::new(
            self.code(),
            self.name(),
            self.default_severity(),
            ctx.location(span),
            message,
        )
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse_str, Node};
    use std::path::Path;

    struct CountRuleSets;

    impl Rule for CountRuleSets {
        fn name(&self) -> &'static str {
            "count-rule-sets"
        }

        fn code(&self) -> &'static str {
            "SL999"
        }

        fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
            sheet
                .children
                .iter()
                .filter(|n| matches!(n, Node::RuleSet(_)))
                .filter_map(Node::content_span)
                .map(|span| self.violation(ctx, span, "rule set"))
                .collect()
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = CountRuleSets;
        assert_eq!(rule.default_severity(), Severity::Warning);
        assert!(!rule.fixable());
        assert_eq!(rule.description(), "");
    }

    #[test]
    fn test_violation_helper() {
        let parsed = parse_str("a {}\n  b {}");
        let ctx = FileContext::new(Path::new("t.scss"), "a {}\n  b {}");
        let rule: RuleBox = Box::new(CountRuleSets);
        let violations = rule.check(&ctx, &parsed.stylesheet);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[1].code, "SL999");
        assert_eq!(violations[1].rule, "count-rule-sets");
        assert_eq!((violations[1].location.line, violations[1].location.column), (2, 3));
    }
}

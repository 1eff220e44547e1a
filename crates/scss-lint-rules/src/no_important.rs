//! Rule to forbid `!important`.
//!
//! # Rationale
//!
//! `!important` short-circuits the cascade. Once one appears, overriding it
//! takes another one, and specificity stops meaning anything.

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::{Declaration, Stylesheet, Visit};
use scss_lint_core::{ConfigError, FileContext, Rule, RuleOptions, Severity, Suggestion, Violation};

/// Rule code for no-important.
pub const CODE: &str = "SL010";

/// Rule name for no-important.
pub const NAME: &str = "no-important";

/// Forbids `!important` in declarations.
#[derive(Debug, Clone)]
pub struct NoImportant {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoImportant {
    fn default() -> Self {
        Self::new()
    }
}

impl NoImportant {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for NoImportant {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids `!important`"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = ImportantVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for NoImportant {
    fn from_options(_options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new())
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct ImportantVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoImportant,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for ImportantVisitor<'_> {
    fn visit_declaration(&mut self, node: &'ast Declaration<'ast>) {
        if let Some(span) = node.value.important() {
            let message = format!("`!important` used on `{}`", node.property_name());
            self.violations.push(
                self.rule
                    .violation(self.ctx, span, message)
                    .with_suggestion(Suggestion::new("Raise the selector's specificity instead")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::check;

    #[test]
    fn test_flags_important() {
        let violations = check(&NoImportant::new(), ".a {\n  color: red !important;\n}");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "`!important` used on `color`");
        assert_eq!((violations[0].location.line, violations[0].location.column), (2, 14));
        assert!(!violations[0].is_fixable());
    }

    #[test]
    fn test_spacing_and_case_variants() {
        assert_eq!(check(&NoImportant::new(), ".a { b: c ! IMPORTANT; }").len(), 1);
        assert!(check(&NoImportant::new(), ".a { content: '!important'; }").is_empty());
        assert!(check(&NoImportant::new(), "$x: 1 !default;").is_empty());
    }
}

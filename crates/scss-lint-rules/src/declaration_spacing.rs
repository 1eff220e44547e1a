//! Rule enforcing spacing around the declaration colon.
//!
//! `property: value` has no whitespace before the colon and exactly one
//! space after it. A line break after the colon is accepted for long values.

use crate::registry::ConfigurableRule;
use scss_lint_core::fix::Edit;
use scss_lint_core::syntax::token::tokens_span;
use scss_lint_core::syntax::{Declaration, Stylesheet, Visit};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for declaration-spacing.
pub const CODE: &str = "SL012";

/// Rule name for declaration-spacing.
pub const NAME: &str = "declaration-spacing";

/// Enforces `property: value` spacing.
#[derive(Debug, Clone)]
pub struct DeclarationSpacing {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DeclarationSpacing {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationSpacing {
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

impl Rule for DeclarationSpacing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires no space before `:` and one space after it in declarations"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = ColonVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for DeclarationSpacing {
    fn from_options(_options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new())
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct ColonVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a DeclarationSpacing,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for ColonVisitor<'_> {
    fn visit_declaration(&mut self, node: &'ast Declaration<'ast>) {
        if let Some(span) = tokens_span(&node.before_colon) {
            let mut violation =
                self.rule
                    .violation(self.ctx, span, "Unexpected whitespace before `:`");
            // A comment before the colon has nowhere obvious to go.
            if node.before_colon.iter().all(|t| t.is_whitespace()) {
                violation = violation.with_fix(Fix::new(
                    "Remove whitespace before `:`",
                    vec![Edit::delete(span.range())],
                ));
            }
            self.violations.push(violation);
        }

        if node.value.is_empty() {
            return;
        }
        let after = node.after_colon.as_slice();
        let well_spaced = match after {
            [single] => single.text == " " || single.text.contains('\n'),
            _ => false,
        };
        if !well_spaced {
            let span = tokens_span(after).unwrap_or(node.colon.span);
            let fix = Fix::new(
                "Put one space after `:`",
                vec![Edit::replace_trivia(after, node.colon.end(), " ")],
            );
            self.violations.push(
                self.rule
                    .violation(self.ctx, span, "Expected one space after `:`")
                    .with_fix(fix),
            );
        }
    }
}

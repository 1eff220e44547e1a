//! Rule requiring a semicolon after every declaration.
//!
//! CSS allows the last declaration of a block to omit its `;`, but adding a
//! declaration after it then silently breaks the previous one.

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::{Declaration, Span, Stylesheet, Visit};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for declaration-semicolon.
pub const CODE: &str = "SL013";

/// Rule name for declaration-semicolon.
pub const NAME: &str = "declaration-semicolon";

/// Requires `;` after every declaration.
#[derive(Debug, Clone)]
pub struct DeclarationSemicolon {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DeclarationSemicolon {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationSemicolon {
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

impl Rule for DeclarationSemicolon {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires every declaration to end with `;`"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = SemicolonVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for DeclarationSemicolon {
    fn from_options(_options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new())
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct SemicolonVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a DeclarationSemicolon,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for SemicolonVisitor<'_> {
    fn visit_declaration(&mut self, node: &'ast Declaration<'ast>) {
        if node.semicolon.is_some() {
            return;
        }
        let end = node
            .value
            .tokens
            .last()
            .or(node.after_colon.last())
            .map_or(node.colon.span.end, |t| t.span.end);
        let message = format!("Expected `;` after `{}` declaration", node.property_name());
        let fix = Fix::insert("Add `;`", node.value_end(), ";");
        self.violations.push(
            self.rule
                .violation(self.ctx, Span::new(end, end), message)
                .with_fix(fix),
        );
    }
}

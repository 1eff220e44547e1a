//! Rule to limit selector nesting depth.
//!
//! # Rationale
//!
//! Deeply nested rules compile to long, overly specific selectors that are
//! tied to the markup structure and hard to override.
//!
//! # Configuration
//!
//! - `max`: Deepest allowed rule (default: 3); a top-level rule has depth 1
//!
//! Block at-rules such as `@media` or `@include mq { ... }` do not add depth.

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::token::{tokens_span, trim_trivia};
use scss_lint_core::syntax::visit::walk_rule_set;
use scss_lint_core::syntax::{RuleSet, Stylesheet, Visit};
use scss_lint_core::{ConfigError, FileContext, Rule, RuleOptions, Severity, Suggestion, Violation};

/// Rule code for max-nesting-depth.
pub const CODE: &str = "SL006";

/// Rule name for max-nesting-depth.
pub const NAME: &str = "max-nesting-depth";

/// Flags rule sets nested deeper than a maximum.
#[derive(Debug, Clone)]
pub struct MaxNestingDepth {
    /// Maximum nesting depth.
    pub max: usize,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MaxNestingDepth {
    fn default() -> Self {
        Self::new()
    }
}

impl MaxNestingDepth {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max: 3,
            severity: Severity::Error,
        }
    }

    /// Sets the maximum depth.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MaxNestingDepth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits how deeply rule sets may be nested"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = DepthVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for MaxNestingDepth {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let max = options.usize_in("max", 3, 1, 32)?;
        Ok(Self::new().max(max))
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct DepthVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a MaxNestingDepth,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for DepthVisitor<'_> {
    fn visit_rule_set(&mut self, node: &'ast RuleSet<'ast>) {
        if node.depth > self.rule.max {
            if let Some(span) = tokens_span(trim_trivia(&node.selectors.tokens)) {
                let message = format!(
                    "Rule `{}` is nested {} levels deep (max {})",
                    node.selectors.text(),
                    node.depth,
                    self.rule.max
                );
                self.violations.push(
                    self.rule
                        .violation(self.ctx, span, message)
                        .with_suggestion(Suggestion::new(
                            "Flatten the selector or give the element its own class",
                        )),
                );
            }
        }
        walk_rule_set(self, node);
    }
}

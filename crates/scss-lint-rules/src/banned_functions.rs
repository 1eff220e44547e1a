//! Rule to forbid a list of functions.
//!
//! # Rationale
//!
//! Sass's legacy color helpers (`lighten`, `darken`, ...) produce colors
//! outside the design palette and are deprecated in favour of the color
//! module. Teams can extend the list with anything else they want gone.
//!
//! # Configuration
//!
//! - `functions`: Names to ban, matched case-insensitively
//!   (default: `lighten`, `darken`, `saturate`, `desaturate`, `adjust-hue`,
//!   `fade-in`, `fade-out`, `opacify`, `transparentize`)

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::value::find_calls;
use scss_lint_core::syntax::visit::walk_at_rule;
use scss_lint_core::syntax::{AtRule, Declaration, Stylesheet, Token, Visit};
use scss_lint_core::{ConfigError, FileContext, Rule, RuleOptions, Severity, Violation};

/// Rule code for banned-functions.
pub const CODE: &str = "SL011";

/// Rule name for banned-functions.
pub const NAME: &str = "banned-functions";

const DEFAULT_FUNCTIONS: &[&str] = &[
    "lighten",
    "darken",
    "saturate",
    "desaturate",
    "adjust-hue",
    "fade-in",
    "fade-out",
    "opacify",
    "transparentize",
];

/// Forbids calls to listed functions.
#[derive(Debug, Clone)]
pub struct BannedFunctions {
    /// Lower-cased banned names.
    pub functions: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for BannedFunctions {
    fn default() -> Self {
        Self::new()
    }
}

impl BannedFunctions {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            functions: DEFAULT_FUNCTIONS.iter().map(|f| (*f).to_string()).collect(),
            severity: Severity::Error,
        }
    }

    /// Replaces the banned function list.
    #[must_use]
    pub fn functions(mut self, functions: Vec<String>) -> Self {
        self.functions = functions
            .into_iter()
            .map(|f| f.to_ascii_lowercase())
            .collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for BannedFunctions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids listed functions, legacy color helpers by default"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = BannedVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for BannedFunctions {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let rule = Self::new();
        Ok(match options.strings("functions")? {
            Some(functions) => rule.functions(functions),
            None => rule,
        })
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct BannedVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a BannedFunctions,
    violations: Vec<Violation>,
}

impl BannedVisitor<'_> {
    fn check_tokens(&mut self, tokens: &[Token<'_>]) {
        for call in find_calls(tokens) {
            let name = call.name(tokens);
            if self.rule.functions.contains(&name) {
                let token = tokens[call.name];
                let message = format!("Function `{}` is banned", token.text);
                self.violations
                    .push(self.rule.violation(self.ctx, token.span, message));
            }
        }
    }
}

impl<'ast> Visit<'ast> for BannedVisitor<'_> {
    fn visit_declaration(&mut self, node: &'ast Declaration<'ast>) {
        self.check_tokens(&node.value.tokens);
    }

    fn visit_at_rule(&mut self, node: &'ast AtRule<'ast>) {
        self.check_tokens(&node.prelude);
        walk_at_rule(self, node);
    }
}

//! Rule forbidding units on zero lengths.
//!
//! # Rationale
//!
//! `0px`, `0em` and `0` are the same length; the unit is noise. Only length
//! units are affected: `0s`, `0deg` and `0%` keep their meaning in contexts
//! where a bare `0` is invalid. Arguments of `calc()`, `clamp()`, `min()`
//! and `max()` and custom properties are left alone for the same reason.

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::{Declaration, Stylesheet, Visit};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for zero-unit.
pub const CODE: &str = "SL009";

/// Rule name for zero-unit.
pub const NAME: &str = "zero-unit";

const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "vi", "vb", "svw", "svh", "lvw",
    "lvh", "dvw", "dvh", "cm", "mm", "q", "in", "pt", "pc", "cqw", "cqh", "cqi", "cqb", "cqmin",
    "cqmax",
];

const MATH_FUNCTIONS: &[&str] = &["calc", "clamp", "min", "max"];

/// Forbids a unit on zero-valued lengths.
#[derive(Debug, Clone)]
pub struct ZeroUnit {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ZeroUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl ZeroUnit {
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

impl Rule for ZeroUnit {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids units on zero lengths"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = ZeroVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for ZeroUnit {
    fn from_options(_options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new())
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

struct ZeroVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a ZeroUnit,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for ZeroVisitor<'_> {
    fn visit_declaration(&mut self, node: &'ast Declaration<'ast>) {
        if node.property_name().starts_with("--") {
            return;
        }
        let tokens = &node.value.tokens;
        let math: Vec<_> = node
            .value
            .calls()
            .into_iter()
            .filter(|call| MATH_FUNCTIONS.contains(&call.name(tokens).as_str()))
            .collect();

        for (index, number) in node.value.numbers() {
            if number.value != 0.0 || math.iter().any(|call| call.contains(index)) {
                continue;
            }
            let unit = number.unit.to_ascii_lowercase();
            if !LENGTH_UNITS.contains(&unit.as_str()) {
                continue;
            }
            let token = tokens[index];
            let message = format!("Unit `{}` is unnecessary on a zero length", number.unit);
            let fix = Fix::replace(format!("Replace `{}` with `0`", token.text), token.span.range(), "0");
            self.violations
                .push(self.rule.violation(self.ctx, token.span, message).with_fix(fix));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, fix};

    fn fix_code(code: &str) -> String {
        fix(&ZeroUnit::new(), code)
    }

    #[test]
    fn test_zero_lengths() {
        let code = ".a { margin: 0px 0em 1px 0.0REM; }";
        let violations = check(&ZeroUnit::new(), code);
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0].message, "Unit `px` is unnecessary on a zero length");
        assert_eq!(fix_code(code), ".a { margin: 0 0 1px 0; }");
    }

    #[test]
    fn test_non_length_units_are_kept() {
        assert!(check(&ZeroUnit::new(), ".a { transition: opacity 0s; transform: rotate(0deg); width: 0%; }").is_empty());
    }

    #[test]
    fn test_math_functions_and_custom_properties() {
        let rule = ZeroUnit::new();
        assert!(check(&rule, ".a { width: calc(100% - 0px); }").is_empty());
        assert!(check(&rule, ".a { width: max(0px, 1em); }").is_empty());
        assert!(check(&rule, ".a { --gap: 0px; }").is_empty());
        assert_eq!(check(&rule, ".a { margin: 0px calc(1px + 0px); }").len(), 1);
    }

    #[test]
    fn test_variables() {
        assert_eq!(fix_code("$gutter: 0px;"), "$gutter: 0;");
    }
}

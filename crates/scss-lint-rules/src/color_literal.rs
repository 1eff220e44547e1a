//! Rule enforcing the form of color literals.
//!
//! # Rationale
//!
//! One spelling per color keeps diffs and searches honest: `#FFFFFF`,
//! `#ffffff` and `#fff` are the same color. Hex literals use a single case
//! and the three-digit form whenever every channel pair repeats. Colors
//! with an alpha channel use `rgba()` around a hex literal instead of raw
//! integer channels or eight-digit hex.
//!
//! # Configuration
//!
//! - `case`: `"lower"` or `"upper"` (default: `"lower"`)
//! - `shorthand`: Prefer `#abc` over `#aabbcc` (default: true)

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::token::tokens_span;
use scss_lint_core::syntax::value::{find_calls, split_number};
use scss_lint_core::syntax::visit::walk_at_rule;
use scss_lint_core::syntax::{AtRule, Declaration, Stylesheet, Token, TokenKind, Visit};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for color-literal.
pub const CODE: &str = "SL003";

/// Rule name for color-literal.
pub const NAME: &str = "color-literal";

/// Letter case of hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexCase {
    /// `#abc`
    Lower,
    /// `#ABC`
    Upper,
}

/// Enforces one spelling for hex and `rgba()` colors.
#[derive(Debug, Clone)]
pub struct ColorLiteral {
    /// Letter case of hex digits.
    pub case: HexCase,
    /// Collapse `#aabbcc` to `#abc`.
    pub shorthand: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ColorLiteral {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorLiteral {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            case: HexCase::Lower,
            shorthand: true,
            severity: Severity::Warning,
        }
    }

    /// Sets the letter case.
    #[must_use]
    pub fn case(mut self, case: HexCase) -> Self {
        self.case = case;
        self
    }

    /// Sets whether six-digit colors must be shortened when possible.
    #[must_use]
    pub fn shorthand(mut self, shorthand: bool) -> Self {
        self.shorthand = shorthand;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Canonical spelling of three or six hex digits, `#` included.
    fn canonical(&self, digits: &str) -> String {
        let digits = match self.case {
            HexCase::Lower => digits.to_ascii_lowercase(),
            HexCase::Upper => digits.to_ascii_uppercase(),
        };
        let bytes = digits.as_bytes();
        if self.shorthand
            && bytes.len() == 6
            && bytes[0] == bytes[1]
            && bytes[2] == bytes[3]
            && bytes[4] == bytes[5]
        {
            let short: String = [bytes[0], bytes[2], bytes[4]].iter().map(|b| *b as char).collect();
            return format!("#{short}");
        }
        format!("#{digits}")
    }
}

impl Rule for ColorLiteral {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires lowercase, shortest hex colors and `rgba(#hex, alpha)` for alpha"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = ColorVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for ColorLiteral {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let case = match options.choice("case", "lower", &["lower", "upper"])? {
            "upper" => HexCase::Upper,
            _ => HexCase::Lower,
        };
        let shorthand = options.bool("shorthand", true)?;
        Ok(Self::new().case(case).shorthand(shorthand))
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

/// At-rules whose prelude is a selector rather than an expression.
const SELECTOR_AT_RULES: &[&str] = &["extend", "at-root"];

struct ColorVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a ColorLiteral,
    violations: Vec<Violation>,
}

impl ColorVisitor<'_> {
    fn check_tokens(&mut self, tokens: &[Token<'_>]) {
        for token in tokens {
            if token.kind == TokenKind::Hash {
                self.check_hex(token);
            }
        }
        for call in find_calls(tokens) {
            if call.name(tokens) != "rgba" {
                continue;
            }
            let Some(close) = call.close else {
                continue;
            };
            let Some((channels, alpha)) = integer_channels(&call.args(tokens)) else {
                continue;
            };
            let hex = format!("{:02x}{:02x}{:02x}", channels[0], channels[1], channels[2]);
            let replacement = format!("rgba({}, {alpha})", self.rule.canonical(&hex));
            let Some(span) = tokens_span(&tokens[call.name..=close]) else {
                continue;
            };
            let message = format!("Expected `{replacement}` instead of integer channels");
            let fix = Fix::replace(format!("Use `{replacement}`"), span.range(), replacement);
            self.violations
                .push(self.rule.violation(self.ctx, span, message).with_fix(fix));
        }
    }

    fn check_hex(&mut self, token: &Token<'_>) {
        let digits = &token.text[1..];
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return;
        }
        match digits.len() {
            3 | 6 => {
                let expected = self.rule.canonical(digits);
                if expected == token.text {
                    return;
                }
                let message = format!("Expected `{expected}` instead of `{}`", token.text);
                let fix = Fix::replace(format!("Use `{expected}`"), token.span.range(), expected);
                self.violations
                    .push(self.rule.violation(self.ctx, token.span, message).with_fix(fix));
            }
            4 | 8 => {
                let message = format!(
                    "Color `{}` has an alpha channel; use `rgba(#hex, alpha)` instead",
                    token.text
                );
                self.violations
                    .push(self.rule.violation(self.ctx, token.span, message));
            }
            _ => {}
        }
    }
}

/// Three integer channels in `0..=255` and the alpha argument's text.
fn integer_channels(args: &[&[Token<'_>]]) -> Option<([u8; 3], String)> {
    let [r, g, b, alpha] = args else {
        return None;
    };
    let mut channels = [0u8; 3];
    for (slot, arg) in channels.iter_mut().zip([r, g, b]) {
        let [token] = arg else {
            return None;
        };
        if token.kind != TokenKind::Number {
            return None;
        }
        let number = split_number(token.text)?;
        if !number.unit.is_empty() || number.value.fract() != 0.0 {
            return None;
        }
        *slot = u8::try_from(number.value as i64).ok()?;
    }
    if alpha.is_empty() {
        return None;
    }
    let alpha: String = alpha.iter().map(|t| t.text).collect();
    Some((channels, alpha))
}

impl<'ast> Visit<'ast> for ColorVisitor<'_> {
    fn visit_declaration(&mut self, node: &'ast Declaration<'ast>) {
        self.check_tokens(&node.value.tokens);
    }

    fn visit_at_rule(&mut self, node: &'ast AtRule<'ast>) {
        // These preludes are selectors; `#abc` there is an id.
        if !SELECTOR_AT_RULES.contains(&node.name().as_str()) {
            self.check_tokens(&node.prelude);
        }
        walk_at_rule(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, fix, messages};

    fn check_code(code: &str) -> Vec<Violation> {
        check(&ColorLiteral::new(), code)
    }

    #[test]
    fn test_canonical_colors_pass() {
        assert!(check_code(".a { color: #fff; background: #a1b2c3; }").is_empty());
        assert!(check_code("$brand: #0af;").is_empty());
    }

    #[test]
    fn test_uppercase_and_long_form() {
        let violations = check_code(".a { color: #FFFFFF; }");
        assert_eq!(messages(&violations), vec!["Expected `#fff` instead of `#FFFFFF`"]);
        assert_eq!(fix(&ColorLiteral::new(), ".a { color: #FFFFFF; }"), ".a { color: #fff; }");
        assert_eq!(
            fix(&ColorLiteral::new(), ".a { border: 1px solid #AABBCD; }"),
            ".a { border: 1px solid #aabbcd; }"
        );
    }

    #[test]
    fn test_ids_in_selectors_are_not_colors() {
        assert!(check_code("#FACADE { color: red; }").is_empty());
        assert!(check_code(".a { @extend #cafe; }").is_empty());
        assert_eq!(
            fix(&ColorLiteral::new(), ".a { @at-root #ACE { b: #FFF; } }"),
            ".a { @at-root #ACE { b: #fff; } }"
        );
    }

    #[test]
    fn test_upper_case_without_shorthand() {
        let rule = ColorLiteral::new().case(HexCase::Upper).shorthand(false);
        assert_eq!(fix(&rule, ".a { color: #ffffff; }"), ".a { color: #FFFFFF; }");
        assert!(check(&rule, ".a { color: #ABC; }").is_empty());
    }

    #[test]
    fn test_rgba_with_integer_channels() {
        let code = ".a { color: rgba(0, 0, 0, 0.5); }";
        assert_eq!(
            messages(&check_code(code)),
            vec!["Expected `rgba(#000, 0.5)` instead of integer channels"]
        );
        assert_eq!(fix(&ColorLiteral::new(), code), ".a { color: rgba(#000, 0.5); }");
        assert_eq!(
            fix(&ColorLiteral::new(), ".a { box-shadow: 0 1px rgba(255,128,0,.2); }"),
            ".a { box-shadow: 0 1px rgba(#ff8000, .2); }"
        );
    }

    #[test]
    fn test_rgba_forms_left_alone() {
        assert!(check_code(".a { color: rgba(#000, 0.5); }").is_empty());
        assert!(check_code(".a { color: rgba($black, 0.5); }").is_empty());
        assert!(check_code(".a { color: rgba(10%, 0, 0, 0.5); }").is_empty());
        assert!(check_code(".a { color: rgba(300, 0, 0, 0.5); }").is_empty());
    }

    #[test]
    fn test_alpha_hex_is_report_only() {
        let violations = check_code(".a { color: #00000080; }");
        assert_eq!(violations.len(), 1);
        assert!(!violations[0].is_fixable());
    }

    #[test]
    fn test_colors_in_at_rule_arguments() {
        assert_eq!(
            fix(&ColorLiteral::new(), ".a { @include theme(#FFF); }"),
            ".a { @include theme(#fff); }"
        );
    }
}

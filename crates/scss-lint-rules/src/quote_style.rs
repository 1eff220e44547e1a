//! Rule enforcing the string quote character.
//!
//! # Configuration
//!
//! - `style`: `"single"` or `"double"` (default: `"single"`)
//!
//! Strings whose content contains the preferred quote are left alone, since
//! switching would require escaping.

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::{Stylesheet, TokenKind};
use scss_lint_core::{ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for quote-style.
pub const CODE: &str = "SL004";

/// Rule name for quote-style.
pub const NAME: &str = "quote-style";

/// String delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
}

impl Quote {
    fn char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

/// Enforces one quote character for string literals.
#[derive(Debug, Clone)]
pub struct QuoteStyle {
    /// Preferred quote.
    pub quote: Quote,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for QuoteStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteStyle {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            quote: Quote::Single,
            severity: Severity::Warning,
        }
    }

    /// Sets the preferred quote.
    #[must_use]
    pub fn quote(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for QuoteStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the configured quote character for strings"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let preferred = self.quote.char();
        let mut violations = Vec::new();
        for token in sheet.tokens() {
            if token.kind != TokenKind::String || token.text.starts_with(preferred) {
                continue;
            }
            let content = &token.text[1..token.text.len() - 1];
            if content.contains(preferred) {
                continue;
            }
            let message = format!("Strings should use {} quotes", self.quote.label());
            let fix = Fix::replace(
                format!("Use {} quotes", self.quote.label()),
                token.span.range(),
                format!("{preferred}{content}{preferred}"),
            );
            violations.push(self.violation(ctx, token.span, message).with_fix(fix));
        }
        violations
    }
}

impl ConfigurableRule for QuoteStyle {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let quote = match options.choice("style", "single", &["single", "double"])? {
            "double" => Quote::Double,
            _ => Quote::Single,
        };
        Ok(Self::new().quote(quote))
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, fix};

    #[test]
    fn test_single_quotes_by_default() {
        let code = "@import \"base\";\n.a { content: \"x\"; font-family: 'Helvetica'; }";
        let violations = check(&QuoteStyle::new(), code);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].message, "Strings should use single quotes");
        assert_eq!(
            fix(&QuoteStyle::new(), code),
            "@import 'base';\n.a { content: 'x'; font-family: 'Helvetica'; }"
        );
    }

    #[test]
    fn test_double_quotes() {
        let rule = QuoteStyle::new().quote(Quote::Double);
        assert_eq!(
            fix(&rule, "a[href='x'] { content: ''; }"),
            "a[href=\"x\"] { content: \"\"; }"
        );
    }

    #[test]
    fn test_content_with_preferred_quote_is_kept() {
        assert!(check(&QuoteStyle::new(), ".a { content: \"it's\"; }").is_empty());
    }

    #[test]
    fn test_escapes_are_preserved() {
        assert_eq!(
            fix(&QuoteStyle::new(), ".a { content: \"\\201C\"; }"),
            ".a { content: '\\201C'; }"
        );
    }
}

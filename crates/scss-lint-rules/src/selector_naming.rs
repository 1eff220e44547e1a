//! Rule enforcing a naming convention for class selectors.
//!
//! # Rationale
//!
//! Consistent class names make components recognisable in markup and
//! styles alike. The default convention is BEM in kebab-case:
//!
//! ```text
//! .block-name
//! .block-name__element-name
//! .block-name__element-name--modifier
//! ```
//!
//! # Configuration
//!
//! - `pattern`: Regular expression each class name must match
//!   (default: the BEM pattern above)
//!
//! When the kebab-case spelling of an offending name matches the pattern,
//! the fix renames the class. Classes built with interpolation are skipped.

use crate::registry::ConfigurableRule;
use regex::Regex;
use scss_lint_core::syntax::visit::walk_rule_set;
use scss_lint_core::syntax::{RuleSet, Span, Stylesheet, TokenKind, Visit};
use scss_lint_core::{
    ConfigError, FileContext, Fix, Rule, RuleOptions, Severity, Suggestion, Violation,
};
use std::sync::OnceLock;

/// Rule code for selector-naming.
pub const CODE: &str = "SL008";

/// Rule name for selector-naming.
pub const NAME: &str = "selector-naming";

/// Default class name pattern (kebab-case BEM).
pub const DEFAULT_PATTERN: &str =
    r"^[a-z][a-z0-9]*(-[a-z0-9]+)*(__[a-z0-9]+(-[a-z0-9]+)*)?(--[a-z0-9]+(-[a-z0-9]+)*)?$";

fn default_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(DEFAULT_PATTERN).ok()).as_ref()
}

/// Checks class selectors against a naming pattern.
#[derive(Debug, Clone)]
pub struct SelectorNaming {
    /// Custom pattern; `None` uses [`DEFAULT_PATTERN`].
    pub pattern: Option<Regex>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for SelectorNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorNaming {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: None,
            severity: Severity::Error,
        }
    }

    /// Sets the naming pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn matches(&self, name: &str) -> bool {
        self.pattern
            .as_ref()
            .or(default_regex())
            .map_or(true, |re| re.is_match(name))
    }
}

impl Rule for SelectorNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires class selectors to follow the naming convention"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = NamingVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for SelectorNaming {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let mut rule = Self::new();
        if let Some(pattern) = options.string("pattern")? {
            let regex = Regex::new(&pattern)
                .map_err(|e| options.invalid("pattern", format!("invalid regex: {e}")))?;
            rule = rule.pattern(regex);
        }
        Ok(rule)
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

/// Kebab-case spelling of a class name, keeping `__` and `--` separators.
fn to_kebab(name: &str) -> String {
    name.split("__")
        .map(|element| {
            element
                .split("--")
                .map(kebab_word)
                .collect::<Vec<_>>()
                .join("--")
        })
        .collect::<Vec<_>>()
        .join("__")
}

fn kebab_word(word: &str) -> String {
    fn push_dash(out: &mut String) {
        if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }

    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            push_dash(&mut out);
            continue;
        }
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let after_word = prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            let ends_acronym = prev.is_some_and(|p| p.is_ascii_uppercase())
                && next.is_some_and(char::is_ascii_lowercase);
            if after_word || ends_acronym {
                push_dash(&mut out);
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out.trim_end_matches('-').to_string()
}

struct NamingVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a SelectorNaming,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for NamingVisitor<'_> {
    fn visit_rule_set(&mut self, node: &'ast RuleSet<'ast>) {
        let tokens = &node.selectors.tokens;
        for (i, dot) in tokens.iter().enumerate() {
            if !dot.is_punct('.') {
                continue;
            }
            let Some(ident) = tokens.get(i + 1) else {
                continue;
            };
            if ident.kind != TokenKind::Ident || ident.start() != dot.end() {
                continue;
            }
            let interpolated = tokens
                .get(i + 2)
                .is_some_and(|t| t.kind == TokenKind::Interpolation && t.start() == ident.end());
            if interpolated || self.rule.matches(ident.text) {
                continue;
            }

            let span = Span::new(dot.span.start, ident.span.end);
            let message = format!("Class `.{}` does not match the naming pattern", ident.text);
            let renamed = to_kebab(ident.text);
            let violation = self.rule.violation(self.ctx, span, message);
            let violation = if renamed != ident.text && self.rule.matches(&renamed) {
                violation.with_fix(Fix::replace(
                    format!("Rename to `.{renamed}`"),
                    ident.span.range(),
                    renamed,
                ))
            } else {
                violation.with_suggestion(Suggestion::new(
                    "Use kebab-case blocks with `__element` and `--modifier` suffixes",
                ))
            };
            self.violations.push(violation);
        }
        walk_rule_set(self, node);
    }
}

//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // scss-lint: allow(zero-unit, SL010) reason="third-party override"
//! ```
//!
//! A directive applies to the lines its comment spans and to the line right
//! after it. Rules are named by id or code; `all` matches every rule.

use crate::syntax::Token;
use std::collections::{HashMap, HashSet};

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowDirective {
    /// Rule names or codes that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    fn matches(&self, rule_name: &str, rule_code: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains(rule_code) || self.rules.contains("all")
    }
}

/// Allow directives of one file, indexed by the lines they cover.
#[derive(Debug, Clone, Default)]
pub struct Suppressions {
    by_line: HashMap<usize, Vec<AllowDirective>>,
}

impl Suppressions {
    /// Collects directives from the comment tokens of a file.
    #[must_use]
    pub fn from_tokens(tokens: &[Token<'_>]) -> Self {
        let mut by_line: HashMap<usize, Vec<AllowDirective>> = HashMap::new();
        for token in tokens.iter().filter(|t| t.is_comment()) {
            let Some(directive) = parse_allow_directive(token.text) else {
                continue;
            };
            for line in token.span.start.line..=token.span.end.line + 1 {
                by_line.entry(line).or_default().push(directive.clone());
            }
        }
        Self { by_line }
    }

    /// Returns true if the file has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Checks whether a rule is allowed on `line`.
    #[must_use]
    pub fn check(&self, line: usize, rule_name: &str, rule_code: &str) -> AllowCheck {
        self.by_line
            .get(&line)
            .and_then(|directives| directives.iter().find(|d| d.matches(rule_name, rule_code)))
            .map_or(AllowCheck::Denied, |d| AllowCheck::Allowed {
                reason: d.reason.clone(),
            })
    }
}

/// Parses an allowance directive from the text of a comment token.
#[must_use]
pub fn parse_allow_directive(comment: &str) -> Option<AllowDirective> {
    let content = if let Some(rest) = comment.strip_prefix("//") {
        rest
    } else {
        comment.strip_prefix("/*")?.strip_suffix("*/")?
    };

    let directive = content.trim().strip_prefix("scss-lint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenize;

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("// scss-lint: allow(zero-unit)").unwrap();
        assert!(directive.rules.contains("zero-unit"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_block_comment_directive_with_reason() {
        let directive =
            parse_allow_directive("/* scss-lint: allow(SL010, no-important) reason=\"vendor\" */")
                .unwrap();
        assert!(directive.rules.contains("SL010"));
        assert!(directive.rules.contains("no-important"));
        assert_eq!(directive.reason.as_deref(), Some("vendor"));
    }

    #[test]
    fn test_ignores_other_comments() {
        assert!(parse_allow_directive("// plain comment").is_none());
        assert!(parse_allow_directive("// scss-lint: allow()").is_none());
    }

    #[test]
    fn test_covers_same_and_next_line() {
        let content = "a {\n  // scss-lint: allow(no-important) reason=\"legacy\"\n  color: red !important;\n  top: 0 !important;\n}";
        let tokens: Vec<_> = tokenize(content).collect();
        let suppressions = Suppressions::from_tokens(&tokens);

        let result = suppressions.check(3, "no-important", "SL010");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("legacy"));
        assert!(suppressions.check(2, "no-important", "SL010").is_allowed());
        assert!(!suppressions.check(4, "no-important", "SL010").is_allowed());
        assert!(!suppressions.check(3, "zero-unit", "SL009").is_allowed());
    }

    #[test]
    fn test_matches_by_code_and_all() {
        let tokens: Vec<_> = tokenize("/* scss-lint: allow(all) */ a{}").collect();
        let suppressions = Suppressions::from_tokens(&tokens);
        assert!(suppressions.check(1, "selector-spacing", "SL002").is_allowed());

        let tokens: Vec<_> = tokenize("// scss-lint: allow(SL002)\na{}").collect();
        let suppressions = Suppressions::from_tokens(&tokens);
        assert!(suppressions.check(2, "selector-spacing", "SL002").is_allowed());
    }
}

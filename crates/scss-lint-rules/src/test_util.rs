use scss_lint_core::syntax::parse_str;
use scss_lint_core::{fix_until_stable, sort_violations, FileContext, Rule, Violation};
use std::path::Path;

/// Runs one rule over `text`, which must parse cleanly.
pub fn check(rule: &dyn Rule, text: &str) -> Vec<Violation> {
    let parsed = parse_str(text);
    assert!(parsed.is_ok(), "test input does not parse: {:?}", parsed.errors);
    let ctx = FileContext::new(Path::new("test.scss"), text);
    let mut violations = rule.check(&ctx, &parsed.stylesheet);
    sort_violations(&mut violations);
    violations
}

/// Applies one rule's fixes until nothing fixable remains.
pub fn fix(rule: &dyn Rule, text: &str) -> String {
    fix_until_stable(text, 10, |candidate| {
        let parsed = parse_str(candidate);
        parsed.is_ok().then(|| {
            let ctx = FileContext::new(Path::new("test.scss"), candidate);
            rule.check(&ctx, &parsed.stylesheet)
        })
    })
    .output
}

/// Violation messages, in report order.
pub fn messages(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.message.as_str()).collect()
}

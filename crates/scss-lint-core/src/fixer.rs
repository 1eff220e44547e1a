//! Iterative fix application.
//!
//! Each round lints the current text, picks a non-conflicting set of fixes
//! (leftmost-innermost first), applies them and re-parses. Fixes that were
//! skipped because of a conflict get another chance in the next round, since
//! the rules are re-run against the edited text.

use crate::fix::{apply_edits, Fix};
use crate::types::Violation;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Default bound on fix rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Result of fixing one text.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// Fixed text.
    pub output: String,
    /// Rounds that applied at least one fix.
    pub iterations: usize,
    /// Total fixes applied.
    pub applied: usize,
    /// Whether no fixable violation remains.
    pub converged: bool,
    /// Violations of the final text.
    pub remaining: Vec<Violation>,
}

impl FixOutcome {
    /// Whether the output differs from `original`.
    #[must_use]
    pub fn changed(&self, original: &str) -> bool {
        self.output != original
    }
}

/// Repeatedly applies fixes until nothing fixable remains.
///
/// `lint` returns the violations of a text, or `None` when the text does not
/// parse cleanly. A round's fixes are only kept if the result still parses;
/// if the combined result does not, fixes are retried one by one and those
/// that break the parse are dropped. Fixing stops when no fixable violations
/// remain, when a round changes nothing, when a text seen before reappears,
/// or after `max_iterations` rounds.
///
/// If `source` itself does not parse, it is returned unchanged.
pub fn fix_until_stable<F>(source: &str, max_iterations: usize, lint: F) -> FixOutcome
where
    F: Fn(&str) -> Option<Vec<Violation>>,
{
    let mut text = source.to_string();
    let Some(mut violations) = lint(&text) else {
        return FixOutcome {
            output: text,
            iterations: 0,
            applied: 0,
            converged: false,
            remaining: Vec::new(),
        };
    };

    let mut seen = HashSet::from([text.clone()]);
    let mut iterations = 0;
    let mut applied = 0;
    let converged = loop {
        let accepted = select_fixes(&violations);
        if accepted.is_empty() {
            break true;
        }
        if iterations == max_iterations {
            warn!(max_iterations, "fixes did not converge");
            break false;
        }

        let Some((next, next_violations, count)) = apply_round(&text, &accepted, &lint) else {
            debug!("no fix in this round could be applied");
            break false;
        };
        if !seen.insert(next.clone()) {
            warn!(iterations, "fixes oscillate; keeping the last stable text");
            break false;
        }
        iterations += 1;
        applied += count;
        debug!(iteration = iterations, fixes = count, "applied fix round");
        text = next;
        violations = next_violations;
    };

    FixOutcome {
        output: text,
        iterations,
        applied,
        converged,
        remaining: violations,
    }
}

/// Picks fixes in leftmost-innermost order, skipping any that conflict with
/// one already picked.
#[must_use]
pub fn select_fixes(violations: &[Violation]) -> Vec<&Fix> {
    let mut candidates: Vec<(&str, &Fix)> = violations
        .iter()
        .filter_map(|v| v.fix.as_ref().map(|fix| (v.rule.as_str(), fix)))
        .collect();
    candidates.sort_by(|(rule_a, a), (rule_b, b)| {
        let (span_a, span_b) = (a.span(), b.span());
        (span_a.start, span_a.len(), *rule_a).cmp(&(span_b.start, span_b.len(), *rule_b))
    });

    let mut accepted: Vec<&Fix> = Vec::new();
    for (_, fix) in candidates {
        if accepted.iter().all(|a| !a.conflicts_with(fix)) {
            accepted.push(fix);
        }
    }
    accepted
}

/// Applies a set of non-conflicting fixes, keeping the parse intact.
///
/// Returns the new text, its violations and the number of fixes kept, or
/// `None` if no fix could be kept or the text did not change.
fn apply_round<F>(
    text: &str,
    fixes: &[&Fix],
    lint: &F,
) -> Option<(String, Vec<Violation>, usize)>
where
    F: Fn(&str) -> Option<Vec<Violation>>,
{
    if let Some(result) = try_apply(text, fixes, lint) {
        return Some(result);
    }

    debug!(fixes = fixes.len(), "combined fixes break the parse, retrying one at a time");
    let mut kept: Vec<&Fix> = Vec::new();
    for fix in fixes {
        kept.push(fix);
        if try_apply(text, &kept, lint).is_none() {
            debug!(message = %fix.message, "dropping fix that breaks the parse");
            kept.pop();
        }
    }
    if kept.is_empty() {
        return None;
    }
    try_apply(text, &kept, lint)
}

fn try_apply<F>(text: &str, fixes: &[&Fix], lint: &F) -> Option<(String, Vec<Violation>, usize)>
where
    F: Fn(&str) -> Option<Vec<Violation>>,
{
    let next = apply_edits(text, fixes.iter().flat_map(|f| f.edits.iter()))?;
    if next == text {
        return None;
    }
    let violations = lint(&next)?;
    Some((next, violations, fixes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::Edit;
    use crate::types::{Location, Severity};
    use std::path::PathBuf;

    fn violation(rule: &str, fix: Option<Fix>) -> Violation {
        let mut v = Violation::new(
            "SL000",
            rule,
            Severity::Error,
            Location::new(PathBuf::from("t.scss"), 1, 1),
            "m",
        );
        v.fix = fix;
        v
    }

    /// Flags every uppercase ASCII letter; the fix lowercases it.
    fn lowercase_lint(text: &str) -> Option<Vec<Violation>> {
        if text.contains('!') {
            return None;
        }
        Some(
            text.char_indices()
                .filter(|(_, c)| c.is_ascii_uppercase())
                .map(|(i, c)| {
                    violation(
                        "lower",
                        Some(Fix::replace("lowercase", i..i + 1, c.to_ascii_lowercase().to_string())),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn converges_and_reports_rounds() {
        let outcome = fix_until_stable("aBcD", 10, lowercase_lint);
        assert_eq!(outcome.output, "abcd");
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.applied, 2);
        assert!(outcome.remaining.is_empty());
    }

    #[test]
    fn unparsable_source_is_untouched() {
        let outcome = fix_until_stable("A!", 10, lowercase_lint);
        assert_eq!(outcome.output, "A!");
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn selection_prefers_leftmost_innermost() {
        let violations = vec![
            violation("outer", Some(Fix::replace("outer", 0..10, "x"))),
            violation("inner", Some(Fix::replace("inner", 0..2, "y"))),
            violation("later", Some(Fix::replace("later", 10..12, "z"))),
            violation("none", None),
        ];
        let accepted: Vec<_> = select_fixes(&violations)
            .iter()
            .map(|f| f.message.clone())
            .collect();
        assert_eq!(accepted, vec!["inner", "later"]);
    }

    #[test]
    fn deferred_fixes_apply_in_later_rounds() {
        // Two rules want overlapping edits; the second is re-derived after the first lands.
        let lint = |text: &str| -> Option<Vec<Violation>> {
            let mut out = Vec::new();
            if text.starts_with("ab") {
                out.push(violation("first", Some(Fix::replace("a->A", 0..1, "A"))));
                out.push(violation("second", Some(Fix::replace("ab->xy", 0..2, "xy"))));
            } else if text.starts_with("Ab") {
                out.push(violation("second", Some(Fix::replace("Ab->Xb", 0..1, "X"))));
            }
            Some(out)
        };
        let outcome = fix_until_stable("ab", 10, lint);
        assert_eq!(outcome.output, "Xb");
        assert_eq!(outcome.iterations, 2);
        assert!(outcome.converged);
    }

    #[test]
    fn drops_fixes_that_break_the_parse() {
        let lint = |text: &str| -> Option<Vec<Violation>> {
            if text.contains('!') {
                return None;
            }
            if text == "ab" {
                return Some(vec![
                    violation("bad", Some(Fix::new("bang", vec![Edit::insert(0, "!")]))),
                    violation("good", Some(Fix::replace("upper b", 1..2, "B"))),
                ]);
            }
            Some(Vec::new())
        };
        let outcome = fix_until_stable("ab", 10, lint);
        assert_eq!(outcome.output, "aB");
        assert_eq!(outcome.applied, 1);
        assert!(outcome.converged);
    }

    #[test]
    fn stops_on_oscillation() {
        let lint = |text: &str| -> Option<Vec<Violation>> {
            let (range, to) = if text == "a" { (0..1, "b") } else { (0..1, "a") };
            Some(vec![violation("flip", Some(Fix::replace("flip", range, to)))])
        };
        let outcome = fix_until_stable("a", 10, lint);
        assert!(!outcome.converged);
        assert_eq!(outcome.output, "b");
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.remaining.len(), 1);
    }

    #[test]
    fn respects_iteration_bound() {
        let lint = |text: &str| -> Option<Vec<Violation>> {
            Some(vec![violation(
                "grow",
                Some(Fix::insert("grow", text.len(), "x")),
            )])
        };
        let outcome = fix_until_stable("", 3, lint);
        assert_eq!(outcome.output, "xxx");
        assert_eq!(outcome.iterations, 3);
        assert!(!outcome.converged);
    }
}

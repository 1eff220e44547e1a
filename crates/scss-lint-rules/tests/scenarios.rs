//! End-to-end behaviour of the built-in rule set through the analyzer.

use scss_lint_core::syntax::parse_str;
use scss_lint_core::{Analyzer, Config, FileReport, LintResult, RuleBox, Severity, EXIT_INTERNAL_ERROR};
use scss_lint_rules::{build_rules, build_selected_rules};
use std::path::Path;

const SAMPLE: &str = r#"$primary: #336699;

/* ==========
   Buttons
   ========== */
.btn {
  display: inline-block;
  padding: 4px 8px 4px 8px;
  color: $primary;
  font-family: "Helvetica";

  &:hover { color: darken($primary, 10%); }

  &__icon--large {
    width: 0px;
  }
}
.BtnGroup{margin:0 auto}
@media print { .btn { display: none !important; } }
"#;

fn analyzer_with(config: Config, rules: Vec<RuleBox>) -> Analyzer {
    Analyzer::builder()
        .rules(rules)
        .config(config)
        .build()
        .unwrap()
}

fn analyzer(config: Config) -> Analyzer {
    let rules = build_rules(&config).unwrap();
    analyzer_with(config, rules)
}

fn check(text: &str) -> FileReport {
    analyzer(Config::default()).check_source(Path::new("test.scss"), text)
}

fn fix(text: &str) -> (FileReport, String) {
    analyzer(Config::default()).fix_source(Path::new("test.scss"), text)
}

fn render(report: &FileReport) -> String {
    report
        .violations
        .iter()
        .map(|v| {
            format!(
                "{}:{} {} [{}] {}",
                v.location.line, v.location.column, v.severity, v.rule, v.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn rules_hit(report: &FileReport) -> Vec<&str> {
    let mut rules: Vec<&str> = report.violations.iter().map(|v| v.rule.as_str()).collect();
    rules.sort_unstable();
    rules.dedup();
    rules
}

#[test]
fn messy_rule_is_reported_and_fixed() {
    let input = ".Foo{color:#FFFFFF;margin:0px 0px 0px 0px}";
    let report = check(input);
    let rules = rules_hit(&report);
    for expected in [
        "color-literal",
        "selector-naming",
        "selector-spacing",
        "shorthand-values",
        "zero-unit",
    ] {
        assert!(rules.contains(&expected), "{expected} not reported: {rules:?}");
    }
    let zero_units = report
        .violations
        .iter()
        .filter(|v| v.rule == "zero-unit")
        .count();
    assert_eq!(zero_units, 4);

    let (report, fixed) = fix(input);
    insta::assert_snapshot!(fixed, @r"
    .foo {
      color: #fff;
      margin: 0;
    }
    ");
    assert!(report.fixed);
    assert!(report.violations.is_empty(), "{}", render(&report));
}

#[test]
fn deep_nesting_is_an_error() {
    let input = ".a {\n  .b {\n    .c {\n      .d {\n        color: red;\n      }\n    }\n  }\n}\n";
    let report = check(input);
    let nesting: Vec<_> = report
        .violations
        .iter()
        .filter(|v| v.rule == "max-nesting-depth")
        .collect();
    assert_eq!(nesting.len(), 1);
    assert_eq!(nesting[0].severity, Severity::Error);
    assert_eq!((nesting[0].location.line, nesting[0].location.column), (4, 7));
    assert_eq!(nesting[0].message, "Rule `.d` is nested 4 levels deep (max 3)");
}

#[test]
fn adjacent_rules_get_a_blank_line() {
    let input = ".a { color: red; }\n.b { color: blue; }\n";
    let report = check(input);
    insta::assert_snapshot!(render(&report), @"2:1 warning [empty-line-between-rules] Expected a blank line before rule");

    let (_, fixed) = fix(input);
    assert_eq!(fixed, ".a { color: red; }\n\n.b { color: blue; }\n");
}

#[test]
fn unterminated_block_is_a_syntax_error() {
    let input = ".a { color: red;";
    let report = check(input);
    assert_eq!(report.syntax_errors.len(), 1);
    assert_eq!(report.syntax_errors[0].message, "unclosed block");
    assert!(report.violations.is_empty());

    let (report, fixed) = fix(input);
    assert_eq!(fixed, input);
    assert!(!report.fixed);

    let result = LintResult::from_reports(vec![report]);
    assert_eq!(result.exit_code(Severity::Error), EXIT_INTERNAL_ERROR);
}

#[test]
fn unmodified_source_round_trips() {
    let parsed = parse_str(SAMPLE);
    assert!(parsed.is_ok());
    assert_eq!(parsed.stylesheet.to_source(), SAMPLE);
}

#[test]
fn fixing_is_idempotent() {
    let (_, once) = fix(SAMPLE);
    let (report, twice) = fix(&once);
    assert_eq!(once, twice);
    assert!(!report.fixed);
    assert!(report.violations.iter().all(|v| !v.is_fixable()));
}

#[test]
fn fixed_sample_keeps_report_only_violations() {
    let (report, _) = fix(SAMPLE);
    insta::assert_snapshot!(rules_hit(&report).join("\n"), @r"
    banned-functions
    no-important
    ");
}

#[test]
fn rule_order_does_not_change_results() {
    let config = Config::default();
    let forward = analyzer(config.clone());
    let mut reversed_rules = build_rules(&config).unwrap();
    reversed_rules.reverse();
    let reversed = analyzer_with(config, reversed_rules);

    let path = Path::new("test.scss");
    let a = forward.check_source(path, SAMPLE);
    let b = reversed.check_source(path, SAMPLE);
    assert!(!a.violations.is_empty());
    assert_eq!(render(&a), render(&b));
    assert_eq!(forward.fix_source(path, SAMPLE).1, reversed.fix_source(path, SAMPLE).1);
}

#[test]
fn allow_comment_suppresses_next_line() {
    let input = "// scss-lint: allow(zero-unit) reason=\"legacy grid\"\n.a { margin: 0px; }\n.b { padding: 0px; }\n";
    let report = check(input);
    let zero_units: Vec<_> = report
        .violations
        .iter()
        .filter(|v| v.rule == "zero-unit")
        .map(|v| v.location.line)
        .collect();
    assert_eq!(zero_units, vec![3]);
}

#[test]
fn config_overrides_apply() {
    let config = Config::parse(
        r#"
preset = "minimal"

[rules.zero-unit]
severity = "error"

[rules.quote-style]
enabled = true
style = "double"
"#,
    )
    .unwrap();
    let report = analyzer(config).check_source(
        Path::new("test.scss"),
        ".a{margin:0px;content:'x'}",
    );
    insta::assert_snapshot!(render(&report), @r"
    1:11 error [zero-unit] Unit `px` is unnecessary on a zero length
    1:23 warning [quote-style] Strings should use double quotes
    ");
}

#[test]
fn selected_rules_run_even_when_disabled_in_config() {
    let config = Config::parse("[rules.zero-unit]\nenabled = false\n").unwrap();
    let report = analyzer(config.clone()).check_source(Path::new("test.scss"), ".a { margin: 0px; }");
    assert!(!rules_hit(&report).contains(&"zero-unit"));

    let rules = build_selected_rules(&config, &["zero-unit".to_string()]).unwrap();
    let report = analyzer_with(config, rules).check_source(Path::new("test.scss"), ".a { margin: 0px; }");
    assert_eq!(rules_hit(&report), vec!["zero-unit"]);
}

#[test]
fn report_serializes_to_json() {
    let report = check(".a { margin: 0px; }");
    let json = serde_json::to_value(&report).unwrap();
    let violation = &json["violations"][0];
    assert_eq!(violation["code"], "SL009");
    assert_eq!(violation["rule"], "zero-unit");
    assert_eq!(violation["severity"], "warning");
    assert_eq!(violation["location"]["line"], 1);
}

//! Shared output formatting for lint results.

use anyhow::Result;
use scss_lint_core::{FileReport, LintResult, Severity, SyntaxDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for file in &result.files {
        if let Some(error) = &file.error {
            println!(
                "\x1b[31merror\x1b[0m: {}: {}\n",
                file.path.display(),
                error
            );
        }
        print_syntax_errors(file);

        for violation in &file.violations {
            let severity_indicator = match violation.severity {
                Severity::Error => "\x1b[31merror\x1b[0m",
                Severity::Warning => "\x1b[33mwarning\x1b[0m",
            };

            println!(
                "{} {} at {}:{}:{}",
                violation.code,
                violation.rule,
                violation.location.file.display(),
                violation.location.line,
                violation.location.column,
            );
            println!("  {}: {}", severity_indicator, violation.message);
            if let Some(suggestion) = &violation.suggestion {
                println!("  = help: {}", suggestion.message);
            }
            println!();
        }
    }

    let (errors, warnings) = result.count_by_severity();
    let summary_color = if errors > 0 || result.has_internal_errors() {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("{summary_color}{}\x1b[0m", result.summary());
}

/// Renders syntax errors with the offending source through miette.
fn print_syntax_errors(file: &FileReport) {
    if file.syntax_errors.is_empty() {
        return;
    }
    let source = std::fs::read_to_string(&file.path).unwrap_or_default();
    for error in &file.syntax_errors {
        let report = miette::Report::new(SyntaxDiagnostic::new(error, &source));
        println!("{report:?}");
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for file in &result.files {
        if let Some(error) = &file.error {
            println!("{}: error: {}", file.path.display(), error);
        }
        for error in &file.syntax_errors {
            println!("{error}");
        }
        for violation in &file.violations {
            println!("{violation}");
        }
    }
}

//! Core types for lint violations and results.

use crate::fix::Fix;
use crate::syntax::{ParseError, Span};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Exit code when nothing at or above the failure threshold was found.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when violations at or above the failure threshold remain.
pub const EXIT_LINT_FAILURE: i32 = 1;
/// Exit code when the tool itself could not do its job (I/O, syntax, config).
pub const EXIT_INTERNAL_ERROR: i32 = 2;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Style problem that should be addressed.
    Warning,
    /// Style problem that fails the run.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as given to the analyzer.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in characters (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a location covering a syntax span.
    #[must_use]
    pub fn from_span(file: PathBuf, span: Span) -> Self {
        Self {
            file,
            line: span.start.line,
            column: span.start.column,
            offset: span.start.offset,
            length: span.len(),
        }
    }

    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A hint shown next to a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "SL001").
    pub code: String,
    /// Rule name (e.g., "indentation").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
    /// Automatic fix, if the rule can repair this violation.
    #[serde(skip)]
    pub fix: Option<Fix>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
            fix: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Attaches an automatic fix.
    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Whether an automatic fix is attached.
    #[must_use]
    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }

    /// Sort key: line, column, rule name.
    fn sort_key(&self) -> (usize, usize, &str) {
        (self.location.line, self.location.column, &self.rule)
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Sorts violations by (line, column, rule name).
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// A syntax error located in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxError {
    /// What went wrong.
    pub message: String,
    /// Where it went wrong.
    pub location: Location,
}

impl SyntaxError {
    /// Attaches a file path to a parser error.
    #[must_use]
    pub fn new(file: &Path, error: &ParseError) -> Self {
        Self {
            message: error.message.clone(),
            location: Location::from_span(file.to_path_buf(), error.span),
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: syntax error: {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.message
        )
    }
}

/// A syntax error rendered through miette with the offending source.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(scss_lint::syntax))]
pub struct SyntaxDiagnostic {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
}

impl SyntaxDiagnostic {
    /// Builds a diagnostic for `error` against the file's contents.
    #[must_use]
    pub fn new(error: &SyntaxError, source: &str) -> Self {
        let offset = error.location.offset.min(source.len());
        let length = error.location.length.min(source.len() - offset);
        Self {
            message: error.message.clone(),
            source_code: NamedSource::new(
                error.location.file.display().to_string(),
                source.to_string(),
            ),
            span: SourceSpan::from((offset, length)),
        }
    }
}

/// Per-file outcome of a check or fix run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    /// The file.
    pub path: PathBuf,
    /// Remaining violations, sorted by position.
    pub violations: Vec<Violation>,
    /// Syntax errors; when present, no rules ran.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub syntax_errors: Vec<SyntaxError>,
    /// I/O failure, if the file could not be read or written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether fix mode rewrote the file.
    #[serde(default)]
    pub fixed: bool,
}

impl FileReport {
    /// Creates an empty report for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Creates a report for a file that could not be read or written.
    #[must_use]
    pub fn io_error(path: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(path)
        }
    }

    /// Whether the tool failed on this file.
    #[must_use]
    pub fn has_internal_error(&self) -> bool {
        self.error.is_some() || !self.syntax_errors.is_empty()
    }
}

/// Result of running lint analysis over a batch of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// One report per processed file, ordered by path.
    pub files: Vec<FileReport>,
    /// Number of files processed.
    pub files_checked: usize,
    /// Whether the batch was interrupted.
    #[serde(default)]
    pub cancelled: bool,
    /// Files never started because of cancellation.
    #[serde(default)]
    pub skipped: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a result from file reports, ordering them by path.
    #[must_use]
    pub fn from_reports(mut files: Vec<FileReport>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            files_checked: files.len(),
            files,
            cancelled: false,
            skipped: 0,
        }
    }

    /// All violations across files.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.files.iter().flat_map(|f| f.violations.iter())
    }

    /// All syntax errors across files.
    pub fn syntax_errors(&self) -> impl Iterator<Item = &SyntaxError> {
        self.files.iter().flat_map(|f| f.syntax_errors.iter())
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations().any(|v| v.severity >= severity)
    }

    /// Whether any file hit an I/O or syntax error.
    #[must_use]
    pub fn has_internal_errors(&self) -> bool {
        self.files.iter().any(FileReport::has_internal_error)
    }

    /// Counts violations by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        self.violations()
            .fold((0, 0), |(errors, warnings), v| match v.severity {
                Severity::Error => (errors + 1, warnings),
                Severity::Warning => (errors, warnings + 1),
            })
    }

    /// Number of files rewritten by fix mode.
    #[must_use]
    pub fn files_fixed(&self) -> usize {
        self.files.iter().filter(|f| f.fixed).count()
    }

    /// One-line summary of the batch.
    #[must_use]
    pub fn summary(&self) -> String {
        use std::fmt::Write;
        let (errors, warnings) = self.count_by_severity();
        let mut summary = format!(
            "Found {errors} error(s), {warnings} warning(s) in {} file(s)",
            self.files_checked
        );
        let syntax = self.syntax_errors().count();
        if syntax > 0 {
            let _ = write!(summary, ", {syntax} syntax error(s)");
        }
        let unreadable = self.files.iter().filter(|f| f.error.is_some()).count();
        if unreadable > 0 {
            let _ = write!(summary, ", {unreadable} file error(s)");
        }
        let fixed = self.files_fixed();
        if fixed > 0 {
            let _ = write!(summary, ", fixed {fixed} file(s)");
        }
        if self.cancelled {
            let _ = write!(summary, " (interrupted, {} file(s) skipped)", self.skipped);
        }
        summary
    }

    /// Process exit code for this result.
    ///
    /// Internal failures take precedence over lint failures.
    #[must_use]
    pub fn exit_code(&self, fail_on: Severity) -> i32 {
        if self.has_internal_errors() {
            EXIT_INTERNAL_ERROR
        } else if self.has_violations_at(fail_on) {
            EXIT_LINT_FAILURE
        } else {
            EXIT_SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity, line: usize, column: usize, rule: &str) -> Violation {
        Violation::new(
            "SL000",
            rule,
            severity,
            Location::new(PathBuf::from("a.scss"), line, column),
            "message",
        )
    }

    fn report(violations: Vec<Violation>) -> FileReport {
        FileReport {
            violations,
            ..FileReport::new("a.scss")
        }
    }

    #[test]
    fn violations_sort_by_position_then_rule() {
        let mut violations = vec![
            make_violation(Severity::Error, 2, 1, "b"),
            make_violation(Severity::Error, 1, 5, "z"),
            make_violation(Severity::Error, 1, 5, "a"),
            make_violation(Severity::Error, 1, 2, "m"),
        ];
        sort_violations(&mut violations);
        let keys: Vec<_> = violations
            .iter()
            .map(|v| (v.location.line, v.location.column, v.rule.as_str()))
            .collect();
        assert_eq!(keys, vec![(1, 2, "m"), (1, 5, "a"), (1, 5, "z"), (2, 1, "b")]);
    }

    #[test]
    fn display_is_compact() {
        let v = make_violation(Severity::Warning, 3, 4, "zero-unit");
        assert_eq!(v.to_string(), "a.scss:3:4: warning [SL000] message");
    }

    #[test]
    fn format_includes_suggestion() {
        let v = make_violation(Severity::Error, 1, 1, "x").with_suggestion(Suggestion::new("do y"));
        assert!(v.format().contains("= help: do y"));
    }

    #[test]
    fn counts_by_severity() {
        let result = LintResult::from_reports(vec![report(vec![
            make_violation(Severity::Error, 1, 1, "a"),
            make_violation(Severity::Warning, 1, 1, "b"),
            make_violation(Severity::Warning, 2, 1, "c"),
        ])]);
        assert_eq!(result.count_by_severity(), (1, 2));
        assert!(result.summary().starts_with("Found 1 error(s), 2 warning(s) in 1 file(s)"));
    }

    #[test]
    fn exit_code_respects_threshold() {
        let warnings = LintResult::from_reports(vec![report(vec![make_violation(
            Severity::Warning,
            1,
            1,
            "a",
        )])]);
        assert_eq!(warnings.exit_code(Severity::Error), EXIT_SUCCESS);
        assert_eq!(warnings.exit_code(Severity::Warning), EXIT_LINT_FAILURE);
    }

    #[test]
    fn internal_errors_take_precedence() {
        let result = LintResult::from_reports(vec![
            report(vec![make_violation(Severity::Error, 1, 1, "a")]),
            FileReport::io_error("missing.scss", "No such file"),
        ]);
        assert_eq!(result.exit_code(Severity::Error), EXIT_INTERNAL_ERROR);
        assert_eq!(result.files[0].path, PathBuf::from("a.scss"));
    }

    #[test]
    fn syntax_errors_are_internal_failures() {
        let mut file = FileReport::new("broken.scss");
        file.syntax_errors.push(SyntaxError {
            message: "unclosed block".into(),
            location: Location::new(PathBuf::from("broken.scss"), 1, 3),
        });
        let result = LintResult::from_reports(vec![file]);
        assert_eq!(result.exit_code(Severity::Error), EXIT_INTERNAL_ERROR);
        assert!(result.summary().contains("1 syntax error(s)"));
    }

    #[test]
    fn syntax_diagnostic_clamps_span() {
        let error = SyntaxError {
            message: "unclosed block".into(),
            location: Location::new(PathBuf::from("a.scss"), 1, 1).with_span(40, 5),
        };
        let diagnostic = SyntaxDiagnostic::new(&error, "a {");
        assert_eq!(diagnostic.span, SourceSpan::from((3, 0)));
    }
}

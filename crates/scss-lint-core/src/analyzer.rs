//! Core analyzer for orchestrating lint execution.
//!
//! The per-file pipeline (tokenize, parse, check, fix, serialize) is pure.
//! Only [`Analyzer::check_file`] and [`Analyzer::fix_file`] touch the file
//! system, and a failure there is recorded on that file's report.

use crate::config::Config;
use crate::context::FileContext;
use crate::fixer::fix_until_stable;
use crate::rule::{Rule, RuleBox};
use crate::syntax::{parse_str, Stylesheet};
use crate::types::{sort_violations, FileReport, LintResult, SyntaxError, Violation};
use crate::utils::allowance::Suppressions;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while setting up analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error outside any single file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the worker pool
    /// cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let pool = match config.analyzer.parallelism {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?,
            ),
            None => None,
        };

        Ok(Analyzer {
            rules: self.rules,
            config,
            pool,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
    pool: Option<rayon::ThreadPool>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of the registered rules.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lints in-memory source text.
    #[must_use]
    pub fn check_source(&self, path: &Path, text: &str) -> FileReport {
        let mut report = FileReport::new(path);
        let parsed = parse_str(text);
        if !parsed.is_ok() {
            debug!("Skipping rules for {}: syntax errors", path.display());
            report.syntax_errors = parsed
                .errors
                .iter()
                .map(|e| SyntaxError::new(path, e))
                .collect();
            return report;
        }
        let ctx = FileContext::new(path, text);
        report.violations = self.lint(&ctx, &parsed.stylesheet);
        report
    }

    /// Fixes in-memory source text.
    ///
    /// Returns the report of what remains and the fixed text. Text with
    /// syntax errors is returned unchanged.
    #[must_use]
    pub fn fix_source(&self, path: &Path, text: &str) -> (FileReport, String) {
        let report = self.check_source(path, text);
        if !report.syntax_errors.is_empty() {
            return (report, text.to_string());
        }

        let outcome = fix_until_stable(text, self.config.fix.max_iterations, |candidate| {
            let parsed = parse_str(candidate);
            if !parsed.is_ok() {
                return None;
            }
            let ctx = FileContext::new(path, candidate);
            Some(self.lint(&ctx, &parsed.stylesheet))
        });
        if !outcome.converged {
            warn!(
                "Fixes for {} did not converge after {} iteration(s)",
                path.display(),
                outcome.iterations
            );
        }
        debug!(
            "Applied {} fix(es) to {} in {} iteration(s)",
            outcome.applied,
            path.display(),
            outcome.iterations
        );

        let fixed = outcome.changed(text);
        let mut report = FileReport::new(path);
        report.violations = outcome.remaining;
        report.fixed = fixed;
        (report, outcome.output)
    }

    /// Reads and lints one file.
    #[must_use]
    pub fn check_file(&self, path: &Path) -> FileReport {
        debug!("Checking: {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(content) => self.check_source(path, &content),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                FileReport::io_error(path, e.to_string())
            }
        }
    }

    /// Reads, fixes and, if anything changed, rewrites one file.
    #[must_use]
    pub fn fix_file(&self, path: &Path) -> FileReport {
        debug!("Fixing: {}", path.display());
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return FileReport::io_error(path, e.to_string());
            }
        };
        let (mut report, output) = self.fix_source(path, &content);
        if report.fixed {
            if let Err(e) = std::fs::write(path, output) {
                warn!("Failed to write {}: {}", path.display(), e);
                report.fixed = false;
                report.error = Some(e.to_string());
            }
        }
        report
    }

    /// Lints a batch of files in parallel.
    ///
    /// Setting `cancel` stops new files from starting; files already in
    /// progress finish and are reported.
    #[must_use]
    pub fn check_files(&self, files: &[PathBuf], cancel: &AtomicBool) -> LintResult {
        self.run_batch(files, cancel, |path| self.check_file(path))
    }

    /// Fixes a batch of files in parallel.
    #[must_use]
    pub fn fix_files(&self, files: &[PathBuf], cancel: &AtomicBool) -> LintResult {
        self.run_batch(files, cancel, |path| self.fix_file(path))
    }

    fn run_batch<F>(&self, files: &[PathBuf], cancel: &AtomicBool, process: F) -> LintResult
    where
        F: Fn(&Path) -> FileReport + Sync,
    {
        info!("Processing {} file(s) with {} rule(s)", files.len(), self.rules.len());

        let run = || -> Vec<Option<FileReport>> {
            files
                .par_iter()
                .map(|path| {
                    if cancel.load(Ordering::Relaxed) {
                        return None;
                    }
                    Some(process(path.as_path()))
                })
                .collect()
        };
        let outcomes = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let skipped = outcomes.iter().filter(|o| o.is_none()).count();
        let mut result = LintResult::from_reports(outcomes.into_iter().flatten().collect());
        result.skipped = skipped;
        result.cancelled = cancel.load(Ordering::Relaxed);

        let (errors, warnings) = result.count_by_severity();
        info!(
            "Analysis complete: {} error(s), {} warning(s) in {} file(s)",
            errors, warnings, result.files_checked
        );
        result
    }

    /// Runs every configured rule over a parsed file.
    ///
    /// Rule selection belongs to whoever built the rule list, so `enabled`
    /// is not consulted here.
    fn lint(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let suppressions = Suppressions::from_tokens(&sheet.tokens());
        let mut violations = Vec::new();

        for rule in &self.rules {
            let rule_violations = rule.check(ctx, sheet);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations.into_iter().filter(|v| {
                let allowed = suppressions.check(v.location.line, &v.rule, &v.code);
                if allowed.is_allowed() {
                    debug!("Suppressed {} at line {}", v.rule, v.location.line);
                }
                !allowed.is_allowed()
            }));
        }

        sort_violations(&mut violations);
        violations
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }
}

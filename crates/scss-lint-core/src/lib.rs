//! # scss-lint-core
//!
//! Core framework for SCSS style linting.
//!
//! This crate provides the building blocks shared by the built-in rules and
//! the command line tool:
//!
//! - [`syntax`]: a lazy tokenizer and a lossless concrete syntax tree
//! - [`Rule`] trait for rules that inspect a parsed stylesheet
//! - [`Analyzer`] for running rules over files, in parallel
//! - [`fixer`] for applying rule fixes until the text is stable
//! - [`Violation`] and [`LintResult`] for reporting
//!
//! ## Example
//!
//! ```ignore
//! use scss_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let report = analyzer.check_source(Path::new("a.scss"), ".a { color: red; }");
//! for violation in &report.violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub mod fix;
pub mod fixer;
pub mod syntax;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, FixConfig, RuleConfig, RuleOptions};
pub use context::FileContext;
pub use fix::{Edit, Fix};
pub use fixer::{fix_until_stable, FixOutcome};
pub use rule::{Rule, RuleBox};
pub use types::{
    sort_violations, FileReport, LintResult, Location, Severity, Suggestion, SyntaxDiagnostic,
    SyntaxError, Violation, EXIT_INTERNAL_ERROR, EXIT_LINT_FAILURE, EXIT_SUCCESS,
};
pub use utils::allowance::{AllowCheck, Suppressions};

//! Configuration types for scss-lint.
//!
//! A configuration is loaded once per run and never mutated afterwards. Rule
//! options are kept as raw TOML values here; each rule validates its own
//! options through [`RuleOptions`] when it is built.

use crate::fixer::DEFAULT_MAX_ITERATIONS;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Top-level configuration for scss-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Preset to start from (`recommended`, `strict` or `minimal`).
    #[serde(default)]
    pub preset: Option<String>,

    /// Lowest severity that fails the run (default: `error`).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Fixer configuration.
    #[serde(default)]
    pub fix: FixConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for out-of-range settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.fix.max_iterations) {
            return Err(ConfigError::InvalidOption {
                rule: "fix".to_string(),
                option: "max_iterations".to_string(),
                message: format!("must be between 1 and 100, got {}", self.fix.max_iterations),
            });
        }
        if self.analyzer.parallelism == Some(0) {
            return Err(ConfigError::InvalidOption {
                rule: "analyzer".to_string(),
                option: "parallelism".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Explicit enable/disable setting for a rule, if any.
    #[must_use]
    pub fn rule_enabled(&self, rule_name: &str) -> Option<bool> {
        self.rules.get(rule_name).and_then(|c| c.enabled)
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Failure threshold, defaulting to [`Severity::Error`].
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to lint.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Maximum number of files processed in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["**/node_modules/**".to_string(), "**/vendor/**".to_string()],
            extensions: default_extensions(),
            parallelism: None,
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["scss".to_string()]
}

/// Fixer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixConfig {
    /// Bound on fix rounds per file.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: BTreeMap<String, toml::Value>,
}

/// Typed, validating access to one rule's options.
///
/// Every getter fails on a value of the wrong type; [`RuleOptions::finish`]
/// fails on keys no getter asked for.
#[derive(Debug)]
pub struct RuleOptions<'a> {
    rule: &'a str,
    config: Option<&'a RuleConfig>,
    seen: HashSet<&'static str>,
}

impl<'a> RuleOptions<'a> {
    /// Options of `rule` in `config`.
    #[must_use]
    pub fn new(rule: &'a str, config: &'a Config) -> Self {
        Self {
            rule,
            config: config.rules.get(rule),
            seen: HashSet::new(),
        }
    }

    /// Options of a rule that has no configuration.
    #[must_use]
    pub fn empty(rule: &'a str) -> Self {
        Self {
            rule,
            config: None,
            seen: HashSet::new(),
        }
    }

    fn get(&mut self, key: &'static str) -> Option<&'a toml::Value> {
        self.seen.insert(key);
        self.config.and_then(|c| c.options.get(key))
    }

    /// Builds an [`ConfigError::InvalidOption`] for this rule.
    #[must_use]
    pub fn invalid(&self, option: &str, message: impl Into<String>) -> ConfigError {
        ConfigError::InvalidOption {
            rule: self.rule.to_string(),
            option: option.to_string(),
            message: message.into(),
        }
    }

    /// Boolean option.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a boolean.
    pub fn bool(&mut self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| self.invalid(key, "expected a boolean")),
        }
    }

    /// Integer option constrained to `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an integer or is out of range.
    pub fn usize_in(
        &mut self,
        key: &'static str,
        default: usize,
        min: usize,
        max: usize,
    ) -> Result<usize, ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        let number = value
            .as_integer()
            .ok_or_else(|| self.invalid(key, "expected an integer"))?;
        usize::try_from(number)
            .ok()
            .filter(|n| (min..=max).contains(n))
            .ok_or_else(|| self.invalid(key, format!("must be between {min} and {max}, got {number}")))
    }

    /// String option restricted to `allowed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not one of `allowed`.
    pub fn choice(
        &mut self,
        key: &'static str,
        default: &'static str,
        allowed: &[&'static str],
    ) -> Result<&'static str, ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        let text = value.as_str();
        allowed
            .iter()
            .find(|candidate| Some(**candidate) == text)
            .copied()
            .ok_or_else(|| self.invalid(key, format!("expected one of: {}", allowed.join(", "))))
    }

    /// Free-form string option.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a string.
    pub fn string(&mut self, key: &'static str) -> Result<Option<String>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.invalid(key, "expected a string")),
        }
    }

    /// Array-of-strings option.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an array of strings.
    pub fn strings(&mut self, key: &'static str) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let array = value
            .as_array()
            .ok_or_else(|| self.invalid(key, "expected an array of strings"))?;
        array
            .iter()
            .map(|item| {
                item.as_str()
                    .map(String::from)
                    .ok_or_else(|| self.invalid(key, "expected an array of strings"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Array-of-arrays-of-strings option.
    ///
    /// # Errors
    ///
    /// Returns an error if the value has any other shape.
    pub fn string_groups(
        &mut self,
        key: &'static str,
    ) -> Result<Option<Vec<Vec<String>>>, ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let shape_error = || self.invalid(key, "expected an array of string arrays");
        let groups = value.as_array().ok_or_else(shape_error)?;
        groups
            .iter()
            .map(|group| {
                group
                    .as_array()
                    .ok_or_else(shape_error)?
                    .iter()
                    .map(|item| item.as_str().map(String::from).ok_or_else(shape_error))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Fails if the configuration carries options no getter asked for.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown option.
    pub fn finish(self) -> Result<(), ConfigError> {
        let Some(config) = self.config else {
            return Ok(());
        };
        match config
            .options
            .keys()
            .find(|key| !self.seen.contains(key.as_str()))
        {
            Some(unknown) => Err(self.invalid(unknown, "unknown option")),
            None => Ok(()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule name that no built-in rule has.
    #[error("Unknown rule '{name}'")]
    UnknownRule {
        /// The unrecognised name.
        name: String,
    },

    /// A preset name that does not exist.
    #[error("Unknown preset '{name}' (expected recommended, strict or minimal)")]
    UnknownPreset {
        /// The unrecognised name.
        name: String,
    },

    /// A rule option with a bad value.
    #[error("Invalid option '{option}' for rule '{rule}': {message}")]
    InvalidOption {
        /// Rule (or section) the option belongs to.
        rule: String,
        /// Option name.
        option: String,
        /// What is wrong with it.
        message: String,
    },
}

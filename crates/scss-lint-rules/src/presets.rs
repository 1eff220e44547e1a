//! Rule presets for common configurations.

use crate::registry::RULES;
use scss_lint_core::{ConfigError, RuleBox, RuleOptions, Severity};
use std::fmt;
use std::str::FromStr;

/// Rules left out of the recommended preset.
const OPT_IN: &[&str] = &["property-order"];

/// Rules of the minimal preset.
const MINIMAL: &[&str] = &["color-literal", "max-nesting-depth", "zero-unit", "no-important"];

/// Preset configurations for scss-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every rule except the opt-in ones, at their default severities.
    #[default]
    Recommended,
    /// Every rule, all at error severity.
    Strict,
    /// A handful of correctness-flavoured rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// All presets.
    pub const ALL: [Self; 3] = [Self::Recommended, Self::Strict, Self::Minimal];

    /// Preset name as used in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }

    /// Whether the preset enables the rule `name`.
    #[must_use]
    pub fn includes(self, name: &str) -> bool {
        match self {
            Self::Recommended => !OPT_IN.contains(&name),
            Self::Strict => true,
            Self::Minimal => MINIMAL.contains(&name),
        }
    }

    /// Severity forced on every rule of the preset, if any.
    #[must_use]
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::Strict => Some(Severity::Error),
            Self::Recommended | Self::Minimal => None,
        }
    }

    /// Returns the rules for this preset with default options.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        RULES
            .iter()
            .filter(|info| self.includes(info.name))
            .filter_map(|info| {
                info.build(&mut RuleOptions::empty(info.name), self.severity())
                    .ok()
            })
            .collect()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ConfigError::UnknownPreset {
                name: s.to_string(),
            })
    }
}

/// Returns every built-in rule with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    RULES
        .iter()
        .filter_map(|info| info.build(&mut RuleOptions::empty(info.name), None).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::Recommended.rules().len(), 15);
        assert_eq!(Preset::Strict.rules().len(), 16);
        assert_eq!(Preset::Minimal.rules().len(), 4);
    }

    #[test]
    fn test_all_rules_keep_default_severity() {
        let rules = all_rules();
        assert_eq!(rules.len(), 16);
        let naming = rules.iter().find(|r| r.name() == "selector-naming").unwrap();
        assert_eq!(naming.default_severity(), Severity::Error);
        let zero = rules.iter().find(|r| r.name() == "zero-unit").unwrap();
        assert_eq!(zero.default_severity(), Severity::Warning);
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("strict".parse::<Preset>().unwrap(), Preset::Strict);
        assert!(matches!(
            "Strict".parse::<Preset>(),
            Err(ConfigError::UnknownPreset { .. })
        ));
        assert_eq!(Preset::default().to_string(), "recommended");
    }
}

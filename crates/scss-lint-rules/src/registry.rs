//! Rule registry: builds configured rule instances by id.

use crate::presets::Preset;
use crate::{
    banned_functions, color_literal, comment_style, declaration_grouping, declaration_semicolon,
    declaration_spacing, empty_line_between_rules, indentation, max_nesting_depth, no_important,
    property_order, quote_style, selector_naming, selector_spacing, shorthand_values, zero_unit,
};
use crate::{
    BannedFunctions, ColorLiteral, CommentStyle, DeclarationGrouping, DeclarationSemicolon,
    DeclarationSpacing, EmptyLineBetweenRules, Indentation, MaxNestingDepth, NoImportant,
    PropertyOrder, QuoteStyle, SelectorNaming, SelectorSpacing, ShorthandValues, ZeroUnit,
};
use scss_lint_core::{Config, ConfigError, Rule, RuleBox, RuleOptions, Severity};
use tracing::debug;

/// A rule that can be built from its `[rules.<id>]` options.
pub trait ConfigurableRule: Rule + Sized + 'static {
    /// Builds the rule, reading every option it understands.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has the wrong type or is out of range.
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError>;

    /// Replaces the rule's severity.
    #[must_use]
    fn with_severity(self, severity: Severity) -> Self;
}

type BuildFn = fn(&mut RuleOptions<'_>, Option<Severity>) -> Result<RuleBox, ConfigError>;

/// Registry entry for one built-in rule.
#[derive(Clone, Copy)]
pub struct RuleInfo {
    /// Rule id, as used in configuration.
    pub name: &'static str,
    /// Rule code.
    pub code: &'static str,
    build: BuildFn,
}

impl RuleInfo {
    /// Builds the rule from `options`, optionally forcing a severity.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn build(
        &self,
        options: &mut RuleOptions<'_>,
        severity: Option<Severity>,
    ) -> Result<RuleBox, ConfigError> {
        (self.build)(options, severity)
    }
}

fn build<R: ConfigurableRule>(
    options: &mut RuleOptions<'_>,
    severity: Option<Severity>,
) -> Result<RuleBox, ConfigError> {
    let rule = R::from_options(options)?;
    let rule = match severity {
        Some(severity) => rule.with_severity(severity),
        None => rule,
    };
    Ok(Box::new(rule))
}

macro_rules! entry {
    ($module:ident, $rule:ty) => {
        RuleInfo {
            name: $module::NAME,
            code: $module::CODE,
            build: build::<$rule>,
        }
    };
}

/// Every built-in rule, in code order.
pub static RULES: &[RuleInfo] = &[
    entry!(indentation, Indentation),
    entry!(selector_spacing, SelectorSpacing),
    entry!(color_literal, ColorLiteral),
    entry!(quote_style, QuoteStyle),
    entry!(declaration_grouping, DeclarationGrouping),
    entry!(max_nesting_depth, MaxNestingDepth),
    entry!(property_order, PropertyOrder),
    entry!(selector_naming, SelectorNaming),
    entry!(zero_unit, ZeroUnit),
    entry!(no_important, NoImportant),
    entry!(banned_functions, BannedFunctions),
    entry!(declaration_spacing, DeclarationSpacing),
    entry!(declaration_semicolon, DeclarationSemicolon),
    entry!(shorthand_values, ShorthandValues),
    entry!(empty_line_between_rules, EmptyLineBetweenRules),
    entry!(comment_style, CommentStyle),
];

/// Looks up a rule by id (`zero-unit`) or code (`SL009`, case-insensitive).
#[must_use]
pub fn resolve_rule(id_or_code: &str) -> Option<&'static RuleInfo> {
    RULES
        .iter()
        .find(|info| info.name == id_or_code || info.code.eq_ignore_ascii_case(id_or_code))
}

/// Builds the rules enabled by `config`: the preset's rules, adjusted by
/// `[rules.<id>] enabled` settings.
///
/// Options of every configured rule are validated, enabled or not.
///
/// # Errors
///
/// Returns an error for an unknown preset, an unknown rule id or an invalid
/// option.
pub fn build_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let preset = preset_of(config)?;
    check_rule_ids(config)?;

    let mut rules = Vec::new();
    for info in RULES {
        let mut options = RuleOptions::new(info.name, config);
        let rule = info.build(&mut options, preset.severity())?;
        options.finish()?;

        let enabled = config
            .rule_enabled(info.name)
            .unwrap_or_else(|| preset.includes(info.name));
        if enabled {
            rules.push(rule);
        } else {
            debug!("Rule {} ({}) disabled", info.name, info.code);
        }
    }
    Ok(rules)
}

/// Builds only the `selected` rules (ids or codes), ignoring the preset and
/// `enabled` settings but honouring their options.
///
/// # Errors
///
/// Returns an error if a selected or configured rule is unknown, or an
/// option is invalid.
pub fn build_selected_rules(
    config: &Config,
    selected: &[String],
) -> Result<Vec<RuleBox>, ConfigError> {
    let preset = preset_of(config)?;
    check_rule_ids(config)?;

    let mut infos: Vec<&RuleInfo> = Vec::new();
    for id in selected {
        let info = resolve_rule(id.trim()).ok_or_else(|| ConfigError::UnknownRule {
            name: id.clone(),
        })?;
        if !infos.iter().any(|known| known.name == info.name) {
            infos.push(info);
        }
    }

    infos
        .into_iter()
        .map(|info| {
            let mut options = RuleOptions::new(info.name, config);
            let rule = info.build(&mut options, preset.severity())?;
            options.finish()?;
            Ok(rule)
        })
        .collect()
}

fn preset_of(config: &Config) -> Result<Preset, ConfigError> {
    config
        .preset
        .as_deref()
        .map_or(Ok(Preset::Recommended), str::parse)
}

fn check_rule_ids(config: &Config) -> Result<(), ConfigError> {
    match config
        .rules
        .keys()
        .find(|name| !RULES.iter().any(|info| info.name == name.as_str()))
    {
        Some(name) => Err(ConfigError::UnknownRule { name: name.clone() }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn registry_is_in_code_order() {
        assert_eq!(RULES.len(), 16);
        for (i, info) in RULES.iter().enumerate() {
            assert_eq!(info.code, format!("SL{:03}", i + 1));
        }
    }

    #[test]
    fn built_rules_match_their_entries() {
        for info in RULES {
            let rule = info.build(&mut RuleOptions::empty(info.name), None).unwrap();
            assert_eq!(rule.name(), info.name);
            assert_eq!(rule.code(), info.code);
            assert!(!rule.description().is_empty());
        }
    }

    #[test]
    fn default_config_uses_recommended_preset() {
        let rules = build_rules(&Config::default()).unwrap();
        assert_eq!(rules.len(), 15);
        assert!(!names(&rules).contains(&"property-order"));
    }

    #[test]
    fn enabled_flag_overrides_preset() {
        let config = Config::parse(
            "preset = \"minimal\"\n[rules.property-order]\nenabled = true\n[rules.zero-unit]\nenabled = false",
        )
        .unwrap();
        let rules = build_rules(&config).unwrap();
        assert_eq!(
            names(&rules),
            vec!["color-literal", "max-nesting-depth", "property-order", "no-important"]
        );
    }

    #[test]
    fn strict_preset_raises_severity() {
        let config = Config::parse("preset = \"strict\"").unwrap();
        let rules = build_rules(&config).unwrap();
        assert_eq!(rules.len(), 16);
        assert!(rules.iter().all(|r| r.default_severity() == Severity::Error));
    }

    #[test]
    fn unknown_rule_and_preset_are_errors() {
        let config = Config::parse("[rules.no-such-rule]\nenabled = true").unwrap();
        assert!(matches!(
            build_rules(&config),
            Err(ConfigError::UnknownRule { name }) if name == "no-such-rule"
        ));

        let config = Config::parse("preset = \"lenient\"").unwrap();
        assert!(matches!(
            build_rules(&config),
            Err(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn options_of_disabled_rules_are_validated() {
        let config = Config::parse("[rules.indentation]\nenabled = false\nwidth = 42").unwrap();
        let err = build_rules(&config).err().unwrap();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let config = Config::parse("[rules.zero-unit]\nunits = [\"px\"]").unwrap();
        let err = build_rules(&config).err().unwrap();
        assert!(err.to_string().contains("units"));
    }

    #[test]
    fn selection_by_id_or_code() {
        let config = Config::default();
        let selected = vec!["SL009".to_string(), "no-important".to_string(), "sl009".to_string()];
        let rules = build_selected_rules(&config, &selected).unwrap();
        assert_eq!(names(&rules), vec!["zero-unit", "no-important"]);

        let err = build_selected_rules(&config, &["SL999".to_string()]).err().unwrap();
        assert!(matches!(err, ConfigError::UnknownRule { .. }));
    }

    #[test]
    fn resolves_ids_and_codes() {
        assert_eq!(resolve_rule("sl016").map(|i| i.name), Some("comment-style"));
        assert_eq!(resolve_rule("quote-style").map(|i| i.code), Some("SL004"));
        assert!(resolve_rule("quotes").is_none());
    }
}

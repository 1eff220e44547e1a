//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# scss-lint configuration

# Starting rule set: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Lowest severity that fails the run: "error" (default) or "warning"
# fail_on = "warning"

[analyzer]
# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/vendor/**",
]

# File extensions to lint
extensions = ["scss"]

# Maximum number of files processed in parallel (default: one per core)
# parallelism = 4

[fix]
# Bound on fix rounds per file
max_iterations = 10

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.indentation]
width = 2
style = "space"

[rules.quote-style]
style = "single"

[rules.max-nesting-depth]
max = 3
# severity = "warning"  # Override default severity

[rules.color-literal]
case = "lower"
shorthand = true

# [rules.property-order]
# enabled = true
# include_first = true

# [rules.selector-naming]
# pattern = "^[a-z][a-z0-9]*(-[a-z0-9]+)*$"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("scss-lint.toml"), force)?;

    println!("Created scss-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit scss-lint.toml to configure rules");
    println!("  2. Run: scss-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scss_lint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(scss_lint_rules::build_rules(&config).unwrap().len(), 15);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scss-lint.toml");
        std::fs::write(&path, "preset = \"strict\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "preset = \"strict\"\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}

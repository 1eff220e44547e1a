//! Locating `scss-lint.toml`.
//!
//! The first hit wins:
//!
//! 1. the file passed with `--config` (or `SCSS_LINT_CONFIG`), which must exist
//! 2. `scss-lint.toml`, then `.scss-lint.toml`, in the directory being linted
//! 3. `config.toml` in `$SCSS_LINT_CONFIG_DIR`, or in `~/.scss-lint/` when unset
//!
//! With none of these the built-in defaults (the `recommended` preset) apply.

use anyhow::{Context, Result};
use scss_lint_core::Config;
use std::path::{Path, PathBuf};

/// File names looked up in the linted directory, in priority order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["scss-lint.toml", ".scss-lint.toml"];

const USER_CONFIG_FILE: &str = "config.toml";

/// Origin of the configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config PATH`.
    Explicit(PathBuf),
    /// A config file next to the stylesheets.
    Project(PathBuf),
    /// The per-user config file.
    User(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the config file, unless defaults are used.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::User(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not TOML, or names unknown keys.
    pub fn load(&self) -> Result<Config> {
        let path = match self {
            Self::Default => {
                tracing::debug!("No scss-lint.toml found, using the recommended preset");
                return Ok(Config::default());
            }
            Self::User(path) => {
                tracing::info!("Using user config: {}", path.display());
                path
            }
            Self::Explicit(path) | Self::Project(path) => {
                tracing::debug!("Using config: {}", path.display());
                path
            }
        };
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Finds the configuration for stylesheets under `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    match explicit {
        Some(path) => ConfigSource::Explicit(path.to_path_buf()),
        None => discover(project_dir, user_config_dir().as_deref()),
    }
}

/// Project lookup, then the user directory; `user_dir` is a parameter so
/// tests need not touch the environment.
fn discover(project_dir: &Path, user_dir: Option<&Path>) -> ConfigSource {
    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        return ConfigSource::Project(found);
    }

    user_dir
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::User)
}

/// `$SCSS_LINT_CONFIG_DIR`, falling back to `~/.scss-lint`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("SCSS_LINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".scss-lint")))
}

/// Directory whose config applies to `paths`: the first path if it is a
/// directory, otherwise its parent.
#[must_use]
pub fn project_dir(paths: &[PathBuf]) -> PathBuf {
    match paths.first() {
        Some(first) if first.is_dir() => first.clone(),
        Some(first) => first
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        None => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) -> PathBuf {
        fs::write(path, content).unwrap();
        path.to_path_buf()
    }

    #[test]
    fn explicit_path_wins_and_must_exist() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("scss-lint.toml"), "");
        let custom = touch(&tmp.path().join("custom.toml"), "preset = \"strict\"\n");

        let source = resolve(tmp.path(), Some(&custom));
        assert_eq!(source, ConfigSource::Explicit(custom));
        assert_eq!(source.load().unwrap().preset.as_deref(), Some("strict"));

        let missing = resolve(tmp.path(), Some(Path::new("/no/such/scss-lint.toml")));
        assert!(missing.load().is_err());
    }

    #[test]
    fn plain_name_beats_dotfile() {
        let tmp = TempDir::new().unwrap();
        let dotfile = touch(&tmp.path().join(".scss-lint.toml"), "");
        assert_eq!(discover(tmp.path(), None), ConfigSource::Project(dotfile));

        let plain = touch(&tmp.path().join("scss-lint.toml"), "");
        assert_eq!(discover(tmp.path(), None), ConfigSource::Project(plain));
    }

    #[test]
    fn user_config_is_the_fallback() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        let user_file = touch(&user.path().join("config.toml"), "preset = \"minimal\"\n");

        let source = discover(project.path(), Some(user.path()));
        assert_eq!(source, ConfigSource::User(user_file));
        assert_eq!(source.load().unwrap().preset.as_deref(), Some("minimal"));

        touch(&project.path().join("scss-lint.toml"), "");
        assert!(matches!(
            discover(project.path(), Some(user.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn defaults_when_nothing_is_found() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        let source = discover(project.path(), Some(user.path()));
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
        assert!(source.load().unwrap().preset.is_none());
    }

    #[test]
    fn unknown_keys_fail_with_the_path() {
        let tmp = TempDir::new().unwrap();
        let path = touch(&tmp.path().join("scss-lint.toml"), "colour = true\n");
        let error = ConfigSource::Project(path).load().unwrap_err();
        assert!(format!("{error:#}").contains("Failed to load config"));
    }

    #[test]
    fn project_dir_for_inputs() {
        let tmp = TempDir::new().unwrap();
        let file = touch(&tmp.path().join("a.scss"), "");
        assert_eq!(project_dir(&[tmp.path().to_path_buf()]), tmp.path());
        assert_eq!(project_dir(&[file]), tmp.path());
        assert_eq!(project_dir(&[PathBuf::from("a.scss")]), PathBuf::from("."));
        assert_eq!(project_dir(&[]), PathBuf::from("."));
    }
}

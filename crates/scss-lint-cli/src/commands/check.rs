//! Check command implementation.

use anyhow::{Context, Result};
use scss_lint_core::Analyzer;
use scss_lint_rules::{build_rules, build_selected_rules};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config_resolver;
use crate::OutputFormat;

/// Arguments of the check command.
#[derive(Debug)]
pub struct CheckArgs {
    /// Files or directories to check.
    pub paths: Vec<PathBuf>,
    /// Whether to rewrite files with fixes applied.
    pub fix: bool,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
}

/// Runs the check command and returns the process exit code.
pub fn run(args: &CheckArgs, explicit_config: Option<&Path>) -> Result<i32> {
    let project = config_resolver::project_dir(&args.paths);
    let config = config_resolver::resolve(&project, explicit_config).load()?;

    let rules = match &args.rules {
        Some(filter) => {
            let ids: Vec<String> = filter
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            build_selected_rules(&config, &ids)
        }
        None => build_rules(&config),
    }
    .context("Invalid rule configuration")?;

    let fail_on = config.fail_on();
    let mut excludes = config.analyzer.exclude.clone();
    excludes.extend(args.exclude.iter().cloned());
    let files = collect_files(&args.paths, &config.analyzer.extensions, &excludes)?;

    let analyzer = Analyzer::builder()
        .rules(rules)
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "{} {} file(s) with {} rule(s)",
        if args.fix { "Fixing" } else { "Checking" },
        files.len(),
        analyzer.rule_count()
    );

    let cancel = Arc::new(AtomicBool::new(false));
    watch_interrupt(Arc::clone(&cancel));

    let result = if args.fix {
        analyzer.fix_files(&files, &cancel)
    } else {
        analyzer.check_files(&files, &cancel)
    };
    if result.cancelled {
        tracing::warn!("Interrupted; {} file(s) were not checked", result.skipped);
    }

    super::output::print(&result, args.format)?;

    Ok(result.exit_code(fail_on))
}

/// Sets `cancel` when the user presses Ctrl-C.
///
/// The signal is awaited on a small runtime of its own so the lint pool
/// stays synchronous.
fn watch_interrupt(cancel: Arc<AtomicBool>) {
    let spawned = std::thread::Builder::new()
        .name("scss-lint-signal".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::debug!("Interrupt handling unavailable: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Interrupt received, finishing files in progress");
                    cancel.store(true, Ordering::Relaxed);
                }
            });
        });
    if let Err(e) = spawned {
        tracing::debug!("Interrupt handling unavailable: {}", e);
    }
}

/// Collects the stylesheets to lint under `paths`.
///
/// Directories are walked honouring `.gitignore`; files named explicitly are
/// always included. Results are sorted and deduplicated.
fn collect_files(
    paths: &[PathBuf],
    extensions: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let patterns = exclude
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.exists() {
            anyhow::bail!("Path not found: {}", root.display());
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let path = entry.path();
            if !path.is_file() || !has_extension(path, extensions) {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if patterns
                .iter()
                .any(|p| p.matches_path(relative) || p.matches_path(path))
            {
                tracing::debug!("Excluded: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scss_lint_core::Config;
    use std::fs;
    use tempfile::TempDir;

    fn default_extensions() -> Vec<String> {
        Config::default().analyzer.extensions
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn collects_matching_extensions() {
        let tmp = TempDir::new().unwrap();
        let a = write(tmp.path(), "a.scss", "");
        let b = write(tmp.path(), "nested/b.SCSS", "");
        write(tmp.path(), "c.css", "");
        write(tmp.path(), "notes.txt", "");

        let files = collect_files(&[tmp.path().to_path_buf()], &default_extensions(), &[]).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn applies_exclude_patterns() {
        let tmp = TempDir::new().unwrap();
        let kept = write(tmp.path(), "src/a.scss", "");
        write(tmp.path(), "legacy/old.scss", "");

        let files = collect_files(
            &[tmp.path().to_path_buf()],
            &default_extensions(),
            &["legacy/**".to_string()],
        )
        .unwrap();
        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn explicit_files_are_always_included() {
        let tmp = TempDir::new().unwrap();
        let css = write(tmp.path(), "plain.css", "");
        let files = collect_files(&[css.clone(), css.clone()], &default_extensions(), &[]).unwrap();
        assert_eq!(files, vec![css]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        assert!(collect_files(&[missing], &default_extensions(), &[]).is_err());
    }

    #[test]
    fn invalid_exclude_pattern_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = collect_files(&[tmp.path().to_path_buf()], &default_extensions(), &["[".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn check_and_fix_exit_codes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "scss-lint.toml", "fail_on = \"warning\"\n");
        let file = write(tmp.path(), "a.scss", ".a { margin: 0px; }\n");

        let mut args = CheckArgs {
            paths: vec![tmp.path().to_path_buf()],
            fix: false,
            format: OutputFormat::Compact,
            rules: None,
            exclude: Vec::new(),
        };
        assert_eq!(run(&args, None).unwrap(), scss_lint_core::EXIT_LINT_FAILURE);

        args.fix = true;
        assert_eq!(run(&args, None).unwrap(), scss_lint_core::EXIT_SUCCESS);
        assert_eq!(fs::read_to_string(&file).unwrap(), ".a { margin: 0; }\n");
    }

    #[test]
    fn syntax_errors_exit_with_internal_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "broken.scss", ".a { color: red;\n");
        let args = CheckArgs {
            paths: vec![tmp.path().to_path_buf()],
            fix: false,
            format: OutputFormat::Json,
            rules: None,
            exclude: Vec::new(),
        };
        assert_eq!(run(&args, None).unwrap(), scss_lint_core::EXIT_INTERNAL_ERROR);
    }

    #[test]
    fn unknown_rule_selection_fails() {
        let tmp = TempDir::new().unwrap();
        let args = CheckArgs {
            paths: vec![tmp.path().to_path_buf()],
            fix: false,
            format: OutputFormat::Text,
            rules: Some("zero-unit, no-such-rule".to_string()),
            exclude: Vec::new(),
        };
        assert!(run(&args, None).is_err());
    }
}

//! Locating and loading evoke.toml

use anyhow::{Context, Result};
use evoke_theme::ThemeConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "evoke.toml";

/// Resolve a `--config` argument to a file path
///
/// Directories are searched for `evoke.toml`.
pub fn config_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Load the provider configuration
///
/// An explicit path must exist. Without one, `./evoke.toml` is used when
/// present and the built-in defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<ThemeConfig> {
    let config_path = match path {
        Some(path) => {
            let config_path = config_path(path);
            if !config_path.exists() {
                anyhow::bail!(
                    "No {} found at {}. Run `evoke init` to create one.",
                    CONFIG_FILE,
                    config_path.display()
                );
            }
            config_path
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            if !local.exists() {
                tracing::debug!("no {} in the current directory; using defaults", CONFIG_FILE);
                return Ok(ThemeConfig::default());
            }
            local
        }
    };

    ThemeConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))
}

/// Write a starter configuration holding the built-in themes
pub fn init(dir: &Path, force: bool) -> Result<PathBuf> {
    let target = dir.join(CONFIG_FILE);
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            target.display()
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let content = ThemeConfig::default()
        .to_toml()
        .context("Failed to serialize config")?;
    fs::write(&target, content).with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("evoke-cli-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn init_writes_loadable_defaults() {
        let dir = scratch_dir("init");
        let path = init(&dir, false).unwrap();
        assert_eq!(path, dir.join(CONFIG_FILE));

        let config = load(Some(&dir)).unwrap();
        assert_eq!(config, ThemeConfig::default());

        let err = init(&dir, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(init(&dir, true).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = scratch_dir("missing");
        let err = load(Some(&dir.join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("evoke init"));
    }

    #[test]
    fn parse_errors_carry_the_path() {
        let dir = scratch_dir("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), "default_theme = [").unwrap();

        let err = load(Some(&dir)).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE));

        fs::remove_dir_all(&dir).unwrap();
    }
}

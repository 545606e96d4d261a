//! Configuration loader with tier-based layering.
//!
//! Loads configuration from the built-in defaults, a YAML file and the
//! environment, lowest to highest priority.

use super::merge::layer;
use super::types::{ColorMode, Config};
use anyhow::{Context, Result, anyhow};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Explicit config file (overrides the user file).
pub const ENV_CONFIG_PATH: &str = "GIT_KONFIG_CONFIG_PATH";
/// Directory holding the user `config.yaml`.
pub const ENV_CONFIG_DIR: &str = "GIT_KONFIG_CONFIG_DIR";
/// Git executable.
pub const ENV_GIT: &str = "GIT_KONFIG_GIT";
/// Color mode.
pub const ENV_COLOR: &str = "GIT_KONFIG_COLOR";

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// User-level config file
    User = 1,
    /// File named by `--config` or `GIT_KONFIG_CONFIG_PATH`
    Explicit = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Explicit => write!(f, "explicit"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Candidate configuration files.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User config file; silently skipped when missing.
    pub user_file: Option<PathBuf>,
    /// Explicit config file; must exist when set.
    pub explicit_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from the environment and platform dirs.
    ///
    /// `explicit` (from `--config`) wins over `GIT_KONFIG_CONFIG_PATH`.
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        let user_dir = std::env::var_os(ENV_CONFIG_DIR)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("git-konfig")));

        let explicit_file =
            explicit.or_else(|| std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from));

        Self {
            user_file: user_dir.map(|d| d.join(CONFIG_FILE_NAME)),
            explicit_file,
        }
    }

    /// The file that will actually be read, if any.
    pub fn effective_file(&self) -> Option<(ConfigTier, &Path)> {
        if let Some(ref path) = self.explicit_file {
            return Some((ConfigTier::Explicit, path.as_path()));
        }
        match self.user_file {
            Some(ref path) if path.exists() => Some((ConfigTier::User, path.as_path())),
            _ => None,
        }
    }
}

/// Configuration loader that handles tier-based layering.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: Config,
    /// Tiers that contributed, in application order
    tiers: Vec<ConfigTier>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load from discovered paths and the process environment.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        Self::load_with(ConfigPaths::discover(explicit), |name| {
            std::env::var(name).ok()
        })
    }

    /// Load from the given paths, reading variables through `env`.
    pub fn load_with<F>(paths: ConfigPaths, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut tiers = vec![ConfigTier::Defaults];
        let mut merged =
            serde_yaml::to_value(Config::default()).context("failed to encode default config")?;

        let mut config_path = None;
        if let Some((tier, path)) = paths.effective_file() {
            let file_value = read_yaml(path)?;
            merged = layer(merged, file_value);
            tiers.push(tier);
            config_path = Some(path.to_path_buf());
            debug!(path = %path.display(), %tier, "loaded config file");
        }

        let mut config: Config = serde_yaml::from_value(merged).with_context(|| match config_path {
            Some(ref path) => format!("invalid config in {}", path.display()),
            None => "invalid default config".to_string(),
        })?;

        if apply_env(&mut config, env)? {
            tiers.push(ConfigTier::Environment);
        }

        Ok(Self {
            config,
            tiers,
            config_path,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Path of the config file that was read, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn tiers(&self) -> &[ConfigTier] {
        &self.tiers
    }
}

fn read_yaml(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Apply environment overrides. Returns whether any were set.
fn apply_env<F>(config: &mut Config, env: F) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = false;

    if let Some(git) = env(ENV_GIT).filter(|v| !v.is_empty()) {
        config.git = git;
        applied = true;
    }
    if let Some(color) = env(ENV_COLOR).filter(|v| !v.is_empty()) {
        config.color = color
            .parse::<ColorMode>()
            .map_err(|e| anyhow!("{}: {}", ENV_COLOR, e))?;
        applied = true;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_only() {
        let loader = ConfigLoader::load_with(ConfigPaths::default(), no_env).unwrap();
        assert_eq!(loader.config(), &Config::default());
        assert_eq!(loader.tiers(), &[ConfigTier::Defaults]);
        assert!(loader.config_path().is_none());
    }

    #[test]
    fn test_missing_user_file_is_skipped() {
        let paths = ConfigPaths {
            user_file: Some(PathBuf::from("/nonexistent/git-konfig/config.yaml")),
            explicit_file: None,
        };
        let loader = ConfigLoader::load_with(paths, no_env).unwrap();
        assert_eq!(loader.tiers(), &[ConfigTier::Defaults]);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let paths = ConfigPaths {
            user_file: None,
            explicit_file: Some(PathBuf::from("/nonexistent/git-konfig/explicit.yaml")),
        };
        assert!(ConfigLoader::load_with(paths, no_env).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env = |name: &str| match name {
            ENV_GIT => Some("/usr/local/bin/git".to_string()),
            ENV_COLOR => Some("never".to_string()),
            _ => None,
        };
        let loader = ConfigLoader::load_with(ConfigPaths::default(), env).unwrap();
        assert_eq!(loader.config().git, "/usr/local/bin/git");
        assert_eq!(loader.config().color, ColorMode::Never);
        assert_eq!(
            loader.tiers(),
            &[ConfigTier::Defaults, ConfigTier::Environment]
        );
    }

    #[test]
    fn test_bad_env_color() {
        let env = |name: &str| (name == ENV_COLOR).then(|| "rainbow".to_string());
        let err = ConfigLoader::load_with(ConfigPaths::default(), env).unwrap_err();
        assert!(err.to_string().contains(ENV_COLOR));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(ConfigTier::Defaults < ConfigTier::User);
        assert!(ConfigTier::User < ConfigTier::Explicit);
        assert!(ConfigTier::Explicit < ConfigTier::Environment);
        assert_eq!(ConfigTier::Explicit.to_string(), "explicit");
    }
}

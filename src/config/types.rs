//! Configuration types.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Git executable used for every config operation.
    #[serde(default = "default_git")]
    pub git: String,

    #[serde(default)]
    pub export: ExportConfig,

    /// When to highlight differing values in `list`.
    #[serde(default)]
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git: default_git(),
            export: ExportConfig::default(),
            color: ColorMode::default(),
        }
    }
}

fn default_git() -> String {
    "git".to_string()
}

/// Export-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    /// Sections exported when `--section` is not given.
    #[serde(default = "default_export_sections")]
    pub sections: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sections: default_export_sections(),
        }
    }
}

fn default_export_sections() -> Vec<String> {
    vec!["alias".to_string()]
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    /// Always emit color
    Always,
    /// Never emit color
    Never,
}

impl ColorMode {
    /// Whether to colorize, given whether stdout is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!(
                "Invalid color mode '{}'. Valid options: auto, always, never",
                s
            )),
        }
    }
}

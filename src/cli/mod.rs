//! CLI command definitions for git-konfig
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod export;
pub mod import;
pub mod list;

use crate::config::ColorMode;
use crate::git::{Scope, ScopeSet};
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use export::ExportArgs;
use import::ImportArgs;
use list::ListArgs;
use std::path::PathBuf;

const USAGE_EXAMPLES: &str = "\
Examples:
  git konfig export
  git konfig import < myconfig.txt
  git konfig ls --diff

Location options (--system, --global, --local and --worktree) are the same as git config's.";

/// Export, import and compare git config entries
#[derive(Parser, Debug)]
#[command(name = "git-konfig", author, about, long_about = None, after_help = USAGE_EXAMPLES)]
pub struct Cli {
    /// Git executable used for every config operation (default: git)
    #[arg(long, global = true, value_name = "PATH")]
    pub git: Option<String>,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Highlight differing values: auto, always or never
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorMode>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The clap command with the given build version attached.
    pub fn command_with_version(version: String) -> clap::Command {
        Self::command().version(version)
    }

    /// Parse process arguments, exiting on `--help`, `--version` or bad input.
    pub fn parse_with_version(version: String) -> Self {
        let matches = Self::command_with_version(version).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export config entries to stdout (default section is 'alias' only, use --all if you need)
    Export(ExportArgs),

    /// Import entries from stdin (terminal: enter 2 empty lines to finish)
    Import(ImportArgs),

    /// List entries of every scope side by side
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

/// Location flags shared by export and import.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Use the system-wide config file
    #[arg(long)]
    pub system: bool,

    /// Use the per-user config file
    #[arg(long)]
    pub global: bool,

    /// Use the repository config file
    #[arg(long)]
    pub local: bool,

    /// Use the per-worktree config file
    #[arg(long)]
    pub worktree: bool,
}

impl ScopeArgs {
    pub fn scope_set(&self) -> ScopeSet {
        [
            (self.system, Scope::System),
            (self.global, Scope::Global),
            (self.local, Scope::Local),
            (self.worktree, Scope::Worktree),
        ]
        .into_iter()
        .filter_map(|(set, scope)| set.then_some(scope))
        .collect()
    }
}

/// Version reported by `--version`.
///
/// Release builds set `GIT_KONFIG_VERSION` at compile time; anything else
/// reports `dev-YYYYMMDD`.
pub fn build_version() -> String {
    match option_env!("GIT_KONFIG_VERSION") {
        Some(version) if !version.is_empty() => version.to_string(),
        _ => format!("dev-{}", chrono::Local::now().format("%Y%m%d")),
    }
}

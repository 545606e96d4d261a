//! Import subcommand for git-konfig CLI
//!
//! Reads `key=value` lines and writes them into git config.

use super::ScopeArgs;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the import subcommand
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Complete 'alias.' if no section provided
    #[arg(long)]
    pub alias: bool,

    #[command(flatten)]
    pub scopes: ScopeArgs,

    /// Read entries from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Validate input without modifying git config
    ///
    /// Parses every line and prints the unset/set operations that would
    /// be run, without invoking git.
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    /// Describe the import mode for logging
    pub fn import_mode(&self) -> &'static str {
        match (self.dry_run, self.alias) {
            (true, _) => "dry-run",
            (false, true) => "alias",
            (false, false) => "strict",
        }
    }
}

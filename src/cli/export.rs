//! Export subcommand for git-konfig CLI
//!
//! Prints `key=value` lines from `git config --list`, filtered by section
//! and sorted, in a form `import` can read back.

use super::ScopeArgs;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export subcommand
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Comma-separated list of sections to export (default: alias)
    #[arg(short = 's', long = "section", value_name = "LIST", value_delimiter = ',')]
    pub sections: Option<Vec<String>>,

    /// Export all sections. --section is ignored
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub scopes: ScopeArgs,

    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Sections given on the command line, or `default` when none were.
    pub fn sections_or(&self, default: &[String]) -> Vec<String> {
        match &self.sections {
            Some(sections) if !sections.is_empty() => sections.clone(),
            _ => default.to_vec(),
        }
    }
}

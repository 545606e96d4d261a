//! List subcommand for git-konfig CLI
//!
//! Shows each key with its value in every scope that sets it.

use crate::aggregate::SectionFilter;
use crate::commands::list::OutputFormat;
use clap::{ArgAction, Args};

/// Arguments for the list subcommand
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output only those items that have different values for each scope
    #[arg(long)]
    pub diff: bool,

    /// Comma-separated list of sections to list (--all is ignored)
    #[arg(short = 's', long = "section", value_name = "LIST", value_delimiter = ',')]
    pub sections: Vec<String>,

    /// List all sections when no --section is given (use --all=false to disable)
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub all: bool,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

impl ListArgs {
    pub fn section_filter(&self) -> SectionFilter {
        SectionFilter {
            sections: self.sections.clone(),
            all: self.all,
        }
    }
}

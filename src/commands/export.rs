//! Export of `git config --list` lines.

use crate::entry::in_sections;
use crate::error::KonfigResult;
use crate::git::{ConfigStore, ScopeSet};
use std::io::Write;
use tracing::info;

/// What to export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Section prefixes to keep; ignored when `all` is set.
    pub sections: Vec<String>,
    pub all: bool,
    pub scopes: ScopeSet,
}

/// Listed lines that pass the section filter, sorted by full text.
pub fn export_lines<S: ConfigStore + ?Sized>(
    store: &S,
    options: &ExportOptions,
) -> KonfigResult<Vec<String>> {
    let mut lines: Vec<String> = store
        .list(&options.scopes)?
        .filter(|line| options.all || in_sections(line, &options.sections))
        .collect();
    lines.sort();
    Ok(lines)
}

/// Write the exported lines to `out`, one per line. Returns the line count.
pub fn run_export<S, W>(store: &S, options: &ExportOptions, out: &mut W) -> KonfigResult<usize>
where
    S: ConfigStore + ?Sized,
    W: Write,
{
    let lines = export_lines(store, options)?;
    for line in &lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    info!(
        lines = lines.len(),
        scopes = %options.scopes,
        all = options.all,
        "export complete"
    );
    Ok(lines.len())
}

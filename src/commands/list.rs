//! Side-by-side listing of every scope's values.

use crate::aggregate::{ScopedGroups, SectionFilter, collect_scopes, differs_from_first, diverges};
use crate::error::KonfigResult;
use crate::git::{ConfigStore, Scope};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tracing::info;

/// Output format for list results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format '{}'. Valid options: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// List settings.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub filter: SectionFilter,
    /// Skip keys whose values agree across scopes.
    pub diff_only: bool,
}

/// One value row under a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueRow {
    pub scope: Scope,
    pub value: String,
    /// Differs from the key's first value.
    pub differs: bool,
}

/// A key and its values across scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    pub key: String,
    pub values: Vec<ValueRow>,
}

impl KeyReport {
    pub fn diverges(&self) -> bool {
        self.values.iter().any(|row| row.differs)
    }
}

/// Build the per-key report from grouped values.
pub fn build_report(groups: &ScopedGroups, diff_only: bool) -> Vec<KeyReport> {
    groups
        .iter()
        .filter(|(_, values)| !diff_only || diverges(values))
        .map(|(key, values)| KeyReport {
            key: key.to_string(),
            values: values
                .iter()
                .map(|sv| ValueRow {
                    scope: sv.scope,
                    value: sv.value.clone(),
                    differs: differs_from_first(values, &sv.value),
                })
                .collect(),
        })
        .collect()
}

/// Query all scopes and build the report.
pub fn list_report<S: ConfigStore + ?Sized>(
    store: &S,
    options: &ListOptions,
) -> KonfigResult<Vec<KeyReport>> {
    let groups = collect_scopes(store, &options.filter)?;
    Ok(build_report(&groups, options.diff_only))
}

/// Render the report as text: the key, then `\t<value>\t<scope>` per row.
///
/// Rows that differ from the first value are shown in red when coloring
/// is enabled through `colored::control`.
pub fn render_text<W: Write>(report: &[KeyReport], out: &mut W) -> io::Result<()> {
    for entry in report {
        writeln!(out, "{}", entry.key)?;
        for row in &entry.values {
            let line = format!("\t{}\t{}", row.value, row.scope);
            if row.differs {
                writeln!(out, "{}", line.red())?;
            } else {
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

/// Render the report as a pretty-printed JSON array.
pub fn render_json<W: Write>(report: &[KeyReport], out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Run the list command. Returns the number of keys printed.
pub fn run_list<S, W>(
    store: &S,
    options: &ListOptions,
    format: OutputFormat,
    out: &mut W,
) -> KonfigResult<usize>
where
    S: ConfigStore + ?Sized,
    W: Write,
{
    let report = list_report(store, options)?;
    match format {
        OutputFormat::Text => render_text(&report, out)?,
        OutputFormat::Json => render_json(&report, out)?,
    }
    out.flush()?;

    info!(
        keys = report.len(),
        diverging = report.iter().filter(|r| r.diverges()).count(),
        %format,
        "list complete"
    );
    Ok(report.len())
}

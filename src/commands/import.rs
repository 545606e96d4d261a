//! Import of `key=value` lines into git config.
//!
//! Input ends at two consecutive blank lines or end of stream. Each line
//! is handled on its own: a malformed line or a failed git write is
//! reported as `ERROR: ...` and the import carries on. Only fatal errors
//! (git cannot be started, I/O failure) stop it.

use crate::entry::{Delimiter, LineKind, classify, qualify_key, split_delimited};
use crate::error::{KonfigError, KonfigResult};
use crate::git::{ConfigStore, ScopeSet, UnsetOutcome};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Import settings.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Complete bare keys to `alias.<key>`.
    pub alias: bool,
    pub scopes: ScopeSet,
    /// Print planned writes instead of running git.
    pub dry_run: bool,
}

/// The git write a single line turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedWrite {
    /// Empty value: remove the key.
    Unset { key: String },
    /// Replace any existing value(s) with `value`.
    Set { key: String, value: String },
}

impl PlannedWrite {
    pub fn key(&self) -> &str {
        match self {
            PlannedWrite::Unset { key } | PlannedWrite::Set { key, .. } => key,
        }
    }
}

/// Counts reported at the end of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Keys added (or, in a dry run, that would be).
    pub set: usize,
    /// Keys unset because their value was empty.
    pub unset: usize,
    /// Lines rejected or whose git write failed.
    pub failed: usize,
    /// Comment lines.
    pub comments: usize,
}

/// Turn a trimmed, non-comment line into a write.
///
/// A space delimiter is accepted with a warning on `err`.
pub fn plan_line<E: Write>(line: &str, alias: bool, err: &mut E) -> KonfigResult<PlannedWrite> {
    let split = split_delimited(line)?;
    if split.delimiter == Delimiter::Space {
        writeln!(err, "WARNING: no =, you put Space instead?")?;
    }

    let key = qualify_key(split.key, alias)?;
    if split.value.is_empty() {
        Ok(PlannedWrite::Unset { key })
    } else {
        Ok(PlannedWrite::Set {
            key,
            value: split.value.to_string(),
        })
    }
}

/// Execute a planned write against `store`.
///
/// `Set` unsets first and ignores that step's non-fatal failures; the key
/// may simply not exist yet.
pub fn apply<S: ConfigStore + ?Sized>(
    store: &S,
    scopes: &ScopeSet,
    write: &PlannedWrite,
) -> KonfigResult<()> {
    match write {
        PlannedWrite::Unset { key } => {
            if store.unset(scopes, key)? == UnsetOutcome::NotFound {
                debug!(key = %key, "nothing to unset");
            }
            Ok(())
        }
        PlannedWrite::Set { key, value } => {
            match store.unset(scopes, key) {
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => debug!(key = %key, error = %e, "ignoring failed unset before add"),
                Ok(_) => {}
            }
            store.add(scopes, key, value)
        }
    }
}

/// Read lines from `input` and import them.
///
/// Dry-run plans are printed to `out`; warnings and per-line errors go
/// to `err`.
pub fn run_import<S, R, O, E>(
    store: &S,
    options: &ImportOptions,
    mut input: R,
    out: &mut O,
    err: &mut E,
) -> KonfigResult<ImportSummary>
where
    S: ConfigStore + ?Sized,
    R: BufRead,
    O: Write,
    E: Write,
{
    let mut summary = ImportSummary::default();
    let mut prev_blank = false;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Invalid UTF-8 is replaced rather than failing the batch.
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim();

        match classify(line) {
            LineKind::Blank => {
                if prev_blank {
                    break;
                }
                prev_blank = true;
                continue;
            }
            LineKind::Comment => {
                prev_blank = false;
                summary.comments += 1;
                continue;
            }
            LineKind::Content => prev_blank = false,
        }

        let outcome = plan_line(line, options.alias, err).and_then(|write| {
            if options.dry_run {
                report_plan(out, &write)?;
            } else {
                apply(store, &options.scopes, &write)?;
            }
            Ok(write)
        });

        match outcome {
            Ok(PlannedWrite::Unset { .. }) => summary.unset += 1,
            Ok(PlannedWrite::Set { .. }) => summary.set += 1,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                writeln!(err, "ERROR: {}", e)?;
                summary.failed += 1;
            }
        }
    }

    out.flush()?;
    info!(
        set = summary.set,
        unset = summary.unset,
        failed = summary.failed,
        comments = summary.comments,
        scopes = %options.scopes,
        dry_run = options.dry_run,
        "import complete"
    );
    Ok(summary)
}

fn report_plan<O: Write>(out: &mut O, write: &PlannedWrite) -> Result<(), KonfigError> {
    match write {
        PlannedWrite::Unset { key } => writeln!(out, "unset {}", key)?,
        PlannedWrite::Set { key, value } => writeln!(out, "set {}={}", key, value)?,
    }
    Ok(())
}

//! Error types for git config operations and import lines.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while talking to git or interpreting import lines.
///
/// Only [`KonfigError::Spawn`] and [`KonfigError::Io`] are fatal. The
/// per-line variants are reported and the import moves on.
#[derive(Error, Debug)]
pub enum KonfigError {
    /// The configuration tool could not be started at all.
    #[error("failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no delimiter between key and value")]
    NoDelimiter,

    #[error("no section")]
    NoSection,

    #[error("no variable")]
    NoVariable,

    /// `git config --unset` or `--add` exited unsuccessfully.
    #[error("git: config --{action} {key} {}", describe_exit(.code))]
    Write {
        action: &'static str,
        key: String,
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl KonfigError {
    pub fn spawn(program: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    pub fn write(action: &'static str, key: impl Into<String>, status: ExitStatus) -> Self {
        Self::Write {
            action,
            key: key.into(),
            code: status.code(),
        }
    }

    /// Whether this error should stop the whole command rather than a single line.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::Io(_))
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Result type for git config operations.
pub type KonfigResult<T> = std::result::Result<T, KonfigError>;

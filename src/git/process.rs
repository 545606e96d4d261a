//! `ConfigStore` backed by a git executable.

use super::{ConfigStore, ScopeSet, UnsetOutcome};
use crate::error::{KonfigError, KonfigResult};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::debug;

/// Exit code of `git config --unset` when the key is missing or has
/// several values.
const UNSET_NOT_SINGLE: i32 = 5;

/// Exit code of `git config --get-all` when the key is missing.
const GET_MISSING_KEY: i32 = 1;

/// Runs `<program> config ...` for every operation.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn config_command(&self, scopes: &ScopeSet) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("config").args(scopes.to_args());
        cmd.stderr(Stdio::inherit());
        cmd
    }

    fn spawn_error(&self, err: std::io::Error) -> KonfigError {
        KonfigError::spawn(&self.program, err)
    }

    /// Whether `key` has any value in `scopes`.
    fn has_key(&self, scopes: &ScopeSet, key: &str) -> KonfigResult<bool> {
        let mut cmd = self.config_command(scopes);
        cmd.arg("--get-all")
            .arg(key)
            .stdin(Stdio::null())
            .stdout(Stdio::null());

        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        Ok(status.code() != Some(GET_MISSING_KEY))
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ConfigStore for GitCli {
    fn list(&self, scopes: &ScopeSet) -> KonfigResult<Box<dyn Iterator<Item = String> + '_>> {
        let mut cmd = self.config_command(scopes);
        cmd.arg("--list").stdin(Stdio::null()).stdout(Stdio::piped());
        debug!(program = %self.program.display(), scopes = %scopes, "git config --list");

        let child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        Ok(Box::new(ConfigLines::new(child)))
    }

    fn unset(&self, scopes: &ScopeSet, key: &str) -> KonfigResult<UnsetOutcome> {
        let mut cmd = self.config_command(scopes);
        cmd.arg("--unset").arg(key);
        debug!(program = %self.program.display(), scopes = %scopes, key, "git config --unset");

        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        if status.success() {
            Ok(UnsetOutcome::Removed)
        } else if status.code() == Some(UNSET_NOT_SINGLE) && !self.has_key(scopes, key)? {
            Ok(UnsetOutcome::NotFound)
        } else {
            Err(KonfigError::write("unset", key, status))
        }
    }

    fn add(&self, scopes: &ScopeSet, key: &str, value: &str) -> KonfigResult<()> {
        let mut cmd = self.config_command(scopes);
        cmd.arg("--add").arg(key).arg(value);
        debug!(program = %self.program.display(), scopes = %scopes, key, "git config --add");

        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        if status.success() {
            Ok(())
        } else {
            Err(KonfigError::write("add", key, status))
        }
    }
}

/// Lazy line reader over a running `git config --list`.
///
/// Yields lines until end of output or the first read error, then reaps
/// the child. Dropping the iterator early closes the pipe and reaps too.
pub struct ConfigLines {
    child: Child,
    reader: Option<BufReader<ChildStdout>>,
    buf: Vec<u8>,
}

impl ConfigLines {
    fn new(mut child: Child) -> Self {
        let reader = child.stdout.take().map(BufReader::new);
        Self {
            child,
            reader,
            buf: Vec::new(),
        }
    }

    fn finish(&mut self) {
        if self.reader.take().is_none() {
            return;
        }
        match self.child.wait() {
            Ok(status) if !status.success() => {
                debug!(%status, "git config --list exited unsuccessfully");
            }
            Ok(_) => {}
            Err(err) => debug!(error = %err, "failed to wait for git"),
        }
    }
}

impl Iterator for ConfigLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let reader = self.reader.as_mut()?;
        self.buf.clear();
        match reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.finish();
                None
            }
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(String::from_utf8_lossy(&self.buf).into_owned())
            }
            Err(err) => {
                debug!(error = %err, "stopped reading git output");
                self.finish();
                None
            }
        }
    }
}

impl Drop for ConfigLines {
    fn drop(&mut self) {
        self.finish();
    }
}

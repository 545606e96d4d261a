//! Access to git's configuration store.
//!
//! Everything that touches git goes through the [`ConfigStore`] trait.
//! [`GitCli`] is the production implementation that shells out to a git
//! executable; tests drive the commands with an in-memory double instead.

mod process;

pub use process::{ConfigLines, GitCli};

use crate::error::KonfigResult;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// One of git's configuration locations.
///
/// The declaration order is the order flags are passed to git.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    System,
    Global,
    Local,
    Worktree,
}

impl Scope {
    /// Order in which `list` queries scopes, most specific first.
    pub const QUERY_ORDER: [Scope; 4] = [Scope::Worktree, Scope::Local, Scope::Global, Scope::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::System => "system",
            Scope::Global => "global",
            Scope::Local => "local",
            Scope::Worktree => "worktree",
        }
    }

    /// The `git config` flag selecting this scope.
    pub fn flag(&self) -> &'static str {
        match self {
            Scope::System => "--system",
            Scope::Global => "--global",
            Scope::Local => "--local",
            Scope::Worktree => "--worktree",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The scopes a single git invocation is restricted to.
///
/// An empty set passes no scope flag and leaves resolution to git.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet {
    scopes: BTreeSet<Scope>,
}

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only(scope: Scope) -> Self {
        Self::from_iter([scope])
    }

    pub fn insert(&mut self, scope: Scope) {
        self.scopes.insert(scope);
    }

    /// Map the set to git flags, always in system/global/local/worktree order.
    pub fn to_args(&self) -> Vec<&'static str> {
        self.scopes.iter().map(Scope::flag).collect()
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self {
            scopes: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scopes.is_empty() {
            return f.write_str("default");
        }
        let names: Vec<&str> = self.scopes.iter().map(Scope::as_str).collect();
        f.write_str(&names.join(","))
    }
}

/// Whether an unset removed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsetOutcome {
    Removed,
    NotFound,
}

/// Scope-qualified read, unset and add on git's key/value store.
pub trait ConfigStore {
    /// Stream `key=value` lines from `git config --list`.
    fn list(&self, scopes: &ScopeSet) -> KonfigResult<Box<dyn Iterator<Item = String> + '_>>;

    /// Remove `key`. A key that was never set is [`UnsetOutcome::NotFound`], not an error.
    fn unset(&self, scopes: &ScopeSet, key: &str) -> KonfigResult<UnsetOutcome>;

    /// Append `value` to `key`.
    fn add(&self, scopes: &ScopeSet, key: &str, value: &str) -> KonfigResult<()>;
}

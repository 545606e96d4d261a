//! In-memory `ConfigStore` that records every call.

#![allow(dead_code)]

use git_konfig::error::{KonfigError, KonfigResult};
use git_konfig::git::{ConfigStore, Scope, ScopeSet, UnsetOutcome};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;

/// A recorded git invocation, with scope flags as git would receive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(Vec<&'static str>),
    Unset(Vec<&'static str>, String),
    Add(Vec<&'static str>, String, String),
}

#[derive(Default)]
pub struct FakeStore {
    listings: HashMap<Vec<&'static str>, Vec<String>>,
    existing: RefCell<HashSet<String>>,
    failing_adds: HashSet<String>,
    failing_unsets: HashSet<String>,
    unstartable: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines returned by `list` for exactly `scopes`.
    pub fn with_listing(mut self, scopes: &ScopeSet, lines: &[&str]) -> Self {
        self.listings
            .insert(scopes.to_args(), lines.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Lines returned by `list` for a single scope.
    pub fn with_scope(self, scope: Scope, lines: &[&str]) -> Self {
        self.with_listing(&ScopeSet::only(scope), lines)
    }

    /// Keys that `unset` finds and removes.
    pub fn with_existing(self, keys: &[&str]) -> Self {
        self.existing
            .borrow_mut()
            .extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn failing_add(mut self, key: &str) -> Self {
        self.failing_adds.insert(key.to_string());
        self
    }

    pub fn failing_unset(mut self, key: &str) -> Self {
        self.failing_unsets.insert(key.to_string());
        self
    }

    /// Every operation fails as if git could not be started.
    pub fn unstartable(mut self) -> Self {
        self.unstartable = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Only the unset/add calls.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List(_)))
            .collect()
    }

    fn check_startable(&self) -> KonfigResult<()> {
        if self.unstartable {
            return Err(KonfigError::spawn(
                "fake-git",
                io::Error::new(io::ErrorKind::NotFound, "not found"),
            ));
        }
        Ok(())
    }
}

impl ConfigStore for FakeStore {
    fn list(&self, scopes: &ScopeSet) -> KonfigResult<Box<dyn Iterator<Item = String> + '_>> {
        self.check_startable()?;
        self.calls.borrow_mut().push(Call::List(scopes.to_args()));
        let lines = self.listings.get(&scopes.to_args()).cloned().unwrap_or_default();
        Ok(Box::new(lines.into_iter()))
    }

    fn unset(&self, scopes: &ScopeSet, key: &str) -> KonfigResult<UnsetOutcome> {
        self.check_startable()?;
        self.calls
            .borrow_mut()
            .push(Call::Unset(scopes.to_args(), key.to_string()));
        if self.failing_unsets.contains(key) {
            return Err(KonfigError::Write {
                action: "unset",
                key: key.to_string(),
                code: Some(1),
            });
        }
        if self.existing.borrow_mut().remove(key) {
            Ok(UnsetOutcome::Removed)
        } else {
            Ok(UnsetOutcome::NotFound)
        }
    }

    fn add(&self, scopes: &ScopeSet, key: &str, value: &str) -> KonfigResult<()> {
        self.check_startable()?;
        self.calls.borrow_mut().push(Call::Add(
            scopes.to_args(),
            key.to_string(),
            value.to_string(),
        ));
        if self.failing_adds.contains(key) {
            return Err(KonfigError::Write {
                action: "add",
                key: key.to_string(),
                code: Some(3),
            });
        }
        self.existing.borrow_mut().insert(key.to_string());
        Ok(())
    }
}

//! Cross-scope aggregation of config values.
//!
//! Each scope is listed on its own and the values are grouped by exact
//! key, in query order (worktree, local, global, system).

use crate::entry::{in_sections, split_list_line};
use crate::error::KonfigResult;
use crate::git::{ConfigStore, Scope, ScopeSet};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A value as seen in one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedValue {
    pub scope: Scope,
    pub value: String,
}

/// Which listed lines take part in aggregation.
#[derive(Debug, Clone, Default)]
pub struct SectionFilter {
    /// Section prefixes; when non-empty they win over `all`.
    pub sections: Vec<String>,
    /// Accept every line when no sections are given.
    pub all: bool,
}

impl SectionFilter {
    pub fn accepts(&self, line: &str) -> bool {
        if self.sections.is_empty() {
            self.all
        } else {
            in_sections(line, &self.sections)
        }
    }
}

/// Values grouped by key, keys kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedGroups {
    groups: BTreeMap<String, Vec<ScopedValue>>,
}

impl ScopedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `key` in `scope`.
    ///
    /// A scope holds one value per key; a repeated key in the same scope
    /// replaces the earlier value, as git's own lookup does.
    pub fn record(&mut self, key: &str, scope: Scope, value: &str) {
        let group = self.groups.entry(key.to_string()).or_default();
        match group.iter_mut().find(|sv| sv.scope == scope) {
            Some(existing) => existing.value = value.to_string(),
            None => group.push(ScopedValue {
                scope,
                value: value.to_string(),
            }),
        }
    }

    /// Groups in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ScopedValue])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Whether any value in the group differs from the first one.
///
/// Only first-versus-rest is checked: with values `a, b, b` both `b`
/// entries count as different.
pub fn diverges(values: &[ScopedValue]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().any(|sv| sv.value != first.value),
        None => false,
    }
}

/// Whether `value` is rendered as differing from the group's first value.
pub fn differs_from_first(values: &[ScopedValue], value: &str) -> bool {
    values.first().is_some_and(|first| first.value != value)
}

/// List every scope and group the accepted lines by key.
pub fn collect_scopes<S: ConfigStore + ?Sized>(
    store: &S,
    filter: &SectionFilter,
) -> KonfigResult<ScopedGroups> {
    let mut groups = ScopedGroups::new();

    for scope in Scope::QUERY_ORDER {
        let mut seen = 0usize;
        for line in store.list(&ScopeSet::only(scope))? {
            if !filter.accepts(&line) {
                continue;
            }
            let Some((key, value)) = split_list_line(&line) else {
                continue;
            };
            groups.record(key, scope, value);
            seen += 1;
        }
        debug!(%scope, entries = seen, "collected scope");
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(groups: &'a ScopedGroups, key: &str) -> &'a [ScopedValue] {
        groups
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
            .unwrap()
    }

    fn sv(scope: Scope, value: &str) -> ScopedValue {
        ScopedValue {
            scope,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut groups = ScopedGroups::new();
        groups.record("user.name", Scope::Local, "Bob");
        groups.record("user.name", Scope::Global, "Alice");
        assert_eq!(
            values(&groups, "user.name"),
            &[sv(Scope::Local, "Bob"), sv(Scope::Global, "Alice")]
        );
    }

    #[test]
    fn test_record_overwrites_same_scope() {
        let mut groups = ScopedGroups::new();
        groups.record("remote.origin.fetch", Scope::Local, "a");
        groups.record("remote.origin.fetch", Scope::Local, "b");
        assert_eq!(
            values(&groups, "remote.origin.fetch"),
            &[sv(Scope::Local, "b")]
        );
    }

    #[test]
    fn test_iter_sorted_by_key() {
        let mut groups = ScopedGroups::new();
        groups.record("user.name", Scope::Global, "Alice");
        groups.record("alias.st", Scope::Global, "status");
        groups.record("core.editor", Scope::System, "vi");
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alias.st", "core.editor", "user.name"]);
    }

    #[test]
    fn test_diverges_first_versus_rest() {
        assert!(!diverges(&[]));
        assert!(!diverges(&[sv(Scope::Global, "a")]));
        assert!(!diverges(&[sv(Scope::Local, "a"), sv(Scope::Global, "a")]));
        assert!(diverges(&[sv(Scope::Local, "a"), sv(Scope::Global, "b")]));

        let values = [
            sv(Scope::Local, "a"),
            sv(Scope::Global, "b"),
            sv(Scope::System, "b"),
        ];
        assert!(diverges(&values));
        assert!(!differs_from_first(&values, "a"));
        assert!(differs_from_first(&values, "b"));
    }

    #[test]
    fn test_section_filter() {
        let everything = SectionFilter {
            sections: vec![],
            all: true,
        };
        assert!(everything.accepts("core.editor=vim"));

        let nothing = SectionFilter {
            sections: vec![],
            all: false,
        };
        assert!(!nothing.accepts("core.editor=vim"));

        let aliases = SectionFilter {
            sections: vec!["alias".to_string()],
            all: true,
        };
        assert!(aliases.accepts("alias.st=status"));
        assert!(!aliases.accepts("core.editor=vim"));
    }
}

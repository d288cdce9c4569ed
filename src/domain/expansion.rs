//! Expansion state: which nodes are expanded.
//!
//! The state is a value. Every update builds a new map from the prior one
//! plus the delta and replaces it whole; entries are never pruned, so the
//! expansion of a subtree survives collapsing and re-expanding its ancestor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Mapping from node id to expanded flag. Absent ids are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    entries: BTreeMap<String, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.entries.get(id).copied().unwrap_or(false)
    }

    /// Explicit flag for `id`, `None` if never set.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.entries.get(id).copied()
    }

    /// New state with `id` set to `value`, all other entries untouched.
    pub fn toggled(&self, id: &str, value: bool) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(id.to_string(), value);
        Self { entries }
    }

    /// New state with every id in `ids` set to `value`.
    pub fn with_all<'a, I>(&self, ids: I, value: bool) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries = self.entries.clone();
        for id in ids {
            entries.insert(id.to_string(), value);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Ids currently expanded, sorted.
    pub fn expanded_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Owner of the current expansion state.
///
/// Created with the table, replaced on every update, dropped with it. The
/// revision increments on each update so hosts can tell when a new
/// flattening pass is due.
#[derive(Debug, Clone, Default)]
pub struct ExpansionStore {
    state: ExpansionState,
    revision: u64,
}

impl ExpansionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ExpansionState) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &ExpansionState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.is_expanded(id)
    }

    /// Set the flag for one node. Unknown ids are stored as-is.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle(&mut self, id: &str, value: bool) {
        self.replace(self.state.toggled(id, value));
    }

    /// Expand every id in `expandable` in one update.
    #[instrument(level = "debug", skip(self, expandable))]
    pub fn expand_all<'a, I>(&mut self, expandable: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.replace(self.state.with_all(expandable, true));
    }

    /// Collapse every id in `expandable` in one update.
    #[instrument(level = "debug", skip(self, expandable))]
    pub fn collapse_all<'a, I>(&mut self, expandable: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.replace(self.state.with_all(expandable, false));
    }

    fn replace(&mut self, next: ExpansionState) {
        self.state = next;
        self.revision += 1;
        debug!(revision = self.revision, entries = self.state.len(), "expansion state replaced");
    }
}

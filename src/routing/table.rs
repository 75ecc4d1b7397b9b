//! Legacy path redirect table.
//!
//! # Responsibilities
//! - Hold the static old-path → new-path mapping
//! - Classify a lookup as target, root, or missing
//!
//! # Design Decisions
//! - Keys and values carry no leading/trailing slash (enforced by validation)
//! - An empty value is the sentinel for "redirect to site root"
//! - Deserializes from a flat JSON object, the format the table ships in

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Outcome of looking a path up in the [`RedirectTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Key maps to a non-empty replacement path.
    Target(&'a str),
    /// Key maps to the empty string.
    Root,
    /// Key is not in the table.
    Missing,
}

/// Immutable mapping from legacy paths to their replacements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RedirectTable {
    entries: HashMap<String, String>,
}

impl RedirectTable {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Look up a normalized path.
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        match self.entries.get(key) {
            Some(target) if target.is_empty() => Lookup::Root,
            Some(target) => Lookup::Target(target),
            None => Lookup::Missing,
        }
    }

    /// Insert entries from `other`, overriding existing keys.
    pub fn merge(&mut self, other: RedirectTable) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries sorted by key, for stable output.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RedirectTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

//! Ordered key → list map with secondary alias keys.
//!
//! Match lists are grouped under the match-type id; when metadata is
//! available the display name is registered as an alias so callers can index
//! by either. Aliases live in a separate table pointing at canonical keys, so
//! both lookups borrow the same `Vec` and merging never double-counts.

use crate::error::AliasMapError;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct AliasKeyedMap<T> {
    entries: Vec<(String, Vec<T>)>,
    aliases: BTreeMap<String, String>,
}

impl<T> Default for AliasKeyedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl<T> AliasKeyedMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `values` under `key`.
    ///
    /// Replacing a canonical entry keeps its position and aliases. Setting a
    /// key that is currently an alias detaches the alias and creates a new
    /// canonical entry; the entry it pointed at is left untouched.
    pub fn set(&mut self, key: impl Into<String>, values: Vec<T>) {
        let key = key.into();
        self.aliases.remove(&key);
        match self.slot(&key) {
            Some(slot) => self.entries[slot].1 = values,
            None => self.entries.push((key, values)),
        }
    }

    /// Register `alias` as a second name for `canonical`.
    ///
    /// `canonical` may itself be an alias; the new alias then points at the
    /// same canonical entry.
    pub fn add_alias(
        &mut self,
        canonical: &str,
        alias: impl Into<String>,
    ) -> Result<(), AliasMapError> {
        let target = self.resolve(canonical)?;
        let target = self.entries[target].0.clone();
        let alias = alias.into();
        if alias != target {
            self.aliases.insert(alias, target);
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&Vec<T>, AliasMapError> {
        let slot = self.resolve(key)?;
        Ok(&self.entries[slot].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Vec<T>, AliasMapError> {
        let slot = self.resolve(key)?;
        Ok(&mut self.entries[slot].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resolve(key).is_ok()
    }

    /// Canonical keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Alias keys registered for `canonical`.
    pub fn aliases_of<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = &'a str> {
        self.aliases
            .iter()
            .filter(move |(_, target)| target.as_str() == canonical)
            .map(|(alias, _)| alias.as_str())
    }

    /// Canonical entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vec<T>)> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values))
    }

    /// Number of canonical entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every stored value, canonical entries only, in insertion order.
    pub fn merge_values(&self) -> Vec<&T> {
        self.entries
            .iter()
            .flat_map(|(_, values)| values.iter())
            .collect()
    }

    /// Owning variant of [`merge_values`](Self::merge_values).
    pub fn into_merged(self) -> Vec<T> {
        self.entries
            .into_iter()
            .flat_map(|(_, values)| values)
            .collect()
    }

    fn slot(&self, canonical: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == canonical)
    }

    fn resolve(&self, key: &str) -> Result<usize, AliasMapError> {
        let canonical = self.aliases.get(key).map_or(key, String::as_str);
        self.slot(canonical)
            .ok_or_else(|| AliasMapError::KeyNotFound(key.to_string()))
    }
}

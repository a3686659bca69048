//! Case-insensitive attribute map with alias lookup.
//!
//! Directory attribute names compare ASCII case-insensitively, and an attribute
//! may be known under several names (`cn` / `commonName`). [`AttrMap`] keeps
//! the canonical spelling of each key for output while resolving lookups by
//! any spelling of the key or of a registered alias.

use std::collections::BTreeMap;

/// A map from attribute names to values, keyed ASCII case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrMap<V> {
    /// Lowercased key -> (canonical key, value).
    entries: BTreeMap<String, (String, V)>,
    /// Lowercased alias -> lowercased key.
    aliases: BTreeMap<String, String>,
}

impl<V> Default for AttrMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl<V> AttrMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under its canonical key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let folded = key.to_ascii_lowercase();
        self.entries
            .insert(folded, (key, value))
            .map(|(_, previous)| previous)
    }

    /// Insert a value and register alternative names for it.
    pub fn insert_with_aliases<I, S>(&mut self, key: impl Into<String>, aliases: I, value: V)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = key.into();
        let folded = key.to_ascii_lowercase();
        for alias in aliases {
            let alias = alias.as_ref().to_ascii_lowercase();
            if alias != folded {
                self.aliases.insert(alias, folded.clone());
            }
        }
        self.entries.insert(folded, (key, value));
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        let folded = name.to_ascii_lowercase();
        if let Some((key, _)) = self.entries.get_key_value(&folded) {
            return Some(key.as_str());
        }
        self.aliases.get(&folded).map(|k| k.as_str())
    }

    /// Look up a value by key or alias, ignoring case.
    pub fn get(&self, name: &str) -> Option<&V> {
        let key = self.resolve(name)?.to_string();
        self.entries.get(&key).map(|(_, v)| v)
    }

    /// Check whether a key or alias is present.
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Canonical spelling of the key that `name` resolves to.
    pub fn canonical_key(&self, name: &str) -> Option<&str> {
        let key = self.resolve(name)?.to_string();
        self.entries.get(&key).map(|(k, _)| k.as_str())
    }

    /// Iterate over (canonical key, value) pairs in case-folded key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over canonical keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! The directory session boundary.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::SessionResult;

/// How far below the base a search reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Only the base entry.
    Base,
    /// Direct children of the base.
    OneLevel,
    /// The base and everything below it.
    #[default]
    Subtree,
}

/// An entry as returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtocolEntry {
    pub path: String,
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl ProtocolEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Values of an attribute, matching the key case-insensitively.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_slice())
    }
}

/// A connection to a directory server.
///
/// Implemented by protocol clients; every call is synchronous and failures
/// are returned as they are, without retries.
pub trait DirectorySession {
    fn search(
        &mut self,
        base: &str,
        filter: &str,
        scope: SearchScope,
    ) -> SessionResult<Vec<ProtocolEntry>>;

    fn add(
        &mut self,
        path: &str,
        object_classes: &BTreeSet<String>,
        attributes: &BTreeMap<String, Vec<String>>,
    ) -> SessionResult<()>;

    fn delete(&mut self, path: &str) -> SessionResult<()>;
}

impl<S: DirectorySession + ?Sized> DirectorySession for &mut S {
    fn search(
        &mut self,
        base: &str,
        filter: &str,
        scope: SearchScope,
    ) -> SessionResult<Vec<ProtocolEntry>> {
        (**self).search(base, filter, scope)
    }

    fn add(
        &mut self,
        path: &str,
        object_classes: &BTreeSet<String>,
        attributes: &BTreeMap<String, Vec<String>>,
    ) -> SessionResult<()> {
        (**self).add(path, object_classes, attributes)
    }

    fn delete(&mut self, path: &str) -> SessionResult<()> {
        (**self).delete(path)
    }
}

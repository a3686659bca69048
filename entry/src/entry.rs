//! Constructed model instances.

use dirmap_core::{render_values, AttrMap, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// An instance of a model, ready to be written to a directory.
///
/// The path is fixed at construction. Attribute lookup is case-insensitive
/// and resolves the protocol key, a declared alias or the model field name.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub(crate) model: String,
    pub(crate) path: String,
    pub(crate) object_classes: BTreeSet<String>,
    pub(crate) attributes: AttrMap<Vec<Value>>,
    pub(crate) parameters: AttrMap<Vec<Value>>,
}

impl Entry {
    /// Name of the model this entry was constructed from.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// The distinguished name.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn object_classes(&self) -> &BTreeSet<String> {
        &self.object_classes
    }

    /// Protocol attributes keyed by protocol key.
    pub fn attributes(&self) -> &AttrMap<Vec<Value>> {
        &self.attributes
    }

    /// Template-only parameters. Never sent to the directory.
    pub fn parameters(&self) -> &AttrMap<Vec<Value>> {
        &self.parameters
    }

    /// Values of an attribute.
    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// Values of a parameter.
    pub fn parameter(&self, name: &str) -> Option<&[Value]> {
        self.parameters.get(name).map(Vec::as_slice)
    }

    /// The attribute map in the shape a directory add expects.
    pub fn protocol_attributes(&self) -> BTreeMap<String, Vec<String>> {
        self.attributes
            .iter()
            .map(|(key, values)| {
                (
                    key.to_string(),
                    values.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DN: {}", self.path)?;
        for (key, values) in self.attributes.iter() {
            write!(f, "\n    {}: {}", key, render_values(values))?;
        }
        Ok(())
    }
}

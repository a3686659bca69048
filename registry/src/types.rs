//! Model definition types.

use dirmap_core::FieldDef;
use dirmap_filter::FilterExpression;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::PathTemplate;

/// A finalized model: merged fields, object classes, path template and constants.
///
/// Immutable once built. Type-level field access ([`ModelDef::field`]) hands
/// out filter expressions for query building; the static declarations are
/// available through [`ModelDef::field_def`].
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// Model name.
    pub name: String,
    /// Names of the direct parent models, least specific first.
    pub parents: Vec<String>,
    /// Merged field definitions by field name.
    pub fields: BTreeMap<String, Arc<FieldDef>>,
    /// Merged object classes.
    pub object_classes: BTreeSet<String>,
    /// Template for the entry's distinguished name.
    pub path_template: Option<PathTemplate>,
    /// Static values available to the path template (e.g. `base_dn`).
    pub constants: BTreeMap<String, String>,
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            fields: BTreeMap::new(),
            object_classes: BTreeSet::new(),
            path_template: None,
            constants: BTreeMap::new(),
        }
    }

    /// Query accessor for a field: an empty filter expression over it.
    pub fn field(&self, name: &str) -> Option<FilterExpression> {
        self.fields
            .get(name)
            .map(|def| FilterExpression::new(Arc::clone(def)))
    }

    /// Get a field definition by its declared name.
    pub fn field_def(&self, name: &str) -> Option<&Arc<FieldDef>> {
        self.fields.get(name)
    }

    /// Find a field by protocol key or alias, ignoring case.
    pub fn field_by_key(&self, key: &str) -> Option<(&str, &Arc<FieldDef>)> {
        self.fields
            .iter()
            .find(|(_, def)| def.matches_key(key))
            .map(|(name, def)| (name.as_str(), def))
    }

    /// Check if this model declares or inherits a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|s| s.as_str())
    }

    /// Fields emitted as protocol attributes.
    pub fn attribute_fields(&self) -> impl Iterator<Item = (&str, &Arc<FieldDef>)> {
        self.fields
            .iter()
            .filter(|(_, def)| !def.is_parameter())
            .map(|(name, def)| (name.as_str(), def))
    }

    /// Template-only parameter fields.
    pub fn parameter_fields(&self) -> impl Iterator<Item = (&str, &Arc<FieldDef>)> {
        self.fields
            .iter()
            .filter(|(_, def)| def.is_parameter())
            .map(|(name, def)| (name.as_str(), def))
    }

    /// Get a constant by name.
    pub fn constant(&self, name: &str) -> Option<&str> {
        self.constants.get(name).map(|s| s.as_str())
    }
}

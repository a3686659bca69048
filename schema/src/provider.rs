//! The schema provider seam.

use dirmap_core::FieldDef;
use std::collections::BTreeMap;

use crate::SchemaResult;

/// Source of field definitions for a set of object classes.
///
/// Implementations merge the attributes of every requested class, including
/// inherited ones, into field definitions keyed by field name.
pub trait SchemaProvider {
    fn fields_for(&self, object_classes: &[String]) -> SchemaResult<BTreeMap<String, FieldDef>>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &P {
    fn fields_for(&self, object_classes: &[String]) -> SchemaResult<BTreeMap<String, FieldDef>> {
        (**self).fields_for(object_classes)
    }
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for std::sync::Arc<P> {
    fn fields_for(&self, object_classes: &[String]) -> SchemaResult<BTreeMap<String, FieldDef>> {
        (**self).fields_for(object_classes)
    }
}

//! The Registry - immutable model lookup.

use crate::ModelDef;
use dirmap_filter::FilterExpression;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The Registry provides runtime lookup of model definitions.
/// It is immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Model definitions by name.
    models: BTreeMap<String, Arc<ModelDef>>,
}

impl Registry {
    /// Create a registry (use RegistryBuilder for construction).
    pub(crate) fn new(models: BTreeMap<String, Arc<ModelDef>>) -> Self {
        Self { models }
    }

    // ==================== Model Lookups ====================

    /// Get a model definition by name.
    pub fn get_model(&self, name: &str) -> Option<&Arc<ModelDef>> {
        self.models.get(name)
    }

    /// Iterate over all models, ordered by name.
    pub fn all_models(&self) -> impl Iterator<Item = &Arc<ModelDef>> {
        self.models.values()
    }

    /// Get the number of models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    // ==================== Field Lookups ====================

    /// Query accessor for a field of a model.
    pub fn field(&self, model: &str, field: &str) -> Option<FilterExpression> {
        self.get_model(model).and_then(|m| m.field(field))
    }

    // ==================== Inheritance ====================

    /// Check whether `sub` is `ancestor` or inherits from it, directly or not.
    pub fn is_submodel(&self, sub: &str, ancestor: &str) -> bool {
        if sub == ancestor {
            return self.models.contains_key(sub);
        }
        let mut pending = vec![sub];
        while let Some(name) = pending.pop() {
            let Some(model) = self.models.get(name) else {
                continue;
            };
            for parent in &model.parents {
                if parent == ancestor {
                    return true;
                }
                pending.push(parent);
            }
        }
        false
    }
}

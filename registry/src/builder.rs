//! Builders for model definitions and the immutable Registry.

use crate::{ModelDef, PathTemplate, Registry};
use dirmap_core::{FieldDef, FieldKind};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate model name: {0}")]
    DuplicateModelName(String),

    #[error("Unknown parent model '{parent}' for model '{model}'")]
    UnknownParentModel { model: String, parent: String },
}

/// Collects the declarations of one model and finalizes it.
///
/// Finalizing merges the already-finalized parents' fields in `extends`
/// order (later parents override earlier ones) and overlays the model's own
/// fields, which always win. Object classes are unioned. The path template
/// and constants are inherited the same way.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    parents: Vec<Arc<ModelDef>>,
    fields: BTreeMap<String, FieldDef>,
    object_classes: BTreeSet<String>,
    path_template: Option<PathTemplate>,
    constants: BTreeMap<String, String>,
}

impl ModelBuilder {
    /// Start declaring a model.
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

    /// Add a parent model. Parents added later take precedence.
    pub fn extends(mut self, parent: Arc<ModelDef>) -> Self {
        self.parents.push(parent);
        self
    }

    /// Set the path template.
    pub fn path(mut self, template: impl Into<PathTemplate>) -> Self {
        self.path_template = Some(template.into());
        self
    }

    /// Add an object class.
    pub fn object_class(mut self, object_class: impl Into<String>) -> Self {
        self.object_classes.insert(object_class.into());
        self
    }

    /// Add several object classes.
    pub fn object_classes<I, S>(mut self, object_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.object_classes
            .extend(object_classes.into_iter().map(Into::into));
        self
    }

    /// Add a static value usable in the path template.
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    /// Add several constants.
    pub fn constants<I, K, V>(mut self, constants: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.constants
            .extend(constants.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Declare a field. Redeclaring a name replaces the earlier declaration.
    pub fn field(mut self, name: impl Into<String>, def: FieldDef) -> Self {
        self.fields.insert(name.into(), def);
        self
    }

    /// Declare a template-only parameter.
    pub fn param(mut self, name: impl Into<String>, mut def: FieldDef) -> Self {
        def.kind = FieldKind::Parameter;
        self.fields.insert(name.into(), def);
        self
    }

    /// Declare several fields at once.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldDef)>,
        S: Into<String>,
    {
        self.fields
            .extend(fields.into_iter().map(|(name, def)| (name.into(), def)));
        self
    }

    /// The name of the model being declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merge with the parents and produce the immutable model.
    pub fn finalize(self) -> ModelDef {
        let mut fields: BTreeMap<String, Arc<FieldDef>> = BTreeMap::new();
        let mut object_classes = BTreeSet::new();
        let mut constants = BTreeMap::new();
        let mut path_template = None;

        // Parents first, least specific to most specific
        for parent in &self.parents {
            for (name, def) in &parent.fields {
                fields.insert(name.clone(), Arc::clone(def));
            }
            object_classes.extend(parent.object_classes.iter().cloned());
            for (name, value) in &parent.constants {
                constants.insert(name.clone(), value.clone());
            }
            if parent.path_template.is_some() {
                path_template = parent.path_template.clone();
            }
        }

        // Own declarations win over every parent
        for (name, def) in self.fields {
            fields.insert(name, Arc::new(def));
        }
        object_classes.extend(self.object_classes);
        constants.extend(self.constants);
        if self.path_template.is_some() {
            path_template = self.path_template;
        }

        let model = ModelDef {
            name: self.name,
            parents: self.parents.iter().map(|p| p.name.clone()).collect(),
            fields,
            object_classes,
            path_template,
            constants,
        };

        tracing::debug!(
            model = %model.name,
            fields = model.fields.len(),
            object_classes = ?model.object_classes,
            "model finalized"
        );

        model
    }
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Finalized models by name.
    models: BTreeMap<String, Arc<ModelDef>>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a model whose parents are resolved by name.
    pub fn add_model(&mut self, name: impl Into<String>) -> ModelDecl<'_> {
        ModelDecl {
            builder: self,
            model: ModelBuilder::new(name),
            parent_names: Vec::new(),
        }
    }

    /// Register a model that was finalized elsewhere (e.g. generated from a schema).
    pub fn register(&mut self, model: ModelDef) -> Result<Arc<ModelDef>, RegistryError> {
        if self.models.contains_key(&model.name) {
            return Err(RegistryError::DuplicateModelName(model.name));
        }
        let model = Arc::new(model);
        self.models.insert(model.name.clone(), Arc::clone(&model));
        Ok(model)
    }

    /// Get a model declared so far.
    pub fn get_model(&self, name: &str) -> Option<&Arc<ModelDef>> {
        self.models.get(name)
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Registry {
        Registry::new(self.models)
    }
}

/// Declaration of a model inside a [`RegistryBuilder`].
pub struct ModelDecl<'a> {
    builder: &'a mut RegistryBuilder,
    model: ModelBuilder,
    parent_names: Vec<String>,
}

impl<'a> ModelDecl<'a> {
    /// Add a parent model by name.
    pub fn extends(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_names.push(parent_name.into());
        self
    }

    /// Set the path template.
    pub fn path(mut self, template: impl Into<PathTemplate>) -> Self {
        self.model = self.model.path(template);
        self
    }

    /// Add an object class.
    pub fn object_class(mut self, object_class: impl Into<String>) -> Self {
        self.model = self.model.object_class(object_class);
        self
    }

    /// Add a constant.
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.model = self.model.constant(name, value);
        self
    }

    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>, def: FieldDef) -> Self {
        self.model = self.model.field(name, def);
        self
    }

    /// Declare a template-only parameter.
    pub fn param(mut self, name: impl Into<String>, def: FieldDef) -> Self {
        self.model = self.model.param(name, def);
        self
    }

    /// Finish declaring this model.
    pub fn done(self) -> Result<Arc<ModelDef>, RegistryError> {
        let name = self.model.name().to_string();

        // Check for duplicate name
        if self.builder.models.contains_key(&name) {
            return Err(RegistryError::DuplicateModelName(name));
        }

        // Resolve parents
        let mut model = self.model;
        for parent_name in &self.parent_names {
            match self.builder.models.get(parent_name) {
                Some(parent) => model = model.extends(Arc::clone(parent)),
                None => {
                    return Err(RegistryError::UnknownParentModel {
                        model: name,
                        parent: parent_name.clone(),
                    })
                }
            }
        }

        self.builder.register(model.finalize())
    }
}

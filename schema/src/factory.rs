//! Models generated from directory schema.

use dirmap_registry::{ModelBuilder, ModelDef, PathTemplate};

use crate::{SchemaProvider, SchemaResult};

/// Builds models whose fields come from a [`SchemaProvider`] instead of
/// hand-written declarations.
pub struct DynamicModelFactory;

impl DynamicModelFactory {
    /// Deterministic model name: classes joined by `_`, first letter upper-cased.
    ///
    /// `["inetUser"]` gives `InetUser`, `["posixAccount", "shadowAccount"]`
    /// gives `PosixAccount_shadowAccount`.
    pub fn model_name<S: AsRef<str>>(object_classes: &[S]) -> String {
        let joined = object_classes
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("_");
        let mut chars = joined.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => joined,
        }
    }

    /// A builder pre-filled with the provider's fields, the object classes
    /// and the path template. Add constants before finalizing.
    pub fn builder<P, I, S>(
        path_template: impl Into<PathTemplate>,
        object_classes: I,
        provider: &P,
    ) -> SchemaResult<ModelBuilder>
    where
        P: SchemaProvider + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let object_classes: Vec<String> = object_classes.into_iter().map(Into::into).collect();
        let fields = provider.fields_for(&object_classes)?;
        let name = Self::model_name(&object_classes);

        tracing::debug!(
            model = %name,
            fields = fields.len(),
            "dynamic model generated"
        );

        Ok(ModelBuilder::new(name)
            .path(path_template)
            .object_classes(object_classes)
            .fields(fields))
    }

    /// Generate and finalize a model.
    pub fn build<P, I, S>(
        path_template: impl Into<PathTemplate>,
        object_classes: I,
        provider: &P,
    ) -> SchemaResult<ModelDef>
    where
        P: SchemaProvider + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::builder(path_template, object_classes, provider)?.finalize())
    }
}

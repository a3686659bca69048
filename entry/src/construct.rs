//! Entry construction.
//!
//! Turns caller supplied values into an [`Entry`]: unknown names are
//! rejected, defaults applied, validators run, missing fields reported
//! together, and the path template expanded into a normalized DN.

use dirmap_core::{escape_dn_value, normalize_dn, render_values, AttrMap, FieldDef, Value};
use dirmap_registry::{ModelDef, TemplateError};
use std::collections::{BTreeMap, HashMap};
use std::iter;
use std::sync::Arc;

use crate::error::{ConstructionError, EntryResult};
use crate::Entry;

/// Protocol key whose values become the entry's object classes.
const OBJECT_CLASS_KEY: &str = "objectClass";

/// A value the path template can refer to.
#[derive(Debug, Clone, Copy)]
enum Substitution<'a> {
    /// Static text, inserted as a DN fragment.
    Constant(&'a str),
    /// Field or parameter values, escaped as a DN component value.
    Values(&'a [Value]),
}

/// A field with its final values.
struct Resolved<'a> {
    name: &'a str,
    def: &'a Arc<FieldDef>,
    values: Vec<Value>,
}

impl Entry {
    /// Construct an entry of `model` from `(field name, value)` pairs.
    ///
    /// A list value is taken as the field's values, any other value as a
    /// single one. Nothing is sent to a directory.
    pub fn construct<I, K, V>(model: &ModelDef, values: I) -> EntryResult<Entry>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut supplied: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        for (name, value) in values {
            let name = name.into();
            if !model.has_field(&name) {
                return Err(ConstructionError::unexpected_field(&model.name, name));
            }
            supplied.insert(name, value.into().into_values());
        }

        let mut resolved = Vec::with_capacity(model.fields.len());
        let mut missing = Vec::new();

        for (name, def) in &model.fields {
            let values = match supplied.remove(name) {
                Some(values) => values,
                None => match &def.default {
                    Some(default) => default.clone().into_values(),
                    None => {
                        if def.mandatory {
                            missing.push(name.clone());
                        }
                        continue;
                    }
                },
            };
            validate(def, &values)?;
            resolved.push(Resolved {
                name: name.as_str(),
                def,
                values,
            });
        }

        if !missing.is_empty() {
            return Err(ConstructionError::missing_fields(&model.name, missing));
        }

        let path = expand_path(model, &resolved)?;

        let mut object_classes = model.object_classes.clone();
        let mut attributes = AttrMap::new();
        let mut parameters = AttrMap::new();

        for Resolved { name, def, values } in resolved {
            let aliases = def.aliases.iter().map(String::as_str).chain(iter::once(name));
            if def.is_parameter() {
                parameters.insert_with_aliases(def.key.as_str(), aliases, values);
            } else if def.key.eq_ignore_ascii_case(OBJECT_CLASS_KEY) {
                object_classes.extend(values.iter().map(ToString::to_string));
            } else {
                attributes.insert_with_aliases(def.key.as_str(), aliases, values);
            }
        }

        tracing::debug!(
            model = %model.name,
            path = %path,
            attributes = attributes.len(),
            "entry constructed"
        );

        Ok(Entry {
            model: model.name.clone(),
            path,
            object_classes,
            attributes,
            parameters,
        })
    }
}

/// Run the field's validator, if any, on its normalized values.
fn validate(def: &FieldDef, values: &[Value]) -> EntryResult<()> {
    let Some(validator) = &def.validator else {
        return Ok(());
    };
    match validator.validate(values) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ConstructionError::validation(
            &def.key,
            render_values(values),
            None,
        )),
        Err(reason) => Err(ConstructionError::validation(
            &def.key,
            render_values(values),
            Some(reason),
        )),
    }
}

/// Expand the model's path template and normalize the result.
fn expand_path(model: &ModelDef, resolved: &[Resolved<'_>]) -> EntryResult<String> {
    let template = model
        .path_template
        .as_ref()
        .ok_or_else(|| ConstructionError::missing_path_template(&model.name))?;

    // Later insertions shadow earlier ones
    let mut substitutions: HashMap<&str, Substitution<'_>> = HashMap::new();
    for (name, value) in &model.constants {
        substitutions.insert(name.as_str(), Substitution::Constant(value.as_str()));
    }
    let (params, attrs): (Vec<_>, Vec<_>) = resolved.iter().partition(|r| r.def.is_parameter());
    for field in attrs.into_iter().chain(params) {
        let values = Substitution::Values(field.values.as_slice());
        substitutions.insert(field.name, values);
        substitutions.insert(field.def.key.as_str(), values);
    }

    let path = template.expand(|name| match substitutions.get(name).copied() {
        Some(Substitution::Constant(text)) => Ok(text.to_string()),
        Some(Substitution::Values([value])) => Ok(escape_dn_value(&value.to_string())),
        // An empty list leaves nothing to substitute
        Some(Substitution::Values([])) => Err(TemplateError::unresolved(name)),
        Some(Substitution::Values(values)) => {
            Err(TemplateError::multi_valued(name, values.len()))
        }
        None => Err(TemplateError::unresolved(name)),
    })?;

    normalize_dn(&path).map_err(|e| ConstructionError::invalid_path(path, e))
}

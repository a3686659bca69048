//! Directory schema built from RFC 4512 definitions.

use dirmap_core::{FieldDef, Validator};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{AttributeTypeDef, ObjectClassDef, SchemaLookupError, SchemaProvider, SchemaResult};

/// Attribute that lists an entry's classes. Never mapped to a field.
const OBJECT_CLASS_ATTRIBUTE: &str = "objectClass";

/// Schema as published by a directory server's subschema entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaDescription {
    #[serde(default)]
    object_classes: Vec<String>,
    #[serde(default)]
    attribute_types: Vec<String>,
}

/// Object classes and attribute types, looked up case-insensitively by
/// any name or OID.
#[derive(Debug, Clone, Default)]
pub struct DirectorySchema {
    object_classes: Vec<ObjectClassDef>,
    object_class_index: HashMap<String, usize>,
    attribute_types: Vec<AttributeTypeDef>,
    attribute_type_index: HashMap<String, usize>,
}

impl DirectorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse object class and attribute type description strings.
    pub fn from_definitions<I, J, S, T>(object_classes: I, attribute_types: J) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut schema = Self::new();
        for definition in attribute_types {
            schema.add_attribute_type(AttributeTypeDef::parse(definition.as_ref())?);
        }
        for definition in object_classes {
            schema.add_object_class(ObjectClassDef::parse(definition.as_ref())?);
        }
        Ok(schema)
    }

    /// Parse `{"objectClasses": [...], "attributeTypes": [...]}`.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let description: SchemaDescription = serde_json::from_str(json)?;
        Self::from_definitions(description.object_classes, description.attribute_types)
    }

    /// Add an object class, replacing one with the same name.
    pub fn add_object_class(&mut self, def: ObjectClassDef) {
        let keys = lookup_keys(&def.oid, &def.names);
        let index = find_existing(&self.object_class_index, &keys);
        let index = match index {
            Some(index) => {
                self.object_classes[index] = def;
                index
            }
            None => {
                self.object_classes.push(def);
                self.object_classes.len() - 1
            }
        };
        for key in keys {
            self.object_class_index.insert(key, index);
        }
    }

    /// Add an attribute type, replacing one with the same name.
    pub fn add_attribute_type(&mut self, def: AttributeTypeDef) {
        let keys = lookup_keys(&def.oid, &def.names);
        let index = find_existing(&self.attribute_type_index, &keys);
        let index = match index {
            Some(index) => {
                self.attribute_types[index] = def;
                index
            }
            None => {
                self.attribute_types.push(def);
                self.attribute_types.len() - 1
            }
        };
        for key in keys {
            self.attribute_type_index.insert(key, index);
        }
    }

    pub fn object_class(&self, name: &str) -> Option<&ObjectClassDef> {
        self.object_class_index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.object_classes[i])
    }

    pub fn attribute_type(&self, name: &str) -> Option<&AttributeTypeDef> {
        self.attribute_type_index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.attribute_types[i])
    }

    pub fn object_classes(&self) -> impl Iterator<Item = &ObjectClassDef> {
        self.object_classes.iter()
    }

    pub fn attribute_types(&self) -> impl Iterator<Item = &AttributeTypeDef> {
        self.attribute_types.iter()
    }

    /// Requested classes followed by their superiors, each once.
    fn class_chain(&self, object_classes: &[String]) -> SchemaResult<Vec<&ObjectClassDef>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut pending: Vec<&str> = object_classes.iter().rev().map(String::as_str).collect();

        while let Some(name) = pending.pop() {
            let def = self
                .object_class(name)
                .ok_or_else(|| SchemaLookupError::unknown_object_class(name))?;
            if !seen.insert(def.oid.as_str()) {
                continue;
            }
            chain.push(def);
            pending.extend(def.superiors.iter().rev().map(String::as_str));
        }

        Ok(chain)
    }

    fn field_for(&self, attribute: &str, mandatory: bool) -> (String, FieldDef) {
        let Some(at) = self.attribute_type(attribute) else {
            let def = FieldDef::attribute(attribute);
            return (attribute.to_string(), if mandatory { def } else { def.optional() });
        };

        let name = at.name().to_string();
        let mut def = FieldDef::attribute(&name)
            .with_aliases(at.names.iter().skip(1).cloned());
        if !mandatory {
            def = def.optional();
        }
        if at.single_value {
            def = def.with_validator(Validator::single_value());
        }
        if let Some(description) = &at.description {
            def = def.with_description(description);
        }
        (name, def)
    }
}

impl SchemaProvider for DirectorySchema {
    fn fields_for(&self, object_classes: &[String]) -> SchemaResult<BTreeMap<String, FieldDef>> {
        // (canonical name, mandatory) in first-seen order, indexed by lowercased name
        let mut attributes: Vec<(String, bool)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for class in self.class_chain(object_classes)? {
            let listed = class
                .must
                .iter()
                .map(|a| (a, true))
                .chain(class.may.iter().map(|a| (a, false)));
            for (attribute, mandatory) in listed {
                if attribute.eq_ignore_ascii_case(OBJECT_CLASS_ATTRIBUTE) {
                    continue;
                }
                let canonical = self
                    .attribute_type(attribute)
                    .map(|at| at.name().to_string())
                    .unwrap_or_else(|| attribute.clone());
                match positions.get(&canonical.to_ascii_lowercase()) {
                    Some(&i) => attributes[i].1 |= mandatory,
                    None => {
                        positions.insert(canonical.to_ascii_lowercase(), attributes.len());
                        attributes.push((canonical, mandatory));
                    }
                }
            }
        }

        let fields: BTreeMap<String, FieldDef> = attributes
            .iter()
            .map(|(attribute, mandatory)| self.field_for(attribute, *mandatory))
            .collect();

        tracing::debug!(
            object_classes = ?object_classes,
            fields = fields.len(),
            "schema fields resolved"
        );

        Ok(fields)
    }
}

fn find_existing(index: &HashMap<String, usize>, keys: &[String]) -> Option<usize> {
    keys.iter().find_map(|key| index.get(key).copied())
}

fn lookup_keys(oid: &str, names: &[String]) -> Vec<String> {
    std::iter::once(oid)
        .chain(names.iter().map(String::as_str))
        .map(str::to_ascii_lowercase)
        .collect()
}

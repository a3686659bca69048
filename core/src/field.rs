//! Field definitions.
//!
//! A [`FieldDef`] describes one mapped field of a model: the protocol key it
//! is stored under, whether a value is mandatory, an optional default, an
//! optional validator and alias names. Parameter fields share the same shape
//! but only feed the path template.

use crate::Value;
use regex_lite::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Whether a field is emitted as a protocol attribute or only used for the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Stored as a directory attribute.
    #[default]
    Attribute,
    /// Only substituted into the path template.
    Parameter,
}

/// Errors raised while building a validator.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("Invalid validation pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

type CheckFn = dyn Fn(&[Value]) -> Result<bool, String> + Send + Sync;

/// A pure check over the normalized values of a single field.
///
/// `Ok(false)` rejects the values, `Err(reason)` rejects them with a reason.
#[derive(Clone)]
pub struct Validator {
    name: String,
    check: Arc<CheckFn>,
}

impl Validator {
    /// Create a validator from a predicate.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        Self {
            name: "custom".to_string(),
            check: Arc::new(move |values| Ok(check(values))),
        }
    }

    /// Create a validator that may reject with a reason.
    pub fn try_new<F>(check: F) -> Self
    where
        F: Fn(&[Value]) -> Result<bool, String> + Send + Sync + 'static,
    {
        Self {
            name: "custom".to_string(),
            check: Arc::new(check),
        }
    }

    /// Every value, rendered as text, must match `pattern`.
    pub fn pattern(pattern: &str) -> Result<Self, ValidatorError> {
        let re = Regex::new(pattern).map_err(|e| ValidatorError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name: format!("pattern({})", pattern),
            check: Arc::new(move |values| {
                Ok(values.iter().all(|v| re.is_match(&v.to_string())))
            }),
        })
    }

    /// At most one value may be supplied.
    pub fn single_value() -> Self {
        Self {
            name: "single-value".to_string(),
            check: Arc::new(|values| {
                if values.len() > 1 {
                    Err(format!("expected a single value, got {}", values.len()))
                } else {
                    Ok(true)
                }
            }),
        }
    }

    /// Give the validator a name shown in debug output.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The validator's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check against a normalized value list.
    pub fn validate(&self, values: &[Value]) -> Result<bool, String> {
        (self.check)(values)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

/// Definition of a mapped field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Protocol key (directory attribute name).
    pub key: String,
    /// Attribute or template-only parameter.
    pub kind: FieldKind,
    /// Whether a value must be present after defaults are applied.
    pub mandatory: bool,
    /// Default value if none is supplied. `None` means no default.
    pub default: Option<Value>,
    /// Optional value check.
    pub validator: Option<Validator>,
    /// Alternative names the attribute can be looked up by.
    pub aliases: BTreeSet<String>,
    /// Human readable description.
    pub description: Option<String>,
}

impl FieldDef {
    fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            mandatory: true,
            default: None,
            validator: None,
            aliases: BTreeSet::new(),
            description: None,
        }
    }

    /// A field stored under the protocol attribute `key`.
    pub fn attribute(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Attribute)
    }

    /// A template-only parameter named `key`.
    pub fn parameter(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Parameter)
    }

    /// Allow construction without a value.
    pub fn optional(mut self) -> Self {
        self.mandatory = false;
        self
    }

    /// Require a value or a default.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Value used when none is supplied.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Check supplied and default values before construction.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Another name the attribute can be looked up by.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }

    /// Several alternative names at once.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Human-readable description, e.g. the schema `DESC`.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true for template-only parameters.
    pub fn is_parameter(&self) -> bool {
        self.kind == FieldKind::Parameter
    }

    /// Case-insensitive match against the key or any alias.
    pub fn matches_key(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

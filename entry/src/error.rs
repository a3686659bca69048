//! Entry construction error types.

use dirmap_core::DnError;
use dirmap_registry::TemplateError;
use thiserror::Error;

/// Result type for entry construction.
pub type EntryResult<T> = Result<T, ConstructionError>;

/// Errors that can occur while constructing an entry.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("Unexpected field '{field}' for model {model}")]
    UnexpectedField { model: String, field: String },

    #[error("Validation failed for attribute '{key}' and value '{value}'{}", reason_suffix(.reason))]
    Validation {
        key: String,
        value: String,
        reason: Option<String>,
    },

    #[error("Model {model} is missing fields: {}", .fields.join(", "))]
    MissingFields { model: String, fields: Vec<String> },

    #[error("Path template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Model {model} has no path template")]
    MissingPathTemplate { model: String },

    #[error("Invalid path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: DnError,
    },
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {}", reason),
        None => String::new(),
    }
}

impl ConstructionError {
    pub fn unexpected_field(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnexpectedField {
            model: model.into(),
            field: field.into(),
        }
    }

    pub fn validation(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self::Validation {
            key: key.into(),
            value: value.into(),
            reason,
        }
    }

    pub fn missing_fields(model: impl Into<String>, fields: Vec<String>) -> Self {
        Self::MissingFields {
            model: model.into(),
            fields,
        }
    }

    pub fn missing_path_template(model: impl Into<String>) -> Self {
        Self::MissingPathTemplate {
            model: model.into(),
        }
    }

    pub fn invalid_path(path: impl Into<String>, source: DnError) -> Self {
        Self::InvalidPath {
            path: path.into(),
            source,
        }
    }
}

//! Schema lookup error types.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaLookupError>;

/// Errors raised while looking up or parsing directory schema.
#[derive(Debug, Error)]
pub enum SchemaLookupError {
    #[error("Schema unavailable: {message}")]
    Unavailable { message: String },

    #[error("Unknown object class: {name}")]
    UnknownObjectClass { name: String },

    #[error("Invalid schema definition '{definition}': {message}")]
    InvalidDefinition { definition: String, message: String },

    #[error("Invalid schema description: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaLookupError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn unknown_object_class(name: impl Into<String>) -> Self {
        Self::UnknownObjectClass { name: name.into() }
    }

    pub fn invalid_definition(definition: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            definition: definition.into(),
            message: message.into(),
        }
    }
}

//! Session error types.

use dirmap_core::DnError;
use thiserror::Error;

/// Errors reported by a directory session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No usable connection.
    #[error("directory unavailable: {message}")]
    Unavailable { message: String },

    /// The directory refused an operation.
    #[error("{operation} of '{target}' rejected: {message}")]
    Rejected {
        operation: String,
        target: String,
        message: String,
    },
}

impl SessionError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn rejected(
        operation: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            operation: operation.into(),
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON, a wrongly typed value or a parameter that is not allowed.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("invalid base_dn '{base_dn}': {source}")]
    InvalidBaseDn {
        base_dn: String,
        #[source]
        source: DnError,
    },
}

//! Error types used throughout the accessor

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for EnvArc
///
/// The accessor itself only ever produces the first three kinds. `Bootstrap`
/// is reserved for host adapters that fail while preparing a source.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum EnvError {
    /// A required variable is absent from the source. For multi-key lookups
    /// the payload is the bracketed list of every attempted name.
    #[error("required environment variable '{0}' was not found")]
    KeyNotFound(String),

    /// A required variable is present but holds the empty string.
    #[error("required environment variable '{0}' is an empty string")]
    EmptyValue(String),

    /// The caller passed a malformed key list to a multi-key lookup.
    #[error("invalid lookup arguments: {0}")]
    InvalidInput(String),

    /// A host adapter failed while preparing a variable source.
    #[error("source bootstrap error: {0}")]
    Bootstrap(String),
}

impl EnvError {
    /// Create a not-found error for a single key
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound(key.into())
    }

    /// Create a not-found error reporting every attempted key
    pub fn keys_not_found(keys: &[&str]) -> Self {
        Self::KeyNotFound(format_key_set(keys))
    }

    /// Create an empty-value error for a key
    pub fn empty_value(key: impl Into<String>) -> Self {
        Self::EmptyValue(key.into())
    }

    /// Create an argument-validation error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a source-bootstrap error
    pub fn bootstrap(message: impl Into<String>) -> Self {
        Self::Bootstrap(message.into())
    }

    /// Check whether this is a not-found failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }

    /// Check whether this is an empty-value failure
    pub fn is_empty_value(&self) -> bool {
        matches!(self, Self::EmptyValue(_))
    }

    /// Check whether this is an argument-validation failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check whether this is a source-bootstrap failure
    pub fn is_bootstrap(&self) -> bool {
        matches!(self, Self::Bootstrap(_))
    }
}

/// Render a multi-key lookup set the way failure messages report it
///
/// `["A", "B"]` becomes `[A, B]` so that a not-found message names every
/// attempted key.
pub fn format_key_set(keys: &[&str]) -> String {
    format!("[{}]", keys.join(", "))
}

/// Result type alias for EnvArc operations
pub type Result<T> = std::result::Result<T, EnvError>;

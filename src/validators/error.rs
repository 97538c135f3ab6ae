//! Error type for client-side validation.

use thiserror::Error;

/// A field-specific validation failure.
///
/// Raised before any network call is made. The message is already
/// user-facing and names the field that failed.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable name of the field (e.g. `"Tipo de pizza"`).
    pub field: String,
    /// Full message shown to the user.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

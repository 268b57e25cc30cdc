// File: src/error.rs
// Purpose: Field-level conversion/validation error

use thiserror::Error;

/// A submitted value could not be converted back into a storable scalar.
///
/// This is the only failure that reaches the end user: it carries the
/// message shown next to the offending field. Provider and storage
/// failures travel as `anyhow::Error` and abort the build instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConversionError {
    message: String,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

//! Error types for retrochartlib

use thiserror::Error;

/// Errors that can occur while decoding or aggregating play-by-play rows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrochartError {
    /// A field could not be parsed into its typed form
    #[error("invalid {field} '{value}': {message}")]
    InvalidInput {
        field: &'static str,
        value: String,
        message: String,
    },
}

impl RetrochartError {
    /// Build an `InvalidInput` error for the given field and raw value.
    pub fn invalid_input(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RetrochartError::InvalidInput {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

//! Error types for form rendering.

use thiserror::Error;

/// Panel-specific errors.
#[derive(Debug, Error)]
pub enum PanelError {
    /// A field declares a type tag no strategy handles (strict mode only).
    #[error("unknown type `{tag}` for field {field}")]
    UnknownFieldType { field: String, tag: String },

    /// A field definition is malformed.
    #[error("invalid definition for field {field}: {message}")]
    InvalidField { field: String, message: String },

    /// A validator pattern failed to compile.
    #[error("invalid validator pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Definition or config data could not be parsed.
    #[error("failed to parse definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// A definition or config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PanelError {
    /// Creates an [`PanelError::InvalidField`] error.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

//! Error types for mapping and bulk insert generation.

use thiserror::Error;

use crate::mapping::MappingValidation;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum HelperError {
    /// Field mapping failed validation. Carries every violation found.
    #[error("Invalid mapping:\n{0}")]
    InvalidMapping(MappingValidation),

    /// The record collection was empty.
    #[error("Record collection can not be empty")]
    EmptyInput,

    /// A field accessor expression did not resolve to a direct field reference.
    #[error("Invalid mapping expression {expression:?}: {reason}")]
    InvalidMappingExpression { expression: String, reason: String },

    /// A single row needs more parameters than one statement may bind.
    #[error(
        "Mapping has {fields} fields but a statement may bind at most {max_parameters} parameters"
    )]
    TooManyFields { fields: usize, max_parameters: usize },

    /// Configuration error (invalid YAML values, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl HelperError {
    /// Create an InvalidMappingExpression error
    pub fn expression(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        HelperError::InvalidMappingExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, HelperError>;

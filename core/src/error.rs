//! Error types for mod definition loading and rendering

use thiserror::Error;

/// Result type for mod generation
pub type Result<T> = std::result::Result<T, ModgenError>;

#[derive(Debug, Error)]
pub enum ModgenError {
    /// the definition is not valid json or a preset is missing a field
    #[error("invalid mod definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),

    #[error("mod definition '{0}' not found")]
    MissingDefinition(String),

    #[error("template '{0}' not found")]
    MissingTemplate(String),

    #[error("duplicate preset label '{0}'")]
    DuplicateLabel(String),

    #[error("invalid preset label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: &'static str },

    #[error("template '{template}' references unknown field '{field}'")]
    UnknownField { template: String, field: String },

    #[error("malformed template '{template}': {reason}")]
    MalformedTemplate {
        template: String,
        reason: &'static str,
    },

    #[error("unbalanced section at line {line}: {detail}")]
    UnbalancedSection { line: usize, detail: String },
}

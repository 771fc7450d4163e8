//! Error types for the AAS binder
//!
//! Only structural and required failures are errors. A get or set that
//! addresses an absent node is not an error: see [`crate::navigator::Lookup`]
//! and [`crate::binder::Outcome`].

use thiserror::Error;

/// Main error type for binder operations
#[derive(Error, Debug)]
pub enum BinderError {
    /// Failed to load or parse a document or template
    #[error("Failed to load document: {0}")]
    LoadError(String),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The template provider has no template under this name
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Candidate document does not match the reference template
    #[error("Document does not match template '{template}': {reason}")]
    StructuralMismatch { template: String, reason: String },

    /// The mandatory submodel for a template could not be located
    #[error("No submodel matching '{marker}' found for template '{template}'")]
    RequiredSlotMissing { template: String, marker: String },

    /// Malformed textual path address
    #[error("Invalid path address: {0}")]
    InvalidPath(String),

    /// Invalid runtime configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for binder operations
pub type Result<T> = std::result::Result<T, BinderError>;

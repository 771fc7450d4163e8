//! Configuration for the AAS binder
//!
//! Two layers:
//! - Compile-time limits and sentinels, checked when documents are loaded
//! - [`BinderConfig`], runtime options for value writes (default language,
//!   reference key type)
//!
//! # Environment
//!
//! [`BinderConfig::from_env`] reads:
//! - `AAS_BINDER_LANGUAGE` - language code for multi-language writes (default `de`)
//! - `AAS_BINDER_REFERENCE_KEY_TYPE` - key type for reference writes
//!   (default `AssetAdministrationShell`)

use crate::error::Result;
use crate::types::KeyType;

/// Value returned by reads when no data is available.
///
/// Callers must treat it as "no data", never as a value.
pub const BLANK: &str = " ";

/// Language code used for multi-language writes and blank reads.
pub const DEFAULT_LANGUAGE: &str = "de";

/// Key type used for reference writes unless configured otherwise.
pub const DEFAULT_REFERENCE_KEY_TYPE: KeyType = KeyType::AssetAdministrationShell;

/// Maximum document size in bytes when loading from YAML (2 MB).
///
/// Templates are small; typical carbon-footprint templates are a few KB.
pub const MAX_DOCUMENT_SIZE: usize = 2_000_000;

/// Maximum nesting depth of collections within a submodel.
///
/// Bounds recursion in the validator, binder and duplicator.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Maximum number of elements in a loaded document.
pub const MAX_ELEMENTS: usize = 10_000;

/// Runtime options for value writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderConfig {
    /// Language tag written by multi-language sets and returned by blank reads
    pub default_language: String,
    /// Key type written by reference sets
    pub reference_key_type: KeyType,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            reference_key_type: DEFAULT_REFERENCE_KEY_TYPE,
        }
    }
}

impl BinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `BinderError::InvalidConfig` if `AAS_BINDER_REFERENCE_KEY_TYPE`
    /// names an unknown key type or `AAS_BINDER_LANGUAGE` is empty.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(language) = std::env::var("AAS_BINDER_LANGUAGE") {
            config = config.with_language(language)?;
        }

        if let Ok(key_type) = std::env::var("AAS_BINDER_REFERENCE_KEY_TYPE") {
            config.reference_key_type = key_type.parse()?;
        }

        tracing::debug!(
            language = %config.default_language,
            key_type = %config.reference_key_type,
            "Binder configuration loaded"
        );

        Ok(config)
    }

    /// Set the default language.
    pub fn with_language(mut self, language: impl Into<String>) -> Result<Self> {
        let language = language.into();
        if language.trim().is_empty() {
            return Err(crate::error::BinderError::InvalidConfig(
                "language code cannot be empty".to_string(),
            ));
        }
        self.default_language = language;
        Ok(self)
    }

    /// Set the reference key type.
    pub fn with_reference_key_type(mut self, key_type: KeyType) -> Self {
        self.reference_key_type = key_type;
        self
    }
}

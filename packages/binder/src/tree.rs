//! In-memory AAS document
//!
//! An [`ElementTree`] owns an optional asset shell header and an ordered list
//! of [`Submodel`]s. Trees are built by an external codec or loaded from the
//! YAML fixture representation used for templates and tests.
//!
//! # Security
//!
//! Loading enforces [`config::MAX_DOCUMENT_SIZE`], [`config::MAX_NESTING_DEPTH`]
//! and [`config::MAX_ELEMENTS`], so recursive operations on a loaded tree
//! stay bounded.

use crate::config;
use crate::error::{BinderError, Result};
use crate::types::{Node, SemanticId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Identification of the asset administration shell a document describes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetShell {
    pub id: String,
    pub id_short: String,
}

/// Named top-level section of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submodel {
    #[serde(default)]
    pub id: String,
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<SemanticId>,
    #[serde(default)]
    pub elements: Vec<Node>,
}

impl Submodel {
    pub fn new(id: impl Into<String>, id_short: impl Into<String>, elements: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            id_short: id_short.into(),
            semantic_id: None,
            elements,
        }
    }

    /// Direct child by id_short
    pub fn element(&self, id_short: &str) -> Option<&Node> {
        self.elements.iter().find(|n| n.id_short() == id_short)
    }

    /// Mutable direct child by id_short
    pub fn element_mut(&mut self, id_short: &str) -> Option<&mut Node> {
        self.elements.iter_mut().find(|n| n.id_short() == id_short)
    }

    /// Number of elements in the submodel, at every depth
    pub fn element_count(&self) -> usize {
        self.elements.iter().map(Node::subtree_len).sum()
    }

    /// Deepest collection nesting below the submodel root
    pub fn depth(&self) -> usize {
        self.elements.iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// A parsed AAS document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<AssetShell>,
    #[serde(default)]
    pub submodels: Vec<Submodel>,
}

impl ElementTree {
    pub fn new(submodels: Vec<Submodel>) -> Self {
        Self {
            shell: None,
            submodels,
        }
    }

    /// Submodel with exactly this id_short (linear scan)
    pub fn submodel(&self, id_short: &str) -> Option<&Submodel> {
        self.submodels.iter().find(|s| s.id_short == id_short)
    }

    /// Mutable submodel with exactly this id_short
    pub fn submodel_mut(&mut self, id_short: &str) -> Option<&mut Submodel> {
        self.submodels.iter_mut().find(|s| s.id_short == id_short)
    }

    /// Submodels whose id_short contains `marker`, in document order
    pub fn submodels_matching<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a Submodel> {
        self.submodels
            .iter()
            .filter(move |s| s.id_short.contains(marker))
    }

    // -------------------------------------------------------------------------
    // Asset shell header
    // -------------------------------------------------------------------------

    /// Asset id, or `None` if the document has no shell header
    pub fn asset_id(&self) -> Option<&str> {
        self.shell.as_ref().map(|s| s.id.as_str())
    }

    /// Asset id_short, or `None` if the document has no shell header
    pub fn asset_id_short(&self) -> Option<&str> {
        self.shell.as_ref().map(|s| s.id_short.as_str())
    }

    /// Set the asset id, creating the shell header if needed
    pub fn update_asset_id(&mut self, id: impl Into<String>) {
        self.shell.get_or_insert_with(AssetShell::default).id = id.into();
    }

    /// Set the asset id_short, creating the shell header if needed
    pub fn update_asset_id_short(&mut self, id_short: impl Into<String>) {
        self.shell.get_or_insert_with(AssetShell::default).id_short = id_short.into();
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Load a document from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns `BinderError::LoadError` if the file cannot be read or exceeds
    /// [`config::MAX_DOCUMENT_SIZE`], and parse or limit errors from
    /// [`Self::from_yaml_str`].
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        tracing::debug!(path = %path_ref.display(), "Loading document from YAML file");

        let metadata = fs::metadata(path_ref)
            .map_err(|_| BinderError::LoadError("Failed to access document file".to_string()))?;

        let file_size = metadata.len() as usize;
        if file_size > config::MAX_DOCUMENT_SIZE {
            tracing::warn!(
                size = file_size,
                max = config::MAX_DOCUMENT_SIZE,
                "Document file exceeds size limit"
            );
            return Err(BinderError::LoadError(format!(
                "File exceeds maximum size limit ({} bytes)",
                config::MAX_DOCUMENT_SIZE
            )));
        }

        let content = fs::read_to_string(path_ref)
            .map_err(|_| BinderError::LoadError("Failed to read document file".to_string()))?;

        Self::from_yaml_str(&content)
    }

    /// Parse a document from a YAML string and check structural limits.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.len() > config::MAX_DOCUMENT_SIZE {
            tracing::warn!(
                size = content.len(),
                max = config::MAX_DOCUMENT_SIZE,
                "YAML content exceeds size limit"
            );
            return Err(BinderError::LoadError(format!(
                "YAML content exceeds maximum size limit ({} bytes)",
                config::MAX_DOCUMENT_SIZE
            )));
        }

        let tree: Self = serde_yaml_ng::from_str(content)?;
        tree.validate_limits()?;

        tracing::debug!(
            submodels = tree.submodels.len(),
            elements = tree.element_count(),
            "Parsed document successfully"
        );

        Ok(tree)
    }

    /// Serialize to the YAML fixture representation.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Number of elements in all submodels
    pub fn element_count(&self) -> usize {
        self.submodels.iter().map(Submodel::element_count).sum()
    }

    fn validate_limits(&self) -> Result<()> {
        let count = self.element_count();
        if count > config::MAX_ELEMENTS {
            return Err(BinderError::LoadError(format!(
                "Too many elements ({}, max {})",
                count,
                config::MAX_ELEMENTS
            )));
        }

        for submodel in &self.submodels {
            let depth = submodel.depth();
            if depth > config::MAX_NESTING_DEPTH {
                return Err(BinderError::LoadError(format!(
                    "Submodel '{}' nests too deeply ({}, max {})",
                    submodel.id_short,
                    depth,
                    config::MAX_NESTING_DEPTH
                )));
            }
        }

        Ok(())
    }
}

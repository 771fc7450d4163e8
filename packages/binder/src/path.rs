//! Symbolic path addresses into an element tree
//!
//! A [`PathAddress`] names a submodel, an ordered chain of nested collections
//! and a leaf element. Its textual form is:
//!
//! `{submodel}/{collection}/{collection}#{leaf}`
//!
//! # Examples
//!
//! ```
//! use aas_binder::path::PathAddress;
//!
//! let addr = PathAddress::parse("CarbonFootprint/ProductCarbonFootprint#PCFCO2eq").unwrap();
//! assert_eq!(addr.submodel(), "CarbonFootprint");
//! assert_eq!(addr.collections(), ["ProductCarbonFootprint"]);
//! assert_eq!(addr.leaf(), "PCFCO2eq");
//!
//! let addr = PathAddress::new("Nameplate", "SerialNumber");
//! assert_eq!(addr.to_string(), "Nameplate#SerialNumber");
//! ```

use crate::error::{BinderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a node: submodel, collection chain, leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathAddress {
    submodel: String,
    collections: Vec<String>,
    leaf: String,
}

impl PathAddress {
    /// Address of a direct child of a submodel.
    pub fn new(submodel: impl Into<String>, leaf: impl Into<String>) -> Self {
        Self {
            submodel: submodel.into(),
            collections: Vec::new(),
            leaf: leaf.into(),
        }
    }

    /// Address of a node nested under a chain of collections.
    ///
    /// `collections[0]` is a direct child of the submodel.
    pub fn nested<I, S>(
        submodel: impl Into<String>,
        collections: I,
        leaf: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            submodel: submodel.into(),
            collections: collections.into_iter().map(Into::into).collect(),
            leaf: leaf.into(),
        }
    }

    /// Parse the textual form `submodel/coll/coll#leaf`.
    ///
    /// # Errors
    ///
    /// Returns `BinderError::InvalidPath` if the leaf fragment is missing or
    /// any segment is empty.
    pub fn parse(text: &str) -> Result<Self> {
        let (path_part, leaf) = text.split_once('#').ok_or_else(|| {
            BinderError::InvalidPath(format!("missing '#leaf' fragment in '{}'", text))
        })?;

        if leaf.is_empty() {
            return Err(BinderError::InvalidPath(format!(
                "leaf cannot be empty in '{}'",
                text
            )));
        }

        let mut segments = path_part.split('/');
        let submodel = segments.next().unwrap_or_default();
        if submodel.is_empty() {
            return Err(BinderError::InvalidPath(format!(
                "submodel cannot be empty in '{}'",
                text
            )));
        }

        let collections: Vec<String> = segments.map(str::to_string).collect();
        if collections.iter().any(String::is_empty) {
            return Err(BinderError::InvalidPath(format!(
                "empty collection segment in '{}'",
                text
            )));
        }

        Ok(Self {
            submodel: submodel.to_string(),
            collections,
            leaf: leaf.to_string(),
        })
    }

    pub fn submodel(&self) -> &str {
        &self.submodel
    }

    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    /// Nesting depth of the leaf below the submodel (direct child = 1).
    pub fn depth(&self) -> usize {
        self.collections.len() + 1
    }

    /// Address of a child of the node this address points at.
    ///
    /// The current leaf becomes the innermost collection.
    pub fn child(&self, leaf: impl Into<String>) -> Self {
        let mut collections = self.collections.clone();
        collections.push(self.leaf.clone());
        Self {
            submodel: self.submodel.clone(),
            collections,
            leaf: leaf.into(),
        }
    }
}

impl fmt::Display for PathAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.submodel)?;
        for collection in &self.collections {
            write!(f, "/{}", collection)?;
        }
        write!(f, "#{}", self.leaf)
    }
}

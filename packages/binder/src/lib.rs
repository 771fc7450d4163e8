//! AAS Binder
//!
//! Semantic tree binding for Asset Administration Shell documents.
//! This library provides functionality for:
//! - Addressing elements by symbolic path (`Submodel/Collection#Leaf`)
//! - Lenient typed reads and writes of leaf values
//! - Duplicating repeatable groups under a new name
//! - Validating documents against reference templates by semantic id
//! - Binding typed template views to the nodes of a document
//!
//! # Example
//!
//! ```
//! use aas_binder::{ElementTree, PathAddress, ValueBinder};
//!
//! let mut tree = ElementTree::from_yaml_str(r#"
//! submodels:
//!   - id_short: CarbonFootprint
//!     elements:
//!       - kind: collection
//!         id_short: ProductCarbonFootprint
//!         value:
//!           - kind: property
//!             id_short: PCFCO2eq
//! "#).unwrap();
//!
//! let binder = ValueBinder::default();
//! let addr = PathAddress::parse("CarbonFootprint/ProductCarbonFootprint#PCFCO2eq").unwrap();
//! binder.set_property("12.5", &mut tree, &addr);
//! assert_eq!(binder.get_property(&tree, &addr), "12.5");
//! ```

pub mod binder;
pub mod config;
pub mod dto;
pub mod duplicate;
pub mod error;
pub mod navigator;
pub mod path;
pub mod provider;
pub mod template;
pub mod templates;
pub mod tree;
pub mod types;
pub mod validator;

// Re-export commonly used items
pub use binder::{Outcome, ValueBinder};
pub use config::BinderConfig;
pub use dto::AasDataTransferObject;
pub use duplicate::{duplicate_collection, duplicate_submodel, next_free_name};
pub use error::{BinderError, Result};
pub use navigator::{resolve, resolve_mut, Lookup, NotFound};
pub use path::PathAddress;
pub use provider::{TemplateProvider, TemplateStore};
pub use template::{bind, instantiate, BindReport, Slot, SubmodelTemplate, TemplateDescriptor};
pub use templates::CarbonFootprintTemplate;
pub use tree::{AssetShell, ElementTree, Submodel};
pub use types::{KeyType, LangString, Node, NodeKind, Reference, SemanticId};
pub use validator::{is_valid, Mismatch, TemplateValidator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

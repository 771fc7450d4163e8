//! Core element types for AAS documents
//!
//! A submodel holds an ordered list of [`Node`]s. `Node` is a closed sum type
//! over the five element kinds the binder understands; every access point
//! matches on it exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BinderError;

/// Opaque semantic identifier used to compare the meaning of two elements.
///
/// Only equality matters. Semantic ids are never used for addressing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemanticId(String);

impl SemanticId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SemanticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SemanticId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Text tagged with a language code (e.g. `de`, `en`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangString {
    pub language: String,
    pub text: String,
}

impl LangString {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Key type of a reference key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    AssetAdministrationShell,
    Submodel,
    SubmodelElement,
    ConceptDescription,
    GlobalReference,
    Referable,
}

impl KeyType {
    /// Name as written in AAS documents
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::AssetAdministrationShell => "AssetAdministrationShell",
            KeyType::Submodel => "Submodel",
            KeyType::SubmodelElement => "SubmodelElement",
            KeyType::ConceptDescription => "ConceptDescription",
            KeyType::GlobalReference => "GlobalReference",
            KeyType::Referable => "Referable",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = BinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AssetAdministrationShell" => Ok(KeyType::AssetAdministrationShell),
            "Submodel" => Ok(KeyType::Submodel),
            "SubmodelElement" => Ok(KeyType::SubmodelElement),
            "ConceptDescription" => Ok(KeyType::ConceptDescription),
            "GlobalReference" => Ok(KeyType::GlobalReference),
            "Referable" => Ok(KeyType::Referable),
            other => Err(BinderError::InvalidConfig(format!(
                "unknown key type '{}'",
                other
            ))),
        }
    }
}

/// Kind of reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    ExternalReference,
    ModelReference,
}

/// Single key of a reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub value: String,
}

/// Reference value held by a [`ReferenceElement`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub reference_type: ReferenceType,
    pub keys: Vec<Key>,
}

impl Reference {
    /// Reference with a single external key
    pub fn external(key_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            reference_type: ReferenceType::ExternalReference,
            keys: vec![Key {
                key_type,
                value: value.into(),
            }],
        }
    }

    /// Value of the first key, if any
    pub fn first_value(&self) -> Option<&str> {
        self.keys.first().map(|k| k.value.as_str())
    }
}

// =============================================================================
// Element kinds
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<SemanticId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLanguageProperty {
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<SemanticId>,
    #[serde(default)]
    pub value: Vec<LangString>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceElement {
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<SemanticId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileElement {
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<SemanticId>,
    /// Path of the file inside the package, or a URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Container element ("SubmodelElementCollection")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<SemanticId>,
    #[serde(default)]
    pub value: Vec<Node>,
}

impl Collection {
    /// Direct child by id_short
    pub fn child(&self, id_short: &str) -> Option<&Node> {
        self.value.iter().find(|n| n.id_short() == id_short)
    }

    /// Mutable direct child by id_short
    pub fn child_mut(&mut self, id_short: &str) -> Option<&mut Node> {
        self.value.iter_mut().find(|n| n.id_short() == id_short)
    }
}

/// Kind of a [`Node`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Property,
    MultiLanguageProperty,
    ReferenceElement,
    File,
    Collection,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Property => "Property",
            NodeKind::MultiLanguageProperty => "MultiLanguageProperty",
            NodeKind::ReferenceElement => "ReferenceElement",
            NodeKind::File => "File",
            NodeKind::Collection => "SubmodelElementCollection",
        };
        f.write_str(name)
    }
}

/// A submodel element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Property(Property),
    MultiLanguageProperty(MultiLanguageProperty),
    ReferenceElement(ReferenceElement),
    File(FileElement),
    Collection(Collection),
}

impl Node {
    /// Property with an optional value and no semantic id
    pub fn property(id_short: impl Into<String>, value: Option<&str>) -> Self {
        Node::Property(Property {
            id_short: id_short.into(),
            semantic_id: None,
            value: value.map(str::to_string),
        })
    }

    /// Collection with no semantic id
    pub fn collection(id_short: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Collection(Collection {
            id_short: id_short.into(),
            semantic_id: None,
            value: children,
        })
    }

    /// Builder-style setter for the semantic id
    pub fn with_semantic_id(mut self, id: impl Into<SemanticId>) -> Self {
        self.set_semantic_id(Some(id.into()));
        self
    }

    pub fn id_short(&self) -> &str {
        match self {
            Node::Property(p) => &p.id_short,
            Node::MultiLanguageProperty(p) => &p.id_short,
            Node::ReferenceElement(r) => &r.id_short,
            Node::File(f) => &f.id_short,
            Node::Collection(c) => &c.id_short,
        }
    }

    pub fn set_id_short(&mut self, id_short: impl Into<String>) {
        let id_short = id_short.into();
        match self {
            Node::Property(p) => p.id_short = id_short,
            Node::MultiLanguageProperty(p) => p.id_short = id_short,
            Node::ReferenceElement(r) => r.id_short = id_short,
            Node::File(f) => f.id_short = id_short,
            Node::Collection(c) => c.id_short = id_short,
        }
    }

    pub fn semantic_id(&self) -> Option<&SemanticId> {
        match self {
            Node::Property(p) => p.semantic_id.as_ref(),
            Node::MultiLanguageProperty(p) => p.semantic_id.as_ref(),
            Node::ReferenceElement(r) => r.semantic_id.as_ref(),
            Node::File(f) => f.semantic_id.as_ref(),
            Node::Collection(c) => c.semantic_id.as_ref(),
        }
    }

    pub fn set_semantic_id(&mut self, semantic_id: Option<SemanticId>) {
        match self {
            Node::Property(p) => p.semantic_id = semantic_id,
            Node::MultiLanguageProperty(p) => p.semantic_id = semantic_id,
            Node::ReferenceElement(r) => r.semantic_id = semantic_id,
            Node::File(f) => f.semantic_id = semantic_id,
            Node::Collection(c) => c.semantic_id = semantic_id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Property(_) => NodeKind::Property,
            Node::MultiLanguageProperty(_) => NodeKind::MultiLanguageProperty,
            Node::ReferenceElement(_) => NodeKind::ReferenceElement,
            Node::File(_) => NodeKind::File,
            Node::Collection(_) => NodeKind::Collection,
        }
    }

    /// Drop the value of a leaf. Collections keep their children.
    pub fn clear_value(&mut self) {
        match self {
            Node::Property(p) => p.value = None,
            Node::MultiLanguageProperty(p) => p.value.clear(),
            Node::ReferenceElement(r) => r.value = None,
            Node::File(f) => f.value = None,
            Node::Collection(_) => {}
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Node::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
        match self {
            Node::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including the node itself
    pub fn subtree_len(&self) -> usize {
        match self {
            Node::Collection(c) => 1 + c.value.iter().map(Node::subtree_len).sum::<usize>(),
            _ => 1,
        }
    }

    /// Nesting depth of this subtree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        match self {
            Node::Collection(c) => 1 + c.value.iter().map(Node::depth).max().unwrap_or(0),
            _ => 1,
        }
    }
}

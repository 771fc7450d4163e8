//! Typed reads and writes of leaf values
//!
//! [`ValueBinder`] exposes one get/set pair per leaf kind. Every operation goes
//! through [`crate::navigator`] and is constrained to its node kind.
//!
//! # Lenient contract
//!
//! Documents are sparse: templates may omit optional leaves and callers apply
//! many optional writes in sequence. So:
//! - reads of absent or wrongly-typed nodes return [`config::BLANK`] (or a
//!   single blank entry in the default language), never an error
//! - writes to absent or wrongly-typed nodes leave the tree unchanged and
//!   return [`Outcome::Skipped`]
//!
//! Use the `lookup_*` variants when the reason for absence matters.

use crate::config::{self, BinderConfig};
use crate::navigator::{self, Lookup, NotFound};
use crate::path::PathAddress;
use crate::tree::ElementTree;
use crate::types::{LangString, Node, NodeKind, Reference};

/// Result of a lenient write
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The tree was changed
    Applied,
    /// The target was absent; the tree is unchanged
    Skipped(NotFound),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

fn wrong_kind(node: &Node) -> NotFound {
    NotFound::WrongKind {
        id_short: node.id_short().to_string(),
        found: node.kind(),
    }
}

/// Typed access to leaf values through path addresses.
#[derive(Debug, Clone, Default)]
pub struct ValueBinder {
    config: BinderConfig,
}

impl ValueBinder {
    pub fn new(config: BinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    fn blank_text(&self) -> Vec<LangString> {
        vec![LangString::new(&self.config.default_language, config::BLANK)]
    }

    /// Apply `write` to the node at `address` if it has the expected kind.
    fn write(
        &self,
        tree: &mut ElementTree,
        address: &PathAddress,
        expected: NodeKind,
        write: impl FnOnce(&mut Node),
    ) -> Outcome {
        let outcome = match navigator::resolve_mut(tree, address) {
            Lookup::Found(node) if node.kind() == expected => {
                write(node);
                Outcome::Applied
            }
            Lookup::Found(node) => Outcome::Skipped(wrong_kind(node)),
            Lookup::NotFound(reason) => Outcome::Skipped(reason),
        };

        if let Outcome::Skipped(reason) = &outcome {
            tracing::debug!(address = %address, reason = %reason, "Write skipped");
        }
        outcome
    }

    // -------------------------------------------------------------------------
    // Property
    // -------------------------------------------------------------------------

    /// Value of a Property, with the reason when unavailable.
    ///
    /// A Property without a value is reported as found with `None`.
    pub fn lookup_property<'t>(
        &self,
        tree: &'t ElementTree,
        address: &PathAddress,
    ) -> Lookup<Option<&'t str>> {
        navigator::resolve(tree, address).and_then(|node| match node {
            Node::Property(p) => Lookup::Found(p.value.as_deref()),
            other => Lookup::NotFound(wrong_kind(other)),
        })
    }

    /// Value of a Property, or [`config::BLANK`] when unavailable.
    pub fn get_property(&self, tree: &ElementTree, address: &PathAddress) -> String {
        self.lookup_property(tree, address)
            .found()
            .flatten()
            .unwrap_or(config::BLANK)
            .to_string()
    }

    /// Overwrite the value of a Property.
    pub fn set_property(
        &self,
        value: impl Into<String>,
        tree: &mut ElementTree,
        address: &PathAddress,
    ) -> Outcome {
        let value = value.into();
        self.write(tree, address, NodeKind::Property, |node| {
            if let Node::Property(p) = node {
                p.value = Some(value);
            }
        })
    }

    // -------------------------------------------------------------------------
    // MultiLanguageProperty
    // -------------------------------------------------------------------------

    pub fn lookup_multilanguage<'t>(
        &self,
        tree: &'t ElementTree,
        address: &PathAddress,
    ) -> Lookup<&'t [LangString]> {
        navigator::resolve(tree, address).and_then(|node| match node {
            Node::MultiLanguageProperty(p) => Lookup::Found(p.value.as_slice()),
            other => Lookup::NotFound(wrong_kind(other)),
        })
    }

    /// All language entries, or one blank entry in the default language.
    pub fn get_multilanguage(&self, tree: &ElementTree, address: &PathAddress) -> Vec<LangString> {
        match self.lookup_multilanguage(tree, address) {
            Lookup::Found(values) => values.to_vec(),
            Lookup::NotFound(_) => self.blank_text(),
        }
    }

    /// Text of the first language entry, or [`config::BLANK`].
    pub fn get_multilanguage_text(&self, tree: &ElementTree, address: &PathAddress) -> String {
        self.get_multilanguage(tree, address)
            .into_iter()
            .next()
            .map(|entry| entry.text)
            .unwrap_or_else(|| config::BLANK.to_string())
    }

    /// Replace all entries with a single entry in the default language.
    pub fn set_multilanguage(
        &self,
        text: impl Into<String>,
        tree: &mut ElementTree,
        address: &PathAddress,
    ) -> Outcome {
        let entry = LangString::new(&self.config.default_language, text);
        self.write(tree, address, NodeKind::MultiLanguageProperty, |node| {
            if let Node::MultiLanguageProperty(p) = node {
                p.value = vec![entry];
            }
        })
    }

    // -------------------------------------------------------------------------
    // ReferenceElement
    // -------------------------------------------------------------------------

    pub fn lookup_reference<'t>(
        &self,
        tree: &'t ElementTree,
        address: &PathAddress,
    ) -> Lookup<Option<&'t Reference>> {
        navigator::resolve(tree, address).and_then(|node| match node {
            Node::ReferenceElement(r) => Lookup::Found(r.value.as_ref()),
            other => Lookup::NotFound(wrong_kind(other)),
        })
    }

    /// Value of the first key of a reference, or [`config::BLANK`].
    pub fn get_reference(&self, tree: &ElementTree, address: &PathAddress) -> String {
        self.lookup_reference(tree, address)
            .found()
            .flatten()
            .and_then(Reference::first_value)
            .unwrap_or(config::BLANK)
            .to_string()
    }

    /// Replace the reference with a single-key external reference.
    ///
    /// The key type comes from [`BinderConfig::reference_key_type`].
    pub fn set_reference(
        &self,
        value: impl Into<String>,
        tree: &mut ElementTree,
        address: &PathAddress,
    ) -> Outcome {
        let reference = Reference::external(self.config.reference_key_type, value);
        self.write(tree, address, NodeKind::ReferenceElement, |node| {
            if let Node::ReferenceElement(r) = node {
                r.value = Some(reference);
            }
        })
    }

    // -------------------------------------------------------------------------
    // File
    // -------------------------------------------------------------------------

    pub fn lookup_file<'t>(
        &self,
        tree: &'t ElementTree,
        address: &PathAddress,
    ) -> Lookup<Option<&'t str>> {
        navigator::resolve(tree, address).and_then(|node| match node {
            Node::File(f) => Lookup::Found(f.value.as_deref()),
            other => Lookup::NotFound(wrong_kind(other)),
        })
    }

    /// File path, or [`config::BLANK`].
    pub fn get_file(&self, tree: &ElementTree, address: &PathAddress) -> String {
        self.lookup_file(tree, address)
            .found()
            .flatten()
            .unwrap_or(config::BLANK)
            .to_string()
    }

    pub fn set_file(
        &self,
        path: impl Into<String>,
        tree: &mut ElementTree,
        address: &PathAddress,
    ) -> Outcome {
        let path = path.into();
        self.write(tree, address, NodeKind::File, |node| {
            if let Node::File(f) = node {
                f.value = Some(path);
            }
        })
    }
}

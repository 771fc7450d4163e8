//! Structural validation of a document against a template
//!
//! A candidate document conforms to a template when its marked submodel
//! contains, for every template element, a sibling with the same semantic
//! id. Names are not compared: a renamed element still conforms, an element
//! with a foreign semantic id does not.
//!
//! # Rules
//!
//! 1. The candidate has exactly one submodel whose id_short contains the marker
//! 2. The template has exactly one submodel
//! 3. Every template child has a candidate sibling with an equal semantic id
//!    (first match in document order wins)
//! 4. If the template child is a collection, its match must be a collection
//!    and rule 3 applies to their children
//!
//! Extra candidate elements are allowed, so validation is a subset check.

use crate::error::{BinderError, Result};
use crate::provider::TemplateProvider;
use crate::tree::ElementTree;
use crate::types::{Node, NodeKind, SemanticId};
use std::fmt;

/// First reason a candidate does not conform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The marker matched no submodel, or more than one
    MarkerNotUnique { marker: String, count: usize },
    /// The template does not consist of a single submodel
    TemplateSubmodelCount(usize),
    /// No candidate sibling carries the template element's semantic id
    MissingElement {
        path: String,
        semantic_id: Option<SemanticId>,
    },
    /// The match for a template collection is not a collection
    KindMismatch { path: String, found: NodeKind },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::MarkerNotUnique { marker, count } => write!(
                f,
                "expected exactly one submodel matching '{}', found {}",
                marker, count
            ),
            Mismatch::TemplateSubmodelCount(count) => {
                write!(f, "template must have exactly one submodel, has {}", count)
            }
            Mismatch::MissingElement { path, semantic_id } => match semantic_id {
                Some(id) => write!(f, "no element with semantic id '{}' for '{}'", id, path),
                None => write!(f, "no element without semantic id for '{}'", path),
            },
            Mismatch::KindMismatch { path, found } => {
                write!(f, "'{}' must be a SubmodelElementCollection, found {}", path, found)
            }
        }
    }
}

/// Check a candidate against a template, reporting the first mismatch.
pub fn check(
    template: &ElementTree,
    candidate: &ElementTree,
    marker: &str,
) -> std::result::Result<(), Mismatch> {
    let mut matching = candidate.submodels_matching(marker);
    let (Some(submodel), None) = (matching.next(), matching.next()) else {
        return Err(Mismatch::MarkerNotUnique {
            marker: marker.to_string(),
            count: candidate.submodels_matching(marker).count(),
        });
    };

    let [template_submodel] = template.submodels.as_slice() else {
        return Err(Mismatch::TemplateSubmodelCount(template.submodels.len()));
    };

    check_children(
        &template_submodel.elements,
        &submodel.elements,
        &template_submodel.id_short,
    )
}

/// Whether a candidate conforms to a template.
pub fn is_valid(template: &ElementTree, candidate: &ElementTree, marker: &str) -> bool {
    check(template, candidate, marker).is_ok()
}

fn check_children(
    template: &[Node],
    candidate: &[Node],
    parent: &str,
) -> std::result::Result<(), Mismatch> {
    for expected in template {
        let path = format!("{}/{}", parent, expected.id_short());

        let Some(found) = candidate
            .iter()
            .find(|node| node.semantic_id() == expected.semantic_id())
        else {
            return Err(Mismatch::MissingElement {
                path,
                semantic_id: expected.semantic_id().cloned(),
            });
        };

        if let Node::Collection(expected) = expected {
            let Node::Collection(found) = found else {
                return Err(Mismatch::KindMismatch {
                    path,
                    found: found.kind(),
                });
            };
            check_children(&expected.value, &found.value, &path)?;
        }
    }
    Ok(())
}

/// Validation against templates from a provider.
pub struct TemplateValidator<'p, P: TemplateProvider + ?Sized> {
    provider: &'p P,
}

impl<'p, P: TemplateProvider + ?Sized> TemplateValidator<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Whether `candidate` conforms to the named template.
    ///
    /// # Errors
    ///
    /// Returns `BinderError::TemplateNotFound` if the provider has no such
    /// template. A non-conforming candidate is `Ok(false)`.
    pub fn validate(
        &self,
        template_name: &str,
        candidate: &ElementTree,
        marker: &str,
    ) -> Result<bool> {
        match self.require(template_name, candidate, marker) {
            Ok(()) => Ok(true),
            Err(BinderError::StructuralMismatch { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Like [`Self::validate`], but a non-conforming candidate is an error.
    ///
    /// # Errors
    ///
    /// Returns `BinderError::StructuralMismatch` with the first mismatch as
    /// reason.
    pub fn require(
        &self,
        template_name: &str,
        candidate: &ElementTree,
        marker: &str,
    ) -> Result<()> {
        let template = self.provider.template(template_name)?;

        check(template, candidate, marker).map_err(|mismatch| {
            tracing::warn!(
                template = %template_name,
                marker = %marker,
                reason = %mismatch,
                "Document does not conform to template"
            );
            BinderError::StructuralMismatch {
                template: template_name.to_string(),
                reason: mismatch.to_string(),
            }
        })
    }
}

//! Duplication of repeatable substructures
//!
//! Templates define a single instance of each repeatable group (for example
//! one `ProductCarbonFootprint`). Further instances are materialized by
//! copying that group under a new id_short.
//!
//! The copy is structural: same kinds, values, child names, order and
//! semantic ids. It shares nothing with the source.
//!
//! Uniqueness of the new id_short among siblings is not checked; choosing a
//! free name is the caller's job (see [`next_free_name`]).

use crate::binder::Outcome;
use crate::navigator::NotFound;
use crate::tree::{ElementTree, Submodel};
use crate::types::{Node, NodeKind};

/// Append a renamed deep copy of a direct child collection of a submodel.
///
/// Returns [`Outcome::Skipped`] and leaves the tree unchanged if the submodel
/// or the source is absent, or the source is not a collection.
pub fn duplicate_collection(
    tree: &mut ElementTree,
    submodel: &str,
    source: &str,
    new_id_short: &str,
) -> Outcome {
    let Some(target) = tree.submodel_mut(submodel) else {
        tracing::debug!(submodel = %submodel, "Duplication skipped: submodel not found");
        return Outcome::Skipped(NotFound::Submodel(submodel.to_string()));
    };

    let copy = match target.element(source) {
        Some(node) if node.kind() == NodeKind::Collection => {
            let mut copy = node.clone();
            copy.set_id_short(new_id_short);
            copy
        }
        Some(_) => {
            tracing::debug!(
                submodel = %submodel,
                source = %source,
                "Duplication skipped: source is not a collection"
            );
            return Outcome::Skipped(NotFound::NotACollection(source.to_string()));
        }
        None => {
            tracing::debug!(
                submodel = %submodel,
                source = %source,
                "Duplication skipped: source not found"
            );
            return Outcome::Skipped(NotFound::Collection(source.to_string()));
        }
    };

    tracing::debug!(
        submodel = %submodel,
        source = %source,
        new_id_short = %new_id_short,
        elements = copy.subtree_len(),
        "Duplicated collection"
    );
    target.elements.push(copy);
    Outcome::Applied
}

/// Append a copy of a whole submodel under a new id and id_short.
///
/// Returns [`Outcome::Skipped`] if no submodel has `source` as id_short.
pub fn duplicate_submodel(
    tree: &mut ElementTree,
    source: &str,
    new_id: &str,
    new_id_short: &str,
) -> Outcome {
    let Some(original) = tree.submodel(source) else {
        tracing::debug!(submodel = %source, "Submodel duplication skipped: source not found");
        return Outcome::Skipped(NotFound::Submodel(source.to_string()));
    };

    let copy = Submodel {
        id: new_id.to_string(),
        id_short: new_id_short.to_string(),
        ..original.clone()
    };

    tracing::debug!(source = %source, new_id_short = %new_id_short, "Duplicated submodel");
    tree.submodels.push(copy);
    Outcome::Applied
}

/// First id_short of the form `{base}_{n}` (n >= 2) not used by a direct
/// child of the submodel.
///
/// Returns `None` if the submodel does not exist.
pub fn next_free_name(tree: &ElementTree, submodel: &str, base: &str) -> Option<String> {
    let submodel = tree.submodel(submodel)?;
    (2..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| submodel.element(candidate).is_none())
}

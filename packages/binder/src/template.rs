//! Binding typed template views to a document
//!
//! A typed view (for example [`crate::templates::CarbonFootprintTemplate`])
//! registers named slots in a [`TemplateDescriptor`]. Binding walks the marked
//! submodel and stores the [`PathAddress`] of every node whose name matches a
//! slot. The view then reads and writes values through those addresses with a
//! [`ValueBinder`](crate::binder::ValueBinder).
//!
//! # Slot names
//!
//! Slot names are the upper-case path of the node, segments joined by `_`:
//!
//! ```text
//! CarbonFootprint
//! └── ProductCarbonFootprint           PRODUCT_CARBON_FOOTPRINT
//!     └── PCFCO2eq                     PRODUCT_CARBON_FOOTPRINT_PCF_CO2EQ
//! ```
//!
//! Names are compared after [`normalize`] (upper case, underscores removed).
//! Inside a collection only slots starting with the collection's normalized
//! name are considered, and that prefix is stripped before comparing.
//!
//! When several nodes match one slot (for example after duplication) the
//! first node in document order stays bound.

use crate::error::{BinderError, Result};
use crate::path::PathAddress;
use crate::provider::TemplateProvider;
use crate::tree::{ElementTree, Submodel};
use crate::types::{Node, NodeKind};
use crate::validator::TemplateValidator;
use std::collections::HashSet;

/// A named, typed field of a template view
pub struct Slot<T> {
    pub name: &'static str,
    /// Kind the node must have to be bound
    pub kind: NodeKind,
    pub bind: fn(&mut T, PathAddress),
}

/// Everything the binder needs to know about a template view
pub struct TemplateDescriptor<T: 'static> {
    /// Name of the template in a [`TemplateProvider`]
    pub template_name: &'static str,
    /// Substring identifying the submodel in a document
    pub marker: &'static str,
    /// Receives the id_short of the located submodel
    pub root: fn(&mut T, &Submodel),
    pub slots: &'static [Slot<T>],
}

/// A typed view over one submodel
pub trait SubmodelTemplate: Default + 'static {
    fn descriptor() -> TemplateDescriptor<Self>;
}

/// Summary of a binding pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// id_short of the bound submodel
    pub submodel: String,
    /// Slots that received an address, in binding order
    pub bound: Vec<&'static str>,
    /// Nodes visited without a matching slot
    pub unmatched: usize,
}

/// Upper-case `name` and drop underscores.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_uppercase)
        .collect()
}

struct NormalizedSlot {
    index: usize,
    name: String,
}

struct BindState<'d, T: 'static> {
    descriptor: &'d TemplateDescriptor<T>,
    slots: Vec<NormalizedSlot>,
    taken: HashSet<usize>,
    report: BindReport,
}

/// Bind the slots of `object` to the marked submodel of `tree`.
///
/// # Errors
///
/// Returns `BinderError::RequiredSlotMissing` if no submodel id_short contains
/// the descriptor's marker.
pub fn bind<T: 'static>(
    object: &mut T,
    tree: &ElementTree,
    descriptor: &TemplateDescriptor<T>,
) -> Result<BindReport> {
    let Some(submodel) = tree.submodels_matching(descriptor.marker).next() else {
        tracing::warn!(
            template = %descriptor.template_name,
            marker = %descriptor.marker,
            "No submodel matches template marker"
        );
        return Err(BinderError::RequiredSlotMissing {
            template: descriptor.template_name.to_string(),
            marker: descriptor.marker.to_string(),
        });
    };

    (descriptor.root)(object, submodel);

    let mut state = BindState {
        descriptor,
        slots: descriptor
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| NormalizedSlot {
                index,
                name: normalize(slot.name),
            })
            .collect(),
        taken: HashSet::new(),
        report: BindReport {
            submodel: submodel.id_short.clone(),
            ..BindReport::default()
        },
    };

    let mut chain = Vec::new();
    visit(object, &submodel.id_short, &submodel.elements, "", &mut chain, &mut state);

    tracing::debug!(
        template = %descriptor.template_name,
        submodel = %state.report.submodel,
        bound = state.report.bound.len(),
        unmatched = state.report.unmatched,
        "Bound template slots"
    );
    Ok(state.report)
}

fn visit<T: 'static>(
    object: &mut T,
    submodel: &str,
    nodes: &[Node],
    prefix: &str,
    chain: &mut Vec<String>,
    state: &mut BindState<'_, T>,
) {
    for node in nodes {
        let name = normalize(node.id_short());
        let address = PathAddress::nested(submodel, chain.iter().cloned(), node.id_short());

        match find_slot(state, prefix, &name) {
            Some(index) => {
                let slot = &state.descriptor.slots[index];
                if slot.kind == node.kind() {
                    if state.taken.insert(index) {
                        (slot.bind)(object, address);
                        state.report.bound.push(slot.name);
                    }
                } else {
                    tracing::debug!(
                        slot = %slot.name,
                        expected = %slot.kind,
                        found = %node.kind(),
                        "Slot kind does not match node"
                    );
                }
            }
            None => state.report.unmatched += 1,
        }

        if let Node::Collection(collection) = node {
            chain.push(node.id_short().to_string());
            visit(object, submodel, &collection.value, &name, chain, state);
            chain.pop();
        }
    }
}

/// Index of the slot whose name, with `prefix` stripped, equals `name`.
fn find_slot<T: 'static>(state: &BindState<'_, T>, prefix: &str, name: &str) -> Option<usize> {
    state
        .slots
        .iter()
        .find(|slot| {
            slot.name
                .strip_prefix(prefix)
                .is_some_and(|rest| rest == name)
        })
        .map(|slot| slot.index)
}

/// Validate `tree` against the view's template, then bind a fresh view.
///
/// # Errors
///
/// Returns `BinderError::TemplateNotFound` if the provider lacks the template,
/// `BinderError::StructuralMismatch` if the document does not conform, and
/// `BinderError::RequiredSlotMissing` from [`bind`].
pub fn instantiate<T, P>(provider: &P, tree: &ElementTree) -> Result<T>
where
    T: SubmodelTemplate,
    P: TemplateProvider + ?Sized,
{
    let descriptor = T::descriptor();
    TemplateValidator::new(provider).require(descriptor.template_name, tree, descriptor.marker)?;

    let mut object = T::default();
    bind(&mut object, tree, &descriptor)?;
    Ok(object)
}

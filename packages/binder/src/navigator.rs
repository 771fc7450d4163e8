//! Path resolution against an element tree
//!
//! Resolves a [`PathAddress`] to a node without mutating the tree and without
//! creating missing nodes.
//!
//! # Algorithm
//!
//! 1. Find the submodel by exact id_short (linear scan)
//! 2. Walk the collection chain: each step must name a `Collection` child
//! 3. Scan the innermost container for the leaf
//!
//! Absence is an ordinary outcome, reported as [`Lookup::NotFound`] with the
//! step that failed. It is never an error.

use crate::path::PathAddress;
use crate::tree::ElementTree;
use crate::types::Node;
use std::fmt;

/// Which step of a resolution failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    /// No submodel with this id_short
    Submodel(String),
    /// A collection in the chain is absent
    Collection(String),
    /// A chain step names a node that is not a collection
    NotACollection(String),
    /// The leaf is absent from its container
    Leaf(String),
    /// The node exists but has a different kind than the operation requires
    WrongKind { id_short: String, found: crate::types::NodeKind },
    /// A template slot has no address (the document lacks the node)
    Unbound(&'static str),
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::Submodel(name) => write!(f, "submodel '{}' not found", name),
            NotFound::Collection(name) => write!(f, "collection '{}' not found", name),
            NotFound::NotACollection(name) => write!(f, "'{}' is not a collection", name),
            NotFound::Leaf(name) => write!(f, "element '{}' not found", name),
            NotFound::WrongKind { id_short, found } => {
                write!(f, "element '{}' is a {}", id_short, found)
            }
            NotFound::Unbound(slot) => write!(f, "slot '{}' is not bound", slot),
        }
    }
}

/// Outcome of a resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound(NotFound),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The resolved value, discarding the reason for absence
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound(reason) => Lookup::NotFound(reason),
        }
    }

    /// Continue with a fallible step on the found value
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Lookup<U>) -> Lookup<U> {
        match self {
            Lookup::Found(value) => f(value),
            Lookup::NotFound(reason) => Lookup::NotFound(reason),
        }
    }
}

/// Find a node by id_short in a sibling list
fn find<'t>(nodes: &'t [Node], id_short: &str) -> Option<&'t Node> {
    nodes.iter().find(|n| n.id_short() == id_short)
}

fn find_mut<'t>(nodes: &'t mut [Node], id_short: &str) -> Option<&'t mut Node> {
    nodes.iter_mut().find(|n| n.id_short() == id_short)
}

/// Resolve an address to a node.
pub fn resolve<'t>(tree: &'t ElementTree, address: &PathAddress) -> Lookup<&'t Node> {
    let Some(submodel) = tree.submodel(address.submodel()) else {
        return Lookup::NotFound(NotFound::Submodel(address.submodel().to_string()));
    };

    let mut children: &'t [Node] = &submodel.elements;
    for name in address.collections() {
        match find(children, name) {
            Some(Node::Collection(collection)) => children = &collection.value,
            Some(_) => return Lookup::NotFound(NotFound::NotACollection(name.clone())),
            None => return Lookup::NotFound(NotFound::Collection(name.clone())),
        }
    }

    match find(children, address.leaf()) {
        Some(node) => Lookup::Found(node),
        None => Lookup::NotFound(NotFound::Leaf(address.leaf().to_string())),
    }
}

/// Resolve an address to a mutable node.
pub fn resolve_mut<'t>(tree: &'t mut ElementTree, address: &PathAddress) -> Lookup<&'t mut Node> {
    let Some(submodel) = tree.submodel_mut(address.submodel()) else {
        return Lookup::NotFound(NotFound::Submodel(address.submodel().to_string()));
    };

    let mut children: &'t mut [Node] = &mut submodel.elements;
    for name in address.collections() {
        match find_mut(children, name) {
            Some(Node::Collection(collection)) => children = &mut collection.value,
            Some(_) => return Lookup::NotFound(NotFound::NotACollection(name.clone())),
            None => return Lookup::NotFound(NotFound::Collection(name.clone())),
        }
    }

    match find_mut(children, address.leaf()) {
        Some(node) => Lookup::Found(node),
        None => Lookup::NotFound(NotFound::Leaf(address.leaf().to_string())),
    }
}

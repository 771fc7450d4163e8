//! Structural edits used to prepare scenarios

use aas_binder::{resolve_mut, ElementTree, Lookup, Node, PathAddress};

/// Children of the container holding the node at `address`.
fn container_mut<'t>(
    tree: &'t mut ElementTree,
    address: &PathAddress,
) -> Option<&'t mut Vec<Node>> {
    match address.collections().split_last() {
        None => tree
            .submodel_mut(address.submodel())
            .map(|submodel| &mut submodel.elements),
        Some((last, parents)) => {
            let parent =
                PathAddress::nested(address.submodel(), parents.iter().cloned(), last.clone());
            match resolve_mut(tree, &parent) {
                Lookup::Found(Node::Collection(collection)) => Some(&mut collection.value),
                _ => None,
            }
        }
    }
}

pub fn remove_element(tree: &mut ElementTree, address: &PathAddress) {
    let children = container_mut(tree, address)
        .unwrap_or_else(|| panic!("No container for {}", address));
    let before = children.len();
    children.retain(|node| node.id_short() != address.leaf());
    assert_eq!(children.len() + 1, before, "Element {} not found", address);
}

pub fn rename_element(tree: &mut ElementTree, address: &PathAddress, new_id_short: &str) {
    match resolve_mut(tree, address) {
        Lookup::Found(node) => node.set_id_short(new_id_short),
        Lookup::NotFound(reason) => panic!("Cannot rename {}: {}", address, reason),
    }
}

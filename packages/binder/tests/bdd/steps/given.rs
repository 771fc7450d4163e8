//! Given step definitions
//!
//! Steps that set up the document and binder for a scenario.

use aas_binder::dto::AasDataTransferObject;
use aas_binder::{duplicate_collection, duplicate_submodel, BinderConfig, PathAddress, ValueBinder};
use cucumber::{gherkin::Step, given};

use crate::helpers::tree_edit::{remove_element, rename_element};
use crate::world::BinderWorld;

fn address(text: &str) -> PathAddress {
    PathAddress::parse(text).unwrap_or_else(|e| panic!("Bad address '{}': {}", text, e))
}

// =============================================================================
// Documents
// =============================================================================

#[given(expr = "a document from the template {string}")]
fn document_from_template(world: &mut BinderWorld, name: String) {
    let tree = world.template(&name);
    world.set_document(tree);
}

#[given(expr = "the property at {string} is set to {string}")]
fn set_property(world: &mut BinderWorld, addr: String, value: String) {
    let outcome = world.binder.set_property(value, &mut world.tree, &address(&addr));
    assert!(outcome.is_applied(), "Setup write to {} failed: {:?}", addr, outcome);
}

#[given(expr = "the element at {string} is removed")]
fn remove(world: &mut BinderWorld, addr: String) {
    remove_element(&mut world.tree, &address(&addr));
}

#[given(expr = "the element at {string} is renamed to {string}")]
fn rename(world: &mut BinderWorld, addr: String, new_name: String) {
    rename_element(&mut world.tree, &address(&addr), &new_name);
}

#[given(expr = "the submodel {string} is removed")]
fn remove_submodel(world: &mut BinderWorld, id_short: String) {
    world.tree.submodels.retain(|s| s.id_short != id_short);
}

#[given(expr = "the submodel {string} is duplicated as {string}")]
fn copy_submodel(world: &mut BinderWorld, source: String, new_id_short: String) {
    let new_id = format!("https://example.com/ids/sm/{}", new_id_short);
    let outcome = duplicate_submodel(&mut world.tree, &source, &new_id, &new_id_short);
    assert!(outcome.is_applied(), "Setup duplication failed: {:?}", outcome);
}

#[given(expr = "{string} in {string} is duplicated as {string}")]
fn copy_collection(world: &mut BinderWorld, source: String, submodel: String, new_name: String) {
    let outcome = duplicate_collection(&mut world.tree, &submodel, &source, &new_name);
    assert!(outcome.is_applied(), "Setup duplication failed: {:?}", outcome);
}

// =============================================================================
// Binder configuration
// =============================================================================

#[given(expr = "the binder language is {string}")]
fn set_language(world: &mut BinderWorld, language: String) {
    let config = world
        .binder
        .config()
        .clone()
        .with_language(language)
        .expect("Invalid language");
    world.binder = ValueBinder::new(config);
}

#[given(expr = "the reference key type is {string}")]
fn set_key_type(world: &mut BinderWorld, key_type: String) {
    let key_type = key_type.parse().expect("Unknown key type");
    let config: BinderConfig = world.binder.config().clone().with_reference_key_type(key_type);
    world.binder = ValueBinder::new(config);
}

// =============================================================================
// Transfer object
// =============================================================================

#[given("the transfer object:")]
fn set_transfer_object(world: &mut BinderWorld, step: &Step) {
    let json = step.docstring.as_ref().expect("Step needs a JSON docstring");
    world.dto = Some(AasDataTransferObject::from_json(json).expect("Invalid transfer object"));
}

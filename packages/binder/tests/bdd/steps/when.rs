//! When step definitions
//!
//! Steps that run binder operations against the document.

use aas_binder::dto::AasDataTransferObject;
use aas_binder::{
    bind, duplicate_collection, instantiate, CarbonFootprintTemplate, PathAddress,
    SubmodelTemplate, TemplateValidator,
};
use cucumber::when;

use crate::world::BinderWorld;

fn address(text: &str) -> PathAddress {
    PathAddress::parse(text).unwrap_or_else(|e| panic!("Bad address '{}': {}", text, e))
}

// =============================================================================
// Value writes
// =============================================================================

#[when(expr = "I set the property at {string} to {string}")]
fn set_property(world: &mut BinderWorld, addr: String, value: String) {
    world.outcome = Some(world.binder.set_property(value, &mut world.tree, &address(&addr)));
}

#[when(expr = "I set the multi-language property at {string} to {string}")]
fn set_multilanguage(world: &mut BinderWorld, addr: String, text: String) {
    world.outcome = Some(world.binder.set_multilanguage(text, &mut world.tree, &address(&addr)));
}

#[when(expr = "I set the reference at {string} to {string}")]
fn set_reference(world: &mut BinderWorld, addr: String, value: String) {
    world.outcome = Some(world.binder.set_reference(value, &mut world.tree, &address(&addr)));
}

#[when(expr = "I duplicate {string} in {string} as {string}")]
fn duplicate(world: &mut BinderWorld, source: String, submodel: String, new_name: String) {
    world.outcome = Some(duplicate_collection(&mut world.tree, &submodel, &source, &new_name));
}

// =============================================================================
// Templates
// =============================================================================

#[when(expr = "I validate the document against {string}")]
fn validate(world: &mut BinderWorld, template: String) {
    let validator = TemplateValidator::new(&world.store);
    let valid = validator
        .validate(&template, &world.tree, &template)
        .expect("Template lookup failed");
    world.valid = Some(valid);
}

#[when("I bind the carbon footprint template")]
fn bind_carbon_footprint(world: &mut BinderWorld) {
    let mut view = CarbonFootprintTemplate::default();
    match bind(&mut view, &world.tree, &CarbonFootprintTemplate::descriptor()) {
        Ok(report) => {
            world.view = Some(view);
            world.report = Some(report);
        }
        Err(e) => world.error = Some(e),
    }
}

#[when("I instantiate the carbon footprint template")]
fn instantiate_carbon_footprint(world: &mut BinderWorld) {
    match instantiate::<CarbonFootprintTemplate, _>(&world.store, &world.tree) {
        Ok(view) => world.view = Some(view),
        Err(e) => world.error = Some(e),
    }
}

// =============================================================================
// Transfer object
// =============================================================================

#[when("I build a document from the transfer object")]
fn build_document(world: &mut BinderWorld) {
    let dto = world.dto.as_ref().expect("No transfer object given");
    let tree = dto
        .to_document(&world.store, &world.binder)
        .expect("Failed to build document");
    world.set_document(tree);
}

#[when("I read the transfer object back")]
fn read_back(world: &mut BinderWorld) {
    world.dto = Some(AasDataTransferObject::from_tree(&world.tree, &world.binder, "bdd"));
}

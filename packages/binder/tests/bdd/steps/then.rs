//! Then step definitions
//!
//! Steps that verify outcomes and assertions.

use aas_binder::binder::Outcome;
use aas_binder::config::BLANK;
use aas_binder::{BinderError, CarbonFootprintTemplate, Lookup, PathAddress};
use cucumber::then;
use pretty_assertions::assert_eq;

use crate::world::BinderWorld;

fn address(text: &str) -> PathAddress {
    PathAddress::parse(text).unwrap_or_else(|e| panic!("Bad address '{}': {}", text, e))
}

/// Address bound to a slot of the carbon footprint view
fn slot_address(view: &CarbonFootprintTemplate, slot: &str) -> Option<PathAddress> {
    let field = match slot {
        "PRODUCT_CARBON_FOOTPRINT" => &view.product_carbon_footprint,
        "PRODUCT_CARBON_FOOTPRINT_PCF_CALCULATION_METHOD" => &view.pcf_calculation_method,
        "PRODUCT_CARBON_FOOTPRINT_PCF_CO2EQ" => &view.pcf_co2eq,
        "PRODUCT_CARBON_FOOTPRINT_PCF_REFERENCE_VALUE_FOR_CALCULATION" => {
            &view.pcf_reference_value_for_calculation
        }
        "PRODUCT_CARBON_FOOTPRINT_PCF_QUANTITY_OF_MEASURE_FOR_CALCULATION" => {
            &view.pcf_quantity_of_measure_for_calculation
        }
        "PRODUCT_CARBON_FOOTPRINT_PCF_LIVE_CYCLE_PHASE" => &view.pcf_live_cycle_phase,
        "PRODUCT_CARBON_FOOTPRINT_PCF_GOODS_ADDRESS_HANDOVER" => &view.pcf_goods_address_handover,
        "TRANSPORT_CARBON_FOOTPRINT" => &view.transport_carbon_footprint,
        "TRANSPORT_CARBON_FOOTPRINT_TCF_CALCULATION_METHOD" => &view.tcf_calculation_method,
        "TRANSPORT_CARBON_FOOTPRINT_TCF_CO2EQ" => &view.tcf_co2eq,
        "TRANSPORT_CARBON_FOOTPRINT_PUBLICATION_DATE" => &view.tcf_publication_date,
        "TRANSPORT_CARBON_FOOTPRINT_EXPIRATION_DATE" => &view.tcf_expiration_date,
        other => panic!("Unknown slot '{}'", other),
    };
    field.clone()
}

// =============================================================================
// Values
// =============================================================================

#[then(expr = "the property at {string} is {string}")]
fn assert_property(world: &mut BinderWorld, addr: String, expected: String) {
    assert_eq!(world.binder.get_property(&world.tree, &address(&addr)), expected);
}

#[then(expr = "the property at {string} is blank")]
fn assert_property_blank(world: &mut BinderWorld, addr: String) {
    assert_eq!(world.binder.get_property(&world.tree, &address(&addr)), BLANK);
}

#[then(expr = "the multi-language property at {string} is {string} in {string}")]
fn assert_multilanguage(world: &mut BinderWorld, addr: String, text: String, language: String) {
    let entries = world.binder.get_multilanguage(&world.tree, &address(&addr));
    assert_eq!(entries.len(), 1, "Expected a single entry, got {:?}", entries);
    assert_eq!(entries[0].text, text);
    assert_eq!(entries[0].language, language);
}

#[then(expr = "the reference at {string} is {string} with key type {string}")]
fn assert_reference(world: &mut BinderWorld, addr: String, value: String, key_type: String) {
    let addr = address(&addr);
    assert_eq!(world.binder.get_reference(&world.tree, &addr), value);

    let Lookup::Found(Some(reference)) = world.binder.lookup_reference(&world.tree, &addr) else {
        panic!("Reference at {} has no value", addr);
    };
    assert_eq!(reference.keys[0].key_type.to_string(), key_type);
}

#[then("the write is applied")]
fn assert_applied(world: &mut BinderWorld) {
    assert_eq!(world.outcome, Some(Outcome::Applied));
}

#[then("the write is skipped")]
fn assert_skipped(world: &mut BinderWorld) {
    assert!(
        matches!(world.outcome, Some(Outcome::Skipped(_))),
        "Expected a skipped write, got {:?}",
        world.outcome
    );
}

#[then("the document is unchanged")]
fn assert_unchanged(world: &mut BinderWorld) {
    assert_eq!(world.tree, world.snapshot);
}

// =============================================================================
// Templates
// =============================================================================

#[then("the document is valid")]
fn assert_valid(world: &mut BinderWorld) {
    assert_eq!(world.valid, Some(true));
}

#[then("the document is not valid")]
fn assert_not_valid(world: &mut BinderWorld) {
    assert_eq!(world.valid, Some(false));
}

#[then("binding succeeds")]
fn assert_bound(world: &mut BinderWorld) {
    assert!(
        world.error.is_none(),
        "Expected binding to succeed, got error: {:?}",
        world.error.as_ref().map(|e| e.to_string())
    );
    assert!(world.view.is_some());
}

#[then(expr = "the slot {string} is bound to {string}")]
fn assert_slot(world: &mut BinderWorld, slot: String, addr: String) {
    let view = world.view.as_ref().expect("No template view bound");
    assert_eq!(slot_address(view, &slot), Some(address(&addr)));
}

#[then(expr = "the bound value of {string} is {string}")]
fn assert_slot_value(world: &mut BinderWorld, slot: String, expected: String) {
    let view = world.view.as_ref().expect("No template view bound");
    let addr = slot_address(view, &slot).unwrap_or_else(|| panic!("Slot {} not bound", slot));
    assert_eq!(world.binder.get_property(&world.tree, &addr), expected);
}

#[then("binding fails because the submodel is missing")]
fn assert_missing_submodel(world: &mut BinderWorld) {
    assert!(
        matches!(world.error, Some(BinderError::RequiredSlotMissing { .. })),
        "Expected RequiredSlotMissing, got {:?}",
        world.error.as_ref().map(|e| e.to_string())
    );
}

#[then("binding fails because the document does not conform")]
fn assert_mismatch(world: &mut BinderWorld) {
    assert!(
        matches!(world.error, Some(BinderError::StructuralMismatch { .. })),
        "Expected StructuralMismatch, got {:?}",
        world.error.as_ref().map(|e| e.to_string())
    );
}

// =============================================================================
// Transfer object
// =============================================================================

#[then(expr = "the transfer object has {int} product carbon footprints")]
fn assert_pcf_count(world: &mut BinderWorld, count: usize) {
    let dto = world.dto.as_ref().expect("No transfer object");
    assert_eq!(dto.submodels.carbon_footprint.product_carbon_footprint.len(), count);
}

#[then(expr = "the transfer object has {int} transport carbon footprints")]
fn assert_tcf_count(world: &mut BinderWorld, count: usize) {
    let dto = world.dto.as_ref().expect("No transfer object");
    assert_eq!(dto.submodels.carbon_footprint.transport_carbon_footprint.len(), count);
}

#[then(expr = "product carbon footprint {int} has PCFCO2eq {string}")]
fn assert_pcf_co2eq(world: &mut BinderWorld, index: usize, expected: String) {
    let dto = world.dto.as_ref().expect("No transfer object");
    let record = &dto.submodels.carbon_footprint.product_carbon_footprint[index - 1];
    assert_eq!(record.pcf_co2eq.as_deref(), Some(expected.as_str()));
}

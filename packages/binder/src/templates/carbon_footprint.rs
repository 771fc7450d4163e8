//! Typed view over the CarbonFootprint submodel

use crate::binder::{Outcome, ValueBinder};
use crate::navigator::NotFound;
use crate::path::PathAddress;
use crate::template::{Slot, SubmodelTemplate, TemplateDescriptor};
use crate::tree::ElementTree;
use crate::types::NodeKind;

/// Slot addresses of the first product and transport footprint groups.
///
/// Built by [`crate::template::bind`] or [`crate::template::instantiate`].
/// Fields are `None` when the document lacks the node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarbonFootprintTemplate {
    /// id_short of the bound submodel
    pub submodel: Option<String>,

    pub product_carbon_footprint: Option<PathAddress>,
    pub pcf_calculation_method: Option<PathAddress>,
    pub pcf_co2eq: Option<PathAddress>,
    pub pcf_reference_value_for_calculation: Option<PathAddress>,
    pub pcf_quantity_of_measure_for_calculation: Option<PathAddress>,
    pub pcf_live_cycle_phase: Option<PathAddress>,
    pub pcf_goods_address_handover: Option<PathAddress>,

    pub transport_carbon_footprint: Option<PathAddress>,
    pub tcf_calculation_method: Option<PathAddress>,
    pub tcf_co2eq: Option<PathAddress>,
    pub tcf_publication_date: Option<PathAddress>,
    pub tcf_expiration_date: Option<PathAddress>,
}

const SLOTS: &[Slot<CarbonFootprintTemplate>] = &[
    Slot {
        name: "PRODUCT_CARBON_FOOTPRINT",
        kind: NodeKind::Collection,
        bind: |t, a| t.product_carbon_footprint = Some(a),
    },
    Slot {
        name: "PRODUCT_CARBON_FOOTPRINT_PCF_CALCULATION_METHOD",
        kind: NodeKind::Property,
        bind: |t, a| t.pcf_calculation_method = Some(a),
    },
    Slot {
        name: "PRODUCT_CARBON_FOOTPRINT_PCF_CO2EQ",
        kind: NodeKind::Property,
        bind: |t, a| t.pcf_co2eq = Some(a),
    },
    Slot {
        name: "PRODUCT_CARBON_FOOTPRINT_PCF_REFERENCE_VALUE_FOR_CALCULATION",
        kind: NodeKind::Property,
        bind: |t, a| t.pcf_reference_value_for_calculation = Some(a),
    },
    Slot {
        name: "PRODUCT_CARBON_FOOTPRINT_PCF_QUANTITY_OF_MEASURE_FOR_CALCULATION",
        kind: NodeKind::Property,
        bind: |t, a| t.pcf_quantity_of_measure_for_calculation = Some(a),
    },
    Slot {
        name: "PRODUCT_CARBON_FOOTPRINT_PCF_LIVE_CYCLE_PHASE",
        kind: NodeKind::Property,
        bind: |t, a| t.pcf_live_cycle_phase = Some(a),
    },
    Slot {
        name: "PRODUCT_CARBON_FOOTPRINT_PCF_GOODS_ADDRESS_HANDOVER",
        kind: NodeKind::Collection,
        bind: |t, a| t.pcf_goods_address_handover = Some(a),
    },
    Slot {
        name: "TRANSPORT_CARBON_FOOTPRINT",
        kind: NodeKind::Collection,
        bind: |t, a| t.transport_carbon_footprint = Some(a),
    },
    Slot {
        name: "TRANSPORT_CARBON_FOOTPRINT_TCF_CALCULATION_METHOD",
        kind: NodeKind::Property,
        bind: |t, a| t.tcf_calculation_method = Some(a),
    },
    Slot {
        name: "TRANSPORT_CARBON_FOOTPRINT_TCF_CO2EQ",
        kind: NodeKind::Property,
        bind: |t, a| t.tcf_co2eq = Some(a),
    },
    Slot {
        name: "TRANSPORT_CARBON_FOOTPRINT_PUBLICATION_DATE",
        kind: NodeKind::Property,
        bind: |t, a| t.tcf_publication_date = Some(a),
    },
    Slot {
        name: "TRANSPORT_CARBON_FOOTPRINT_EXPIRATION_DATE",
        kind: NodeKind::Property,
        bind: |t, a| t.tcf_expiration_date = Some(a),
    },
];

impl SubmodelTemplate for CarbonFootprintTemplate {
    fn descriptor() -> TemplateDescriptor<Self> {
        TemplateDescriptor {
            template_name: "CarbonFootprint",
            marker: "CarbonFootprint",
            root: |t, submodel| t.submodel = Some(submodel.id_short.clone()),
            slots: SLOTS,
        }
    }
}

fn read(binder: &ValueBinder, tree: &ElementTree, slot: Option<&PathAddress>) -> String {
    match slot {
        Some(address) => binder.get_property(tree, address),
        None => crate::config::BLANK.to_string(),
    }
}

fn write(
    binder: &ValueBinder,
    tree: &mut ElementTree,
    slot: Option<&PathAddress>,
    name: &'static str,
    value: &str,
) -> Outcome {
    match slot {
        Some(address) => binder.set_property(value, tree, address),
        None => Outcome::Skipped(NotFound::Unbound(name)),
    }
}

impl CarbonFootprintTemplate {
    /// Whether both footprint groups were found
    pub fn is_complete(&self) -> bool {
        self.product_carbon_footprint.is_some() && self.transport_carbon_footprint.is_some()
    }

    pub fn pcf_co2eq(&self, binder: &ValueBinder, tree: &ElementTree) -> String {
        read(binder, tree, self.pcf_co2eq.as_ref())
    }

    pub fn set_pcf_co2eq(
        &self,
        binder: &ValueBinder,
        tree: &mut ElementTree,
        value: &str,
    ) -> Outcome {
        write(
            binder,
            tree,
            self.pcf_co2eq.as_ref(),
            "PRODUCT_CARBON_FOOTPRINT_PCF_CO2EQ",
            value,
        )
    }

    pub fn pcf_calculation_method(&self, binder: &ValueBinder, tree: &ElementTree) -> String {
        read(binder, tree, self.pcf_calculation_method.as_ref())
    }

    pub fn set_pcf_calculation_method(
        &self,
        binder: &ValueBinder,
        tree: &mut ElementTree,
        value: &str,
    ) -> Outcome {
        write(
            binder,
            tree,
            self.pcf_calculation_method.as_ref(),
            "PRODUCT_CARBON_FOOTPRINT_PCF_CALCULATION_METHOD",
            value,
        )
    }

    pub fn tcf_co2eq(&self, binder: &ValueBinder, tree: &ElementTree) -> String {
        read(binder, tree, self.tcf_co2eq.as_ref())
    }

    pub fn set_tcf_co2eq(
        &self,
        binder: &ValueBinder,
        tree: &mut ElementTree,
        value: &str,
    ) -> Outcome {
        write(
            binder,
            tree,
            self.tcf_co2eq.as_ref(),
            "TRANSPORT_CARBON_FOOTPRINT_TCF_CO2EQ",
            value,
        )
    }

    pub fn tcf_publication_date(&self, binder: &ValueBinder, tree: &ElementTree) -> String {
        read(binder, tree, self.tcf_publication_date.as_ref())
    }

    pub fn tcf_expiration_date(&self, binder: &ValueBinder, tree: &ElementTree) -> String {
        read(binder, tree, self.tcf_expiration_date.as_ref())
    }
}

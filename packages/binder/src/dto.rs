//! Flat transfer object for asset documents
//!
//! [`AasDataTransferObject`] is the JSON shape exchanged with clients. It maps
//! onto a complete asset document through static lookup tables: every DTO
//! field names a [`FieldTag`] (leaf id_short), the [`CollectionTag`] it sits
//! in, and accessors for the DTO side.
//!
//! # Repeated groups
//!
//! The base document holds one `ProductCarbonFootprint` and one
//! `TransportCarbonFootprint`. The n-th record (n > 1) is written to
//! `ProductCarbonFootprint_n`, which is created from the first group with its
//! mapped values cleared when the document lacks it. Reading yields one record
//! per group whose id_short starts with the base name.
//!
//! # Example
//!
//! ```
//! use aas_binder::dto::AasDataTransferObject;
//!
//! let json = r#"{
//!     "sender": "plant-7",
//!     "assetIDShort": "Pump01",
//!     "submodels": {
//!         "CarbonFootprint": {
//!             "ProductCarbonFootprint": [{ "PCFCO2eq": "12.5" }, { "PCFCO2eq": "7.0" }]
//!         }
//!     }
//! }"#;
//! let dto = AasDataTransferObject::from_json(json).unwrap();
//! assert_eq!(dto.submodels.carbon_footprint.product_carbon_footprint.len(), 2);
//! ```

use crate::binder::{Outcome, ValueBinder};
use crate::duplicate;
use crate::error::Result;
use crate::navigator::{self, Lookup, NotFound};
use crate::path::PathAddress;
use crate::provider::TemplateProvider;
use crate::tree::ElementTree;
use crate::types::{Node, NodeKind};
use serde::{Deserialize, Serialize};

/// Template the DTO is written into
pub const BASE_TEMPLATE: &str = "FullAASTemplate";

pub const NAMEPLATE: &str = "Nameplate";
pub const TECHNICAL_DATA: &str = "TechnicalData";
pub const CARBON_FOOTPRINT: &str = "CarbonFootprint";

// =============================================================================
// Lookup tables
// =============================================================================

/// Leaf elements the DTO maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    // ProductCarbonFootprint
    PcfAssetReference,
    PcfCalculationMethod,
    PcfCo2eq,
    PcfReferenceValueForCalculation,
    PcfQuantityOfMeasureForCalculation,
    PcfLiveCyclePhase,
    PcfAssetDescription,

    // Address
    Street,
    HouseNumber,
    ZipCode,
    CityTown,
    Country,
    Latitude,
    Longitude,

    // TransportCarbonFootprint
    TcfCalculationMethod,
    TcfCo2eq,
    TcfReferenceValueForCalculation,
    TcfQuantityOfMeasureForCalculation,
    TcfProcessesForGreenhouseGasEmissionInATransportService,

    // Nameplate
    UriOfTheProduct,
    ManufacturerName,
    SerialNumber,
    YearOfConstruction,
    DateOfManufacture,

    // TechnicalData
    ManufacturerOrderCode,
    ManufacturerLogo,
    ProductImage,
}

impl FieldTag {
    pub const fn id_short(self) -> &'static str {
        match self {
            FieldTag::PcfAssetReference => "PCFAssetReference",
            FieldTag::PcfCalculationMethod => "PCFCalculationMethod",
            FieldTag::PcfCo2eq => "PCFCO2eq",
            FieldTag::PcfReferenceValueForCalculation => "PCFReferenceValueForCalculation",
            FieldTag::PcfQuantityOfMeasureForCalculation => "PCFQuantityOfMeasureForCalculation",
            FieldTag::PcfLiveCyclePhase => "PCFLiveCyclePhase",
            FieldTag::PcfAssetDescription => "PCFAssetDescription",
            FieldTag::Street => "Street",
            FieldTag::HouseNumber => "HouseNumber",
            FieldTag::ZipCode => "ZipCode",
            FieldTag::CityTown => "CityTown",
            FieldTag::Country => "Country",
            FieldTag::Latitude => "Latitude",
            FieldTag::Longitude => "Longitude",
            FieldTag::TcfCalculationMethod => "TCFCalculationMethod",
            FieldTag::TcfCo2eq => "TCFCO2eq",
            FieldTag::TcfReferenceValueForCalculation => "TCFReferenceValueForCalculation",
            FieldTag::TcfQuantityOfMeasureForCalculation => "TCFQuantityOfMeasureForCalculation",
            FieldTag::TcfProcessesForGreenhouseGasEmissionInATransportService => {
                "TCFProcessesForGreenhouseGasEmissionInATransportService"
            }
            FieldTag::UriOfTheProduct => "URIOfTheProduct",
            FieldTag::ManufacturerName => "ManufacturerName",
            FieldTag::SerialNumber => "SerialNumber",
            FieldTag::YearOfConstruction => "YearOfConstruction",
            FieldTag::DateOfManufacture => "DateOfManufacture",
            FieldTag::ManufacturerOrderCode => "ManufacturerOrderCode",
            FieldTag::ManufacturerLogo => "ManufacturerLogo",
            FieldTag::ProductImage => "ProductImage",
        }
    }

    /// Element kind the tag is stored as
    pub const fn kind(self) -> NodeKind {
        match self {
            FieldTag::PcfAssetReference => NodeKind::ReferenceElement,
            FieldTag::ManufacturerName => NodeKind::MultiLanguageProperty,
            FieldTag::ManufacturerLogo | FieldTag::ProductImage => NodeKind::File,
            _ => NodeKind::Property,
        }
    }
}

/// Collections the DTO maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionTag {
    ProductCarbonFootprint,
    TransportCarbonFootprint,
    PcfGoodsAddressHandover,
    TcfGoodsTransportAddressTakeover,
    TcfGoodsTransportAddressHandover,
    GeneralInformation,
}

impl CollectionTag {
    pub const fn id_short(self) -> &'static str {
        match self {
            CollectionTag::ProductCarbonFootprint => "ProductCarbonFootprint",
            CollectionTag::TransportCarbonFootprint => "TransportCarbonFootprint",
            CollectionTag::PcfGoodsAddressHandover => "PCFGoodsAddressHandover",
            CollectionTag::TcfGoodsTransportAddressTakeover => "TCFGoodsTransportAddressTakeover",
            CollectionTag::TcfGoodsTransportAddressHandover => "TCFGoodsTransportAddressHandover",
            CollectionTag::GeneralInformation => "GeneralInformation",
        }
    }
}

/// One DTO field and where it lives in the document
struct Mapping<R> {
    tag: FieldTag,
    within: Option<CollectionTag>,
    get: fn(&R) -> Option<&str>,
    set: fn(&mut R, String),
}

impl<R> Mapping<R> {
    /// Address below `submodel`, optionally inside a repeated `group`
    fn address(&self, submodel: &str, group: Option<&str>) -> PathAddress {
        let collections = group
            .into_iter()
            .chain(self.within.map(CollectionTag::id_short));
        PathAddress::nested(submodel, collections, self.tag.id_short())
    }
}

// =============================================================================
// Transfer object
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AasDataTransferObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(rename = "assetIDShort", default, skip_serializing_if = "Option::is_none")]
    pub asset_id_short: Option<String>,
    #[serde(rename = "assetID", default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub submodels: Submodels,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submodels {
    #[serde(rename = "Nameplate", default)]
    pub nameplate: Nameplate,
    #[serde(rename = "TechnicalData", default)]
    pub technical_data: TechnicalData,
    #[serde(rename = "CarbonFootprint", default)]
    pub carbon_footprint: CarbonFootprint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nameplate {
    #[serde(rename = "URIOfTheProduct", default, skip_serializing_if = "Option::is_none")]
    pub uri_of_the_product: Option<String>,
    #[serde(rename = "ManufacturerName", default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_name: Option<String>,
    #[serde(rename = "SerialNumber", default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(rename = "YearOfConstruction", default, skip_serializing_if = "Option::is_none")]
    pub year_of_construction: Option<String>,
    #[serde(rename = "DateOfManufacture", default, skip_serializing_if = "Option::is_none")]
    pub date_of_manufacture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalData {
    #[serde(rename = "ManufacturerOrderCode", default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_order_code: Option<String>,
    /// Path of the logo file inside the package
    #[serde(rename = "ManufacturerLogo", default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_logo: Option<String>,
    #[serde(rename = "ProductImage", default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarbonFootprint {
    #[serde(rename = "ProductCarbonFootprint", default)]
    pub product_carbon_footprint: Vec<ProductCarbonFootprint>,
    #[serde(rename = "TransportCarbonFootprint", default)]
    pub transport_carbon_footprint: Vec<TransportCarbonFootprint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCarbonFootprint {
    #[serde(rename = "ReferableAssetID", default, skip_serializing_if = "Option::is_none")]
    pub referable_asset_id: Option<String>,
    #[serde(rename = "PCFCalculationMethod", default, skip_serializing_if = "Option::is_none")]
    pub pcf_calculation_method: Option<String>,
    #[serde(rename = "PCFCO2eq", default, skip_serializing_if = "Option::is_none")]
    pub pcf_co2eq: Option<String>,
    #[serde(
        rename = "PCFQuantityOfMeasureForCalculation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pcf_quantity_of_measure_for_calculation: Option<String>,
    #[serde(
        rename = "PCFReferenceValueForCalculation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pcf_reference_value_for_calculation: Option<String>,
    #[serde(rename = "PCFLiveCyclePhase", default, skip_serializing_if = "Option::is_none")]
    pub pcf_live_cycle_phase: Option<String>,
    #[serde(rename = "PCFDescription", default, skip_serializing_if = "Option::is_none")]
    pub pcf_description: Option<String>,
    /// Free text kept on the DTO only; the document has no element for it
    #[serde(rename = "ExplanatoryStatement", default, skip_serializing_if = "Option::is_none")]
    pub explanatory_statement: Option<String>,
    #[serde(rename = "PCFHandoverStreet", default, skip_serializing_if = "Option::is_none")]
    pub pcf_handover_street: Option<String>,
    #[serde(rename = "PCFHandoverNumber", default, skip_serializing_if = "Option::is_none")]
    pub pcf_handover_number: Option<String>,
    #[serde(rename = "PCFHandoverCity", default, skip_serializing_if = "Option::is_none")]
    pub pcf_handover_city: Option<String>,
    #[serde(rename = "PCFHandoverZIP", default, skip_serializing_if = "Option::is_none")]
    pub pcf_handover_zip: Option<String>,
    #[serde(rename = "PCFHandoverCountry", default, skip_serializing_if = "Option::is_none")]
    pub pcf_handover_country: Option<String>,
    #[serde(rename = "PCFHandoverLatitude", default, skip_serializing_if = "Option::is_none")]
    pub pcf_handover_latitude: Option<String>,
    #[serde(rename = "PCFHandoverLongitude", default, skip_serializing_if = "Option::is_none")]
    pub pcf_handover_longitude: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportCarbonFootprint {
    #[serde(rename = "TCFCalculationMethod", default, skip_serializing_if = "Option::is_none")]
    pub tcf_calculation_method: Option<String>,
    #[serde(rename = "TCFCO2eq", default, skip_serializing_if = "Option::is_none")]
    pub tcf_co2eq: Option<String>,
    #[serde(
        rename = "TCFQuantityOfMeasureForCalculation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tcf_quantity_of_measure_for_calculation: Option<String>,
    #[serde(
        rename = "TCFReferenceValueForCalculation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tcf_reference_value_for_calculation: Option<String>,
    #[serde(
        rename = "TCFProcessesForGreenhouseGasEmissionInATransportService",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tcf_processes_for_greenhouse_gas_emission_in_a_transport_service: Option<String>,
    #[serde(rename = "TCFTakeoverStreet", default, skip_serializing_if = "Option::is_none")]
    pub tcf_takeover_street: Option<String>,
    #[serde(rename = "TCFTakeoverNumber", default, skip_serializing_if = "Option::is_none")]
    pub tcf_takeover_number: Option<String>,
    #[serde(rename = "TCFTakeoverCity", default, skip_serializing_if = "Option::is_none")]
    pub tcf_takeover_city: Option<String>,
    #[serde(rename = "TCFTakeoverZIP", default, skip_serializing_if = "Option::is_none")]
    pub tcf_takeover_zip: Option<String>,
    #[serde(rename = "TCFTakeoverCountry", default, skip_serializing_if = "Option::is_none")]
    pub tcf_takeover_country: Option<String>,
    #[serde(rename = "TCFTakeoverLatitude", default, skip_serializing_if = "Option::is_none")]
    pub tcf_takeover_latitude: Option<String>,
    #[serde(rename = "TCFTakeoverLongitude", default, skip_serializing_if = "Option::is_none")]
    pub tcf_takeover_longitude: Option<String>,
    #[serde(rename = "TCFHandoverStreet", default, skip_serializing_if = "Option::is_none")]
    pub tcf_handover_street: Option<String>,
    #[serde(rename = "TCFHandoverNumber", default, skip_serializing_if = "Option::is_none")]
    pub tcf_handover_number: Option<String>,
    #[serde(rename = "TCFHandoverCity", default, skip_serializing_if = "Option::is_none")]
    pub tcf_handover_city: Option<String>,
    #[serde(rename = "TCFHandoverZIP", default, skip_serializing_if = "Option::is_none")]
    pub tcf_handover_zip: Option<String>,
    #[serde(rename = "TCFHandoverCountry", default, skip_serializing_if = "Option::is_none")]
    pub tcf_handover_country: Option<String>,
    #[serde(rename = "TCFHandoverLatitude", default, skip_serializing_if = "Option::is_none")]
    pub tcf_handover_latitude: Option<String>,
    #[serde(rename = "TCFHandoverLongitude", default, skip_serializing_if = "Option::is_none")]
    pub tcf_handover_longitude: Option<String>,
}

// =============================================================================
// Field tables
// =============================================================================

const NAMEPLATE_FIELDS: &[Mapping<Nameplate>] = &[
    Mapping {
        tag: FieldTag::UriOfTheProduct,
        within: None,
        get: |r| r.uri_of_the_product.as_deref(),
        set: |r, v| r.uri_of_the_product = Some(v),
    },
    Mapping {
        tag: FieldTag::ManufacturerName,
        within: None,
        get: |r| r.manufacturer_name.as_deref(),
        set: |r, v| r.manufacturer_name = Some(v),
    },
    Mapping {
        tag: FieldTag::SerialNumber,
        within: None,
        get: |r| r.serial_number.as_deref(),
        set: |r, v| r.serial_number = Some(v),
    },
    Mapping {
        tag: FieldTag::YearOfConstruction,
        within: None,
        get: |r| r.year_of_construction.as_deref(),
        set: |r, v| r.year_of_construction = Some(v),
    },
    Mapping {
        tag: FieldTag::DateOfManufacture,
        within: None,
        get: |r| r.date_of_manufacture.as_deref(),
        set: |r, v| r.date_of_manufacture = Some(v),
    },
];

const TECHNICAL_DATA_FIELDS: &[Mapping<TechnicalData>] = &[
    Mapping {
        tag: FieldTag::ManufacturerOrderCode,
        within: Some(CollectionTag::GeneralInformation),
        get: |r| r.manufacturer_order_code.as_deref(),
        set: |r, v| r.manufacturer_order_code = Some(v),
    },
    Mapping {
        tag: FieldTag::ManufacturerLogo,
        within: Some(CollectionTag::GeneralInformation),
        get: |r| r.manufacturer_logo.as_deref(),
        set: |r, v| r.manufacturer_logo = Some(v),
    },
    Mapping {
        tag: FieldTag::ProductImage,
        within: Some(CollectionTag::GeneralInformation),
        get: |r| r.product_image.as_deref(),
        set: |r, v| r.product_image = Some(v),
    },
];

const PCF_FIELDS: &[Mapping<ProductCarbonFootprint>] = &[
    Mapping {
        tag: FieldTag::PcfAssetReference,
        within: None,
        get: |r| r.referable_asset_id.as_deref(),
        set: |r, v| r.referable_asset_id = Some(v),
    },
    Mapping {
        tag: FieldTag::PcfCalculationMethod,
        within: None,
        get: |r| r.pcf_calculation_method.as_deref(),
        set: |r, v| r.pcf_calculation_method = Some(v),
    },
    Mapping {
        tag: FieldTag::PcfCo2eq,
        within: None,
        get: |r| r.pcf_co2eq.as_deref(),
        set: |r, v| r.pcf_co2eq = Some(v),
    },
    Mapping {
        tag: FieldTag::PcfQuantityOfMeasureForCalculation,
        within: None,
        get: |r| r.pcf_quantity_of_measure_for_calculation.as_deref(),
        set: |r, v| r.pcf_quantity_of_measure_for_calculation = Some(v),
    },
    Mapping {
        tag: FieldTag::PcfReferenceValueForCalculation,
        within: None,
        get: |r| r.pcf_reference_value_for_calculation.as_deref(),
        set: |r, v| r.pcf_reference_value_for_calculation = Some(v),
    },
    Mapping {
        tag: FieldTag::PcfLiveCyclePhase,
        within: None,
        get: |r| r.pcf_live_cycle_phase.as_deref(),
        set: |r, v| r.pcf_live_cycle_phase = Some(v),
    },
    Mapping {
        tag: FieldTag::PcfAssetDescription,
        within: None,
        get: |r| r.pcf_description.as_deref(),
        set: |r, v| r.pcf_description = Some(v),
    },
    Mapping {
        tag: FieldTag::Street,
        within: Some(CollectionTag::PcfGoodsAddressHandover),
        get: |r| r.pcf_handover_street.as_deref(),
        set: |r, v| r.pcf_handover_street = Some(v),
    },
    Mapping {
        tag: FieldTag::HouseNumber,
        within: Some(CollectionTag::PcfGoodsAddressHandover),
        get: |r| r.pcf_handover_number.as_deref(),
        set: |r, v| r.pcf_handover_number = Some(v),
    },
    Mapping {
        tag: FieldTag::CityTown,
        within: Some(CollectionTag::PcfGoodsAddressHandover),
        get: |r| r.pcf_handover_city.as_deref(),
        set: |r, v| r.pcf_handover_city = Some(v),
    },
    Mapping {
        tag: FieldTag::ZipCode,
        within: Some(CollectionTag::PcfGoodsAddressHandover),
        get: |r| r.pcf_handover_zip.as_deref(),
        set: |r, v| r.pcf_handover_zip = Some(v),
    },
    Mapping {
        tag: FieldTag::Country,
        within: Some(CollectionTag::PcfGoodsAddressHandover),
        get: |r| r.pcf_handover_country.as_deref(),
        set: |r, v| r.pcf_handover_country = Some(v),
    },
    Mapping {
        tag: FieldTag::Latitude,
        within: Some(CollectionTag::PcfGoodsAddressHandover),
        get: |r| r.pcf_handover_latitude.as_deref(),
        set: |r, v| r.pcf_handover_latitude = Some(v),
    },
    Mapping {
        tag: FieldTag::Longitude,
        within: Some(CollectionTag::PcfGoodsAddressHandover),
        get: |r| r.pcf_handover_longitude.as_deref(),
        set: |r, v| r.pcf_handover_longitude = Some(v),
    },
];

const TCF_FIELDS: &[Mapping<TransportCarbonFootprint>] = &[
    Mapping {
        tag: FieldTag::TcfCalculationMethod,
        within: None,
        get: |r| r.tcf_calculation_method.as_deref(),
        set: |r, v| r.tcf_calculation_method = Some(v),
    },
    Mapping {
        tag: FieldTag::TcfCo2eq,
        within: None,
        get: |r| r.tcf_co2eq.as_deref(),
        set: |r, v| r.tcf_co2eq = Some(v),
    },
    Mapping {
        tag: FieldTag::TcfReferenceValueForCalculation,
        within: None,
        get: |r| r.tcf_reference_value_for_calculation.as_deref(),
        set: |r, v| r.tcf_reference_value_for_calculation = Some(v),
    },
    Mapping {
        tag: FieldTag::TcfQuantityOfMeasureForCalculation,
        within: None,
        get: |r| r.tcf_quantity_of_measure_for_calculation.as_deref(),
        set: |r, v| r.tcf_quantity_of_measure_for_calculation = Some(v),
    },
    Mapping {
        tag: FieldTag::TcfProcessesForGreenhouseGasEmissionInATransportService,
        within: None,
        get: |r| r.tcf_processes_for_greenhouse_gas_emission_in_a_transport_service.as_deref(),
        set: |r, v| r.tcf_processes_for_greenhouse_gas_emission_in_a_transport_service = Some(v),
    },
    Mapping {
        tag: FieldTag::Street,
        within: Some(CollectionTag::TcfGoodsTransportAddressTakeover),
        get: |r| r.tcf_takeover_street.as_deref(),
        set: |r, v| r.tcf_takeover_street = Some(v),
    },
    Mapping {
        tag: FieldTag::HouseNumber,
        within: Some(CollectionTag::TcfGoodsTransportAddressTakeover),
        get: |r| r.tcf_takeover_number.as_deref(),
        set: |r, v| r.tcf_takeover_number = Some(v),
    },
    Mapping {
        tag: FieldTag::CityTown,
        within: Some(CollectionTag::TcfGoodsTransportAddressTakeover),
        get: |r| r.tcf_takeover_city.as_deref(),
        set: |r, v| r.tcf_takeover_city = Some(v),
    },
    Mapping {
        tag: FieldTag::ZipCode,
        within: Some(CollectionTag::TcfGoodsTransportAddressTakeover),
        get: |r| r.tcf_takeover_zip.as_deref(),
        set: |r, v| r.tcf_takeover_zip = Some(v),
    },
    Mapping {
        tag: FieldTag::Country,
        within: Some(CollectionTag::TcfGoodsTransportAddressTakeover),
        get: |r| r.tcf_takeover_country.as_deref(),
        set: |r, v| r.tcf_takeover_country = Some(v),
    },
    Mapping {
        tag: FieldTag::Latitude,
        within: Some(CollectionTag::TcfGoodsTransportAddressTakeover),
        get: |r| r.tcf_takeover_latitude.as_deref(),
        set: |r, v| r.tcf_takeover_latitude = Some(v),
    },
    Mapping {
        tag: FieldTag::Longitude,
        within: Some(CollectionTag::TcfGoodsTransportAddressTakeover),
        get: |r| r.tcf_takeover_longitude.as_deref(),
        set: |r, v| r.tcf_takeover_longitude = Some(v),
    },
    Mapping {
        tag: FieldTag::Street,
        within: Some(CollectionTag::TcfGoodsTransportAddressHandover),
        get: |r| r.tcf_handover_street.as_deref(),
        set: |r, v| r.tcf_handover_street = Some(v),
    },
    Mapping {
        tag: FieldTag::HouseNumber,
        within: Some(CollectionTag::TcfGoodsTransportAddressHandover),
        get: |r| r.tcf_handover_number.as_deref(),
        set: |r, v| r.tcf_handover_number = Some(v),
    },
    Mapping {
        tag: FieldTag::CityTown,
        within: Some(CollectionTag::TcfGoodsTransportAddressHandover),
        get: |r| r.tcf_handover_city.as_deref(),
        set: |r, v| r.tcf_handover_city = Some(v),
    },
    Mapping {
        tag: FieldTag::ZipCode,
        within: Some(CollectionTag::TcfGoodsTransportAddressHandover),
        get: |r| r.tcf_handover_zip.as_deref(),
        set: |r, v| r.tcf_handover_zip = Some(v),
    },
    Mapping {
        tag: FieldTag::Country,
        within: Some(CollectionTag::TcfGoodsTransportAddressHandover),
        get: |r| r.tcf_handover_country.as_deref(),
        set: |r, v| r.tcf_handover_country = Some(v),
    },
    Mapping {
        tag: FieldTag::Latitude,
        within: Some(CollectionTag::TcfGoodsTransportAddressHandover),
        get: |r| r.tcf_handover_latitude.as_deref(),
        set: |r, v| r.tcf_handover_latitude = Some(v),
    },
    Mapping {
        tag: FieldTag::Longitude,
        within: Some(CollectionTag::TcfGoodsTransportAddressHandover),
        get: |r| r.tcf_handover_longitude.as_deref(),
        set: |r, v| r.tcf_handover_longitude = Some(v),
    },
];

// =============================================================================
// Mapping onto documents
// =============================================================================

/// Outcome of writing a DTO into a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Number of values written
    pub applied: usize,
    /// Addresses whose target was absent from the document
    pub skipped: Vec<(PathAddress, NotFound)>,
}

impl ApplyReport {
    fn record(&mut self, address: PathAddress, outcome: Outcome) {
        match outcome {
            Outcome::Applied => self.applied += 1,
            Outcome::Skipped(reason) => self.skipped.push((address, reason)),
        }
    }
}

fn write_value(
    binder: &ValueBinder,
    tree: &mut ElementTree,
    address: &PathAddress,
    kind: NodeKind,
    value: &str,
) -> Outcome {
    match kind {
        NodeKind::MultiLanguageProperty => binder.set_multilanguage(value, tree, address),
        NodeKind::ReferenceElement => binder.set_reference(value, tree, address),
        NodeKind::File => binder.set_file(value, tree, address),
        NodeKind::Property | NodeKind::Collection => binder.set_property(value, tree, address),
    }
}

fn read_value(
    binder: &ValueBinder,
    tree: &ElementTree,
    address: &PathAddress,
    kind: NodeKind,
) -> String {
    match kind {
        NodeKind::MultiLanguageProperty => binder.get_multilanguage_text(tree, address),
        NodeKind::ReferenceElement => binder.get_reference(tree, address),
        NodeKind::File => binder.get_file(tree, address),
        NodeKind::Property | NodeKind::Collection => binder.get_property(tree, address),
    }
}

fn apply_fields<R>(
    record: &R,
    fields: &[Mapping<R>],
    submodel: &str,
    group: Option<&str>,
    binder: &ValueBinder,
    tree: &mut ElementTree,
    report: &mut ApplyReport,
) {
    for field in fields {
        let Some(value) = (field.get)(record) else {
            continue;
        };
        let address = field.address(submodel, group);
        let outcome = write_value(binder, tree, &address, field.tag.kind(), value);
        report.record(address, outcome);
    }
}

fn read_fields<R: Default>(
    fields: &[Mapping<R>],
    submodel: &str,
    group: Option<&str>,
    binder: &ValueBinder,
    tree: &ElementTree,
) -> R {
    let mut record = R::default();
    for field in fields {
        let address = field.address(submodel, group);
        (field.set)(&mut record, read_value(binder, tree, &address, field.tag.kind()));
    }
    record
}

/// Drop the values of every mapped leaf inside `group`.
fn clear_fields<R>(fields: &[Mapping<R>], group: &str, tree: &mut ElementTree) {
    for field in fields {
        let address = field.address(CARBON_FOOTPRINT, Some(group));
        if let Lookup::Found(node) = navigator::resolve_mut(tree, &address) {
            node.clear_value();
        }
    }
}

/// Write each record into its own `base` group.
///
/// Record n (n > 1) goes to `{base}_{n}`. An existing group of that name is
/// reused. Otherwise the first group is copied and its mapped leaves are
/// cleared, so a record never inherits values of another record.
fn apply_groups<R>(
    records: &[R],
    fields: &[Mapping<R>],
    base: CollectionTag,
    binder: &ValueBinder,
    tree: &mut ElementTree,
    report: &mut ApplyReport,
) {
    let base = base.id_short();
    for (index, record) in records.iter().enumerate() {
        let group = if index == 0 {
            base.to_string()
        } else {
            format!("{}_{}", base, index + 1)
        };

        let exists = tree
            .submodel(CARBON_FOOTPRINT)
            .is_some_and(|submodel| submodel.element(&group).is_some());
        if !exists {
            match duplicate::duplicate_collection(tree, CARBON_FOOTPRINT, base, &group) {
                Outcome::Applied => clear_fields(fields, &group, tree),
                Outcome::Skipped(reason) => {
                    tracing::warn!(
                        group = %group,
                        reason = %reason,
                        "Could not create footprint group"
                    );
                }
            }
        }

        apply_fields(
            record,
            fields,
            CARBON_FOOTPRINT,
            Some(group.as_str()),
            binder,
            tree,
            report,
        );
    }
}

/// id_shorts of the direct child collections of CarbonFootprint starting with `base`
fn group_names(tree: &ElementTree, base: CollectionTag) -> Vec<String> {
    tree.submodel(CARBON_FOOTPRINT)
        .map(|submodel| {
            submodel
                .elements
                .iter()
                .filter(|node| matches!(node, Node::Collection(_)))
                .map(Node::id_short)
                .filter(|name| name.starts_with(base.id_short()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl AasDataTransferObject {
    /// Parse the JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write all present fields into `tree`.
    ///
    /// `None` fields leave the document unchanged. Addresses absent from the
    /// document are collected in the report, not treated as errors.
    pub fn apply_to(&self, tree: &mut ElementTree, binder: &ValueBinder) -> ApplyReport {
        let mut report = ApplyReport::default();

        if let Some(id) = &self.asset_id {
            tree.update_asset_id(id.as_str());
        }
        if let Some(id_short) = &self.asset_id_short {
            tree.update_asset_id_short(id_short.as_str());
        }

        let submodels = &self.submodels;
        apply_fields(
            &submodels.nameplate,
            NAMEPLATE_FIELDS,
            NAMEPLATE,
            None,
            binder,
            tree,
            &mut report,
        );
        apply_fields(
            &submodels.technical_data,
            TECHNICAL_DATA_FIELDS,
            TECHNICAL_DATA,
            None,
            binder,
            tree,
            &mut report,
        );
        apply_groups(
            &submodels.carbon_footprint.product_carbon_footprint,
            PCF_FIELDS,
            CollectionTag::ProductCarbonFootprint,
            binder,
            tree,
            &mut report,
        );
        apply_groups(
            &submodels.carbon_footprint.transport_carbon_footprint,
            TCF_FIELDS,
            CollectionTag::TransportCarbonFootprint,
            binder,
            tree,
            &mut report,
        );

        tracing::debug!(
            applied = report.applied,
            skipped = report.skipped.len(),
            "Applied transfer object"
        );
        report
    }

    /// Build a new document from the provider's base template.
    ///
    /// # Errors
    ///
    /// Returns `BinderError::TemplateNotFound` if the provider has no
    /// [`BASE_TEMPLATE`].
    pub fn to_document<P: TemplateProvider + ?Sized>(
        &self,
        provider: &P,
        binder: &ValueBinder,
    ) -> Result<ElementTree> {
        let mut tree = provider.template(BASE_TEMPLATE)?.clone();
        self.apply_to(&mut tree, binder);
        Ok(tree)
    }

    /// Read every mapped field of `tree` into a new transfer object.
    ///
    /// Absent fields read as [`crate::config::BLANK`].
    pub fn from_tree(tree: &ElementTree, binder: &ValueBinder, sender: impl Into<String>) -> Self {
        let product_carbon_footprint = group_names(tree, CollectionTag::ProductCarbonFootprint)
            .iter()
            .map(|group| {
                read_fields(PCF_FIELDS, CARBON_FOOTPRINT, Some(group.as_str()), binder, tree)
            })
            .collect();
        let transport_carbon_footprint = group_names(tree, CollectionTag::TransportCarbonFootprint)
            .iter()
            .map(|group| {
                read_fields(TCF_FIELDS, CARBON_FOOTPRINT, Some(group.as_str()), binder, tree)
            })
            .collect();

        Self {
            sender: Some(sender.into()),
            asset_id_short: tree.asset_id_short().map(str::to_string),
            asset_id: tree.asset_id().map(str::to_string),
            submodels: Submodels {
                nameplate: read_fields(NAMEPLATE_FIELDS, NAMEPLATE, None, binder, tree),
                technical_data: read_fields(
                    TECHNICAL_DATA_FIELDS,
                    TECHNICAL_DATA,
                    None,
                    binder,
                    tree,
                ),
                carbon_footprint: CarbonFootprint {
                    product_carbon_footprint,
                    transport_carbon_footprint,
                },
            },
        }
    }
}

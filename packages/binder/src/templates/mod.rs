//! Typed views of known submodel templates

pub mod carbon_footprint;

pub use carbon_footprint::CarbonFootprintTemplate;

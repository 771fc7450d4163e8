//! World struct for Cucumber BDD tests
//!
//! Holds the document under test and the results of the last step.

use aas_binder::dto::AasDataTransferObject;
use aas_binder::{
    BinderError, BindReport, CarbonFootprintTemplate, ElementTree, Outcome, TemplateProvider,
    TemplateStore, ValueBinder,
};
use cucumber::World;
use std::fmt;

use crate::helpers::template_loader::load_all_templates;

#[derive(World)]
#[world(init = Self::new)]
pub struct BinderWorld {
    /// All templates from the workspace `templates/` directory
    pub store: TemplateStore,
    pub binder: ValueBinder,
    /// Document under test
    pub tree: ElementTree,
    /// Copy of the document as it was set up
    pub snapshot: ElementTree,
    /// Outcome of the last write or duplication
    pub outcome: Option<Outcome>,
    /// Result of the last validation
    pub valid: Option<bool>,
    pub view: Option<CarbonFootprintTemplate>,
    pub report: Option<BindReport>,
    pub error: Option<BinderError>,
    pub dto: Option<AasDataTransferObject>,
}

impl fmt::Debug for BinderWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinderWorld")
            .field("templates", &self.store.names())
            .field("submodels", &self.tree.submodels.len())
            .field("outcome", &self.outcome)
            .field("valid", &self.valid)
            .field("view", &self.view)
            .field("report", &self.report)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

impl Default for BinderWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl BinderWorld {
    pub fn new() -> Self {
        let store = load_all_templates().expect("Failed to load templates");
        Self {
            store,
            binder: ValueBinder::default(),
            tree: ElementTree::default(),
            snapshot: ElementTree::default(),
            outcome: None,
            valid: None,
            view: None,
            report: None,
            error: None,
            dto: None,
        }
    }

    /// Replace the document and remember its initial state.
    pub fn set_document(&mut self, tree: ElementTree) {
        self.snapshot = tree.clone();
        self.tree = tree;
    }

    pub fn template(&self, name: &str) -> ElementTree {
        self.store
            .template(name)
            .unwrap_or_else(|e| panic!("Template '{}' not available: {}", name, e))
            .clone()
    }
}

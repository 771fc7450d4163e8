//! Template provider
//!
//! Templates are reference documents against which candidates are validated.
//! They are injected through the [`TemplateProvider`] trait rather than read
//! from a fixed location, so callers decide where templates come from.
//!
//! [`TemplateStore`] is the in-memory implementation. It can be filled by hand
//! or loaded from a directory of YAML fixtures, keyed by file stem:
//!
//! ```text
//! templates/
//! ├── CarbonFootprint.yaml   -> "CarbonFootprint"
//! └── FullAASTemplate.yaml   -> "FullAASTemplate"
//! ```
//!
//! Providers are read-only after construction and can be shared between
//! threads.

use crate::error::{BinderError, Result};
use crate::tree::ElementTree;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Source of named template documents.
pub trait TemplateProvider: Send + Sync {
    /// Template document by name.
    ///
    /// # Errors
    ///
    /// Returns `BinderError::TemplateNotFound` if no template has this name.
    fn template(&self, name: &str) -> Result<&ElementTree>;

    /// Names of all available templates, sorted.
    fn names(&self) -> Vec<&str>;
}

/// In-memory template map.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: HashMap<String, ElementTree>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any template with the same name.
    pub fn insert(&mut self, name: impl Into<String>, template: ElementTree) {
        let name = name.into();
        tracing::debug!(
            template = %name,
            submodels = template.submodels.len(),
            "Registered template"
        );
        self.templates.insert(name, template);
    }

    /// Load every `*.yaml` / `*.yml` file in `dir` (not recursive).
    ///
    /// # Errors
    ///
    /// Returns `BinderError::LoadError` if the directory cannot be read, and
    /// the first load error of any template file.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| {
            BinderError::LoadError(format!(
                "Failed to read template directory '{}': {}",
                dir.display(),
                e
            ))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if path.is_file() && is_yaml {
                paths.push(path);
            }
        }
        paths.sort();

        let mut store = Self::new();
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "Skipping template with non-UTF-8 name");
                continue;
            };
            let template = ElementTree::from_yaml_file(&path)?;
            store.insert(name, template);
        }

        tracing::debug!(dir = %dir.display(), count = store.len(), "Loaded template directory");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateProvider for TemplateStore {
    fn template(&self, name: &str) -> Result<&ElementTree> {
        self.templates
            .get(name)
            .ok_or_else(|| BinderError::TemplateNotFound(name.to_string()))
    }

    fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Submodel;
    use std::io::Write;

    const TEMPLATE_YAML: &str = r#"
submodels:
  - id: "urn:template:cfp"
    id_short: CarbonFootprint
    elements:
      - kind: property
        id_short: Version
        semantic_id: "urn:version"
"#;

    #[test]
    fn test_insert_and_get() {
        let mut store = TemplateStore::new();
        assert!(store.is_empty());
        store.insert(
            "Nameplate",
            ElementTree::new(vec![Submodel::new("urn:np", "Nameplate", vec![])]),
        );

        assert_eq!(store.len(), 1);
        assert!(store.template("Nameplate").is_ok());
        assert!(matches!(
            store.template("Missing"),
            Err(BinderError::TemplateNotFound(name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_from_dir_keys_by_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("CarbonFootprint.yaml")).unwrap();
        file.write_all(TEMPLATE_YAML.as_bytes()).unwrap();
        fs::write(dir.path().join("Other.yml"), "submodels: []\n").unwrap();
        fs::write(dir.path().join("README.md"), "not a template").unwrap();

        let store = TemplateStore::from_dir(dir.path()).unwrap();
        assert_eq!(store.names(), vec!["CarbonFootprint", "Other"]);

        let template = store.template("CarbonFootprint").unwrap();
        assert_eq!(template.submodels[0].id_short, "CarbonFootprint");
    }

    #[test]
    fn test_from_dir_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Broken.yaml"), "submodels: [unclosed").unwrap();
        assert!(matches!(
            TemplateStore::from_dir(dir.path()),
            Err(BinderError::YamlError(_))
        ));
    }

    #[test]
    fn test_from_dir_missing_directory() {
        let result = TemplateStore::from_dir("/nonexistent/templates");
        assert!(matches!(result, Err(BinderError::LoadError(_))));
    }
}

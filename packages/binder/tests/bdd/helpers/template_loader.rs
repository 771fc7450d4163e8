//! Template loader for BDD tests
//!
//! Loads all YAML templates below the `templates/` directory. Unlike
//! `TemplateStore::from_dir`, the walk is recursive, so scenario fixtures can
//! live in subdirectories.

use aas_binder::{BinderError, ElementTree, TemplateStore};
use std::path::Path;
use walkdir::WalkDir;

/// Load every `.yaml` file below `templates/` at any depth, keyed by file stem.
pub fn load_all_templates() -> Result<TemplateStore, BinderError> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let template_dir = Path::new(manifest_dir)
        .parent() // packages/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.join("templates"))
        .ok_or_else(|| BinderError::LoadError("Could not find templates directory".to_string()))?;

    if !template_dir.exists() {
        return Err(BinderError::LoadError(format!(
            "Templates directory not found: {}",
            template_dir.display()
        )));
    }

    let mut store = TemplateStore::new();

    for entry in WalkDir::new(&template_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !(path.is_file() && path.extension().is_some_and(|ext| ext == "yaml")) {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let template = ElementTree::from_yaml_file(path)?;
        tracing::debug!(template = %name, path = %path.display(), "Loaded template");
        store.insert(name, template);
    }

    Ok(store)
}

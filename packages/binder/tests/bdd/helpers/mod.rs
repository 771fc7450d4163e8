pub mod template_loader;
pub mod tree_edit;

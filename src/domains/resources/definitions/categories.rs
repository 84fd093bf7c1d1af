//! Expense categories resource definition.
//!
//! The category file is opaque to the server: it is re-read on every request
//! and returned byte for byte, so edits show up without a restart.

use std::path::Path;

use super::ResourceDefinition;
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::ResourceContent;

/// Category list resource (file-backed).
pub struct CategoriesResource;

impl CategoriesResource {
    /// Read the category file as-is.
    pub fn read(path: &Path) -> Result<String, ResourceError> {
        std::fs::read_to_string(path).map_err(|e| ResourceError::unreadable(path, e))
    }
}

impl ResourceDefinition for CategoriesResource {
    const URI: &'static str = "expense://categories";
    const NAME: &'static str = "categories";
    const DESCRIPTION: &'static str = "Expense category definitions (JSON).";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::CategoryFile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_categories_metadata() {
        assert_eq!(CategoriesResource::URI, "expense://categories");
        assert_eq!(CategoriesResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_read_is_passthrough() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("categories.json");
        // Not valid JSON on purpose: the content is never parsed.
        std::fs::write(&path, "{ \"categories\": [\"food\", ").unwrap();

        assert_eq!(
            CategoriesResource::read(&path).unwrap(),
            "{ \"categories\": [\"food\", "
        );
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = CategoriesResource::read(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ResourceError::Unreadable { .. }));
    }
}

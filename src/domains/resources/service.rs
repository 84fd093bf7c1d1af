//! Resource service implementation.
//!
//! The ResourceService owns the resources of the configured service and
//! resolves their content on every read. Nothing is cached.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::definitions::{CategoriesResource, ServerInfoResource};
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::Config;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Category file backing `expense://categories`.
    categories_path: PathBuf,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata
    resources: HashMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Where a resource's content comes from. Always resolved at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceContent {
    /// Calculator metadata document.
    ServerInfo,

    /// The configured category file, read fresh each time.
    CategoryFile,
}

impl ResourceService {
    /// Create a new ResourceService for the configured service.
    pub fn new(config: Arc<Config>) -> Self {
        info!("Initializing ResourceService ({})", config.service.as_str());

        let mut service = Self {
            categories_path: config.expenses.categories_path.clone(),
            resources: HashMap::new(),
        };

        for entry in get_all_resources(config.service) {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let text = self.resolve_content(entry.content)?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text,
                meta: None,
            }],
        })
    }

    /// Produce the current text of a resource.
    fn resolve_content(&self, content: ResourceContent) -> Result<String, ResourceError> {
        match content {
            ResourceContent::ServerInfo => {
                ServerInfoResource::render().map_err(|e| ResourceError::internal(e.to_string()))
            }
            ResourceContent::CategoryFile => {
                debug!("Reading categories from {:?}", self.categories_path);
                CategoriesResource::read(&self.categories_path)
            }
        }
    }
}

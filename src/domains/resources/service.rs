//! Resource service implementation.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`;
//! adding one does not require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::definitions::{DynamicResourceProvider, ServerDetails, ServerInfoResource};
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::Config;

/// Service for listing and reading resources.
pub struct ResourceService {
    details: ServerDetails,

    /// Key: resource URI.
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Dynamic content computed on read.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    /// Server identity and solver settings.
    ServerInfo,
}

impl ResourceService {
    /// Create a new ResourceService for the given server configuration.
    pub fn new(config: &Config) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            details: ServerDetails::from_config(config),
            resources: BTreeMap::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources, ordered by URI.
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

        let content = match &entry.content {
            ResourceContent::Text(text) => ResourceContents::text(text, uri),
            ResourceContent::Dynamic(DynamicResourceType::ServerInfo) => {
                ServerInfoResource::resolve(uri, &self.details)?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> ResourceService {
        ResourceService::new(&Config::default())
    }

    #[tokio::test]
    async fn test_resource_service_creation() {
        let resources = test_service().list_resources().await;
        let uris: Vec<_> = resources.iter().map(|r| r.raw.uri.as_str()).collect();
        assert_eq!(uris, vec!["xfoil://docs/polar-format", "xfoil://server/info"]);
    }

    #[tokio::test]
    async fn test_read_static_resource() {
        let result = test_service()
            .read_resource("xfoil://docs/polar-format")
            .await
            .unwrap();
        let ResourceContents::TextResourceContents { text, .. } = &result.contents[0] else {
            panic!("Expected text contents");
        };
        assert!(text.starts_with("# Polar CSV Format"));
    }

    #[test]
    fn test_read_dynamic_resource() {
        let service = test_service();
        let result =
            tokio_test::block_on(service.read_resource("xfoil://server/info")).unwrap();
        let ResourceContents::TextResourceContents { text, .. } = &result.contents[0] else {
            panic!("Expected text contents");
        };
        let json: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(json["xfoil_binary"], "xfoil");
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let result = test_service().read_resource("xfoil://server/nonexistent").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }
}

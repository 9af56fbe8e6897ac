//! Server info resource definition.

use rmcp::model::ResourceContents;
use serde::Serialize;

use super::{DynamicResourceProvider, ResourceDefinition};
use crate::core::config::Config;
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};
use crate::domains::tools::definitions::ComputePolarTool;

/// Snapshot of the running server's identity and solver settings.
#[derive(Debug, Clone, Serialize)]
pub struct ServerDetails {
    pub server: String,
    pub version: String,
    pub transport: String,
    pub xfoil_binary: String,
    pub scratch_prefix: String,
    pub keep_scratch: bool,
    pub tools: Vec<&'static str>,
}

impl ServerDetails {
    pub fn from_config(config: &Config) -> Self {
        Self {
            server: config.server.name.clone(),
            version: config.server.version.clone(),
            transport: config.transport.kind().to_string(),
            xfoil_binary: config.solver.binary.clone(),
            scratch_prefix: config.solver.scratch_prefix.clone(),
            keep_scratch: config.solver.keep_scratch,
            tools: vec![ComputePolarTool::NAME],
        }
    }
}

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "xfoil://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str =
        "Server identity, version and the XFOIL binary polar sweeps are run with";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}

impl DynamicResourceProvider for ServerInfoResource {
    fn resolve(uri: &str, details: &ServerDetails) -> Result<ResourceContents, ResourceError> {
        let text = serde_json::to_string_pretty(details)
            .map_err(|e| ResourceError::internal(e.to_string()))?;
        Ok(ResourceContents::text(text, uri))
    }
}

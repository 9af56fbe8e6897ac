//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! The ToolRouter is built in `domains/tools/router.rs`; adding a tool does
//! not require modifying this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Error;
use crate::domains::{
    polar::{PolarResponse, PolarService, SweepRequest},
    resources::ResourceService,
    tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

/// The main MCP server handler.
///
/// Cloned once per connection by the TCP and HTTP transports; all clones share
/// the same solver service.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Runs polar sweeps.
    polar_service: Arc<PolarService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let polar_service = Arc::new(PolarService::new(config.solver.clone()));
        Self::with_polar_service(config, polar_service)
    }

    /// Create a server around an existing solver service.
    pub fn with_polar_service(config: Config, polar_service: Arc<PolarService>) -> Self {
        let resource_service = Arc::new(ResourceService::new(&config));

        Self {
            tool_router: build_tool_router::<Self>(polar_service.clone()),
            config: Arc::new(config),
            resource_service,
            polar_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the solver service.
    pub fn polar_service(&self) -> &Arc<PolarService> {
        &self.polar_service
    }

    /// Run one polar sweep on the blocking thread pool.
    pub async fn compute_polar(
        &self,
        request: SweepRequest,
    ) -> super::error::Result<PolarResponse> {
        let service = self.polar_service.clone();
        let response = tokio::task::spawn_blocking(move || service.compute(&request))
            .await
            .map_err(|e| Error::internal(format!("Polar task failed: {}", e)))??;
        Ok(response)
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        ToolRegistry::new(self.polar_service.clone())
            .call_tool(name, arguments)
            .await
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> super::error::Result<serde_json::Value> {
        let result = self.resource_service.read_resource(uri).await?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "XFOIL polar computations. Call `compute_polar` with airfoil coordinates, a \
                 Reynolds number and a list of angles of attack to get alpha,CL,CD,CM as CSV. \
                 Read xfoil://docs/polar-format for the exact output format."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::polar::PolarError;
    use crate::domains::polar::testing::FakeSolver;

    fn test_server(solver: FakeSolver) -> McpServer {
        let config = Config::default();
        let service = Arc::new(PolarService::with_runner(
            config.solver.clone(),
            Arc::new(solver),
        ));
        McpServer::with_polar_service(config, service)
    }

    fn demo_request() -> SweepRequest {
        SweepRequest::new("demo", "demo airfoil", vec![0.0], 1_200_000.0)
    }

    #[test]
    fn test_get_info() {
        let server = test_server(FakeSolver::silent(0));
        let info = server.get_info();
        assert!(info.instructions.unwrap().contains("compute_polar"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "xfoil-mcp");
    }

    fn assert_server_handler<T: ServerHandler>() {}

    #[test]
    fn test_tool_handler_routes_compute_polar() {
        assert_server_handler::<McpServer>();
        let server = test_server(FakeSolver::silent(0));
        let routed: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert_eq!(routed, vec!["compute_polar".to_string()]);
    }

    #[test]
    fn test_list_tools() {
        let server = test_server(FakeSolver::silent(0));
        let tools = server.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "compute_polar");
        assert!(tools[0]["outputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_compute_polar() {
        let server = test_server(FakeSolver::writing("0.0 0.3 0.01 -0.05\n", 0));
        let response = server.compute_polar(demo_request()).await.unwrap();
        assert_eq!(response.csv, "alpha,CL,CD,CM\n0.0,0.3,0.01,-0.05");
    }

    #[tokio::test]
    async fn test_compute_polar_missing_output() {
        let server = test_server(FakeSolver::silent(1));
        let err = server.compute_polar(demo_request()).await.unwrap_err();
        assert!(matches!(err, Error::Polar(PolarError::MissingOutput { .. })));
    }

    #[tokio::test]
    async fn test_list_and_read_resources() {
        let server = test_server(FakeSolver::silent(0));
        let resources = server.list_resources().await;
        assert_eq!(resources.len(), 2);

        let info = server.read_resource("xfoil://server/info").await.unwrap();
        assert_eq!(info["contents"][0]["uri"], "xfoil://server/info");

        let err = server.read_resource("xfoil://nope").await.unwrap_err();
        assert!(matches!(err, Error::Resource(_)));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool() {
        let server = test_server(FakeSolver::writing("0.0 0.3 0.01 -0.05\n", 3));
        let result = server
            .call_tool(
                "compute_polar",
                serde_json::json!({
                    "airfoil_name": "demo",
                    "airfoil_geometry": "demo airfoil",
                    "angles_of_attack": [0.0],
                    "reynolds_number": 1200000.0
                }),
            )
            .await
            .unwrap();
        let csv = result["structuredContent"]["csv"].as_str().unwrap();
        assert!(csv.starts_with("# xfoil exit code 3\n"));
    }
}

//! Tool Registry - tool names and HTTP dispatch.

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use crate::domains::polar::PolarService;

use super::definitions::ComputePolarTool;
#[cfg(feature = "http")]
use super::error::ToolError;

/// Tool registry - the HTTP transport's view of the available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    polar: Arc<PolarService>,
}

impl ToolRegistry {
    /// Create a new tool registry backed by the given solver service.
    pub fn new(polar: Arc<PolarService>) -> Self {
        Self { polar }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![ComputePolarTool::NAME]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            ComputePolarTool::NAME => {
                ComputePolarTool::http_handler(arguments, self.polar.clone()).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

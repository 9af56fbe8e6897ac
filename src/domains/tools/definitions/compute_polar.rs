//! Polar sweep tool definition.
//!
//! Runs XFOIL over a sweep of angles of attack and returns the polar as CSV.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Meta, Tool},
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::domains::polar::{PolarResponse, PolarService, SweepRequest};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Definition
// ============================================================================

/// Polar sweep tool - the MCP face of [`PolarService::compute`].
pub struct ComputePolarTool;

impl ComputePolarTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "compute_polar";

    /// Human-readable title.
    pub const TITLE: &'static str = "XFOIL polar sweep";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Run XFOIL for an airfoil at a specified Reynolds number over an angle of attack sweep.\n\
         \n\
         Input airfoil coordinates (XFOIL DAT format) plus sweep parameters. Returns the\n\
         lift/drag/moment polar file as CSV. `alpha,CL,CD,CM` is prepended when the\n\
         solver wrote no header of its own; XFOIL's banner and parameter lines are kept.\n\
         Converged angles appear as fully numeric rows in the order requested.\n\
         \n\
         XFOIL frequently exits with a non-zero code after a successful run; when that\n\
         happens the CSV starts with a `# xfoil exit code N` comment line and the data\n\
         is still returned.";

    /// Execute the tool logic. Blocks until the solver exits.
    #[instrument(skip_all, fields(airfoil = %params.airfoil_name))]
    pub fn execute(params: &SweepRequest, service: &PolarService) -> CallToolResult {
        info!(
            "Polar tool called: {} angle(s) at Re={}",
            params.angles_of_attack.len(),
            params.reynolds_number
        );

        let response = match service.compute(params) {
            Ok(response) => response,
            Err(e) => {
                error!("Polar computation failed: {}", e);
                return CallToolResult::error(vec![Content::text(e.to_string())]);
            }
        };

        let text = format!("{}\n\n{}", summary(params, &response), response.csv);

        match serde_json::to_value(&response) {
            Ok(structured) => CallToolResult {
                content: vec![Content::text(text)],
                structured_content: Some(structured),
                is_error: Some(false),
                meta: None,
            },
            Err(e) => {
                warn!("Failed to serialize structured content: {}", e);
                CallToolResult::success(vec![Content::text(text)])
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        service: Arc<PolarService>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: SweepRequest = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        info!("Polar tool (HTTP) called for: {}", params.airfoil_name);

        let result = tokio::task::spawn_blocking(move || Self::execute(&params, &service))
            .await
            .map_err(|e| ToolError::internal(format!("Polar task failed: {}", e)))?;

        let mut response = serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        });
        if let (Some(structured), Some(object)) =
            (result.structured_content, response.as_object_mut())
        {
            object.insert("structuredContent".to_string(), structured);
        }

        Ok(response)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            title: Some(Self::TITLE.into()),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SweepRequest>(),
            output_schema: Some(cached_schema_for_type::<PolarResponse>()),
            annotations: None,
            icons: None,
            meta: tool_meta(),
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(service: Arc<PolarService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let service = service.clone();
            async move {
                let params: SweepRequest =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let result = tokio::task::spawn_blocking(move || Self::execute(&params, &service))
                    .await
                    .map_err(|e| {
                        McpError::internal_error(format!("Task execution failed: {}", e), None)
                    })?;

                Ok(result)
            }
            .boxed()
        })
    }
}

/// One-line description of a finished sweep.
///
/// Only fully numeric rows count as data; XFOIL's banner, parameter lines and
/// column separators are passed through in the CSV but are not results.
fn summary(params: &SweepRequest, response: &PolarResponse) -> String {
    let data_rows = response
        .csv
        .lines()
        .filter(|line| is_data_row(line))
        .count();

    let mut text = format!(
        "Polar for '{}' at Re={} M={}: {} data row(s) for {} requested angle(s)",
        params.airfoil_name,
        params.reynolds_number,
        params.mach_number,
        data_rows,
        params.angles_of_attack.len()
    );
    if let Some(comment) = response.csv.lines().next().filter(|l| l.starts_with('#')) {
        text.push_str(&format!(" ({})", comment.trim_start_matches('#').trim()));
    }
    text
}

fn is_data_row(line: &str) -> bool {
    !line.is_empty() && line.split(',').all(|cell| cell.parse::<f64>().is_ok())
}

/// Tool metadata advertised to clients.
fn tool_meta() -> Option<Meta> {
    serde_json::from_value(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "categories": ["aero", "analysis"]
    }))
    .ok()
}

// ============================================================================
// Tests
// ============================================================================

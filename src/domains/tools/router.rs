//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Each tool knows how to create its own route; this module only wires them
//! to the shared solver service.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::polar::PolarService;

use super::definitions::ComputePolarTool;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(polar: Arc<PolarService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new().with_route(ComputePolarTool::create_route(polar))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::config::SolverConfig;

    struct TestServer {}

    fn test_service() -> Arc<PolarService> {
        Arc::new(PolarService::new(SolverConfig::default()))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_service());
        let tools = router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "compute_polar");
        assert_eq!(tools[0].title.as_deref(), Some("XFOIL polar sweep"));
    }

    #[test]
    fn test_registry_matches_router() {
        let service = test_service();
        let registry_names = ToolRegistry::new(service.clone()).tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(service);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}

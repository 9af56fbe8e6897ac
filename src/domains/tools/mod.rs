//! Tools domain module.
//!
//! Tools are executable functions that MCP clients call. This server exposes a
//! single one, `compute_polar`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Tool names and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! A new tool needs a route in `router.rs` and an entry in `registry.rs`; the
//! router tests check that both stay in sync.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;

//! Tool definitions module.
//!
//! Each tool is defined in its own file and exposes `NAME`, `to_tool()`,
//! `create_route()` and an HTTP handler.

pub mod compute_polar;

pub use compute_polar::ComputePolarTool;

//! XFOIL MCP Server Library
//!
//! Wraps the XFOIL airfoil solver as a Model Context Protocol server: one tool,
//! `compute_polar`, that runs a viscous angle-of-attack sweep and returns the
//! resulting lift/drag/moment polar as CSV.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **polar**: script building, solver invocation and output normalization
//!   - **tools**: the MCP tool surface
//!   - **resources**: read-only documents for clients
//! - **cli**: command-line overrides and `--describe`
//!
//! # Example
//!
//! ```rust,no_run
//! use xfoil_mcp_server::domains::polar::{PolarService, SweepRequest};
//! use xfoil_mcp_server::core::Config;
//!
//! fn main() -> xfoil_mcp_server::Result<()> {
//!     let config = Config::from_env();
//!     let service = PolarService::new(config.solver);
//!     let geometry = std::fs::read_to_string("naca2412.dat")?;
//!     let request = SweepRequest::new("naca2412", geometry, vec![0.0, 2.0, 4.0], 1.0e6);
//!     println!("{}", service.compute(&request)?.csv);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};

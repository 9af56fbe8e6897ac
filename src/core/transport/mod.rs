//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **STDIO**: Standard input/output (default for MCP) - feature: `stdio`
//! - **TCP**: Raw TCP socket with JSON-RPC messages - feature: `tcp`
//! - **HTTP**: JSON-RPC over POST plus the REST `POST /polar` endpoint - feature: `http`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server handler.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;

#[cfg(feature = "tcp")]
pub(crate) use config::DEFAULT_TCP_PORT;

#[cfg(feature = "http")]
pub(crate) use config::{DEFAULT_HTTP_PORT, default_rpc_path};

#[cfg(any(feature = "tcp", feature = "http"))]
pub(crate) use config::default_host;

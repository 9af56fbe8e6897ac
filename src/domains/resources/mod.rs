//! Resources domain module.
//!
//! Read-only documents exposed to MCP clients: the server's identity and
//! solver settings, and a description of the polar CSV format.
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::{ResourceDefinition, ServerDetails};
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{DynamicResourceType, ResourceContent, ResourceEntry, ResourceService};

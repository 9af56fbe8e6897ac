//! Resource definitions module.
//!
//! Each resource lives in its own file and declares its URI, metadata and
//! content provider.

mod polar_format;
mod server_info;

pub use polar_format::PolarFormatResource;
pub use server_info::{ServerDetails, ServerInfoResource};

use rmcp::model::ResourceContents;

use super::error::ResourceError;
use super::service::ResourceContent;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}

/// Trait for resources whose content is computed on every read.
pub trait DynamicResourceProvider {
    /// Resolve the dynamic content.
    fn resolve(uri: &str, details: &ServerDetails) -> Result<ResourceContents, ResourceError>;
}

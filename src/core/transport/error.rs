//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that end a transport's serve loop.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind the listening socket.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error during transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The MCP service could not be started on the transport.
    #[error("Server initialization error: {0}")]
    Init(String),

    /// The HTTP server stopped with an error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The running MCP service failed.
    #[error("Service error: {0}")]
    Service(String),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    /// Create an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Create an HTTP error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a service error.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }
}

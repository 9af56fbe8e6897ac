//! Polar-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for polar computations.
pub type PolarResult<T> = Result<T, PolarError>;

/// Errors that can occur while preparing, running or reading a polar sweep.
///
/// A non-zero solver exit code is deliberately absent: when the output file
/// exists it is reported as a comment inside the table instead.
#[derive(Debug, Error)]
pub enum PolarError {
    /// The sweep cannot be turned into a solver script.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A request field is outside its accepted range.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The solver executable could not be launched.
    #[error("XFOIL binary not found: failed to launch '{binary}': {source}")]
    BinaryNotFound {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The solver exited without writing its polar file.
    #[error("XFOIL did not create the polar output at '{}'", path.display())]
    MissingOutput { path: PathBuf },

    /// Scratch workspace or output file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PolarError {
    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a binary-not-found error.
    pub fn binary_not_found(binary: impl Into<String>, source: std::io::Error) -> Self {
        Self::BinaryNotFound {
            binary: binary.into(),
            source,
        }
    }

    /// Create a missing-output error.
    pub fn missing_output(path: impl Into<PathBuf>) -> Self {
        Self::MissingOutput { path: path.into() }
    }

    /// Whether the caller supplied something unusable, as opposed to the
    /// solver or the host failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidRequest(_))
    }
}

//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, command-line overrides, or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable naming the solver binary.
pub const XFOIL_BIN_ENV: &str = "XFOIL_BIN";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// XFOIL solver configuration.
    pub solver: SolverConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Short description used by `--describe` and the HTTP root.
    pub description: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// How the external solver is located and where it runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Solver binary name or path (`XFOIL_BIN`).
    pub binary: String,

    /// Prefix for per-run scratch directories.
    pub scratch_prefix: String,

    /// Keep scratch directories after a run instead of deleting them.
    pub keep_scratch: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            binary: "xfoil".to_string(),
            scratch_prefix: "xfoil_mcp_".to_string(),
            keep_scratch: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "xfoil-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "XFOIL polar computations packaged for MCP agents.".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...); solver settings use `XFOIL_`
    /// (`XFOIL_BIN`, `XFOIL_SCRATCH_PREFIX`, `XFOIL_KEEP_SCRATCH`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(binary) = std::env::var(XFOIL_BIN_ENV) {
            info!("XFOIL binary set from environment: {}", binary);
            config.solver.binary = binary;
        }

        if let Ok(prefix) = std::env::var("XFOIL_SCRATCH_PREFIX") {
            config.solver.scratch_prefix = prefix;
        }

        if let Ok(keep) = std::env::var("XFOIL_KEEP_SCRATCH") {
            config.solver.keep_scratch = matches!(
                keep.to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        config
    }

    /// Check settings that would only fail later, at solver run time.
    pub fn validate(&self) -> Result<()> {
        if self.solver.binary.trim().is_empty() {
            return Err(Error::config("solver binary must not be empty"));
        }

        if self
            .solver
            .scratch_prefix
            .chars()
            .any(std::path::is_separator)
        {
            return Err(Error::config(format!(
                "scratch prefix must not contain path separators: {}",
                self.solver.scratch_prefix
            )));
        }

        Ok(())
    }
}

//! Command-line interface.
//!
//! Flags override the values loaded from the environment.

use clap::{Parser, ValueEnum};
use std::sync::Arc;

use crate::core::{Config, Result, TransportConfig};
use crate::domains::polar::PolarService;
use crate::domains::tools::ToolRegistry;

#[cfg(feature = "http")]
use crate::core::transport::{DEFAULT_HTTP_PORT, HttpConfig, default_rpc_path};
#[cfg(feature = "tcp")]
use crate::core::transport::{DEFAULT_TCP_PORT, TcpConfig};
#[cfg(any(feature = "tcp", feature = "http"))]
use crate::core::transport::default_host;

#[derive(Parser, Debug)]
#[command(name = "xfoil-mcp", version, about = "Run the xfoil MCP server.")]
pub struct Cli {
    /// Print basic metadata about the MCP service and exit.
    #[arg(long)]
    pub describe: bool,

    /// Transport to serve on.
    #[arg(long, value_enum, ignore_case = true)]
    pub transport: Option<TransportKind>,

    /// Host interface to bind (tcp and http).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (tcp and http).
    #[arg(long)]
    pub port: Option<u16>,

    /// JSON-RPC endpoint path (http only).
    #[arg(long)]
    pub path: Option<String>,

    /// XFOIL executable name or path.
    #[arg(long = "xfoil-bin", value_name = "PATH")]
    pub xfoil_bin: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    Stdio,
    Tcp,
    Http,
}

impl TransportKind {
    fn of(config: &TransportConfig) -> Self {
        match config.kind() {
            "tcp" => Self::Tcp,
            "http" => Self::Http,
            _ => Self::Stdio,
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(binary) = &self.xfoil_bin {
            config.solver.binary = binary.clone();
        }

        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        let touches_transport = self.transport.is_some()
            || self.host.is_some()
            || self.port.is_some()
            || self.path.is_some();

        if touches_transport {
            let kind = self
                .transport
                .unwrap_or_else(|| TransportKind::of(&config.transport));
            config.transport = match kind {
                TransportKind::Stdio => self.stdio()?,
                TransportKind::Tcp => self.tcp(&config.transport)?,
                TransportKind::Http => self.http(&config.transport)?,
            };
        }

        Ok(())
    }

    #[cfg(feature = "stdio")]
    fn stdio(&self) -> Result<TransportConfig> {
        Ok(TransportConfig::Stdio)
    }

    #[cfg(not(feature = "stdio"))]
    fn stdio(&self) -> Result<TransportConfig> {
        Err(not_compiled("stdio"))
    }

    #[cfg(feature = "tcp")]
    fn tcp(&self, current: &TransportConfig) -> Result<TransportConfig> {
        #[allow(irrefutable_let_patterns)]
        let mut tcp = if let TransportConfig::Tcp(tcp) = current {
            tcp.clone()
        } else {
            TcpConfig {
                port: DEFAULT_TCP_PORT,
                host: default_host(),
            }
        };

        if let Some(host) = &self.host {
            tcp.host = host.clone();
        }
        if let Some(port) = self.port {
            tcp.port = port;
        }

        Ok(TransportConfig::Tcp(tcp))
    }

    #[cfg(not(feature = "tcp"))]
    fn tcp(&self, _current: &TransportConfig) -> Result<TransportConfig> {
        Err(not_compiled("tcp"))
    }

    #[cfg(feature = "http")]
    fn http(&self, current: &TransportConfig) -> Result<TransportConfig> {
        #[allow(irrefutable_let_patterns)]
        let mut http = if let TransportConfig::Http(http) = current {
            http.clone()
        } else {
            HttpConfig {
                port: DEFAULT_HTTP_PORT,
                host: default_host(),
                rpc_path: default_rpc_path(),
                enable_cors: true,
            }
        };

        if let Some(host) = &self.host {
            http.host = host.clone();
        }
        if let Some(port) = self.port {
            http.port = port;
        }
        if let Some(path) = &self.path {
            http.rpc_path = if path.starts_with('/') {
                path.clone()
            } else {
                format!("/{}", path)
            };
        }

        Ok(TransportConfig::Http(http))
    }

    #[cfg(not(feature = "http"))]
    fn http(&self, _current: &TransportConfig) -> Result<TransportConfig> {
        Err(not_compiled("http"))
    }
}

#[cfg(not(all(feature = "stdio", feature = "tcp", feature = "http")))]
fn not_compiled(transport: &str) -> crate::core::Error {
    crate::core::Error::config(format!(
        "transport '{}' is not available in this build (enable the '{}' feature)",
        transport, transport
    ))
}

/// Service metadata printed by `--describe`.
pub fn describe(config: &Config) -> serde_json::Value {
    let registry = ToolRegistry::new(Arc::new(PolarService::new(config.solver.clone())));

    serde_json::json!({
        "name": config.server.name,
        "description": config.server.description,
        "version": config.server.version,
        "default_transport": "stdio",
        "tools": registry.tool_names(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("xfoil-mcp").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_describe_metadata() {
        let value = describe(&Config::default());
        assert_eq!(value["name"], "xfoil-mcp");
        assert_eq!(value["default_transport"], "stdio");
        assert_eq!(value["tools"], serde_json::json!(["compute_polar"]));
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_parse_describe_flag() {
        assert!(parse(&["--describe"]).describe);
        assert!(!parse(&[]).describe);
    }

    #[test]
    fn test_no_flags_leave_config_untouched() {
        let mut config = Config::default();
        parse(&[]).apply(&mut config).unwrap();
        assert_eq!(config.solver.binary, "xfoil");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.transport.kind(), Config::default().transport.kind());
    }

    #[test]
    fn test_solver_and_logging_overrides() {
        let mut config = Config::default();
        parse(&["--xfoil-bin", "/opt/xfoil/bin/xfoil", "--log-level", "debug"])
            .apply(&mut config)
            .unwrap();
        assert_eq!(config.solver.binary, "/opt/xfoil/bin/xfoil");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_rejects_unknown_transport() {
        let result = Cli::try_parse_from(["xfoil-mcp", "--transport", "sse"]);
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_overrides() {
        let mut config = Config::default();
        parse(&["--transport", "http", "--host", "0.0.0.0", "--port", "9000", "--path", "rpc"])
            .apply(&mut config)
            .unwrap();

        let TransportConfig::Http(http) = config.transport else {
            panic!("Expected HTTP transport");
        };
        assert_eq!(http.host, "0.0.0.0");
        assert_eq!(http.port, 9000);
        assert_eq!(http.rpc_path, "/rpc");
        assert!(http.enable_cors);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_defaults() {
        let mut config = Config::default();
        parse(&["--transport", "HTTP"]).apply(&mut config).unwrap();

        let TransportConfig::Http(http) = config.transport else {
            panic!("Expected HTTP transport");
        };
        assert_eq!(http.port, 8000);
        assert_eq!(http.rpc_path, "/mcp");
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_port_applies_to_current_transport() {
        let mut config = Config::default();
        config.transport = TransportConfig::tcp(3000, "127.0.0.1");
        parse(&["--port", "4100"]).apply(&mut config).unwrap();

        let TransportConfig::Tcp(tcp) = config.transport else {
            panic!("Expected TCP transport");
        };
        assert_eq!(tcp.port, 4100);
        assert_eq!(tcp.host, "127.0.0.1");
    }

    #[cfg(not(feature = "http"))]
    #[test]
    fn test_uncompiled_transport_is_config_error() {
        let mut config = Config::default();
        let err = parse(&["--transport", "http"])
            .apply(&mut config)
            .unwrap_err();
        assert!(matches!(err, crate::core::Error::Config(_)));
    }
}

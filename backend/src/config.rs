//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. Everything is read once at process start.

use std::env;

/// Default port the relay listens on
pub const DEFAULT_PORT: u16 = 4000;

/// Default name of the bound agent
pub const DEFAULT_AGENT_NAME: &str = "agent";

/// Default address of the remote agent process
pub const DEFAULT_AGENT_URL: &str = "http://localhost:8000/api/copilotkit";

/// Default request body limit (10 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream agent configuration
    pub upstream: UpstreamConfig,
    /// Relay behaviour configuration
    pub relay: RelayConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Upstream agent configuration
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Name the agent is registered under
    pub agent_name: String,
    /// Network address of the agent endpoint
    pub agent_url: String,
}

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Optional per-request upstream timeout (in seconds). `None` waits forever.
    pub timeout_secs: Option<u64>,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: DEFAULT_PORT,
                host: "0.0.0.0".to_string(),
            },
            upstream: UpstreamConfig {
                agent_name: DEFAULT_AGENT_NAME.to_string(),
                agent_url: DEFAULT_AGENT_URL.to_string(),
            },
            relay: RelayConfig {
                timeout_secs: None,
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// `BFF_PORT` wins over `PORT` for the listen port. Unparsable numeric
    /// values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: ServerConfig {
                port: env::var("BFF_PORT")
                    .or_else(|_| env::var("PORT"))
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
                host: env::var("HOST").unwrap_or(defaults.server.host),
            },
            upstream: UpstreamConfig {
                agent_name: non_empty_var("AGENT_NAME").unwrap_or(defaults.upstream.agent_name),
                agent_url: non_empty_var("AGENT_URL").unwrap_or(defaults.upstream.agent_url),
            },
            relay: RelayConfig {
                timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0),
                max_body_bytes: env::var("MAX_BODY_BYTES")
                    .ok()
                    .and_then(|b| b.parse().ok())
                    .unwrap_or(defaults.relay.max_body_bytes),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

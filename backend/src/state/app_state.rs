//! Application state shared by all request handlers
//! Read-only after startup: holds the agent bindings and the HTTP client

use crate::config::Config;
use crate::error::AppError;
use crate::relay::RelayOptions;
use crate::state::bindings::AgentBindings;
use anyhow::anyhow;
use std::sync::Arc;

/// Main application state
///
/// Nothing in here is mutated after startup, so handlers share it through an
/// `Arc` without locking.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Agent name -> endpoint registry
    pub bindings: Arc<AgentBindings>,
    /// Shared HTTP client used by every per-request runtime
    pub client: reqwest::Client,
    /// Forwarding options (timeout, body limit)
    pub options: RelayOptions,
}

impl AppState {
    /// Create application state from explicit parts
    pub fn new(bindings: AgentBindings, client: reqwest::Client, options: RelayOptions) -> Self {
        Self {
            bindings: Arc::new(bindings),
            client,
            options,
        }
    }

    /// Create application state from configuration
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let bindings = AgentBindings::from_config(&config.upstream)?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(anyhow!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::new(
            bindings,
            client,
            RelayOptions::from_config(&config.relay),
        ))
    }
}

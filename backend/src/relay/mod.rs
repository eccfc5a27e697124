//! Relay module
//!
//! Forwards requests arriving at the relay path to the bound remote agent and
//! streams the agent's answer back. A fresh `AgentRuntime` is created for each
//! request.

pub mod headers;
pub mod runtime;
pub mod streaming;

pub use runtime::{AgentRuntime, RelayOptions, RelayRequest};

/// Path the relay is mounted at
pub const RELAY_PATH: &str = "/api/copilotkit";

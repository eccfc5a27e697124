//! Agent Relay Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Request forwarding to the remote agent
///
/// Per-request runtime, header filtering, and response streaming.
pub mod relay;
pub mod server;
/// Application state management
///
/// Handles agent bindings and the shared HTTP client.
pub mod state;

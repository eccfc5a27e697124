//! State management module
//! Handles agent bindings and the shared, read-only application state

pub mod app_state;
pub mod bindings;

pub use app_state::AppState;
pub use bindings::{AgentBinding, AgentBindingInfo, AgentBindings};

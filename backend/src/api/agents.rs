//! Agent binding API handlers
//!
//! Read-only view of the agents the relay is bound to.

use crate::error::AppError;
use crate::state::{AgentBindingInfo, AppState};
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

/// Agents list response
#[derive(Serialize)]
pub struct AgentsListResponse {
    /// All bound agents
    pub agents: Vec<AgentBindingInfo>,
    /// Total number of agents
    pub count: usize,
}

/// GET /api/agents - List agent bindings
pub async fn list_agents(State(state): State<AppState>) -> Json<AgentsListResponse> {
    let agents = state.bindings.describe();
    let count = agents.len();
    Json(AgentsListResponse { agents, count })
}

/// GET /api/agents/:name - Get a single agent binding
pub async fn get_agent(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AgentBindingInfo>, AppError> {
    state
        .bindings
        .describe()
        .into_iter()
        .find(|info| info.name == name)
        .map(Json)
        .ok_or(AppError::AgentNotFound(name))
}

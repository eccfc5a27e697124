//! Relay endpoint handler
//!
//! Mounted for every method at `/api/copilotkit` and below.

use crate::error::AppError;
use crate::relay::{AgentRuntime, RelayRequest};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Response,
};

/// ANY /api/copilotkit[/*] - Forward the request to the bound agent
///
/// Builds a fresh runtime for the default agent binding and returns whatever
/// the agent answers, streamed.
pub async fn relay(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(state.options.max_body_bytes)
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })?;

    let runtime = AgentRuntime::new(
        state.bindings.default_agent().clone(),
        state.client.clone(),
        state.options,
    );

    runtime
        .forward(RelayRequest::new(method, &uri, headers, body))
        .await
}

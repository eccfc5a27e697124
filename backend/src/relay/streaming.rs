//! Streaming adapter from an upstream response to an axum response
//!
//! The upstream body is relayed chunk by chunk as it arrives, so server-sent
//! events reach the UI without being buffered by the relay.

use crate::error::AppError;
use crate::relay::headers::{is_event_stream, response_headers};
use anyhow::anyhow;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderName, HeaderValue},
    response::Response,
};
use futures_util::{stream::Stream, StreamExt};
use tracing::{debug, warn};

/// Adapt an upstream response into a response for the caller
///
/// Status is passed through unchanged. Hop-by-hop headers are dropped; event
/// streams additionally get headers that disable intermediary buffering.
pub fn relay_response(upstream: reqwest::Response) -> Result<Response, AppError> {
    let status = upstream.status();
    let mut headers = response_headers(upstream.headers());

    if is_event_stream(&headers) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(
            HeaderName::from_static("x-accel-buffering"),
            HeaderValue::from_static("no"),
        );
    }

    let mut response = Response::builder()
        .status(status)
        .body(Body::from_stream(body_stream(upstream)))
        .map_err(|e| AppError::Internal(anyhow!("Failed to build relay response: {}", e)))?;
    *response.headers_mut() = headers;

    Ok(response)
}

/// Stream of upstream body chunks
///
/// An upstream failure after the status line was sent can only be reported by
/// ending the body with an error.
fn body_stream(upstream: reqwest::Response) -> impl Stream<Item = Result<Bytes, reqwest::Error>> {
    use async_stream::stream;

    stream! {
        let url = upstream.url().clone();
        let mut chunks = upstream.bytes_stream();
        let mut relayed_bytes: usize = 0;
        let mut failed = false;

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    relayed_bytes += bytes.len();
                    yield Ok(bytes);
                }
                Err(e) => {
                    warn!(
                        upstream = %url,
                        relayed_bytes = relayed_bytes,
                        error = %e,
                        "Upstream body failed mid-stream"
                    );
                    failed = true;
                    yield Err(e);
                    break;
                }
            }
        }

        if !failed {
            debug!(upstream = %url, relayed_bytes = relayed_bytes, "Upstream body relayed");
        }
    }
}

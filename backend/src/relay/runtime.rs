//! Per-request agent runtime
//!
//! An `AgentRuntime` is built for every incoming relay request, bound to one
//! agent endpoint, and discarded once the response has been produced. The
//! `reqwest::Client` it carries is a handle onto the shared connection pool.

use crate::config::RelayConfig;
use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::error::AppError;
use crate::relay::headers::request_headers;
use crate::relay::streaming::relay_response;
use crate::relay::RELAY_PATH;
use crate::state::AgentBinding;
use axum::{
    body::Bytes,
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use reqwest::Url;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Forwarding options shared by every runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayOptions {
    /// Upstream timeout covering the whole exchange; `None` never times out
    pub timeout: Option<Duration>,
    /// Maximum request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl RelayOptions {
    /// Build options from relay configuration
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            timeout: config.timeout_secs.map(Duration::from_secs),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// An incoming request, as handed to the runtime
#[derive(Debug, Clone)]
pub struct RelayRequest {
    /// HTTP method, forwarded as-is
    pub method: Method,
    /// Path below the relay mount point (`""` for the mount point itself)
    pub path_suffix: String,
    /// Raw query string, if any
    pub query: Option<String>,
    /// Incoming headers (filtered before forwarding)
    pub headers: HeaderMap,
    /// Fully read request body
    pub body: Bytes,
}

impl RelayRequest {
    /// Split an incoming request into the parts the runtime needs
    pub fn new(method: Method, uri: &Uri, headers: HeaderMap, body: Bytes) -> Self {
        let path_suffix = uri
            .path()
            .strip_prefix(RELAY_PATH)
            .unwrap_or_default()
            .to_string();
        Self {
            method,
            path_suffix,
            query: uri.query().map(str::to_string),
            headers,
            body,
        }
    }
}

/// Runtime bound to a single remote agent
#[derive(Debug, Clone)]
pub struct AgentRuntime {
    binding: AgentBinding,
    client: reqwest::Client,
    options: RelayOptions,
}

impl AgentRuntime {
    /// Bind a new runtime to `binding`
    pub fn new(binding: AgentBinding, client: reqwest::Client, options: RelayOptions) -> Self {
        Self {
            binding,
            client,
            options,
        }
    }

    /// The agent this runtime forwards to
    pub fn binding(&self) -> &AgentBinding {
        &self.binding
    }

    /// Upstream URL for a request path suffix and query
    ///
    /// The suffix is appended below the agent endpoint path. A query on the
    /// request is appended after any query configured on the endpoint.
    pub fn target_url(&self, path_suffix: &str, query: Option<&str>) -> Url {
        let mut url = self.binding.url.clone();

        let suffix = path_suffix.trim_start_matches('/');
        if !suffix.is_empty() {
            let path = format!("{}/{}", url.path().trim_end_matches('/'), suffix);
            url.set_path(&path);
        }

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let merged = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&{}", existing, query),
                _ => query.to_string(),
            };
            url.set_query(Some(&merged));
        }

        url
    }

    /// Forward `request` to the bound agent and adapt the answer
    ///
    /// The upstream status is returned unchanged, including error statuses.
    /// Only transport failures become relay errors.
    pub async fn forward(&self, request: RelayRequest) -> Result<Response, AppError> {
        let url = self.target_url(&request.path_suffix, request.query.as_deref());
        let headers = request_headers(&request.headers);
        let start = Instant::now();

        debug!(
            agent = %self.binding.name,
            method = %request.method,
            upstream = %url,
            body_len = request.body.len(),
            "Forwarding request to agent"
        );

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }
        if let Some(timeout) = self.options.timeout {
            builder = builder.timeout(timeout);
        }

        let upstream = builder
            .send()
            .await
            .map_err(|e| classify_send_error(&self.binding, &url, e))?;

        info!(
            agent = %self.binding.name,
            upstream = %url,
            status = upstream.status().as_u16(),
            latency_ms = start.elapsed().as_millis(),
            "Agent responded"
        );

        relay_response(upstream)
    }
}

fn classify_send_error(binding: &AgentBinding, url: &Url, error: reqwest::Error) -> AppError {
    if error.is_timeout() {
        AppError::UpstreamTimeout(format!("agent '{}' at {}", binding.name, url))
    } else if error.is_builder() {
        AppError::BadRequest(format!("cannot forward request: {}", error))
    } else {
        AppError::UpstreamUnavailable(format!(
            "agent '{}' at {}: {}",
            binding.name, url, error
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(url: &str) -> AgentRuntime {
        AgentRuntime::new(
            AgentBinding::new("agent", url).unwrap(),
            reqwest::Client::new(),
            RelayOptions::default(),
        )
    }

    #[test]
    fn test_target_url_for_mount_point() {
        let rt = runtime("http://localhost:8000/api/copilotkit");
        assert_eq!(
            rt.target_url("", None).as_str(),
            "http://localhost:8000/api/copilotkit"
        );
        assert_eq!(
            rt.target_url("/", None).as_str(),
            "http://localhost:8000/api/copilotkit"
        );
    }

    #[test]
    fn test_target_url_appends_suffix_and_query() {
        let rt = runtime("http://localhost:8000/api/copilotkit/");
        assert_eq!(
            rt.target_url("/info", Some("verbose=1")).as_str(),
            "http://localhost:8000/api/copilotkit/info?verbose=1"
        );
    }

    #[test]
    fn test_target_url_merges_existing_query() {
        let rt = runtime("http://localhost:8000/run?tenant=demo");
        assert_eq!(
            rt.target_url("", Some("stream=true")).as_str(),
            "http://localhost:8000/run?tenant=demo&stream=true"
        );
    }

    #[test]
    fn test_relay_request_splits_uri() {
        let uri: Uri = "/api/copilotkit/agent/run?x=1".parse().unwrap();
        let request = RelayRequest::new(Method::POST, &uri, HeaderMap::new(), Bytes::new());
        assert_eq!(request.path_suffix, "/agent/run");
        assert_eq!(request.query.as_deref(), Some("x=1"));

        let uri: Uri = "/api/copilotkit".parse().unwrap();
        let request = RelayRequest::new(Method::POST, &uri, HeaderMap::new(), Bytes::new());
        assert_eq!(request.path_suffix, "");
        assert_eq!(request.query, None);
    }

    #[test]
    fn test_options_from_config() {
        let options = RelayOptions::from_config(&RelayConfig {
            timeout_secs: Some(12),
            max_body_bytes: 64,
        });
        assert_eq!(options.timeout, Some(Duration::from_secs(12)));
        assert_eq!(options.max_body_bytes, 64);
    }
}

//! Header filtering for forwarded requests and relayed responses
//!
//! Hop-by-hop headers describe a single connection and must not be forwarded
//! by an intermediary (RFC 9110 section 7.6.1).

use axum::http::{header, HeaderMap, HeaderName};

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Whether `name` is one of the fixed hop-by-hop headers
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Header names listed in the `Connection` header are hop-by-hop too
fn connection_listed(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

fn filter(headers: &HeaderMap, also_drop: &[HeaderName]) -> HeaderMap {
    let listed = connection_listed(headers);
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name)
            || also_drop.contains(name)
            || listed.iter().any(|l| l == name.as_str())
        {
            continue;
        }
        filtered.append(name.clone(), value.clone());
    }
    filtered
}

/// Headers to send upstream for an incoming request
///
/// `host` and `content-length` are dropped; the HTTP client sets them for the
/// upstream connection.
pub fn request_headers(incoming: &HeaderMap) -> HeaderMap {
    filter(incoming, &[header::HOST, header::CONTENT_LENGTH])
}

/// Headers to return to the caller for an upstream response
///
/// `content-length` is dropped because the body is re-streamed.
pub fn response_headers(upstream: &HeaderMap) -> HeaderMap {
    filter(upstream, &[header::CONTENT_LENGTH])
}

/// Whether the headers describe a server-sent event stream
pub fn is_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase().starts_with("text/event-stream"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        map
    }

    #[test]
    fn test_request_headers_strip_hop_by_hop_and_host() {
        let incoming = headers(&[
            ("host", "localhost:4000"),
            ("content-length", "42"),
            ("content-type", "application/json"),
            ("connection", "keep-alive"),
            ("keep-alive", "timeout=5"),
            ("transfer-encoding", "chunked"),
            ("authorization", "Bearer abc"),
            ("accept", "text/event-stream"),
        ]);

        let forwarded = request_headers(&incoming);
        assert_eq!(forwarded.len(), 3);
        assert_eq!(forwarded["content-type"], "application/json");
        assert_eq!(forwarded["authorization"], "Bearer abc");
        assert_eq!(forwarded["accept"], "text/event-stream");
    }

    #[test]
    fn test_connection_listed_headers_are_dropped() {
        let incoming = headers(&[
            ("connection", "close, x-session-hint"),
            ("x-session-hint", "abc"),
            ("x-request-source", "ui"),
        ]);

        let forwarded = request_headers(&incoming);
        assert!(forwarded.get("x-session-hint").is_none());
        assert_eq!(forwarded["x-request-source"], "ui");
    }

    #[test]
    fn test_response_headers_keep_multi_values() {
        let upstream = headers(&[
            ("set-cookie", "a=1"),
            ("set-cookie", "b=2"),
            ("content-length", "100"),
            ("content-type", "text/event-stream"),
        ]);

        let relayed = response_headers(&upstream);
        assert_eq!(relayed.get_all("set-cookie").iter().count(), 2);
        assert!(relayed.get("content-length").is_none());
        assert!(is_event_stream(&relayed));
    }

    #[test]
    fn test_is_event_stream() {
        assert!(is_event_stream(&headers(&[(
            "content-type",
            "text/event-stream; charset=utf-8"
        )])));
        assert!(!is_event_stream(&headers(&[(
            "content-type",
            "application/json"
        )])));
        assert!(!is_event_stream(&HeaderMap::new()));
    }
}

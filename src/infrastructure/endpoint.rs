use url::Url;

use crate::types::{RealtimeError, Result};

/// Normalizes an endpoint for the socket transport: `http(s)` schemes are
/// rewritten to `ws(s)`, `ws(s)` passes through unchanged.
pub fn socket_endpoint(raw: &str) -> Result<String> {
    let mut url = Url::parse(raw)?;
    let scheme = match url.scheme() {
        "http" => Some("ws"),
        "https" => Some("wss"),
        "ws" | "wss" => None,
        other => {
            return Err(RealtimeError::Endpoint(format!(
                "unsupported scheme '{other}' for socket transport"
            )));
        }
    };
    if let Some(scheme) = scheme {
        url.set_scheme(scheme)
            .map_err(|_| RealtimeError::Endpoint(format!("cannot rewrite scheme of '{raw}'")))?;
    }
    Ok(url.to_string())
}

/// Normalizes an endpoint for the event-stream transport: `ws(s)` schemes are
/// rewritten to `http(s)`, and the `/ws/` path segment becomes `/sse/`.
pub fn event_stream_endpoint(raw: &str) -> Result<String> {
    let mut url = Url::parse(raw)?;
    let scheme = match url.scheme() {
        "ws" => Some("http"),
        "wss" => Some("https"),
        "http" | "https" => None,
        other => {
            return Err(RealtimeError::Endpoint(format!(
                "unsupported scheme '{other}' for event-stream transport"
            )));
        }
    };
    if let Some(scheme) = scheme {
        url.set_scheme(scheme)
            .map_err(|_| RealtimeError::Endpoint(format!("cannot rewrite scheme of '{raw}'")))?;
    }

    let path = url.path().to_string();
    let rewritten = if let Some(idx) = path.find("/ws/") {
        let mut p = path.clone();
        p.replace_range(idx..idx + 4, "/sse/");
        p
    } else if let Some(stripped) = path.strip_suffix("/ws") {
        format!("{stripped}/sse")
    } else {
        path
    };
    url.set_path(&rewritten);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_endpoint_rewrites_http_schemes() {
        assert_eq!(
            socket_endpoint("http://dash.example/ws/events").unwrap(),
            "ws://dash.example/ws/events"
        );
        assert_eq!(
            socket_endpoint("https://dash.example/ws/events").unwrap(),
            "wss://dash.example/ws/events"
        );
    }

    #[test]
    fn test_socket_endpoint_keeps_ws_schemes() {
        assert_eq!(
            socket_endpoint("wss://dash.example/ws/events").unwrap(),
            "wss://dash.example/ws/events"
        );
    }

    #[test]
    fn test_socket_endpoint_rejects_unknown_scheme() {
        assert!(socket_endpoint("ftp://dash.example/ws").is_err());
        assert!(socket_endpoint("not a url").is_err());
    }

    #[test]
    fn test_event_stream_endpoint_rewrites_path_segment() {
        assert_eq!(
            event_stream_endpoint("ws://dash.example/ws/events").unwrap(),
            "http://dash.example/sse/events"
        );
        assert_eq!(
            event_stream_endpoint("wss://dash.example/api/ws/events").unwrap(),
            "https://dash.example/api/sse/events"
        );
    }

    #[test]
    fn test_event_stream_endpoint_rewrites_trailing_segment() {
        assert_eq!(
            event_stream_endpoint("https://dash.example/ws").unwrap(),
            "https://dash.example/sse"
        );
    }

    #[test]
    fn test_event_stream_endpoint_without_ws_segment_is_untouched() {
        assert_eq!(
            event_stream_endpoint("https://dash.example/stream").unwrap(),
            "https://dash.example/stream"
        );
    }
}

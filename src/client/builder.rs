use std::sync::Arc;

use tokio::sync::RwLock;

use super::{ClientState, ConnectionManager, RealtimeClient};
use crate::infrastructure::{Backoff, endpoint};
use crate::transport::{EventStreamFactory, TransportFactory, WebSocketFactory};
use crate::types::{
    DEFAULT_MAX_RECONNECT_ATTEMPTS, DEFAULT_RECONNECT_INTERVAL, HEARTBEAT_INTERVAL, Result,
};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct RealtimeClientOptions {
    /// Base backoff unit in milliseconds. Default: 3000.
    pub reconnect_interval: u64,
    /// Ceiling on automatic retries before giving up. Default: 10.
    pub max_reconnect_attempts: u32,
    /// Select the unidirectional event-stream transport instead of the
    /// socket transport. Default: false.
    pub use_event_stream: bool,
    /// Heartbeat period in milliseconds, socket transport only.
    /// Default: 30000.
    pub heartbeat_interval: u64,
}

impl Default for RealtimeClientOptions {
    fn default() -> Self {
        Self {
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
            use_event_stream: false,
            heartbeat_interval: HEARTBEAT_INTERVAL,
        }
    }
}

/// Builder for [`RealtimeClient`] that validates and normalizes the endpoint
/// and optionally injects a transport factory (used by tests to run the full
/// lifecycle without a network stack).
pub struct RealtimeClientBuilder {
    endpoint: String,
    options: RealtimeClientOptions,
    factory: Option<Arc<dyn TransportFactory>>,
}

impl RealtimeClientBuilder {
    /// Validates the endpoint and rewrites it for the selected transport:
    /// `http(s)` becomes `ws(s)` for sockets; the `/ws/` path segment becomes
    /// `/sse/` (and `ws(s)` becomes `http(s)`) for event streams.
    pub fn new(endpoint: impl Into<String>, options: RealtimeClientOptions) -> Result<Self> {
        let raw = endpoint.into();
        let endpoint = if options.use_event_stream {
            endpoint::event_stream_endpoint(&raw)?
        } else {
            endpoint::socket_endpoint(&raw)?
        };
        Ok(Self {
            endpoint,
            options,
            factory: None,
        })
    }

    pub fn with_transport_factory(mut self, factory: Arc<dyn TransportFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn build(self) -> RealtimeClient {
        let factory = self.factory.unwrap_or_else(|| {
            if self.options.use_event_stream {
                Arc::new(EventStreamFactory::new())
            } else {
                Arc::new(WebSocketFactory)
            }
        });

        RealtimeClient {
            endpoint: self.endpoint,
            backoff: Backoff::new(self.options.reconnect_interval),
            options: self.options,
            factory,
            connection: Arc::new(ConnectionManager::new()),
            state: Arc::new(RwLock::new(ClientState::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_rewrites_http_endpoint_for_socket() {
        let builder = RealtimeClientBuilder::new(
            "https://dash.example/ws/events",
            RealtimeClientOptions::default(),
        )
        .unwrap();
        let client = builder.build();
        assert_eq!(client.endpoint(), "wss://dash.example/ws/events");
    }

    #[test]
    fn test_builder_rewrites_path_for_event_stream() {
        let options = RealtimeClientOptions {
            use_event_stream: true,
            ..Default::default()
        };
        let client = RealtimeClientBuilder::new("wss://dash.example/ws/events", options)
            .unwrap()
            .build();
        assert_eq!(client.endpoint(), "https://dash.example/sse/events");
    }

    #[test]
    fn test_builder_rejects_malformed_endpoint() {
        assert!(RealtimeClientBuilder::new("not a url", RealtimeClientOptions::default()).is_err());
    }
}

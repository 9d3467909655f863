use thiserror::Error;

/// Errors that can occur when using the realtime client.
///
/// Runtime faults (dropped connections, malformed frames, panicking
/// subscribers) are logged and contained rather than surfaced; this enum
/// covers construction and transport-open failures.
#[derive(Error, Debug)]
pub enum RealtimeError {
    /// WebSocket protocol error (handshake failed, invalid frame, etc.)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// HTTP error while opening the event-stream transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// General connection error with descriptive message
    #[error("Connection error: {0}")]
    Connection(String),

    /// Endpoint could not be normalized for the selected transport
    #[error("Endpoint error: {0}")]
    Endpoint(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error (malformed endpoint URL)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Attempted to send while not connected
    #[error("Not connected")]
    NotConnected,
}

/// Convenience type alias for `Result<T, RealtimeError>`.
pub type Result<T> = std::result::Result<T, RealtimeError>;

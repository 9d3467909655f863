/// Wildcard dispatch category. Handlers registered under this key receive
/// every inbound message; untyped messages route here and nowhere else.
pub const WILDCARD_EVENT: &str = "message";

/// Keep-alive token sent over the socket transport. A plain text marker,
/// not a structured message.
pub const HEARTBEAT_FRAME: &str = "ping";

/// Default base backoff unit (milliseconds).
pub const DEFAULT_RECONNECT_INTERVAL: u64 = 3_000;

/// Default ceiling on automatic reconnect attempts.
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// Heartbeat period (milliseconds), socket transport only.
pub const HEARTBEAT_INTERVAL: u64 = 30_000;

/// Backoff cap (milliseconds).
pub const MAX_RECONNECT_DELAY: u64 = 30_000;

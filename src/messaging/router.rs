use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::ClientState;
use crate::types::RealtimeMessage;

/// Routes inbound frames to registered subscribers.
pub struct MessageRouter {
    state: Arc<RwLock<ClientState>>,
}

impl MessageRouter {
    pub fn new(state: Arc<RwLock<ClientState>>) -> Self {
        Self { state }
    }

    /// Parses a raw text frame and dispatches it. Malformed frames are logged
    /// and dropped; they never affect the connection or subscriber state.
    pub async fn route_frame(&self, text: &str) {
        match serde_json::from_str::<RealtimeMessage>(text) {
            Ok(message) => self.route(message).await,
            Err(e) => {
                tracing::warn!(error = %e, raw = text, "dropping malformed frame");
            }
        }
    }

    /// Dispatches a parsed message: type-specific handlers first, in
    /// registration order, then wildcard handlers unless the declared type is
    /// itself the wildcard category. A panicking handler is logged and
    /// contained; the remaining handlers still run.
    pub async fn route(&self, message: RealtimeMessage) {
        let handlers = {
            let state = self.state.read().await;
            state.handlers_for(message.event())
        };

        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(&message))).is_err() {
                tracing::error!(event = message.event(), "subscriber panicked, skipping");
            }
        }
    }
}

use std::sync::{Arc, Weak};

use tokio::sync::RwLock;

use crate::client::ClientState;
use crate::types::RealtimeMessage;

/// Subscriber callback. Invoked synchronously on the read task, one frame at
/// a time, so it must not block.
pub type Handler = Arc<dyn Fn(&RealtimeMessage) + Send + Sync + 'static>;

/// One registered handler in the subscription registry.
pub struct Binding {
    pub id: u64,
    pub handler: Handler,
}

/// Handle to a registered subscriber, returned by
/// [`RealtimeClient::on`](crate::RealtimeClient::on).
///
/// Dropping the handle leaves the handler registered for the life of the
/// client; call [`unsubscribe`](Self::unsubscribe) to remove it.
pub struct Subscription {
    state: Weak<RwLock<ClientState>>,
    event: String,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(state: Weak<RwLock<ClientState>>, event: String, id: u64) -> Self {
        Self { state, event, id }
    }

    /// Removes exactly this handler. Other handlers registered for the same
    /// event type are unaffected; once an event's handler set empties, its
    /// registry entry is removed entirely.
    pub async fn unsubscribe(self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        state.write().await.remove_binding(&self.event, self.id);
    }
}

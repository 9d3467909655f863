use std::collections::HashMap;

use tokio::task::JoinHandle;

use crate::infrastructure::TaskManager;
use crate::messaging::{Binding, Handler};
use crate::types::WILDCARD_EVENT;

/// Consolidated mutable state for RealtimeClient.
/// Using a single struct reduces lock contention.
pub struct ClientState {
    /// Failed/closed connection counter; reset to 0 on successful connect.
    pub reconnect_attempts: u32,

    /// The single in-flight reconnect timer, if one is scheduled.
    pub reconnect_task: Option<JoinHandle<()>>,

    /// The running heartbeat, if any (socket transport only).
    pub heartbeat_task: Option<JoinHandle<()>>,

    /// Background task manager (transport read tasks).
    pub task_manager: TaskManager,

    /// Subscription registry: event type -> handlers in registration order.
    bindings: HashMap<String, Vec<Binding>>,
    binding_seq: u64,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            reconnect_attempts: 0,
            reconnect_task: None,
            heartbeat_task: None,
            task_manager: TaskManager::new(),
            bindings: HashMap::new(),
            binding_seq: 0,
        }
    }

    /// Registers a handler under an event type, returning its binding id.
    pub fn add_binding(&mut self, event: String, handler: Handler) -> u64 {
        self.binding_seq += 1;
        let id = self.binding_seq;
        self.bindings
            .entry(event)
            .or_default()
            .push(Binding { id, handler });
        id
    }

    /// Removes one binding; drops the event's registry entry once empty so
    /// the map does not accumulate dead keys.
    pub fn remove_binding(&mut self, event: &str, id: u64) {
        if let Some(list) = self.bindings.get_mut(event) {
            list.retain(|binding| binding.id != id);
            if list.is_empty() {
                self.bindings.remove(event);
            }
        }
    }

    /// Handlers to invoke for a dispatch category: the type-specific set in
    /// registration order, then the wildcard set unless the category is the
    /// wildcard itself.
    pub fn handlers_for(&self, event: &str) -> Vec<Handler> {
        let mut handlers: Vec<Handler> = self
            .bindings
            .get(event)
            .map(|list| list.iter().map(|b| b.handler.clone()).collect())
            .unwrap_or_default();
        if event != WILDCARD_EVENT
            && let Some(list) = self.bindings.get(WILDCARD_EVENT)
        {
            handlers.extend(list.iter().map(|b| b.handler.clone()));
        }
        handlers
    }

    /// Whether any handler is registered under this event type.
    pub fn has_binding(&self, event: &str) -> bool {
        self.bindings.contains_key(event)
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn noop() -> Handler {
        Arc::new(|_msg| {})
    }

    #[test]
    fn test_remove_last_binding_drops_registry_entry() {
        let mut state = ClientState::new();
        let id = state.add_binding("taskUpdate".into(), noop());
        assert!(state.has_binding("taskUpdate"));

        state.remove_binding("taskUpdate", id);
        assert!(!state.has_binding("taskUpdate"));

        // Entry was cleanly removed; re-subscribing works.
        state.add_binding("taskUpdate".into(), noop());
        assert_eq!(state.handlers_for("taskUpdate").len(), 1);
    }

    #[test]
    fn test_remove_one_binding_keeps_the_others() {
        let mut state = ClientState::new();
        let first = state.add_binding("taskUpdate".into(), noop());
        state.add_binding("taskUpdate".into(), noop());

        state.remove_binding("taskUpdate", first);
        assert_eq!(state.handlers_for("taskUpdate").len(), 1);
        assert!(state.has_binding("taskUpdate"));
    }

    #[test]
    fn test_handlers_for_appends_wildcard_after_typed() {
        let mut state = ClientState::new();
        state.add_binding("taskUpdate".into(), noop());
        state.add_binding(WILDCARD_EVENT.into(), noop());

        assert_eq!(state.handlers_for("taskUpdate").len(), 2);
        assert_eq!(state.handlers_for(WILDCARD_EVENT).len(), 1);
        assert_eq!(state.handlers_for("unrelated").len(), 1);
    }
}

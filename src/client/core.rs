use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, mpsc};

use super::{
    ClientState, ConnectionManager, ConnectionState, RealtimeClientBuilder, RealtimeClientOptions,
};
use crate::heartbeat::HeartbeatManager;
use crate::infrastructure::Backoff;
use crate::messaging::{MessageRouter, Subscription};
use crate::transport::{TransportEvent, TransportFactory, TransportLink};
use crate::types::{RealtimeMessage, Result};

/// Reconnecting realtime client for a pipeline operations dashboard.
///
/// Owns one logical connection to the backend event source (WebSocket or
/// server-sent events), transparently recovers from drops with capped
/// exponential backoff, and routes inbound messages to subscribers keyed by
/// the message's `type` field.
///
/// Runtime faults never propagate to the caller: open failures, transport
/// errors, malformed frames, and panicking subscribers are logged and
/// contained. Readers derive connectivity from [`is_connected`](Self::is_connected).
///
/// # Example
///
/// ```no_run
/// use pipeline_realtime::{RealtimeClient, RealtimeClientOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RealtimeClient::new(
///     "wss://dashboard.example/ws/events",
///     RealtimeClientOptions::default(),
/// )?;
///
/// let sub = client
///     .on("taskUpdate", |msg| {
///         println!("task state changed: {:?}", msg.get("status"));
///     })
///     .await;
///
/// client.connect().await;
/// // ... later
/// sub.unsubscribe().await;
/// client.disconnect().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RealtimeClient {
    pub(crate) endpoint: String,
    pub(crate) options: RealtimeClientOptions,
    pub(crate) backoff: Backoff,
    pub(crate) factory: Arc<dyn TransportFactory>,

    // Connection manager
    pub(crate) connection: Arc<ConnectionManager>,

    // Consolidated mutable state
    pub(crate) state: Arc<RwLock<ClientState>>,
}

impl RealtimeClient {
    /// Creates a new client. Does not open a connection; call
    /// [`connect()`](Self::connect) for that.
    ///
    /// # Errors
    ///
    /// Returns [`RealtimeError`](crate::RealtimeError) if the endpoint URL is
    /// malformed or its scheme does not fit the selected transport. This is
    /// the only fallible surface of the client.
    pub fn new(endpoint: impl Into<String>, options: RealtimeClientOptions) -> Result<Self> {
        RealtimeClientBuilder::new(endpoint, options).map(|builder| builder.build())
    }

    /// The normalized endpoint this client dials.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Begins (or resumes) connection attempts.
    ///
    /// Idempotent: a no-op while already connecting or connected. A failed
    /// open is logged and retried on the backoff schedule; nothing is
    /// returned to the caller either way.
    pub async fn connect(&self) {
        {
            let state = self.connection.state().await;
            if state == ConnectionState::Connecting || state == ConnectionState::Connected {
                return;
            }
        }
        self.connection.set_state(ConnectionState::Connecting).await;
        tracing::info!(endpoint = %self.endpoint, "connecting");

        let link = match self.factory.connect(&self.endpoint).await {
            Ok(link) => link,
            Err(e) => {
                tracing::error!(error = %e, "failed to open transport");
                self.connection.set_state(ConnectionState::Idle).await;
                self.schedule_reconnect().await;
                return;
            }
        };

        let TransportLink {
            sender,
            shutdown,
            events,
        } = link;
        self.connection.attach(sender, shutdown).await;

        // Spawn the read task for this connection.
        let router = MessageRouter::new(Arc::clone(&self.state));
        let client = self.clone();
        {
            let mut state = self.state.write().await;
            state
                .task_manager
                .spawn(async move { client.read_loop(events, router).await });
        }

        // Event-stream transport is server-to-client only; no keep-alive.
        if !self.options.use_event_stream {
            self.start_heartbeat().await;
        }

        self.state.write().await.reconnect_attempts = 0;
        self.connection.set_state(ConnectionState::Connected).await;
        tracing::info!("connected");
    }

    /// Terminates the connection and stops all retry activity.
    ///
    /// Cancels any pending reconnect timer, stops the heartbeat, closes the
    /// transport, and resets the attempt counter. The subscription registry
    /// is left intact: subscribers resume receiving messages after the next
    /// [`connect()`](Self::connect) without re-subscribing. Safe to call in
    /// any state; a second call is a no-op.
    pub async fn disconnect(&self) {
        tracing::info!("disconnecting");
        {
            let mut state = self.state.write().await;
            if let Some(task) = state.reconnect_task.take() {
                task.abort();
            }
            if let Some(task) = state.heartbeat_task.take() {
                task.abort();
            }
            state.task_manager.abort_all();
            state.reconnect_attempts = 0;
        }
        self.connection.close().await;
    }

    /// Registers `handler` for messages of the given type.
    ///
    /// Register under [`WILDCARD_EVENT`](crate::types::WILDCARD_EVENT)
    /// (`"message"`) to observe every inbound message. Multiple independent
    /// subscriptions to the same type are supported; the returned
    /// [`Subscription`] removes exactly this handler.
    pub async fn on<F>(&self, event: impl Into<String>, handler: F) -> Subscription
    where
        F: Fn(&RealtimeMessage) + Send + Sync + 'static,
    {
        let event = event.into();
        let id = self
            .state
            .write()
            .await
            .add_binding(event.clone(), Arc::new(handler));
        Subscription::new(Arc::downgrade(&self.state), event, id)
    }

    /// Whether the connection is currently open.
    pub async fn is_connected(&self) -> bool {
        self.connection.is_connected().await
    }

    /// Consumes transport events for one connection. Ends when the transport
    /// closes (scheduling a reconnect) or the task is aborted by disconnect.
    async fn read_loop(self, mut events: mpsc::Receiver<TransportEvent>, router: MessageRouter) {
        while let Some(event) = events.recv().await {
            match event {
                TransportEvent::Frame(text) => {
                    tracing::debug!(raw = %text, "received frame");
                    router.route_frame(&text).await;
                }
                TransportEvent::Error(e) => {
                    // Errors flip the state but only the close that follows
                    // schedules a reconnect.
                    tracing::error!(error = %e, "transport error");
                    self.stop_heartbeat().await;
                    self.connection.mark_dropped().await;
                }
                TransportEvent::Closed(reason) => {
                    match &reason {
                        Some(reason) => tracing::warn!(%reason, "connection closed"),
                        None => tracing::warn!("connection closed"),
                    }
                    self.stop_heartbeat().await;
                    self.connection.reset().await;
                    self.schedule_reconnect().await;
                    break;
                }
            }
        }
    }

    /// Schedules a single reconnect attempt on the backoff schedule. A no-op
    /// while a timer is already in flight or once the ceiling is reached.
    async fn schedule_reconnect(&self) {
        let mut state = self.state.write().await;
        if state
            .reconnect_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
        {
            return;
        }
        if state.reconnect_attempts >= self.options.max_reconnect_attempts {
            tracing::error!(
                attempts = state.reconnect_attempts,
                "reconnect ceiling reached, giving up until connect() is called again"
            );
            return;
        }

        state.reconnect_attempts += 1;
        let attempt = state.reconnect_attempts;
        let delay = self.backoff.delay(attempt);
        tracing::info!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            "scheduling reconnect"
        );

        let client = self.clone();
        state.reconnect_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            client.state.write().await.reconnect_task = None;
            client.connect_boxed().await;
        }));
    }

    /// Boxes the recursive `connect()` call so the spawned reconnect future
    /// has a nameable `Send` type (breaks the opaque-type cycle).
    fn connect_boxed(
        self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        Box::pin(async move { self.connect().await })
    }

    /// Starts the heartbeat after a successful connect. A second start while
    /// one is already running is a no-op.
    async fn start_heartbeat(&self) {
        let mut state = self.state.write().await;
        if state
            .heartbeat_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
        {
            return;
        }
        let manager = HeartbeatManager::new(Arc::downgrade(&self.connection))
            .with_interval(Duration::from_millis(self.options.heartbeat_interval));
        state.heartbeat_task = Some(manager.spawn());
    }

    async fn stop_heartbeat(&self) {
        if let Some(task) = self.state.write().await.heartbeat_task.take() {
            task.abort();
        }
    }
}

use tokio::sync::{RwLock, mpsc, oneshot};

use crate::types::{RealtimeError, Result};

/// Connection lifecycle state. Exactly one holds at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Connected,
    Closing,
}

/// Owns the live transport handles and the connection state.
pub struct ConnectionManager {
    writer: RwLock<Option<mpsc::Sender<String>>>,
    shutdown: RwLock<Option<oneshot::Sender<()>>>,
    state: RwLock<ConnectionState>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            writer: RwLock::new(None),
            shutdown: RwLock::new(None),
            state: RwLock::new(ConnectionState::Idle),
        }
    }

    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    pub async fn set_state(&self, new_state: ConnectionState) {
        *self.state.write().await = new_state;
    }

    pub async fn is_connected(&self) -> bool {
        *self.state.read().await == ConnectionState::Connected
    }

    /// Stores the transport handles after a successful open. `writer` is
    /// `None` for unidirectional transports.
    pub async fn attach(
        &self,
        writer: Option<mpsc::Sender<String>>,
        shutdown: Option<oneshot::Sender<()>>,
    ) {
        *self.writer.write().await = writer;
        *self.shutdown.write().await = shutdown;
    }

    /// Sends a text frame through the transport.
    pub async fn send_frame(&self, text: &str) -> Result<()> {
        let writer = self.writer.read().await;
        let Some(writer) = writer.as_ref() else {
            return Err(RealtimeError::NotConnected);
        };
        writer
            .send(text.to_string())
            .await
            .map_err(|_| RealtimeError::Connection("transport worker is gone".into()))
    }

    /// Flips the state away from connected/connecting after a transport
    /// error, without touching the handles. The close event that follows
    /// does the cleanup.
    pub async fn mark_dropped(&self) {
        let mut state = self.state.write().await;
        if matches!(*state, ConnectionState::Connected | ConnectionState::Connecting) {
            *state = ConnectionState::Idle;
        }
    }

    /// Drops the handles after the remote side closed. No shutdown signal is
    /// sent; the worker already finished.
    pub async fn reset(&self) {
        *self.writer.write().await = None;
        *self.shutdown.write().await = None;
        self.set_state(ConnectionState::Idle).await;
    }

    /// Closes the transport on explicit disconnect. Safe in any state.
    pub async fn close(&self) {
        self.set_state(ConnectionState::Closing).await;
        if let Some(shutdown) = self.shutdown.write().await.take() {
            let _ = shutdown.send(());
        }
        *self.writer.write().await = None;
        self.set_state(ConnectionState::Idle).await;
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

//! Transport abstraction.
//!
//! The client never touches a concrete socket type; it asks an injected
//! [`TransportFactory`] for a [`TransportLink`] and consumes events from it.
//! This keeps the lifecycle logic testable without a network stack and lets
//! the unidirectional event-stream transport share the same surface (it just
//! has no sender).

mod event_stream;
mod websocket;

#[cfg(test)]
pub(crate) mod mock;

pub use event_stream::EventStreamFactory;
pub use websocket::WebSocketFactory;

use futures::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};

use crate::types::Result;

/// Event emitted by a transport worker.
#[derive(Debug)]
pub enum TransportEvent {
    /// A complete inbound text frame.
    Frame(String),
    /// Transport-level error. Does not by itself mean the channel is gone;
    /// a `Closed` event follows when it is.
    Error(String),
    /// The channel closed, with an optional reason.
    Closed(Option<String>),
}

/// Handle pair for one live transport connection.
///
/// The worker that owns the underlying socket/stream runs as its own task;
/// dropping or signalling `shutdown` tears it down.
pub struct TransportLink {
    /// Outbound text frames. `None` for unidirectional transports.
    pub sender: Option<mpsc::Sender<String>>,
    /// Signals the worker to close the underlying channel.
    pub shutdown: Option<oneshot::Sender<()>>,
    /// Inbound transport events, in delivery order.
    pub events: mpsc::Receiver<TransportEvent>,
}

/// Opens transport connections. Injected into the client at build time.
pub trait TransportFactory: Send + Sync {
    fn connect(&self, url: &str) -> BoxFuture<'static, Result<TransportLink>>;
}

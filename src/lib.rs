//! # pipeline-realtime
//!
//! Reconnecting realtime client for pipeline operations dashboards: one
//! logical connection to a server event stream (WebSocket or SSE) with
//! capped exponential backoff, a socket keep-alive heartbeat, and typed
//! pub/sub dispatch of inbound JSON messages.
//!
//! ## Example
//!
//! ```no_run
//! use pipeline_realtime::{RealtimeClient, RealtimeClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RealtimeClient::new(
//!         "wss://dashboard.example/ws/events",
//!         RealtimeClientOptions::default(),
//!     )?;
//!
//!     let _sub = client
//!         .on("taskUpdate", |msg| {
//!             println!("pipeline task update: {:?}", msg.get("status"));
//!         })
//!         .await;
//!
//!     client.connect().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod heartbeat;
pub mod infrastructure;
pub mod messaging;
pub mod transport;
pub mod types;

pub use client::{RealtimeClient, RealtimeClientBuilder, RealtimeClientOptions};
pub use messaging::Subscription;
pub use transport::{TransportEvent, TransportFactory, TransportLink};
pub use types::{RealtimeError, RealtimeMessage, WILDCARD_EVENT};

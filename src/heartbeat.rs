use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::client::ConnectionManager;
use crate::types::{HEARTBEAT_FRAME, HEARTBEAT_INTERVAL, RealtimeError};

/// Periodic keep-alive for the socket transport.
///
/// Sends the literal `ping` token so intermediaries don't drop the connection
/// on idle timeout. Event-stream connections never run a heartbeat. The task
/// holds the connection weakly; when the client is dropped the task winds
/// down on its own.
pub struct HeartbeatManager {
    interval: Duration,
    connection: Weak<ConnectionManager>,
}

impl HeartbeatManager {
    pub fn new(connection: Weak<ConnectionManager>) -> Self {
        Self {
            interval: Duration::from_millis(HEARTBEAT_INTERVAL),
            connection,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Spawns the heartbeat task. First tick fires one full interval after
    /// the connection opened, not immediately.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let Some(connection) = self.connection.upgrade() else {
                    break;
                };
                if !connection.is_connected().await {
                    continue;
                }

                match connection.send_frame(HEARTBEAT_FRAME).await {
                    Ok(()) => tracing::debug!("sent heartbeat"),
                    Err(RealtimeError::NotConnected) => {
                        tracing::debug!("skipping heartbeat, writer already gone");
                    }
                    Err(e) => tracing::error!(error = %e, "failed to send heartbeat"),
                }
            }
        })
    }
}

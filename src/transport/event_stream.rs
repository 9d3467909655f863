use futures::StreamExt;
use futures::future::BoxFuture;
use reqwest::header::ACCEPT;
use tokio::sync::{mpsc, oneshot};

use super::{TransportEvent, TransportFactory, TransportLink};
use crate::types::Result;

const CHANNEL_CAPACITY: usize = 64;

/// Unidirectional server-sent-events transport backed by reqwest.
///
/// Produces one [`TransportEvent::Frame`] per SSE event (the joined `data:`
/// lines); there is no sender and no client-side keep-alive.
pub struct EventStreamFactory {
    http: reqwest::Client,
}

impl EventStreamFactory {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for EventStreamFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportFactory for EventStreamFactory {
    fn connect(&self, url: &str) -> BoxFuture<'static, Result<TransportLink>> {
        let request = self.http.get(url).header(ACCEPT, "text/event-stream");
        Box::pin(async move {
            let response = request.send().await?.error_for_status()?;
            Ok(spawn_stream_worker(response))
        })
    }
}

fn spawn_stream_worker(response: reqwest::Response) -> TransportLink {
    let (event_tx, event_rx) = mpsc::channel::<TransportEvent>(CHANNEL_CAPACITY);
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let mut body = response.bytes_stream();
        let mut decoder = SseFrameDecoder::new();
        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                chunk = body.next() => match chunk {
                    Some(Ok(bytes)) => {
                        for frame in decoder.push(&String::from_utf8_lossy(&bytes)) {
                            if event_tx.send(TransportEvent::Frame(frame)).await.is_err() {
                                return;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        let _ = event_tx.send(TransportEvent::Error(e.to_string())).await;
                    }
                    None => {
                        let _ = event_tx.send(TransportEvent::Closed(None)).await;
                        break;
                    }
                }
            }
        }
    });

    TransportLink {
        sender: None,
        shutdown: Some(shutdown_tx),
        events: event_rx,
    }
}

/// Incremental SSE decoder: accumulates `data:` lines and yields one frame
/// per blank-line-terminated event. Comment lines and other fields are
/// ignored; routing lives in the JSON payload, not the SSE `event:` field.
struct SseFrameDecoder {
    buffer: String,
    data_lines: Vec<String>,
}

impl SseFrameDecoder {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            data_lines: Vec::new(),
        }
    }

    fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);
        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                if !self.data_lines.is_empty() {
                    frames.push(self.data_lines.join("\n"));
                    self.data_lines.clear();
                }
            } else if let Some(data) = line.strip_prefix("data:") {
                self.data_lines.push(data.strip_prefix(' ').unwrap_or(data).to_string());
            }
            // ':' comments and non-data fields fall through.
        }
        frames
    }
}

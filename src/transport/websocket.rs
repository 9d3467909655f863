use futures::future::BoxFuture;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::{TransportEvent, TransportFactory, TransportLink};
use crate::types::Result;

const CHANNEL_CAPACITY: usize = 64;

/// Bidirectional WebSocket transport backed by tokio-tungstenite.
pub struct WebSocketFactory;

impl TransportFactory for WebSocketFactory {
    fn connect(&self, url: &str) -> BoxFuture<'static, Result<TransportLink>> {
        let url = url.to_string();
        Box::pin(async move {
            let (socket, _) = connect_async(url.as_str()).await?;
            Ok(spawn_socket_worker(socket))
        })
    }
}

fn spawn_socket_worker(socket: WebSocketStream<MaybeTlsStream<TcpStream>>) -> TransportLink {
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel::<TransportEvent>(CHANNEL_CAPACITY);
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let (mut write, mut read) = socket.split();
        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    let _ = write.close().await;
                    break;
                }
                frame = outbound_rx.recv() => match frame {
                    Some(text) => {
                        if let Err(e) = write.send(Message::Text(text.into())).await {
                            let _ = event_tx
                                .send(TransportEvent::Error(e.to_string()))
                                .await;
                        }
                    }
                    // Writer handle dropped: owner is gone, close quietly.
                    None => {
                        let _ = write.close().await;
                        break;
                    }
                },
                inbound = read.next() => match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if event_tx
                            .send(TransportEvent::Frame(text.to_string()))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let reason = frame.map(|f| f.reason.to_string());
                        let _ = event_tx.send(TransportEvent::Closed(reason)).await;
                        break;
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                        // Pings are answered by tungstenite on the next flush.
                    }
                    Some(Ok(Message::Binary(data))) => {
                        tracing::warn!(len = data.len(), "ignoring unexpected binary frame");
                    }
                    Some(Ok(Message::Frame(_))) => {}
                    Some(Err(e)) => {
                        // Error first; the stream ends right after and the
                        // Closed event below follows.
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
        sender: Some(outbound_tx),
        shutdown: Some(shutdown_tx),
        events: event_rx,
    }
}

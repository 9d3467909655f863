use std::time::Duration;

use pipeline_realtime::{RealtimeClient, RealtimeClientOptions};

/// Watch the same feed over the unidirectional SSE transport. The `/ws/`
/// path segment is rewritten to `/sse/` automatically.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080/ws/events".to_string());

    let client = RealtimeClient::new(
        &url,
        RealtimeClientOptions {
            use_event_stream: true,
            ..Default::default()
        },
    )?;
    println!("Connecting to {}", client.endpoint());

    let _sub = client
        .on("notification", |msg| {
            println!("notification: {:?}", msg.get("text"));
        })
        .await;

    client.connect().await;
    tokio::time::sleep(Duration::from_secs(60)).await;
    client.disconnect().await;
    Ok(())
}

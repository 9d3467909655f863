use std::time::Duration;

use pipeline_realtime::{RealtimeClient, RealtimeClientOptions, WILDCARD_EVENT};

/// Watch a live pipeline dashboard feed over the socket transport.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://localhost:8080/ws/events".to_string());
    println!("Connecting to {url}");

    let client = RealtimeClient::new(&url, RealtimeClientOptions::default())?;

    let _tasks = client
        .on("taskUpdate", |msg| {
            println!(
                "task {:?} -> {:?}",
                msg.get("task_id"),
                msg.get("status")
            );
        })
        .await;
    let _all = client
        .on(WILDCARD_EVENT, |msg| {
            println!("[{}] {:?}", msg.event(), msg.payload);
        })
        .await;

    client.connect().await;

    // Render a connectivity indicator the way the owning dashboard would.
    for _ in 0..60 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let status = if client.is_connected().await {
            "connected"
        } else {
            "disconnected"
        };
        println!("status: {status}");
    }

    client.disconnect().await;
    Ok(())
}

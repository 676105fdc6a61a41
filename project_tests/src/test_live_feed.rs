//! # Live Feed Integration Tests
//!
//! This runner drives the full live-update path against a loopback
//! WebSocket server: connection state transitions, bounded-buffer batch
//! semantics, malformed-payload tolerance, and close-then-ignore behavior.
//! No network access is required.
//!
//! These tests are executed asynchronously using `tokio::main`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::SinkExt;
use lib_citypulse::{AdvisoryChannel, FeedState, LiveFeed, LiveFeedHandle, RuntimeConfig};
use tokio_tungstenite::tungstenite::protocol::Message;
use url::Url;

/// Minimal valid wire record for the push channel.
fn record_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "source": "twitter",
        "content": format!("live update {}", id),
        "category": "infrastructure",
        "sentiment": "negative",
        "timestamp": "2025-04-10T08:00:00.000Z"
    })
}

fn batch_json(ids: &[&str]) -> String {
    let records: Vec<serde_json::Value> = ids.iter().map(|id| record_json(id)).collect();
    serde_json::Value::Array(records).to_string()
}

/// Accepts one WebSocket client and relays every scripted payload to it.
async fn spawn_loopback_server() -> (SocketAddr, tokio::sync::mpsc::UnboundedSender<String>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("loopback bind");
    let addr = listener.local_addr().expect("local addr");
    let (script_tx, mut script_rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = tokio_tungstenite::accept_async(stream).await.expect("handshake");
        while let Some(payload) = script_rx.recv().await {
            if ws.send(Message::Text(payload.into())).await.is_err() {
                break; // client went away
            }
        }
    });

    (addr, script_tx)
}

async fn wait_for_state(handle: &LiveFeedHandle, wanted: FeedState) -> bool {
    for _ in 0..300 {
        if handle.state().await == wanted {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

async fn wait_for_buffer_len(handle: &LiveFeedHandle, wanted: usize) -> bool {
    for _ in 0..300 {
        if handle.snapshot().await.len() == wanted {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("--- Starting Live Feed Tests ---");

    let (addr, script) = spawn_loopback_server().await;
    let base = Url::parse(&format!("http://{}", addr))?;
    let config = RuntimeConfig::for_endpoint(base)?;

    let advisory = AdvisoryChannel::shared();
    let delivered = Arc::new(AtomicUsize::new(0));
    let delivered_in_callback = Arc::clone(&delivered);

    // --- TEST 1: Connection comes up ---
    println!("\n[Test 1] Feed transitions to Connected...");
    let handle = LiveFeed::open(&config, advisory.clone(), move |batch| {
        delivered_in_callback.fetch_add(batch.len(), Ordering::SeqCst);
    });
    assert!(wait_for_state(&handle, FeedState::Connected).await);
    println!("✅ Connected");

    // --- TEST 2: Batches prepend, capacity 5 ---
    println!("\n[Test 2] Batch prepend and truncation...");
    script.send(batch_json(&["a", "b", "c"]))?;
    assert!(wait_for_buffer_len(&handle, 3).await);
    script.send(batch_json(&["d", "e", "f", "g"]))?;
    assert!(wait_for_buffer_len(&handle, 5).await);

    let ids: Vec<String> = handle.snapshot().await.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["d", "e", "f", "g", "a"]);
    assert_eq!(delivered.load(Ordering::SeqCst), 7);
    println!("✅ Buffer is {:?}", ids);

    // --- TEST 3: Malformed payloads are dropped silently ---
    println!("\n[Test 3] Malformed payload tolerance...");
    script.send("not a batch at all".to_string())?;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(handle.snapshot().await.len(), 5);
    assert_eq!(handle.state().await, FeedState::Connected);
    println!("✅ Buffer and state untouched");

    // --- TEST 4: close() is final and idempotent ---
    println!("\n[Test 4] Close semantics...");
    handle.close();
    handle.close();
    assert!(wait_for_state(&handle, FeedState::Closed).await);
    let _ = script.send(batch_json(&["x", "y", "z"]));
    tokio::time::sleep(Duration::from_millis(100)).await;
    let ids: Vec<String> = handle.snapshot().await.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["d", "e", "f", "g", "a"]);
    println!("✅ Post-close batch ignored");

    println!("\n--- All Tests Passed Successfully ---");
    Ok(())
}

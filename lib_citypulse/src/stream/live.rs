//! # Live Update Feed
//!
//! WebSocket client for the push channel. Inbound messages are JSON batches
//! of records; each non-empty batch is prepended atomically to a bounded
//! newest-first buffer. Malformed messages are dropped per message without
//! touching the connection. A transport failure parks the feed in
//! [`FeedState::Lost`]; there is no automatic reconnect. Callers open a new
//! feed if they want one.

use std::sync::Arc;

use futures_util::StreamExt;
use serde_json::json;
use tokio::sync::{watch, Mutex, RwLock};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use url::Url;

use crate::configs::RuntimeConfig;
use crate::loggers::AdvisoryChannel;
use crate::models::Record;

/// Maximum number of records retained in the live buffer.
pub const LIVE_BUFFER_CAPACITY: usize = 5;

/// Connection state of a live feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// No connection attempt has completed yet.
    Disconnected,
    Connecting,
    Connected,
    /// The transport failed. Terminal for this feed instance.
    Lost,
    /// Closed locally via [`LiveFeedHandle::close`].
    Closed,
}

type BatchCallback = Arc<dyn Fn(&[Record]) + Send + Sync>;

/// Entry point for opening a live feed.
pub struct LiveFeed;

/// Handle to a running feed: connection state, buffer access, shutdown.
pub struct LiveFeedHandle {
    state: Arc<RwLock<FeedState>>,
    buffer: Arc<Mutex<Vec<Record>>>,
    shutdown: watch::Sender<bool>,
}

impl LiveFeed {
    /// Establishes the push channel and returns a handle immediately.
    ///
    /// The connection task transitions through `Connecting` to `Connected`
    /// and invokes `on_batch` with every accepted batch. Connection failures
    /// never surface here; they park the feed in [`FeedState::Lost`] and are
    /// reported once through the advisory channel.
    pub fn open<F>(
        config: &RuntimeConfig,
        advisory: Arc<AdvisoryChannel>,
        on_batch: F,
    ) -> LiveFeedHandle
    where
        F: Fn(&[Record]) + Send + Sync + 'static,
    {
        let state = Arc::new(RwLock::new(FeedState::Disconnected));
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(run_feed(
            config.ws_url.clone(),
            Arc::clone(&state),
            Arc::clone(&buffer),
            advisory,
            Arc::new(on_batch) as BatchCallback,
            shutdown_rx,
        ));

        LiveFeedHandle {
            state,
            buffer,
            shutdown: shutdown_tx,
        }
    }
}

impl LiveFeedHandle {
    /// Current connection state.
    pub async fn state(&self) -> FeedState {
        *self.state.read().await
    }

    /// Snapshot of the live buffer, newest batch first.
    pub async fn snapshot(&self) -> Vec<Record> {
        self.buffer.lock().await.clone()
    }

    /// Terminates the feed. Idempotent; inbound messages still queued when
    /// the signal lands are ignored.
    pub fn close(&self) {
        let _ = self.shutdown.send(true);
    }
}

async fn run_feed(
    url: Url,
    state: Arc<RwLock<FeedState>>,
    buffer: Arc<Mutex<Vec<Record>>>,
    advisory: Arc<AdvisoryChannel>,
    on_batch: BatchCallback,
    mut shutdown: watch::Receiver<bool>,
) {
    set_state(&state, FeedState::Connecting).await;
    log::info!("Connecting to live feed: {}", url);

    let ws_stream = tokio::select! {
        biased;
        _ = shutdown.changed() => {
            set_state(&state, FeedState::Closed).await;
            return;
        }
        connected = connect_async(url.as_str()) => match connected {
            Ok((ws_stream, _)) => ws_stream,
            Err(err) => {
                log::error!("Live feed connection failed: {}", err);
                advisory.error(
                    "Live updates connection error",
                    Some(json!({"error": err.to_string()})),
                );
                set_state(&state, FeedState::Lost).await;
                return;
            }
        }
    };

    set_state(&state, FeedState::Connected).await;
    advisory.success("Live updates connected", None);

    let (_write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            // Shutdown first: once close() is called, queued inbound
            // messages must not reach the buffer.
            biased;
            _ = shutdown.changed() => {
                set_state(&state, FeedState::Closed).await;
                log::info!("Live feed closed.");
                break;
            }
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        apply_message(text.to_string(), &buffer, &advisory, &on_batch).await;
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => {
                        log::warn!("Live feed stream closed by remote host.");
                        advisory.warn("Live updates stream ended", None);
                        set_state(&state, FeedState::Lost).await;
                        break;
                    }
                    Some(Err(err)) => {
                        log::error!("Live feed read error: {}", err);
                        advisory.error(
                            "Live updates connection error",
                            Some(json!({"error": err.to_string()})),
                        );
                        set_state(&state, FeedState::Lost).await;
                        break;
                    }
                    // Binary or raw frames are not part of the protocol;
                    // dropped like any other malformed payload.
                    _ => {}
                }
            }
        }
    }
}

/// Parses one inbound message and, if it is a valid non-empty batch, applies
/// it to the buffer, invokes the callback and emits one advisory notice.
async fn apply_message(
    text: String,
    buffer: &Mutex<Vec<Record>>,
    advisory: &AdvisoryChannel,
    on_batch: &BatchCallback,
) {
    let batch = match parse_batch(&text) {
        Some(batch) => batch,
        None => {
            log::debug!("Dropping malformed live payload ({} bytes)", text.len());
            return;
        }
    };
    if batch.is_empty() {
        return;
    }

    {
        let mut buf = buffer.lock().await;
        prepend_batch(&mut buf, &batch);
    }

    on_batch(&batch);
    advisory.info(
        &format!("{} new record(s) received", batch.len()),
        Some(json!({"batch_size": batch.len()})),
    );
}

fn parse_batch(text: &str) -> Option<Vec<Record>> {
    serde_json::from_str::<Vec<Record>>(text).ok()
}

/// Prepends a whole batch in delivery order, then truncates to capacity.
/// The buffer stays newest-batch-first with in-batch order preserved.
fn prepend_batch(buffer: &mut Vec<Record>, batch: &[Record]) {
    let mut next = Vec::with_capacity(LIVE_BUFFER_CAPACITY + batch.len());
    next.extend(batch.iter().cloned());
    next.extend(buffer.iter().cloned());
    next.truncate(LIVE_BUFFER_CAPACITY);
    *buffer = next;
}

async fn set_state(state: &Arc<RwLock<FeedState>>, next: FeedState) {
    *state.write().await = next;
}

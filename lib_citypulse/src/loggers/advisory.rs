//! Advisory notice fan-out.
//!
//! The data layer never raises transport failures to its callers; it reports
//! them (and a few happy-path events like a live connection coming up) as
//! advisory notices instead. `AdvisoryChannel` broadcasts each notice to any
//! number of subscribers and writes it through the `log` facade, so a
//! headless consumer still gets structured log lines when nobody subscribes.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;

use super::notice::{Notice, NoticeLevel};

/// Capacity of the broadcast ring. Slow subscribers that fall further behind
/// than this lose the oldest notices, never the sender.
const CHANNEL_CAPACITY: usize = 64;

pub struct AdvisoryChannel {
    tx: broadcast::Sender<Notice>,
}

impl AdvisoryChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Convenience constructor for the common shared-ownership case.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Subscribes to all notices emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn success(&self, text: &str, extras: Option<Value>) {
        self.emit(NoticeLevel::Success, text, extras);
    }

    pub fn info(&self, text: &str, extras: Option<Value>) {
        self.emit(NoticeLevel::Info, text, extras);
    }

    pub fn warn(&self, text: &str, extras: Option<Value>) {
        self.emit(NoticeLevel::Warn, text, extras);
    }

    pub fn error(&self, text: &str, extras: Option<Value>) {
        self.emit(NoticeLevel::Error, text, extras);
    }

    fn emit(&self, level: NoticeLevel, text: &str, extras: Option<Value>) {
        let notice = Notice::new(level, text, extras);

        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => {
                log::info!("{} {}", notice.text, extras_for_log(&notice))
            }
            NoticeLevel::Warn => log::warn!("{} {}", notice.text, extras_for_log(&notice)),
            NoticeLevel::Error => log::error!("{} {}", notice.text, extras_for_log(&notice)),
        }

        // A send error only means there is no subscriber right now.
        let _ = self.tx.send(notice);
    }
}

impl Default for AdvisoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

fn extras_for_log(notice: &Notice) -> String {
    notice
        .extras
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of an advisory notice.
///
/// `Success` exists alongside `Info` because the dashboard renders the two
/// differently (a connected badge vs. a plain notice); both map to the
/// `info` log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warn,
    Error,
}

/// # Advisory Notice
///
/// A single user-facing advisory event: transient, non-blocking, and never
/// part of any operation's return contract. Carries an optional JSON extras
/// payload for structured context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    /// Human-readable message text.
    pub text: String,
    /// Arbitrary structured context (dataset name, batch size, error cause).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Timestamp (UTC) when the notice was emitted.
    pub ts: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>, extras: Option<Value>) -> Self {
        Self {
            level,
            text: text.into(),
            extras,
            ts: Utc::now(),
        }
    }
}

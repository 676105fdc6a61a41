#![forbid(unsafe_code)]

// Declare the modules to re-export
pub mod aggregate;
pub mod configs;
pub mod intake;
pub mod loggers;
pub mod models;
pub mod retrieve;
pub mod samples;
pub mod stream;

// Re-export the common surface
pub use configs::config_sys::{ConfigError, RuntimeConfig};
pub use intake::{GrievanceDraft, GrievanceIntake, IntakeError};
pub use loggers::advisory::AdvisoryChannel;
pub use loggers::notice::{Notice, NoticeLevel};
pub use models::breakdown::{CategoryCount, PlatformCounts, TrendPoint};
pub use models::record::{Category, Location, Platform, Record, Sentiment};
pub use retrieve::feedback_api::{FeedbackApi, PostQuery};
pub use stream::live::{FeedState, LiveFeed, LiveFeedHandle, LIVE_BUFFER_CAPACITY};

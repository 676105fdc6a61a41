pub mod feedback_api;
pub mod http;

pub use feedback_api::*;
pub use http::*;

pub mod advisory;
pub mod notice;

pub use advisory::*;
pub use notice::*;

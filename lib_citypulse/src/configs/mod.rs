pub mod config_sys;

pub use config_sys::*;

//! Persistence for the watch host.

pub mod config;

pub use config::{ConfigError, WatchConfig};

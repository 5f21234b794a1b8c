//! # tlive-watch
//!
//! The watch side of the Telldus Live companion app.
//!
//! ## Architecture
//!
//! ```text
//! application/
//!   events       – the closed set of events the host loop delivers
//!   dispatcher   – owns session + roster, routes events, talks to the ports
//! infrastructure/
//!   display      – WatchDisplay adapters (log-backed, recording)
//!   channel      – OutboundChannel adapters (stdout JSON lines, recording)
//!   simulator    – phone simulator protocol and the async host loop
//!   storage      – TOML configuration
//! ```
//!
//! The application layer depends only on `tlive-core` and the port traits it
//! defines; the infrastructure layer supplies the implementations.

pub mod application;
pub mod infrastructure;

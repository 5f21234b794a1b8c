//! Infrastructure layer for the watch app.
//!
//! Adapters that sit behind the application ports, plus the simulator host.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `tlive_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`display`** – `WatchDisplay` implementations.  `LogDisplay` renders the
//!   status and list through `tracing`; `RecordingDisplay` records calls for
//!   tests.
//! - **`channel`** – `OutboundChannel` implementations.  `StdoutChannel`
//!   writes one JSON line per frame; `RecordingChannel` keeps frames in memory.
//! - **`simulator`** – the line protocol a simulated phone speaks and the
//!   async loop that feeds it to the dispatcher.
//! - **`storage`** – TOML configuration.

pub mod channel;
pub mod display;
pub mod simulator;
pub mod storage;

//! Domain layer: pure watch state with no I/O.
//!
//! - **`roster`** – the bounded, ordered list of devices and its list-row
//!   projection.
//! - **`session`** – the login state machine driven by `auth` messages.

pub mod roster;
pub mod session;

pub use roster::{Device, DeviceRoster, RosterListView, MAX_DEVICES, MAX_DEVICE_NAME_LEN};
pub use session::{DisplayEffect, SessionMachine, SessionState, Transition};

//! # tlive-core
//!
//! Shared library for the Telldus Live watch companion containing the wire
//! protocol codec and the domain state the watch keeps between messages.
//!
//! It has zero dependencies on display toolkits, message channels, or the
//! host event loop.  The `tlive-watch` crate wires it to those.
//!
//! # Architecture overview (for beginners)
//!
//! The watch app talks to a companion app on the paired phone.  The phone
//! logs the user into Telldus Live, then pushes the list of controllable
//! devices to the watch one message at a time.  The watch shows the list and
//! sends a "select" message back when the user picks a row.
//!
//! This crate defines:
//!
//! - **`protocol`** – How bytes travel between watch and phone.  Messages are
//!   small dictionaries of tagged tuples (`[count][key][type][len][value]…`)
//!   decoded into a typed [`AppMessage`].
//!
//! - **`domain`** – Pure state with no I/O.  The [`DeviceRoster`] is the
//!   bounded list of known devices and the [`SessionMachine`] tracks how far
//!   the login flow has progressed.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `tlive_core::DeviceRoster` instead of `tlive_core::domain::roster::DeviceRoster`.
pub use domain::roster::{Device, DeviceRoster, RosterListView};
pub use domain::session::{DisplayEffect, SessionMachine, SessionState, Transition};
pub use protocol::codec::{decode_message, encode_message, ProtocolError};
pub use protocol::messages::{AppKey, AppMessage, AuthAction, Module};

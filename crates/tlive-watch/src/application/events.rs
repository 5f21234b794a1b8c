//! Events delivered to the dispatcher by the host event loop.
//!
//! The host turns every callback it receives (inbox, outbox, list layer,
//! buttons) into one [`Event`] and hands it to
//! [`Dispatcher::handle_event`](super::dispatcher::Dispatcher::handle_event),
//! one at a time.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical watch buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Back,
    Up,
    Select,
    Down,
}

/// Everything the core reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A complete inbound frame from the phone.
    InboundReceived(Vec<u8>),
    /// The channel dropped an inbound message before delivery.
    InboundDropped { reason: String },
    /// The last outbound message reached the phone.
    SendConfirmed,
    /// The last outbound message could not be delivered.
    SendFailed { reason: String },
    /// The user clicked a list row.
    RowSelected(usize),
    /// The user long-pressed a list row.
    RowLongPressed(usize),
    /// The user pressed a button outside the list.
    ButtonPressed(Button),
}

/// Which flavour of the watch app is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Login flow plus device list.  128-byte message buffers.
    #[default]
    Full,
    /// Login flow only, started by a button press.  64-byte message buffers.
    Minimal,
}

/// Returned when a variant name is not `full` or `minimal`.
#[derive(Debug, Error, PartialEq)]
#[error("unknown variant '{0}', expected 'full' or 'minimal'")]
pub struct ParseVariantError(String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Variant::Full),
            "minimal" => Ok(Variant::Minimal),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

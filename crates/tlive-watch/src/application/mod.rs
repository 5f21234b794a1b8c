//! Application layer: the event dispatcher and the ports it drives.

pub mod dispatcher;
pub mod events;

pub use dispatcher::{
    ChannelError, Diagnostic, DispatchError, Dispatcher, DispatcherConfig, DispatcherObserver,
    OutboundChannel, WatchDisplay,
};
pub use events::{Button, Event, ParseVariantError, Variant};

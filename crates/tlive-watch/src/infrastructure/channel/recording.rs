//! In-memory outbound channel for tests.

use std::sync::Mutex;

use tlive_core::{decode_message, AppMessage};

use crate::application::dispatcher::{ChannelError, OutboundChannel};

/// Keeps every frame handed to it.
///
/// Set `should_fail` to make every `send` return [`ChannelError::Busy`].
#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub frames: Mutex<Vec<Vec<u8>>>,
    pub should_fail: bool,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that refuses every frame.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().unwrap().clone()
    }

    /// Frames that decode as app messages, in send order.
    pub fn sent_messages(&self) -> Vec<AppMessage> {
        self.frames
            .lock()
            .unwrap()
            .iter()
            .filter_map(|f| decode_message(f).ok())
            .collect()
    }
}

impl OutboundChannel for RecordingChannel {
    fn send(&self, frame: Vec<u8>) -> Result<(), ChannelError> {
        if self.should_fail {
            return Err(ChannelError::Busy);
        }
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }
}

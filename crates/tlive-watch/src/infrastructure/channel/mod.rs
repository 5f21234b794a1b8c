//! `OutboundChannel` adapters.
//!
//! [`StdoutChannel`] stands in for the phone link when the app runs under the
//! simulator: each frame becomes one JSON line on the writer, carrying the raw
//! bytes as hex and, when the frame is a well-formed app message, its decoded
//! fields.  The simulated phone answers with a `confirmed` or `failed` line.

pub mod recording;

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use tlive_core::{decode_message, AppMessage};
use tracing::trace;

use crate::application::dispatcher::{ChannelError, OutboundChannel};

pub use recording::RecordingChannel;

/// One outbound frame as printed on the simulator line protocol.
#[derive(Debug, Serialize)]
pub struct OutboundLine {
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<AppMessage>,
}

impl OutboundLine {
    pub fn from_frame(frame: &[u8]) -> Self {
        Self {
            hex: hex::encode(frame),
            message: decode_message(frame).ok(),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    outbound: &'a OutboundLine,
}

/// Writes each frame as `{"outbound":{...}}` followed by a newline.
pub struct StdoutChannel<W: Write + Send> {
    writer: Mutex<W>,
}

impl StdoutChannel<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> StdoutChannel<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the channel and returns the writer.
    pub fn into_inner(self) -> Result<W, ChannelError> {
        self.writer.into_inner().map_err(|_| ChannelError::Closed)
    }
}

impl<W: Write + Send> OutboundChannel for StdoutChannel<W> {
    fn send(&self, frame: Vec<u8>) -> Result<(), ChannelError> {
        let line = OutboundLine::from_frame(&frame);
        let json = serde_json::to_string(&Envelope { outbound: &line })
            .map_err(|e| ChannelError::Io(e.to_string()))?;

        let mut writer = self.writer.lock().map_err(|_| ChannelError::Closed)?;
        writeln!(writer, "{json}").map_err(|e| ChannelError::Io(e.to_string()))?;
        writer.flush().map_err(|e| ChannelError::Io(e.to_string()))?;
        trace!(bytes = frame.len(), "frame written");
        Ok(())
    }
}

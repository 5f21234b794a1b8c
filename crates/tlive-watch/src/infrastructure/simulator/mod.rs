//! Phone simulator and host loop.
//!
//! With no real phone or watch attached, the binary reads one JSON command per
//! line from stdin and turns it into dispatcher events:
//!
//! ```text
//! {"inbound": {"module": "auth", "action": "done"}}
//! {"inbound": {"module": "device", "action": "add", "name": "Lamp", "id": 7}}
//! {"hex": "0200000000..."}
//! {"select": 0}
//! {"long_select": 0}
//! {"button": "select"}
//! "confirmed"
//! {"failed": "not connected"}
//! {"dropped": "buffer overflow"}
//! "state"
//! ```
//!
//! # Task layout
//!
//! ```text
//! stdin ─► pump_lines (task) ─► mpsc ─► Host::run ─► Dispatcher
//!                                          │
//!                                          └─► LogDisplay (list redraws)
//! ```
//!
//! The dispatcher is only ever touched from `Host::run`, so events are handled
//! strictly one at a time in arrival order.

use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tlive_core::{encode_message, AppMessage, Device, ProtocolError, SessionState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::{Button, Dispatcher, Event};
use crate::infrastructure::display::LogDisplay;

/// Errors turning a simulator line into a host action.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("invalid command JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex frame: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("cannot encode inbound message: {0}")]
    Encode(#[from] ProtocolError),

    #[error("cannot write state: {0}")]
    Io(#[from] std::io::Error),
}

// ── Line protocol ─────────────────────────────────────────────────────────────

/// One line of simulator input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatorCommand {
    /// A message from the phone, given by its fields.
    Inbound(AppMessage),
    /// A message from the phone, given as raw frame bytes.
    Hex(String),
    Select(usize),
    LongSelect(usize),
    Button(Button),
    Confirmed,
    Failed(String),
    Dropped(String),
    /// Print the session state and roster.
    State,
}

/// What the host loop does for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    Deliver(Event),
    PrintState,
}

impl SimulatorCommand {
    /// Converts the command into a host action, encoding inbound messages.
    ///
    /// Inbound frames are not size-checked here; the dispatcher enforces its
    /// own inbox ceiling.
    pub fn into_action(self) -> Result<HostAction, SimulatorError> {
        let event = match self {
            SimulatorCommand::Inbound(msg) => Event::InboundReceived(encode_message(&msg, usize::MAX)?),
            SimulatorCommand::Hex(text) => Event::InboundReceived(decode_hex(&text)?),
            SimulatorCommand::Select(row) => Event::RowSelected(row),
            SimulatorCommand::LongSelect(row) => Event::RowLongPressed(row),
            SimulatorCommand::Button(button) => Event::ButtonPressed(button),
            SimulatorCommand::Confirmed => Event::SendConfirmed,
            SimulatorCommand::Failed(reason) => Event::SendFailed { reason },
            SimulatorCommand::Dropped(reason) => Event::InboundDropped { reason },
            SimulatorCommand::State => return Ok(HostAction::PrintState),
        };
        Ok(HostAction::Deliver(event))
    }
}

/// Decodes a hex frame, ignoring whitespace between digits.
fn decode_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(digits)
}

/// Parses one line.  Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<HostAction>, SimulatorError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let command: SimulatorCommand = serde_json::from_str(line)?;
    command.into_action().map(Some)
}

/// Reads lines until EOF, forwarding every valid command.
///
/// Invalid lines are logged and skipped.  Returns the number of actions
/// forwarded, stopping early if the receiver has gone away.
pub async fn pump_lines<R>(reader: R, tx: mpsc::Sender<HostAction>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Some(action)) => {
                if tx.send(action).await.is_err() {
                    debug!("host loop gone; stop reading input");
                    break;
                }
                forwarded += 1;
            }
            Ok(None) => {}
            Err(e) => warn!("skipping simulator line: {e}"),
        }
    }
    Ok(forwarded)
}

// ── Host loop ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct StateLine<'a> {
    state: StateSnapshot<'a>,
}

#[derive(Serialize)]
struct StateSnapshot<'a> {
    session: SessionState,
    devices: Vec<&'a Device>,
}

/// Owns the dispatcher and applies host actions to it in order.
pub struct Host<W: Write> {
    dispatcher: Dispatcher,
    display: Arc<LogDisplay>,
    state_out: W,
}

impl<W: Write> Host<W> {
    /// `display` must be the same instance the dispatcher was built with.
    pub fn new(dispatcher: Dispatcher, display: Arc<LogDisplay>, state_out: W) -> Self {
        Self {
            dispatcher,
            display,
            state_out,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn into_parts(self) -> (Dispatcher, W) {
        (self.dispatcher, self.state_out)
    }

    /// Applies one action, then redraws the list if the dispatcher asked.
    pub fn apply(&mut self, action: HostAction) -> Result<(), SimulatorError> {
        match action {
            HostAction::Deliver(event) => self.dispatcher.handle_event(event),
            HostAction::PrintState => self.print_state()?,
        }
        if self.display.take_refresh_request() {
            self.display.render_list(&self.dispatcher.list_view());
        }
        Ok(())
    }

    /// Applies actions until every sender is dropped.
    pub async fn run(mut self, mut rx: mpsc::Receiver<HostAction>) -> Self {
        while let Some(action) = rx.recv().await {
            if let Err(e) = self.apply(action) {
                warn!("host action failed: {e}");
            }
        }
        debug!("input closed; host loop exiting");
        self
    }

    fn print_state(&mut self) -> Result<(), SimulatorError> {
        let line = StateLine {
            state: StateSnapshot {
                session: self.dispatcher.session_state(),
                devices: self.dispatcher.roster().iter().collect(),
            },
        };
        let json = serde_json::to_string(&line)?;
        writeln!(self.state_out, "{json}")?;
        self.state_out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{DispatcherConfig, OutboundChannel, Variant, WatchDisplay};
    use crate::infrastructure::channel::RecordingChannel;
    use tlive_core::{decode_message, Module};

    fn make_host() -> (Host<Vec<u8>>, Arc<RecordingChannel>) {
        let display = Arc::new(LogDisplay::new());
        let channel = Arc::new(RecordingChannel::new());
        let dispatcher = Dispatcher::new(
            DispatcherConfig::for_variant(Variant::Full),
            Arc::clone(&display) as Arc<dyn WatchDisplay>,
            Arc::clone(&channel) as Arc<dyn OutboundChannel>,
        );
        (Host::new(dispatcher, display, Vec::new()), channel)
    }

    // ── parse_line ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_inbound_encodes_message() {
        let action = parse_line(r#"{"inbound": {"module": "auth", "action": "done"}}"#)
            .unwrap()
            .unwrap();

        let HostAction::Deliver(Event::InboundReceived(frame)) = action else {
            panic!("expected inbound frame, got {action:?}");
        };
        assert_eq!(decode_message(&frame).unwrap(), AppMessage::new(Module::Auth, "done"));
    }

    #[test]
    fn test_parse_unit_and_tagged_commands() {
        assert_eq!(
            parse_line(r#""confirmed""#).unwrap(),
            Some(HostAction::Deliver(Event::SendConfirmed))
        );
        assert_eq!(
            parse_line(r#"{"failed": "not connected"}"#).unwrap(),
            Some(HostAction::Deliver(Event::SendFailed {
                reason: "not connected".to_string()
            }))
        );
        assert_eq!(
            parse_line(r#"{"long_select": 2}"#).unwrap(),
            Some(HostAction::Deliver(Event::RowLongPressed(2)))
        );
        assert_eq!(
            parse_line(r#"{"button": "select"}"#).unwrap(),
            Some(HostAction::Deliver(Event::ButtonPressed(Button::Select)))
        );
        assert_eq!(parse_line(r#""state""#).unwrap(), Some(HostAction::PrintState));
    }

    #[test]
    fn test_parse_hex_passes_bytes_through() {
        assert_eq!(
            parse_line(r#"{"hex": "00"}"#).unwrap(),
            Some(HostAction::Deliver(Event::InboundReceived(vec![0])))
        );
    }

    #[test]
    fn test_parse_hex_tolerates_spaces_and_uppercase() {
        assert_eq!(
            parse_line(r#"{"hex": "01 AB ff"}"#).unwrap(),
            Some(HostAction::Deliver(Event::InboundReceived(vec![0x01, 0xab, 0xff])))
        );
    }

    #[test]
    fn test_parse_blank_line_is_skipped() {
        assert!(parse_line("   ").unwrap().is_none());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse_line("{nope"), Err(SimulatorError::Json(_))));
        assert!(matches!(parse_line(r#"{"hex": "zz"}"#), Err(SimulatorError::Hex(_))));
        assert!(matches!(
            parse_line(r#"{"hex": "abc"}"#),
            Err(SimulatorError::Hex(hex::FromHexError::OddLength))
        ));
    }

    // ── pump_lines ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_pump_lines_skips_invalid_and_blank_lines() {
        // Arrange
        let input: &[u8] = b"{\"select\": 0}\n\nnot json\n\"confirmed\"\n";
        let (tx, mut rx) = mpsc::channel(8);

        // Act
        let forwarded = pump_lines(input, tx).await.unwrap();

        // Assert
        assert_eq!(forwarded, 2);
        assert_eq!(rx.recv().await, Some(HostAction::Deliver(Event::RowSelected(0))));
        assert_eq!(rx.recv().await, Some(HostAction::Deliver(Event::SendConfirmed)));
        assert_eq!(rx.recv().await, None);
    }

    // ── Host ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_host_runs_login_and_selection_in_order() {
        // Arrange
        let (host, channel) = make_host();
        let input: &[u8] = br#"{"inbound": {"module": "auth", "action": "done"}}
{"inbound": {"module": "device", "action": "add", "name": "Lamp", "id": 7}}
{"select": 0}
"state"
"#;
        let (tx, rx) = mpsc::channel(8);

        // Act
        let pump = tokio::spawn(pump_lines(input, tx));
        let host = host.run(rx).await;
        assert_eq!(pump.await.unwrap().unwrap(), 4);

        // Assert
        assert_eq!(host.dispatcher().session_state(), SessionState::LoggedIn);
        assert_eq!(channel.sent_messages(), vec![AppMessage::device_select(7)]);

        let (_, out) = host.into_parts();
        let value: serde_json::Value =
            serde_json::from_str(String::from_utf8(out).unwrap().trim_end()).unwrap();
        assert_eq!(value["state"]["session"], "LoggedIn");
        assert_eq!(value["state"]["devices"][0]["name"], "Lamp");
        assert_eq!(value["state"]["devices"][0]["id"], 7);
    }

    #[test]
    fn test_host_consumes_refresh_request() {
        let (mut host, _channel) = make_host();
        let action = parse_line(r#"{"inbound": {"module": "device", "action": "add", "name": "Fan", "id": 1}}"#)
            .unwrap()
            .unwrap();

        host.apply(action).unwrap();

        assert_eq!(host.dispatcher().roster().count(), 1);
        assert!(!host.display.take_refresh_request());
    }
}

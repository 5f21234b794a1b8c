//! Dispatcher: the single owner of watch state.
//!
//! Every event from the host loop goes through [`Dispatcher::handle_event`].
//! Inbound frames are decoded once, routed on their `module` tag, and turned
//! into session transitions or roster appends.  List selections go the other
//! way and become outbound `device/select` messages.
//!
//! The dispatcher talks to the outside world only through two ports:
//!
//! - [`WatchDisplay`] – the status text, the two views, and the list redraw
//!   hint.  The display never mutates core state; it reads projections such as
//!   [`Dispatcher::list_view`].
//! - [`OutboundChannel`] – fire-and-forget frame delivery to the phone.  The
//!   delivery outcome comes back later as [`Event::SendConfirmed`] or
//!   [`Event::SendFailed`].
//!
//! Nothing here is fatal.  Every failure is logged and the dispatcher waits for
//! the next event.

use std::sync::Arc;

use thiserror::Error;
use tlive_core::{
    decode_message, encode_message,
    domain::session::STATUS_LOADING,
    protocol::{
        encode_dictionary,
        messages::{config_request, FULL_MESSAGE_BUFFER_SIZE, MINIMAL_MESSAGE_BUFFER_SIZE},
    },
    AppMessage, DeviceRoster, DisplayEffect, Module, ProtocolError, RosterListView,
    SessionMachine, SessionState,
};
use tracing::{debug, info};

use super::events::{Button, Event, Variant};

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Display collaborator.  Implementations live in the infrastructure layer.
pub trait WatchDisplay: Send + Sync {
    fn set_status_text(&self, text: &str);
    fn set_status_visible(&self, visible: bool);
    fn set_list_visible(&self, visible: bool);
    /// Hint that the roster changed and the list should be redrawn.
    fn request_list_refresh(&self);
}

/// Immediate refusal from the outbound channel.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChannelError {
    #[error("outbox is busy")]
    Busy,
    #[error("channel is closed")]
    Closed,
    #[error("channel I/O error: {0}")]
    Io(String),
}

/// Outbound message channel to the phone.
pub trait OutboundChannel: Send + Sync {
    /// Queues one encoded frame.  Must not block.
    fn send(&self, frame: Vec<u8>) -> Result<(), ChannelError>;
}

/// Conditions that are silent by default but can be observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A device was dropped because the roster is at capacity.
    RosterFull { id: i32 },
    /// The channel reported an outbound delivery failure.
    DeliveryFailed { reason: String },
}

/// Optional hook for [`Diagnostic`]s.
pub trait DispatcherObserver: Send + Sync {
    fn on_diagnostic(&self, diagnostic: Diagnostic);
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Why an event could not be fully handled.
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    /// Inbound frame larger than the inbox.
    #[error("inbound frame of {size} bytes exceeds inbox size {limit}")]
    InboundTooLarge { size: usize, limit: usize },

    /// Inbound frame could not be decoded.
    #[error("malformed inbound message: {0}")]
    Malformed(ProtocolError),

    /// Outbound message could not be encoded (e.g. too large for the outbox).
    #[error("cannot encode outbound message: {0}")]
    Encode(ProtocolError),

    /// The channel refused the frame.
    #[error("send failed: {0}")]
    Channel(#[from] ChannelError),

    /// Selection of a row the roster does not have.
    #[error("no device at row {0}")]
    NoSuchRow(usize),
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Buffer ceilings and feature set of the running variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    pub variant: Variant,
    pub inbox_size: usize,
    pub outbox_size: usize,
}

impl DispatcherConfig {
    /// Default ceilings for `variant`: 128 bytes for full, 64 for minimal.
    pub fn for_variant(variant: Variant) -> Self {
        let size = match variant {
            Variant::Full => FULL_MESSAGE_BUFFER_SIZE,
            Variant::Minimal => MINIMAL_MESSAGE_BUFFER_SIZE,
        };
        Self {
            variant,
            inbox_size: size,
            outbox_size: size,
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Full)
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Owns the session state and roster and routes every event.
pub struct Dispatcher {
    config: DispatcherConfig,
    session: SessionMachine,
    roster: DeviceRoster,
    display: Arc<dyn WatchDisplay>,
    channel: Arc<dyn OutboundChannel>,
    observer: Option<Arc<dyn DispatcherObserver>>,
}

impl Dispatcher {
    /// Creates a dispatcher in the logged-out state with an empty roster.
    pub fn new(
        config: DispatcherConfig,
        display: Arc<dyn WatchDisplay>,
        channel: Arc<dyn OutboundChannel>,
    ) -> Self {
        Self {
            config,
            session: SessionMachine::new(),
            roster: DeviceRoster::new(),
            display,
            channel,
            observer: None,
        }
    }

    /// Attaches an observer for roster-full and delivery-failure diagnostics.
    pub fn with_observer(mut self, observer: Arc<dyn DispatcherObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Puts the display in its initial state.
    pub fn start(&self) {
        self.display.set_status_text(STATUS_LOADING);
        self.display.set_status_visible(true);
        self.display.set_list_visible(false);
        info!(variant = ?self.config.variant, "watch app started");
    }

    // ── Projections ──────────────────────────────────────────────────────────

    pub fn config(&self) -> DispatcherConfig {
        self.config
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn roster(&self) -> &DeviceRoster {
        &self.roster
    }

    pub fn list_view(&self) -> RosterListView<'_> {
        RosterListView::new(&self.roster)
    }

    // ── Event entry point ─────────────────────────────────────────────────────

    /// Handles one event.  Failures are logged; nothing is propagated.
    pub fn handle_event(&mut self, event: Event) {
        let result = match event {
            Event::InboundReceived(frame) => self.handle_inbound(&frame),
            Event::InboundDropped { reason } => {
                debug!(%reason, "incoming message dropped");
                Ok(())
            }
            Event::SendConfirmed => {
                debug!("outgoing message was delivered");
                Ok(())
            }
            Event::SendFailed { reason } => {
                debug!(%reason, "outgoing message failed");
                self.notify(Diagnostic::DeliveryFailed { reason });
                Ok(())
            }
            Event::RowSelected(row) => self.handle_selection(row),
            Event::RowLongPressed(row) => {
                debug!(row, "select long callback");
                Ok(())
            }
            Event::ButtonPressed(button) => self.handle_button(button),
        };

        if let Err(e) = result {
            debug!("event not handled: {e}");
        }
    }

    /// Decodes and routes one inbound frame.
    ///
    /// Device messages without both `id` and `name` are ignored and return
    /// `Ok`, as are unknown modules.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InboundTooLarge`] or
    /// [`DispatchError::Malformed`]; in both cases no state is changed.
    pub fn handle_inbound(&mut self, frame: &[u8]) -> Result<(), DispatchError> {
        if frame.len() > self.config.inbox_size {
            return Err(DispatchError::InboundTooLarge {
                size: frame.len(),
                limit: self.config.inbox_size,
            });
        }

        debug!("incoming message received");
        let msg = decode_message(frame).map_err(DispatchError::Malformed)?;
        debug!(module = %msg.module, action = %msg.action, "got message");

        match msg.module {
            Module::Auth => self.handle_auth(&msg),
            Module::Device => self.handle_device(&msg),
            Module::Other(ref module) => debug!(%module, "ignoring message for unknown module"),
        }
        Ok(())
    }

    /// Sends `device/select` for the device shown at `row`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoSuchRow`] past the end of the roster, or an
    /// encode/channel error if the message could not be handed off.
    pub fn handle_selection(&mut self, row: usize) -> Result<(), DispatchError> {
        if self.config.variant == Variant::Minimal {
            debug!(row, "minimal variant has no device list; ignoring selection");
            return Ok(());
        }

        let device = self.roster.at(row).ok_or(DispatchError::NoSuchRow(row))?;
        debug!(row, id = device.id, "select callback");

        let msg = AppMessage::device_select(device.id);
        let frame =
            encode_message(&msg, self.config.outbox_size).map_err(DispatchError::Encode)?;
        self.channel.send(frame)?;
        Ok(())
    }

    /// Asks the phone for its configuration, which starts the login flow.
    ///
    /// The reply is not correlated with this call; it arrives as an ordinary
    /// `auth/request` message.
    ///
    /// # Errors
    ///
    /// Returns an encode or channel error if the request could not be handed
    /// off.
    pub fn handle_user_request_login(&mut self) -> Result<(), DispatchError> {
        let frame = encode_dictionary(&config_request(), self.config.outbox_size)
            .map_err(DispatchError::Encode)?;
        self.channel.send(frame)?;
        info!("requested configuration from phone");
        Ok(())
    }

    // ── Routing helpers ───────────────────────────────────────────────────────

    fn handle_button(&mut self, button: Button) -> Result<(), DispatchError> {
        match (self.config.variant, button) {
            (Variant::Minimal, Button::Select) => self.handle_user_request_login(),
            _ => {
                debug!(?button, "button ignored");
                Ok(())
            }
        }
    }

    fn handle_auth(&mut self, msg: &AppMessage) {
        let Some(action) = msg.auth_action() else {
            return;
        };
        match self.session.apply(&action) {
            Some(transition) => {
                info!(from = ?transition.from, to = ?transition.to, "session transition");
                self.apply_effects(&transition.effects);
            }
            None => debug!(action = %msg.action, "ignoring unknown auth action"),
        }
    }

    fn handle_device(&mut self, msg: &AppMessage) {
        if self.config.variant == Variant::Minimal {
            debug!("minimal variant has no device list; ignoring device message");
            return;
        }
        let (Some(id), Some(name)) = (msg.id, msg.name.as_deref()) else {
            debug!("device message without id or name");
            return;
        };

        debug!(id, "setting device");
        if !self.roster.add(id, name) {
            debug!(id, capacity = self.roster.capacity(), "roster full; device dropped");
            self.notify(Diagnostic::RosterFull { id });
        }
        self.display.request_list_refresh();
    }

    fn apply_effects(&mut self, effects: &[DisplayEffect]) {
        for effect in effects {
            match effect {
                DisplayEffect::SetStatusText(text) => self.display.set_status_text(text),
                DisplayEffect::SetStatusVisible(v) => self.display.set_status_visible(*v),
                DisplayEffect::SetListVisible(v) => self.display.set_list_visible(*v),
                DisplayEffect::ClearRoster => self.roster.clear(),
            }
        }
    }

    fn notify(&self, diagnostic: Diagnostic) {
        if let Some(observer) = &self.observer {
            observer.on_diagnostic(diagnostic);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tlive_core::domain::session::{STATUS_AUTHENTICATING, STATUS_LOGGED_IN};
    use tlive_core::domain::MAX_DEVICES;

    // ── Recording ports ───────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Text(String),
        StatusVisible(bool),
        ListVisible(bool),
        Refresh,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Call>>,
        frames: Mutex<Vec<Vec<u8>>>,
        diagnostics: Mutex<Vec<Diagnostic>>,
        refuse_sends: bool,
    }

    impl WatchDisplay for Recorder {
        fn set_status_text(&self, text: &str) {
            self.calls.lock().unwrap().push(Call::Text(text.to_string()));
        }
        fn set_status_visible(&self, visible: bool) {
            self.calls.lock().unwrap().push(Call::StatusVisible(visible));
        }
        fn set_list_visible(&self, visible: bool) {
            self.calls.lock().unwrap().push(Call::ListVisible(visible));
        }
        fn request_list_refresh(&self) {
            self.calls.lock().unwrap().push(Call::Refresh);
        }
    }

    impl OutboundChannel for Recorder {
        fn send(&self, frame: Vec<u8>) -> Result<(), ChannelError> {
            if self.refuse_sends {
                return Err(ChannelError::Busy);
            }
            self.frames.lock().unwrap().push(frame);
            Ok(())
        }
    }

    impl DispatcherObserver for Recorder {
        fn on_diagnostic(&self, diagnostic: Diagnostic) {
            self.diagnostics.lock().unwrap().push(diagnostic);
        }
    }

    fn make_dispatcher_with(config: DispatcherConfig, rec: Recorder) -> (Dispatcher, Arc<Recorder>) {
        let rec = Arc::new(rec);
        let d = Dispatcher::new(
            config,
            Arc::clone(&rec) as Arc<dyn WatchDisplay>,
            Arc::clone(&rec) as Arc<dyn OutboundChannel>,
        )
        .with_observer(Arc::clone(&rec) as Arc<dyn DispatcherObserver>);
        (d, rec)
    }

    fn make_dispatcher() -> (Dispatcher, Arc<Recorder>) {
        make_dispatcher_with(DispatcherConfig::default(), Recorder::default())
    }

    fn frame(msg: &AppMessage) -> Vec<u8> {
        encode_message(msg, usize::MAX).unwrap()
    }

    fn auth(action: &str) -> Vec<u8> {
        frame(&AppMessage::new(Module::Auth, action))
    }

    fn device(id: i32, name: &str) -> Vec<u8> {
        frame(&AppMessage::new(Module::Device, "add").with_name(name).with_id(id))
    }

    // ── Start ────────────────────────────────────────────────────────────────

    #[test]
    fn test_start_shows_loading_status_and_hides_list() {
        let (d, rec) = make_dispatcher();

        d.start();

        assert_eq!(
            *rec.calls.lock().unwrap(),
            vec![
                Call::Text(STATUS_LOADING.to_string()),
                Call::StatusVisible(true),
                Call::ListVisible(false),
            ]
        );
    }

    // ── Auth routing ──────────────────────────────────────────────────────────

    #[test]
    fn test_auth_done_hides_status_and_shows_list() {
        // Arrange
        let (mut d, rec) = make_dispatcher();

        // Act
        d.handle_event(Event::InboundReceived(auth("done")));

        // Assert
        assert_eq!(d.session_state(), SessionState::LoggedIn);
        assert_eq!(
            *rec.calls.lock().unwrap(),
            vec![
                Call::Text(STATUS_LOGGED_IN.to_string()),
                Call::StatusVisible(false),
                Call::ListVisible(true),
            ]
        );
    }

    #[test]
    fn test_auth_clear_empties_roster_and_restores_status_view() {
        // Arrange
        let (mut d, rec) = make_dispatcher();
        for i in 0..3 {
            d.handle_event(Event::InboundReceived(device(i, "d")));
        }
        rec.calls.lock().unwrap().clear();

        // Act
        d.handle_event(Event::InboundReceived(auth("clear")));

        // Assert
        assert_eq!(d.roster().count(), 0);
        assert_eq!(d.session_state(), SessionState::LoggedOut);
        assert_eq!(
            *rec.calls.lock().unwrap(),
            vec![Call::StatusVisible(true), Call::ListVisible(false)]
        );
    }

    #[test]
    fn test_auth_authenticating_sets_status_text() {
        let (mut d, rec) = make_dispatcher();
        d.handle_event(Event::InboundReceived(auth("authenticating")));
        assert_eq!(d.session_state(), SessionState::Authenticating);
        assert_eq!(
            *rec.calls.lock().unwrap(),
            vec![Call::Text(STATUS_AUTHENTICATING.to_string())]
        );
    }

    #[test]
    fn test_unknown_auth_action_changes_nothing() {
        let (mut d, rec) = make_dispatcher();
        assert_eq!(d.handle_inbound(&auth("logout")), Ok(()));
        assert_eq!(d.session_state(), SessionState::LoggedOut);
        assert!(rec.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_module_is_ignored() {
        let (mut d, rec) = make_dispatcher();
        let msg = AppMessage::new(Module::from("sensor"), "done");
        assert_eq!(d.handle_inbound(&frame(&msg)), Ok(()));
        assert_eq!(d.session_state(), SessionState::LoggedOut);
        assert!(rec.calls.lock().unwrap().is_empty());
    }

    // ── Malformed input ───────────────────────────────────────────────────────

    #[test]
    fn test_malformed_frame_changes_nothing() {
        let (mut d, rec) = make_dispatcher();
        d.handle_event(Event::InboundReceived(device(1, "Lamp")));
        rec.calls.lock().unwrap().clear();
        let roster_before = d.roster().clone();

        // Dictionary with only an action tuple.
        let mut bytes = vec![1u8];
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.push(1);
        bytes.extend_from_slice(&5u16.to_le_bytes());
        bytes.extend_from_slice(b"done\0");

        let result = d.handle_inbound(&bytes);

        assert!(matches!(result, Err(DispatchError::Malformed(_))));
        assert_eq!(d.session_state(), SessionState::LoggedOut);
        assert_eq!(d.roster(), &roster_before);
        assert!(rec.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_frame_larger_than_inbox_is_dropped() {
        let config = DispatcherConfig {
            inbox_size: 8,
            ..DispatcherConfig::default()
        };
        let (mut d, _rec) = make_dispatcher_with(config, Recorder::default());

        let result = d.handle_inbound(&auth("done"));

        assert!(matches!(result, Err(DispatchError::InboundTooLarge { limit: 8, .. })));
        assert_eq!(d.session_state(), SessionState::LoggedOut);
    }

    // ── Device routing ────────────────────────────────────────────────────────

    #[test]
    fn test_device_message_adds_row_and_requests_refresh() {
        let (mut d, rec) = make_dispatcher();

        d.handle_event(Event::InboundReceived(device(7, "Lamp")));

        assert_eq!(d.list_view().titles(), vec!["Lamp"]);
        assert_eq!(*rec.calls.lock().unwrap(), vec![Call::Refresh]);
    }

    #[test]
    fn test_device_message_without_id_is_ignored() {
        let (mut d, rec) = make_dispatcher();
        let msg = AppMessage::new(Module::Device, "add").with_name("Lamp");

        d.handle_event(Event::InboundReceived(frame(&msg)));

        assert_eq!(d.roster().count(), 0);
        assert!(rec.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_device_message_without_name_is_ignored() {
        let (mut d, rec) = make_dispatcher();
        let msg = AppMessage::new(Module::Device, "add").with_id(3);

        d.handle_event(Event::InboundReceived(frame(&msg)));

        assert_eq!(d.roster().count(), 0);
        assert!(rec.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_roster_full_is_silent_but_observable() {
        let (mut d, rec) = make_dispatcher();
        for i in 0..MAX_DEVICES as i32 {
            d.handle_event(Event::InboundReceived(device(i, "d")));
        }

        d.handle_event(Event::InboundReceived(device(99, "X")));

        assert_eq!(d.roster().count(), MAX_DEVICES);
        assert!(d.roster().iter().all(|dev| dev.id != 99));
        assert_eq!(
            *rec.diagnostics.lock().unwrap(),
            vec![Diagnostic::RosterFull { id: 99 }]
        );
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    #[test]
    fn test_selection_sends_device_select() {
        let (mut d, rec) = make_dispatcher();
        d.handle_event(Event::InboundReceived(device(7, "Lamp")));

        d.handle_event(Event::RowSelected(0));

        let frames = rec.frames.lock().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(decode_message(&frames[0]).unwrap(), AppMessage::device_select(7));
    }

    #[test]
    fn test_selection_past_end_is_rejected() {
        let (mut d, rec) = make_dispatcher();
        assert_eq!(d.handle_selection(0), Err(DispatchError::NoSuchRow(0)));
        assert!(rec.frames.lock().unwrap().is_empty());
    }

    #[test]
    fn test_selection_fails_when_outbox_too_small() {
        let config = DispatcherConfig {
            outbox_size: 16,
            ..DispatcherConfig::default()
        };
        let (mut d, rec) = make_dispatcher_with(config, Recorder::default());
        d.handle_inbound(&device(7, "Lamp")).unwrap();

        let result = d.handle_selection(0);

        assert!(matches!(
            result,
            Err(DispatchError::Encode(ProtocolError::EncodeTooLarge { limit: 16, .. }))
        ));
        assert!(rec.frames.lock().unwrap().is_empty());
    }

    #[test]
    fn test_channel_refusal_is_reported() {
        let rec = Recorder {
            refuse_sends: true,
            ..Recorder::default()
        };
        let (mut d, _rec) = make_dispatcher_with(DispatcherConfig::default(), rec);
        d.handle_inbound(&device(7, "Lamp")).unwrap();

        assert_eq!(
            d.handle_selection(0),
            Err(DispatchError::Channel(ChannelError::Busy))
        );
    }

    // ── Delivery outcome ──────────────────────────────────────────────────────

    #[test]
    fn test_send_failed_does_not_roll_back_state() {
        let (mut d, rec) = make_dispatcher();
        d.handle_event(Event::InboundReceived(auth("done")));
        d.handle_event(Event::InboundReceived(device(7, "Lamp")));
        d.handle_event(Event::RowSelected(0));

        d.handle_event(Event::SendFailed {
            reason: "not connected".to_string(),
        });

        assert_eq!(d.session_state(), SessionState::LoggedIn);
        assert_eq!(d.roster().count(), 1);
        assert_eq!(
            *rec.diagnostics.lock().unwrap(),
            vec![Diagnostic::DeliveryFailed {
                reason: "not connected".to_string()
            }]
        );
    }

    #[test]
    fn test_without_observer_diagnostics_are_silent() {
        let rec = Arc::new(Recorder::default());
        let mut d = Dispatcher::new(
            DispatcherConfig::default(),
            Arc::clone(&rec) as Arc<dyn WatchDisplay>,
            Arc::clone(&rec) as Arc<dyn OutboundChannel>,
        );

        d.handle_event(Event::SendFailed {
            reason: "x".to_string(),
        });

        assert!(rec.diagnostics.lock().unwrap().is_empty());
    }

    // ── Variants ──────────────────────────────────────────────────────────────

    #[test]
    fn test_minimal_select_button_requests_configuration() {
        let (mut d, rec) =
            make_dispatcher_with(DispatcherConfig::for_variant(Variant::Minimal), Recorder::default());

        d.handle_event(Event::ButtonPressed(Button::Select));

        let frames = rec.frames.lock().unwrap();
        assert_eq!(frames.len(), 1);
        let expected = encode_dictionary(&config_request(), MINIMAL_MESSAGE_BUFFER_SIZE).unwrap();
        assert_eq!(frames[0], expected);
    }

    #[test]
    fn test_full_variant_ignores_buttons() {
        let (mut d, rec) = make_dispatcher();
        d.handle_event(Event::ButtonPressed(Button::Select));
        assert!(rec.frames.lock().unwrap().is_empty());
    }

    #[test]
    fn test_minimal_variant_ignores_device_messages() {
        let (mut d, rec) =
            make_dispatcher_with(DispatcherConfig::for_variant(Variant::Minimal), Recorder::default());

        d.handle_event(Event::InboundReceived(device(7, "Lamp")));
        d.handle_event(Event::RowSelected(0));

        assert_eq!(d.roster().count(), 0);
        assert!(rec.calls.lock().unwrap().is_empty());
        assert!(rec.frames.lock().unwrap().is_empty());
    }

    #[test]
    fn test_minimal_variant_still_tracks_auth() {
        let (mut d, _rec) =
            make_dispatcher_with(DispatcherConfig::for_variant(Variant::Minimal), Recorder::default());
        d.handle_event(Event::InboundReceived(auth("request")));
        assert_eq!(d.session_state(), SessionState::AuthRequested);
    }

    #[test]
    fn test_config_for_variant_sets_buffer_sizes() {
        assert_eq!(DispatcherConfig::for_variant(Variant::Full).inbox_size, 128);
        assert_eq!(DispatcherConfig::for_variant(Variant::Minimal).outbox_size, 64);
    }
}

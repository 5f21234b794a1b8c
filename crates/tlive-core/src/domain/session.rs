//! Session state machine for the phone-driven login flow.
//!
//! # Login lifecycle (for beginners)
//!
//! The watch never logs in by itself.  The phone walks it through the flow by
//! sending `auth` messages:
//!
//! ```text
//!  LoggedOut ──request──►  AuthRequested ──authenticating──►  Authenticating
//!      ▲                                                          │
//!      └──────────────clear──────────────  LoggedIn  ◄────done────┘
//! ```
//!
//! The machine accepts every recognised action in every state: the phone is
//! the source of truth and the watch simply mirrors what it is told.  An
//! unrecognised action leaves the state untouched.
//!
//! Applying an action does not touch the display directly.  It returns a
//! [`Transition`] listing the [`DisplayEffect`]s the caller should apply.

use serde::{Deserialize, Serialize};

use crate::protocol::messages::AuthAction;

/// Status text shown before the first message arrives.
pub const STATUS_LOADING: &str = "Loading...";
/// Status text after `auth/request`.
pub const STATUS_LOGIN_REQUESTED: &str = "Please log in on your phone";
/// Status text after `auth/authenticating`.
pub const STATUS_AUTHENTICATING: &str = "Authenticating...";
/// Status text after `auth/done`.
pub const STATUS_LOGGED_IN: &str = "You are now logged in, more to come...";

/// Authentication progress as reported by the phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    LoggedOut,
    AuthRequested,
    Authenticating,
    LoggedIn,
}

/// A change the display collaborator must make after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEffect {
    SetStatusText(&'static str),
    SetStatusVisible(bool),
    SetListVisible(bool),
    /// Forget every device in the roster.
    ClearRoster,
}

/// Result of applying a recognised action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: SessionState,
    pub to: SessionState,
    /// Effects in the order they must be applied.
    pub effects: Vec<DisplayEffect>,
}

/// Tracks the current [`SessionState`].
#[derive(Debug, Default)]
pub struct SessionMachine {
    state: SessionState,
}

impl SessionMachine {
    /// Creates a machine in [`SessionState::LoggedOut`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Applies an `auth` action.
    ///
    /// Returns `None` for unrecognised actions; the state is then unchanged.
    pub fn apply(&mut self, action: &AuthAction) -> Option<Transition> {
        let (to, effects) = match action {
            AuthAction::Request => (
                SessionState::AuthRequested,
                vec![DisplayEffect::SetStatusText(STATUS_LOGIN_REQUESTED)],
            ),
            AuthAction::Authenticating => (
                SessionState::Authenticating,
                vec![DisplayEffect::SetStatusText(STATUS_AUTHENTICATING)],
            ),
            AuthAction::Done => (
                SessionState::LoggedIn,
                vec![
                    DisplayEffect::SetStatusText(STATUS_LOGGED_IN),
                    DisplayEffect::SetStatusVisible(false),
                    DisplayEffect::SetListVisible(true),
                ],
            ),
            AuthAction::Clear => (
                SessionState::LoggedOut,
                vec![
                    DisplayEffect::ClearRoster,
                    DisplayEffect::SetStatusVisible(true),
                    DisplayEffect::SetListVisible(false),
                ],
            ),
            AuthAction::Other(_) => return None,
        };

        let from = self.state;
        self.state = to;
        Some(Transition { from, to, effects })
    }
}

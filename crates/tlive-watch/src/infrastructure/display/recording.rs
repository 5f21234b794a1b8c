//! Recording display for tests.
//!
//! Every call is pushed into a `Mutex<Vec<DisplayCall>>` in order, so tests
//! can assert on exactly what the dispatcher asked the screen to do.

use std::sync::Mutex;

use crate::application::dispatcher::WatchDisplay;

/// One recorded display call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    StatusText(String),
    StatusVisible(bool),
    ListVisible(bool),
    ListRefresh,
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub calls: Mutex<Vec<DisplayCall>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent status text, if any was set.
    pub fn last_status_text(&self) -> Option<String> {
        self.calls.lock().unwrap().iter().rev().find_map(|c| match c {
            DisplayCall::StatusText(t) => Some(t.clone()),
            _ => None,
        })
    }

    /// Current visibility of the status view, as last set.
    pub fn status_visible(&self) -> Option<bool> {
        self.calls.lock().unwrap().iter().rev().find_map(|c| match c {
            DisplayCall::StatusVisible(v) => Some(*v),
            _ => None,
        })
    }

    /// Current visibility of the list view, as last set.
    pub fn list_visible(&self) -> Option<bool> {
        self.calls.lock().unwrap().iter().rev().find_map(|c| match c {
            DisplayCall::ListVisible(v) => Some(*v),
            _ => None,
        })
    }

    pub fn refresh_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == DisplayCall::ListRefresh)
            .count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl WatchDisplay for RecordingDisplay {
    fn set_status_text(&self, text: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(DisplayCall::StatusText(text.to_string()));
    }

    fn set_status_visible(&self, visible: bool) {
        self.calls.lock().unwrap().push(DisplayCall::StatusVisible(visible));
    }

    fn set_list_visible(&self, visible: bool) {
        self.calls.lock().unwrap().push(DisplayCall::ListVisible(visible));
    }

    fn request_list_refresh(&self) {
        self.calls.lock().unwrap().push(DisplayCall::ListRefresh);
    }
}

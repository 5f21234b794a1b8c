//! `WatchDisplay` adapters.
//!
//! The host has no screen, so [`LogDisplay`] renders the watch UI as log
//! records.  A list redraw is deferred: the adapter only flags it, and the host
//! loop renders the rows from [`Dispatcher::list_view`] once the event that
//! caused it has been handled.
//!
//! [`Dispatcher::list_view`]: crate::application::dispatcher::Dispatcher::list_view

pub mod recording;

use std::sync::atomic::{AtomicBool, Ordering};

use tlive_core::RosterListView;
use tracing::info;

use crate::application::dispatcher::WatchDisplay;

pub use recording::{DisplayCall, RecordingDisplay};

/// Display that logs every change at `info`.
#[derive(Debug, Default)]
pub struct LogDisplay {
    refresh_requested: AtomicBool,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once per pending refresh request.
    pub fn take_refresh_request(&self) -> bool {
        self.refresh_requested.swap(false, Ordering::AcqRel)
    }

    /// Logs every row of `view`.
    pub fn render_list(&self, view: &RosterListView<'_>) {
        info!(rows = view.row_count(), "device list");
        for (row, title) in view.titles().into_iter().enumerate() {
            info!(row, "  {title}");
        }
    }
}

impl WatchDisplay for LogDisplay {
    fn set_status_text(&self, text: &str) {
        info!(status = text, "status text");
    }

    fn set_status_visible(&self, visible: bool) {
        info!(visible, "status view");
    }

    fn set_list_visible(&self, visible: bool) {
        info!(visible, "device list view");
    }

    fn request_list_refresh(&self) {
        self.refresh_requested.store(true, Ordering::Release);
    }
}

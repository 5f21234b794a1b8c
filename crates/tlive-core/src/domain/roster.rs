//! Device roster: the bounded list of devices pushed by the phone.
//!
//! The phone sends one `device` message per device after login.  The watch
//! appends each to the roster in arrival order and the list view shows one
//! row per entry, so row `n` is always the `n`-th device received.
//!
//! # Bounded storage
//!
//! The roster holds at most [`MAX_DEVICES`] entries.  Adds past that are
//! dropped without error; the caller gets `false` back and can log it.
//! Entries are never deduplicated by id: if the phone sends the same device
//! twice, it appears twice.

use serde::{Deserialize, Serialize};

/// Maximum number of devices kept in the roster.
pub const MAX_DEVICES: usize = 30;

/// Maximum device name length in bytes.  Longer names are truncated.
pub const MAX_DEVICE_NAME_LEN: usize = 16;

/// Height in pixels of one list row.
pub const ROW_HEIGHT: u16 = 44;

/// A remote-controllable device known to the watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Stable identifier used in outbound `select` messages.
    pub id: i32,
    /// Display name, at most [`MAX_DEVICE_NAME_LEN`] bytes.
    pub name: String,
    /// Capability bitmask.  Not used for dispatch.
    pub methods: i32,
}

impl Device {
    /// Creates a device with `name` truncated to the display limit.
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: truncate_name(name).to_string(),
            methods: 0,
        }
    }
}

/// Truncates to at most [`MAX_DEVICE_NAME_LEN`] bytes without splitting a
/// UTF-8 character.
fn truncate_name(name: &str) -> &str {
    if name.len() <= MAX_DEVICE_NAME_LEN {
        return name;
    }
    let mut end = MAX_DEVICE_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Capacity-bounded, insertion-ordered collection of devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRoster {
    devices: Vec<Device>,
    capacity: usize,
}

impl Default for DeviceRoster {
    fn default() -> Self {
        Self::with_capacity(MAX_DEVICES)
    }
}

impl DeviceRoster {
    /// Creates an empty roster holding up to [`MAX_DEVICES`] entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty roster with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            devices: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a device.  Returns `false` and changes nothing when full.
    pub fn add(&mut self, id: i32, name: &str) -> bool {
        if self.is_full() {
            return false;
        }
        self.devices.push(Device::new(id, name));
        true
    }

    /// Forgets every device.
    pub fn clear(&mut self) {
        self.devices.clear();
    }

    pub fn count(&self) -> usize {
        self.devices.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.devices.len() >= self.capacity
    }

    /// Returns the device shown at `row`, or `None` past the end.
    pub fn at(&self, row: usize) -> Option<&Device> {
        self.devices.get(row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }
}

/// Read-only projection of a roster as list rows.
///
/// This is what the display collaborator's list layer queries when it redraws.
pub struct RosterListView<'a> {
    roster: &'a DeviceRoster,
}

impl<'a> RosterListView<'a> {
    pub fn new(roster: &'a DeviceRoster) -> Self {
        Self { roster }
    }

    pub fn row_count(&self) -> usize {
        self.roster.count()
    }

    pub fn row_height(&self) -> u16 {
        ROW_HEIGHT
    }

    /// Title drawn in `row`, or `None` past the end.
    pub fn row_title(&self, row: usize) -> Option<&'a str> {
        self.roster.at(row).map(|d| d.name.as_str())
    }

    /// All titles in row order.
    pub fn titles(&self) -> Vec<&'a str> {
        self.roster.iter().map(|d| d.name.as_str()).collect()
    }
}

//! All watch/phone protocol message types.
//!
//! A message on the wire is a *dictionary*: an ordered list of tuples, each
//! identified by a small integer key and carrying a typed value.  The watch
//! only understands four keys ([`AppKey`]); everything else is ignored on
//! decode so the phone side can add fields without breaking older watches.

use serde::{Deserialize, Serialize};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Size of the dictionary header (the tuple count byte).
pub const DICT_HEADER_SIZE: usize = 1;

/// Size of each tuple header: key (4) + type (1) + length (2).
pub const TUPLE_HEADER_SIZE: usize = 7;

/// Inbox/outbox ceiling used by the full (device list) variant.
pub const FULL_MESSAGE_BUFFER_SIZE: usize = 128;

/// Inbox/outbox ceiling used by the minimal (login only) variant.
pub const MINIMAL_MESSAGE_BUFFER_SIZE: usize = 64;

/// Key of the single anonymous field in the configuration request.
pub const CONFIG_REQUEST_KEY: u32 = 0;

/// Value of the configuration request field.
pub const CONFIG_REQUEST_VALUE: &str = "configuration";

// ── Tuple types ───────────────────────────────────────────────────────────────

/// Type byte carried in every tuple header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TupleType {
    ByteArray = 0x00,
    CString = 0x01,
    UInt = 0x02,
    Int = 0x03,
}

impl TryFrom<u8> for TupleType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(TupleType::ByteArray),
            0x01 => Ok(TupleType::CString),
            0x02 => Ok(TupleType::UInt),
            0x03 => Ok(TupleType::Int),
            _ => Err(()),
        }
    }
}

/// A decoded tuple value.
///
/// Integers are widened to 32 bits on decode regardless of the width used on
/// the wire, and always written as 4 bytes on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleValue {
    Bytes(Vec<u8>),
    /// UTF-8 text.  Must not contain NUL; the terminator is added by the codec.
    CString(String),
    UInt(u32),
    Int(i32),
}

impl TupleValue {
    /// Returns the wire type byte for this value.
    pub fn tuple_type(&self) -> TupleType {
        match self {
            TupleValue::Bytes(_) => TupleType::ByteArray,
            TupleValue::CString(_) => TupleType::CString,
            TupleValue::UInt(_) => TupleType::UInt,
            TupleValue::Int(_) => TupleType::Int,
        }
    }

    /// Number of value bytes this tuple occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            TupleValue::Bytes(b) => b.len(),
            TupleValue::CString(s) => s.len() + 1,
            TupleValue::UInt(_) | TupleValue::Int(_) => 4,
        }
    }

    /// Returns the text if this is a C string tuple.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TupleValue::CString(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a signed integer if it is an integer tuple that fits.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            TupleValue::Int(v) => Some(*v),
            TupleValue::UInt(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }
}

/// A single keyed entry of a [`Dictionary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    pub key: u32,
    pub value: TupleValue,
}

/// Ordered set of tuples exchanged atomically in one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    tuples: Vec<Tuple>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tuple, keeping insertion order.
    pub fn push(&mut self, key: u32, value: TupleValue) -> &mut Self {
        self.tuples.push(Tuple { key, value });
        self
    }

    /// Returns the value of the first tuple with `key`.
    pub fn find(&self, key: u32) -> Option<&TupleValue> {
        self.tuples.iter().find(|t| t.key == key).map(|t| &t.value)
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.tuples.iter()
    }

    /// Total size in bytes of the encoded dictionary.
    pub fn encoded_len(&self) -> usize {
        DICT_HEADER_SIZE
            + self
                .tuples
                .iter()
                .map(|t| TUPLE_HEADER_SIZE + t.value.encoded_len())
                .sum::<usize>()
    }
}

// ── Application keys ──────────────────────────────────────────────────────────

/// Tuple keys understood by the watch app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum AppKey {
    Module = 0,
    Action = 1,
    Name = 2,
    Id = 3,
}

impl TryFrom<u32> for AppKey {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, ()> {
        match value {
            0 => Ok(AppKey::Module),
            1 => Ok(AppKey::Action),
            2 => Ok(AppKey::Name),
            3 => Ok(AppKey::Id),
            _ => Err(()),
        }
    }
}

// ── Routing enums ─────────────────────────────────────────────────────────────

/// Top-level routing tag of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Module {
    Auth,
    Device,
    /// Any module this watch does not handle.  Kept verbatim for logging.
    Other(UnknownModule),
}

/// Name of a module other than `auth` or `device`.
///
/// Only [`Module::from`] can build one, so a known name always decodes to its
/// own variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownModule(String);

impl UnknownModule {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnknownModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Module {
    pub fn as_str(&self) -> &str {
        match self {
            Module::Auth => "auth",
            Module::Device => "device",
            Module::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for Module {
    fn from(value: &str) -> Self {
        match value {
            "auth" => Module::Auth,
            "device" => Module::Device,
            other => Module::Other(UnknownModule(other.to_string())),
        }
    }
}

impl From<String> for Module {
    fn from(value: String) -> Self {
        Module::from(value.as_str())
    }
}

impl From<Module> for String {
    fn from(value: Module) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action within the `auth` module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Request,
    Authenticating,
    Done,
    Clear,
    Other(String),
}

impl From<&str> for AuthAction {
    fn from(value: &str) -> Self {
        match value {
            "request" => AuthAction::Request,
            "authenticating" => AuthAction::Authenticating,
            "done" => AuthAction::Done,
            "clear" => AuthAction::Clear,
            other => AuthAction::Other(other.to_string()),
        }
    }
}

/// Action name used by the watch when the user picks a device row.
pub const DEVICE_SELECT_ACTION: &str = "select";

// ── Typed message ─────────────────────────────────────────────────────────────

/// A well-formed application message: `module` and `action` are always present.
///
/// `name` and `id` are carried only when the sender included them with the
/// right tuple type; whether they are required is up to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMessage {
    pub module: Module,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl AppMessage {
    pub fn new(module: Module, action: impl Into<String>) -> Self {
        Self {
            module,
            action: action.into(),
            name: None,
            id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Builds the outbound `device/select` message for a device id.
    pub fn device_select(id: i32) -> Self {
        Self::new(Module::Device, DEVICE_SELECT_ACTION).with_id(id)
    }

    /// Returns the parsed auth action, or `None` for non-auth messages.
    pub fn auth_action(&self) -> Option<AuthAction> {
        match self.module {
            Module::Auth => Some(AuthAction::from(self.action.as_str())),
            _ => None,
        }
    }

    /// Lays the message out as a dictionary in key order.
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.push(
            AppKey::Module as u32,
            TupleValue::CString(self.module.as_str().to_string()),
        );
        dict.push(AppKey::Action as u32, TupleValue::CString(self.action.clone()));
        if let Some(name) = &self.name {
            dict.push(AppKey::Name as u32, TupleValue::CString(name.clone()));
        }
        if let Some(id) = self.id {
            dict.push(AppKey::Id as u32, TupleValue::Int(id));
        }
        dict
    }
}

/// Builds the anonymous configuration request sent by the minimal variant.
pub fn config_request() -> Dictionary {
    let mut dict = Dictionary::new();
    dict.push(
        CONFIG_REQUEST_KEY,
        TupleValue::CString(CONFIG_REQUEST_VALUE.to_string()),
    );
    dict
}

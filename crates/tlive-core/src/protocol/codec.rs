//! Binary codec for the watch/phone dictionary messages.
//!
//! Wire format:
//! ```text
//! [count:1] then count × [key:4][type:1][length:2][value:length]
//! ```
//! Multi-byte integers are little-endian.  C strings carry a trailing NUL that
//! is included in `length`.  Integer tuples may be 1, 2 or 4 bytes wide.

use crate::protocol::messages::{
    AppKey, AppMessage, Dictionary, Module, TupleType, TupleValue, DICT_HEADER_SIZE,
    TUPLE_HEADER_SIZE,
};
use thiserror::Error;
use tracing::trace;

/// Errors that can occur during message encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the structure it claims to hold.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The tuple type byte is not a recognized value.
    #[error("unknown tuple type: 0x{0:02X}")]
    UnknownTupleType(u8),

    /// An integer tuple whose length is not 1, 2 or 4.
    #[error("invalid integer width {width} for key {key}")]
    InvalidIntegerWidth { key: u32, width: usize },

    /// A C string tuple that is not valid UTF-8.
    #[error("invalid UTF-8 in string for key {key}")]
    InvalidUtf8 { key: u32 },

    /// Bytes left over after the declared number of tuples.
    #[error("{0} trailing bytes after last tuple")]
    TrailingBytes(usize),

    /// More tuples than the count byte can express.
    #[error("too many tuples: {0}")]
    TooManyTuples(usize),

    /// A value longer than the 16-bit length field can express.
    #[error("value for key {key} is {len} bytes, exceeds tuple length field")]
    ValueTooLong { key: u32, len: usize },

    /// A string value containing NUL cannot be sent as a C string.
    #[error("string for key {key} contains an interior NUL")]
    InteriorNul { key: u32 },

    /// The encoded message would not fit the bounded buffer.
    #[error("encoded message is {size} bytes, exceeds buffer limit of {limit}")]
    EncodeTooLarge { size: usize, limit: usize },

    /// A required tag (`module` or `action`) is absent.
    #[error("malformed message: missing {0:?} field")]
    MissingField(AppKey),

    /// A required tag is present but not a C string.
    #[error("malformed message: {0:?} field is not a string")]
    WrongFieldType(AppKey),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes an [`AppMessage`] into a dictionary frame no larger than `limit`.
///
/// # Errors
///
/// Returns [`ProtocolError::EncodeTooLarge`] rather than truncating when the
/// message does not fit.
///
/// # Examples
///
/// ```rust
/// use tlive_core::protocol::{decode_message, encode_message};
/// use tlive_core::protocol::messages::AppMessage;
///
/// let msg = AppMessage::device_select(7);
/// let bytes = encode_message(&msg, 128).unwrap();
/// assert_eq!(decode_message(&bytes).unwrap(), msg);
/// ```
pub fn encode_message(msg: &AppMessage, limit: usize) -> Result<Vec<u8>, ProtocolError> {
    encode_dictionary(&msg.to_dictionary(), limit)
}

/// Decodes one [`AppMessage`] from a complete frame.
///
/// Only the framing of every tuple is checked.  Values are read only for the
/// four [`AppKey`] tags, so tuples under other keys are ignored whatever they
/// hold.  `name` and `id` are kept only when they decode as a string and an
/// integer respectively; otherwise they are treated as absent.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingField`] or [`ProtocolError::WrongFieldType`]
/// when `module` or `action` is unusable, or a structural error if the frame
/// itself is malformed.
pub fn decode_message(bytes: &[u8]) -> Result<AppMessage, ProtocolError> {
    let tuples = split_tuples(bytes)?;
    message_from_tuples(&tuples)
}

/// Encodes a raw dictionary, failing if it would exceed `limit` bytes.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the dictionary cannot be represented on the
/// wire or does not fit.
pub fn encode_dictionary(dict: &Dictionary, limit: usize) -> Result<Vec<u8>, ProtocolError> {
    if dict.len() > u8::MAX as usize {
        return Err(ProtocolError::TooManyTuples(dict.len()));
    }

    let size = dict.encoded_len();
    if size > limit {
        return Err(ProtocolError::EncodeTooLarge { size, limit });
    }

    let mut buf = Vec::with_capacity(size);
    buf.push(dict.len() as u8);
    for tuple in dict.iter() {
        let len = tuple.value.encoded_len();
        if len > u16::MAX as usize {
            return Err(ProtocolError::ValueTooLong { key: tuple.key, len });
        }
        buf.extend_from_slice(&tuple.key.to_le_bytes());
        buf.push(tuple.value.tuple_type() as u8);
        buf.extend_from_slice(&(len as u16).to_le_bytes());
        match &tuple.value {
            TupleValue::Bytes(b) => buf.extend_from_slice(b),
            TupleValue::CString(s) => {
                if s.as_bytes().contains(&0) {
                    return Err(ProtocolError::InteriorNul { key: tuple.key });
                }
                buf.extend_from_slice(s.as_bytes());
                buf.push(0x00);
            }
            TupleValue::UInt(v) => buf.extend_from_slice(&v.to_le_bytes()),
            TupleValue::Int(v) => buf.extend_from_slice(&v.to_le_bytes()),
        }
    }
    Ok(buf)
}

/// Decodes a raw dictionary frame.  The whole slice must be consumed.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the frame is truncated, uses an unknown tuple
/// type, or has trailing bytes.
pub fn decode_dictionary(bytes: &[u8]) -> Result<Dictionary, ProtocolError> {
    let mut dict = Dictionary::new();
    for tuple in split_tuples(bytes)? {
        dict.push(tuple.key, tuple.value()?);
    }
    Ok(dict)
}

// ── Framing ───────────────────────────────────────────────────────────────────

/// One tuple as framed on the wire, value not yet interpreted.
struct RawTuple<'a> {
    key: u32,
    tuple_type: TupleType,
    raw: &'a [u8],
}

impl RawTuple<'_> {
    fn value(&self) -> Result<TupleValue, ProtocolError> {
        Ok(match self.tuple_type {
            TupleType::ByteArray => TupleValue::Bytes(self.raw.to_vec()),
            TupleType::CString => TupleValue::CString(read_cstring(self.key, self.raw)?),
            TupleType::UInt => TupleValue::UInt(read_uint(self.key, self.raw)?),
            TupleType::Int => TupleValue::Int(read_int(self.key, self.raw)?),
        })
    }
}

/// Walks the headers of every tuple.  The whole slice must be consumed.
fn split_tuples(bytes: &[u8]) -> Result<Vec<RawTuple<'_>>, ProtocolError> {
    require_len(bytes, DICT_HEADER_SIZE)?;
    let count = bytes[0] as usize;

    let mut tuples = Vec::with_capacity(count);
    let mut off = DICT_HEADER_SIZE;
    for _ in 0..count {
        require_len(bytes, off + TUPLE_HEADER_SIZE)?;
        let key = u32::from_le_bytes([bytes[off], bytes[off + 1], bytes[off + 2], bytes[off + 3]]);
        let type_byte = bytes[off + 4];
        let tuple_type =
            TupleType::try_from(type_byte).map_err(|_| ProtocolError::UnknownTupleType(type_byte))?;
        let len = u16::from_le_bytes([bytes[off + 5], bytes[off + 6]]) as usize;
        off += TUPLE_HEADER_SIZE;

        require_len(bytes, off + len)?;
        tuples.push(RawTuple {
            key,
            tuple_type,
            raw: &bytes[off..off + len],
        });
        off += len;
    }

    if off != bytes.len() {
        return Err(ProtocolError::TrailingBytes(bytes.len() - off));
    }
    Ok(tuples)
}

// ── Typed extraction ──────────────────────────────────────────────────────────

fn message_from_tuples(tuples: &[RawTuple<'_>]) -> Result<AppMessage, ProtocolError> {
    let module = required_str(tuples, AppKey::Module)?;
    let action = required_str(tuples, AppKey::Action)?;
    let name = optional(tuples, AppKey::Name, |v| v.as_str().map(str::to_string));
    let id = optional(tuples, AppKey::Id, TupleValue::as_i32);

    Ok(AppMessage {
        module: Module::from(module),
        action,
        name,
        id,
    })
}

/// First tuple carrying `key`, matching [`Dictionary::find`].
fn find<'t, 'a>(tuples: &'t [RawTuple<'a>], key: AppKey) -> Option<&'t RawTuple<'a>> {
    tuples.iter().find(|t| t.key == key as u32)
}

fn required_str(tuples: &[RawTuple<'_>], key: AppKey) -> Result<String, ProtocolError> {
    let tuple = find(tuples, key).ok_or(ProtocolError::MissingField(key))?;
    if tuple.tuple_type != TupleType::CString {
        return Err(ProtocolError::WrongFieldType(key));
    }
    read_cstring(tuple.key, tuple.raw)
}

fn optional<T>(
    tuples: &[RawTuple<'_>],
    key: AppKey,
    convert: impl FnOnce(&TupleValue) -> Option<T>,
) -> Option<T> {
    let tuple = find(tuples, key)?;
    match tuple.value() {
        Ok(value) => {
            let converted = convert(&value);
            if converted.is_none() {
                trace!(?key, found = ?tuple.tuple_type, "ignoring mistyped optional field");
            }
            converted
        }
        Err(e) => {
            trace!(?key, "ignoring undecodable optional field: {e}");
            None
        }
    }
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn require_len(buf: &[u8], needed: usize) -> Result<(), ProtocolError> {
    if buf.len() < needed {
        Err(ProtocolError::InsufficientData {
            needed,
            available: buf.len(),
        })
    } else {
        Ok(())
    }
}

/// Reads text up to the first NUL, the way the watch SDK exposes C strings.
fn read_cstring(key: u32, raw: &[u8]) -> Result<String, ProtocolError> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    std::str::from_utf8(&raw[..end])
        .map(str::to_string)
        .map_err(|_| ProtocolError::InvalidUtf8 { key })
}

fn read_uint(key: u32, raw: &[u8]) -> Result<u32, ProtocolError> {
    match *raw {
        [a] => Ok(a as u32),
        [a, b] => Ok(u16::from_le_bytes([a, b]) as u32),
        [a, b, c, d] => Ok(u32::from_le_bytes([a, b, c, d])),
        _ => Err(ProtocolError::InvalidIntegerWidth { key, width: raw.len() }),
    }
}

fn read_int(key: u32, raw: &[u8]) -> Result<i32, ProtocolError> {
    match *raw {
        [a] => Ok(a as i8 as i32),
        [a, b] => Ok(i16::from_le_bytes([a, b]) as i32),
        [a, b, c, d] => Ok(i32::from_le_bytes([a, b, c, d])),
        _ => Err(ProtocolError::InvalidIntegerWidth { key, width: raw.len() }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

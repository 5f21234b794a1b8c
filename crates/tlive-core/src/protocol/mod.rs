//! Protocol module containing message types and the dictionary codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_dictionary, decode_message, encode_dictionary, encode_message, ProtocolError};
pub use messages::*;

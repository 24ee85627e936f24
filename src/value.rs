//! The decoded value model.
//!
//! Every schema, document and patch is decoded into a [`serde_json::Value`]
//! before it reaches a validator.

pub use serde_json::Value;

use crate::error::DecodeError;

/// Decodes raw bytes into a [`Value`].
///
/// Malformed input (unterminated structures, trailing data, invalid UTF-8)
/// fails as a whole; nothing is partially decoded.
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

//! MessagePack codec helpers.
//!
//! Thin wrappers around `rmp-serde` for encoding and decoding envelopes.
//! Both wire directions carry a single self-contained MessagePack value, so
//! either end can be reimplemented in any language with a MessagePack
//! library.

use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;

/// Encode a value to MessagePack bytes.
///
/// # Errors
///
/// Returns [`ExchangeError::Encode`] if serialisation fails.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ExchangeError> {
    rmp_serde::to_vec(value).map_err(ExchangeError::Encode)
}

/// Decode a value from MessagePack bytes.
///
/// # Errors
///
/// Returns [`ExchangeError::MalformedReply`] if deserialisation fails.
pub fn decode<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, ExchangeError> {
    rmp_serde::from_slice(bytes).map_err(ExchangeError::MalformedReply)
}

#[cfg(test)]
mod tests {
    use crate::envelope::{Request, Response};

    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let req = Request::new("info", None, None);
        let bytes = encode(&req).unwrap();
        let restored: Request = decode(&bytes).unwrap();
        assert_eq!(req, restored);
    }

    #[test]
    fn test_decode_invalid_bytes_is_malformed_reply() {
        let result: Result<Response, _> = decode(&[0xFF, 0xFF]);
        assert!(matches!(result, Err(ExchangeError::MalformedReply(_))));
    }
}

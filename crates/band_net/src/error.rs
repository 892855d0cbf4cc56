//! Exchange-layer error types.

use std::time::Duration;

/// Errors that can end a round trip.
///
/// Authorization denial is deliberately absent: a denied command still
/// arrives as a well-formed [`Response`](crate::envelope::Response) and is a
/// business outcome, not an exchange failure.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// The request failed to encode to MessagePack.
    #[error("failed to encode request: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// The received datagram does not decode into a response envelope.
    #[error("malformed reply: {0}")]
    MalformedReply(#[from] rmp_serde::decode::Error),

    /// The socket could not send or receive.
    #[error("transport unavailable: {0}")]
    Transport(#[from] std::io::Error),

    /// No matching reply arrived before the deadline.
    #[error("no reply from server within {0:?}")]
    Timeout(Duration),

    /// The encoded request exceeds the single-datagram ceiling.
    #[error("request of {len} bytes exceeds the {max}-byte datagram ceiling")]
    Oversized { len: usize, max: usize },
}

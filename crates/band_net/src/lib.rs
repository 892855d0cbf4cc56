//! # band_net
//!
//! UDP exchange layer for the band collection client.
//!
//! This crate provides:
//!
//! - [`envelope`] — request/response envelopes exchanged with the server.
//! - [`codec`] — MessagePack serialisation/deserialisation helpers.
//! - [`exchange`] — the driver performing one round trip per invocation.
//! - [`error`] — exchange-layer error types.

pub mod codec;
pub mod envelope;
pub mod error;
pub mod exchange;

pub use codec::{decode, encode};
pub use envelope::{Credentials, Outcome, Request, Response};
pub use error::ExchangeError;
pub use exchange::{ExchangeConfig, ExchangeDriver};

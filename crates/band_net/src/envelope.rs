//! Request and response envelopes exchanged with the collection server.
//!
//! All envelope types derive `Serialize` and `Deserialize` for MessagePack
//! transport. Each request carries a correlation token (`request_id`) that
//! the server must echo in its response; the driver uses it to match a reply
//! to the round trip that is actually outstanding.

use band_model::MusicBand;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Credentials ─────────────────────────────────────────────────────────────

/// Operator credentials, carried alongside every request.
///
/// The server decides whether a given command needs them; the client sends
/// whatever the current session holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

// ── Request ─────────────────────────────────────────────────────────────────

/// One command sent to the server.
///
/// At most one payload per request. The `request_id` is a v4 UUID string
/// minted at construction and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Correlation token echoed back by the server.
    pub request_id: String,
    /// The command verb and its inline arguments, e.g. `"remove_by_id 1000042"`.
    pub command: String,
    /// The band payload for commands that create or replace a record.
    pub payload: Option<MusicBand>,
    /// Credentials from the current session, if any.
    pub credentials: Option<Credentials>,
}

impl Request {
    /// Build a request with a fresh correlation token.
    #[must_use]
    pub fn new(
        command: impl Into<String>,
        payload: Option<MusicBand>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            command: command.into(),
            payload,
            credentials,
        }
    }
}

// ── Response ────────────────────────────────────────────────────────────────

/// How the server resolved a request.
///
/// `Denied` is a normal business outcome (insufficient privileges), not a
/// transport failure; the operator is told and may log in and resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Completed,
    Denied,
}

/// The server's reply to one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Echo of the request's correlation token.
    pub request_id: String,
    pub outcome: Outcome,
    /// Human-readable result text shown to the operator.
    pub message: String,
}

impl Response {
    /// Build a completed response echoing `request_id`.
    #[must_use]
    pub fn completed(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            outcome: Outcome::Completed,
            message: message.into(),
        }
    }

    /// Build a denied response echoing `request_id`.
    #[must_use]
    pub fn denied(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            outcome: Outcome::Denied,
            message: message.into(),
        }
    }

    /// Returns `true` if the server refused the command for lack of
    /// privileges.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        self.outcome == Outcome::Denied
    }
}

//! Operator session state.
//!
//! Holds the credentials entered with `login` or `register`. They are
//! attached to every subsequent request; the server decides whether a given
//! command needs them.

use band_net::Credentials;

/// The current operator session.
#[derive(Debug, Default)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    /// Create a session with no credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the operator's credentials for subsequent requests.
    pub fn sign_in(&mut self, login: impl Into<String>, password: impl Into<String>) {
        self.credentials = Some(Credentials {
            login: login.into(),
            password: password.into(),
        });
    }

    /// The credentials to attach to the next request, if any.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials.clone()
    }

    /// Returns `true` once the operator has signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.credentials.is_some()
    }
}

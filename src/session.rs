//! Session state shared between the client and its request transport.
//!
//! ARCHITECTURE
//! ============
//! The authenticated identity is a token plus a user id. The client owns the
//! [`Session`]; the REST transport holds a clone and renders a header
//! snapshot per request, so a request never mixes values from two logins.
//!
//! TRADE-OFFS
//! ==========
//! There is no coordination between concurrent writers: the individual
//! setters are last-write-wins, and a request racing a login carries
//! whichever values were current when its headers were rendered. Login uses
//! [`Session::establish`], which swaps both values under one lock.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::ClientError;

/// Header carrying the auth token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Header carrying the user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Snapshot of the current identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub auth_token: Option<String>,
    pub user_id: Option<String>,
}

/// Cloneable handle to the session; all clones see the same values.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Credentials>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the auth token. `None` clears it; any string is accepted.
    pub fn set_auth_token(&self, value: Option<String>) {
        self.write().auth_token = value;
    }

    /// Replace the user id. `None` clears it; any string is accepted.
    pub fn set_user_id(&self, value: Option<String>) {
        self.write().user_id = value;
    }

    /// Set token and user id together.
    pub fn establish(&self, auth_token: String, user_id: String) {
        let mut guard = self.write();
        guard.auth_token = Some(auth_token);
        guard.user_id = Some(user_id);
    }

    pub fn clear(&self) {
        *self.write() = Credentials::default();
    }

    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.read().auth_token.clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.read().user_id.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Credentials {
        self.read().clone()
    }

    /// Render the authentication headers for one outgoing request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if a value contains characters
    /// that cannot appear in an HTTP header.
    pub fn headers(&self) -> Result<HeaderMap, ClientError> {
        let snapshot = self.snapshot();
        let mut headers = HeaderMap::new();
        if let Some(token) = &snapshot.auth_token {
            headers.insert(HeaderName::from_static(AUTH_TOKEN_HEADER), HeaderValue::from_str(token)?);
        }
        if let Some(user_id) = &snapshot.user_id {
            headers.insert(HeaderName::from_static(USER_ID_HEADER), HeaderValue::from_str(user_id)?);
        }
        Ok(headers)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Credentials> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Credentials> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

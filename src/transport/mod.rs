//! Transport seams.
//!
//! DESIGN
//! ======
//! The client needs exactly two capabilities: send a [`RequestDescriptor`]
//! over REST, and call a method (login in particular) over the realtime
//! socket. Both are async traits so the login coordinator and the command
//! facades can be exercised against in-memory doubles; [`rest::RestClient`]
//! and [`ws::WsClient`] are the network implementations.

pub mod rest;
pub mod ws;

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ClientError;

/// HTTP verb of a REST call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in the query string rather than the body.
    #[must_use]
    pub fn uses_query(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

/// One REST call: verb, endpoint name relative to `/api/v1/`, flat parameters.
///
/// Built fresh per call and consumed by [`RequestTransport::send`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Endpoint name such as `"groups.list"` or `"settings/Site_Url"`.
    pub endpoint: String,
    pub params: Map<String, Value>,
}

impl RequestDescriptor {
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: impl Into<String>, params: Map<String, Value>) -> Self {
        Self { method, endpoint: endpoint.into(), params }
    }
}

/// Request/response transport.
#[async_trait::async_trait]
pub trait RequestTransport: Send + Sync {
    /// Send one request with the current session headers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on network failure and
    /// [`ClientError::Api`] when the platform reports an error.
    async fn send(&self, request: RequestDescriptor) -> Result<Value, ClientError>;
}

/// Persistent-socket transport.
#[async_trait::async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Invoke a realtime method and wait for its result.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Method`] when the server answers with an error
    /// result, or a socket error when the exchange itself fails.
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError>;

    /// Send the login frame for a username and password.
    ///
    /// # Errors
    ///
    /// A rejected login surfaces as [`ClientError::RealtimeAuthentication`];
    /// socket failures are returned as-is.
    async fn login(&self, username: &str, password: &str) -> Result<Value, ClientError> {
        self.call("login", vec![ddp::password_login_params(username, password)])
            .await
            .map_err(|e| match e {
                ClientError::Method { message, .. } => ClientError::RealtimeAuthentication { message },
                other => other,
            })
    }

    /// Drop the connection, if any.
    ///
    /// # Errors
    ///
    /// Returns a socket error if the close handshake fails.
    async fn close(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

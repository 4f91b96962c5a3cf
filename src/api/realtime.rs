//! Methods invoked over the realtime socket.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ClientError;
use crate::transport::RealtimeTransport;

#[derive(Clone)]
pub struct Realtime {
    transport: Arc<dyn RealtimeTransport>,
}

impl Realtime {
    pub(crate) fn new(transport: Arc<dyn RealtimeTransport>) -> Self {
        Self { transport }
    }

    /// Authenticate the socket with a username (or email) and password.
    ///
    /// # Errors
    ///
    /// [`ClientError::RealtimeAuthentication`] when the server rejects the credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value, ClientError> {
        self.transport.login(username, password).await
    }

    /// Authenticate the socket with a token obtained from a REST login.
    ///
    /// # Errors
    ///
    /// [`ClientError::RealtimeAuthentication`] when the token is rejected.
    pub async fn login_with_token(&self, token: &str) -> Result<Value, ClientError> {
        self.transport
            .call("login", vec![ddp::resume_login_params(token)])
            .await
            .map_err(|e| match e {
                ClientError::Method { message, .. } => ClientError::RealtimeAuthentication { message },
                other => other,
            })
    }

    /// # Errors
    ///
    /// Returns the method or socket error.
    pub async fn logout(&self) -> Result<Value, ClientError> {
        self.transport.call("logout", Vec::new()).await
    }

    /// Settings flagged public, readable before login.
    ///
    /// # Errors
    ///
    /// Returns the method or socket error.
    pub async fn get_public_settings(&self) -> Result<Value, ClientError> {
        self.transport.call("public-settings/get", Vec::new()).await
    }

    /// # Errors
    ///
    /// Returns the method or socket error.
    pub async fn get_user_roles(&self) -> Result<Value, ClientError> {
        self.transport.call("getUserRoles", Vec::new()).await
    }

    /// Invoke any server method by name.
    ///
    /// # Errors
    ///
    /// Returns the method or socket error.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        self.transport.call(method, params).await
    }

    /// Close the socket. The next call reconnects.
    ///
    /// # Errors
    ///
    /// Returns a socket error if the close handshake fails.
    pub async fn close(&self) -> Result<(), ClientError> {
        self.transport.close().await
    }
}

#[cfg(test)]
#[path = "realtime_test.rs"]
mod tests;

//! The session-aware client and its login coordinator.
//!
//! ARCHITECTURE
//! ============
//! A [`RocketChatClient`] owns one [`Session`], one request transport and one
//! realtime transport, and builds every command facade once over those
//! shared transports. Facades never see the session directly: the REST
//! transport renders it into headers per request, so a successful login is
//! visible to every later call.
//!
//! LOGIN SEQUENCE
//! ==============
//! `Idle -> AuthenticatingRest -> [RealtimeAuthenticating ->] Ready | Failed`
//!
//! The REST login always completes before the socket is touched, and the
//! session is established before the realtime step begins. A realtime
//! failure leaves the REST session in place: the client stays usable for
//! REST calls and the caller decides whether to retry.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::api::authentication::Authentication;
use crate::api::channels::Channels;
use crate::api::chat::Chat;
use crate::api::groups::Groups;
use crate::api::im::Im;
use crate::api::integration::Integration;
use crate::api::miscellaneous::Miscellaneous;
use crate::api::realtime::Realtime;
use crate::api::settings::Settings;
use crate::api::users::Users;
use crate::api::dispatch;
use crate::config::ConnectionConfig;
use crate::error::ClientError;
use crate::session::Session;
use crate::transport::rest::RestClient;
use crate::transport::ws::WsClient;
use crate::transport::{HttpMethod, RealtimeTransport, RequestTransport};

// =============================================================================
// LOGIN STATE
// =============================================================================

/// Progress of the most recent login invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginState {
    #[default]
    Idle,
    AuthenticatingRest,
    RealtimeAuthenticating,
    Ready,
    Failed,
}

/// Identity returned by a successful REST login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub auth_token: String,
    pub user_id: String,
    /// The user record, when the server includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub me: Option<Value>,
}

impl LoginData {
    /// Extract `data.authToken` and `data.userId` from a login response body.
    fn from_response(body: &Value) -> Result<Self, ClientError> {
        let data = &body["data"];
        let field = |name: &'static str| {
            data[name]
                .as_str()
                .map(str::to_owned)
                .ok_or(ClientError::MissingField(name))
        };
        Ok(Self {
            auth_token: field("authToken")?,
            user_id: field("userId")?,
            me: data.get("me").cloned(),
        })
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct RocketChatClient {
    config: ConnectionConfig,
    session: Session,
    state: Mutex<LoginState>,
    rest: Arc<dyn RequestTransport>,
    realtime: Arc<dyn RealtimeTransport>,
    authentication: Authentication,
    channels: Channels,
    chat: Chat,
    groups: Groups,
    im: Im,
    integration: Integration,
    miscellaneous: Miscellaneous,
    realtime_api: Realtime,
    settings: Settings,
    users: Users,
}

impl RocketChatClient {
    /// Build a client with network transports. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ConnectionConfig) -> Result<Self, ClientError> {
        let session = Session::new();
        let rest = RestClient::new(config.rest_base_url(), session.clone(), config.timeout)?;
        let realtime = WsClient::new(config.websocket_url(), config.timeout);
        Ok(Self::from_parts(config, session, Arc::new(rest), Arc::new(realtime)))
    }

    /// Build a client over caller-supplied transports. `rest` must render
    /// `session` into its request headers.
    #[must_use]
    pub fn from_parts(
        config: ConnectionConfig,
        session: Session,
        rest: Arc<dyn RequestTransport>,
        realtime: Arc<dyn RealtimeTransport>,
    ) -> Self {
        Self {
            authentication: Authentication::new(Arc::clone(&rest)),
            channels: Channels::new(Arc::clone(&rest)),
            chat: Chat::new(Arc::clone(&rest)),
            groups: Groups::new(Arc::clone(&rest)),
            im: Im::new(Arc::clone(&rest)),
            integration: Integration::new(Arc::clone(&rest)),
            miscellaneous: Miscellaneous::new(Arc::clone(&rest)),
            realtime_api: Realtime::new(Arc::clone(&realtime)),
            settings: Settings::new(Arc::clone(&rest)),
            users: Users::new(Arc::clone(&rest)),
            config,
            session,
            state: Mutex::new(LoginState::Idle),
            rest,
            realtime,
        }
    }

    /// Build a client and run the construction-time login.
    ///
    /// # Errors
    ///
    /// Returns the auto-login error, unless the config carries an
    /// `on_connected` handler, which then receives it instead.
    pub async fn connect(config: ConnectionConfig) -> Result<Self, ClientError> {
        let client = Self::new(config)?;
        client.start().await?;
        Ok(client)
    }

    /// Construction-time login: log in over REST when the config carries
    /// both a username and a password, otherwise succeed immediately.
    ///
    /// The outcome goes to the `on_connected` handler when one is set, and
    /// this returns `Ok(())`; without a handler the outcome is returned.
    ///
    /// # Errors
    ///
    /// The login error, when no handler is set.
    pub async fn start(&self) -> Result<(), ClientError> {
        let outcome = if self.config.has_credentials() {
            self.login(&self.config.username, &self.config.password, false)
                .await
                .map(|_| ())
        } else {
            debug!(host = %self.config.host, "client: no credentials, skipping login");
            Ok(())
        };

        match self.config.on_connected() {
            Some(handler) => {
                handler(outcome.as_ref().map(|_| self));
                Ok(())
            }
            None => outcome,
        }
    }

    /// Authenticate over REST, establish the session, then optionally
    /// authenticate the realtime socket with the same credentials.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Authentication`] when the server rejects the credentials
    /// - [`ClientError::RealtimeAuthentication`] when only the socket login fails;
    ///   the REST session is kept
    /// - transport errors as-is
    pub async fn login(&self, username: &str, password: &str, realtime: bool) -> Result<LoginData, ClientError> {
        self.transition(LoginState::AuthenticatingRest);
        info!(%username, realtime, "login: authenticating over REST");

        let data = match self
            .authentication
            .login(username, password)
            .await
            .map_err(authentication_error)
            .and_then(|body| LoginData::from_response(&body))
        {
            Ok(data) => data,
            Err(e) => {
                warn!(%username, error = %e, code = e.code(), "login: REST authentication failed");
                self.transition(LoginState::Failed);
                return Err(e);
            }
        };

        self.session.establish(data.auth_token.clone(), data.user_id.clone());
        debug!(user_id = %data.user_id, "login: session established");

        if realtime {
            self.transition(LoginState::RealtimeAuthenticating);
            if let Err(e) = self.realtime.login(username, password).await {
                warn!(%username, error = %e, "login: realtime authentication failed, REST session kept");
                self.transition(LoginState::Failed);
                return Err(e);
            }
        }

        self.transition(LoginState::Ready);
        info!(%username, user_id = %data.user_id, "login: ready");
        Ok(data)
    }

    /// Call the REST logout endpoint and clear the local session.
    ///
    /// The session is cleared even when the server call fails.
    ///
    /// # Errors
    ///
    /// Returns the transport or platform error of the logout call.
    pub async fn logout(&self) -> Result<Value, ClientError> {
        let outcome = self.authentication.logout().await;
        self.session.clear();
        self.transition(LoginState::Idle);
        if let Err(e) = &outcome {
            warn!(error = %e, "logout: server call failed, local session cleared");
        }
        outcome
    }

    /// Send an arbitrary request with the current session.
    ///
    /// # Errors
    ///
    /// Returns the transport or platform error for this call.
    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        dispatch(self.rest.as_ref(), method, endpoint, params).await
    }

    /// Close the realtime socket, if open.
    ///
    /// # Errors
    ///
    /// Returns a socket error if the close handshake fails.
    pub async fn close(&self) -> Result<(), ClientError> {
        self.realtime.close().await
    }

    #[must_use]
    pub fn login_state(&self) -> LoginState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: LoginState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(from = ?*state, to = ?next, "login: state transition");
        *state = next;
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    pub fn set_auth_token(&self, value: Option<String>) {
        self.session.set_auth_token(value);
    }

    pub fn set_user_id(&self, value: Option<String>) {
        self.session.set_user_id(value);
    }

    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.session.auth_token()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.session.user_id()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Facades
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    #[must_use]
    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    #[must_use]
    pub fn chat(&self) -> &Chat {
        &self.chat
    }

    #[must_use]
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    #[must_use]
    pub fn im(&self) -> &Im {
        &self.im
    }

    #[must_use]
    pub fn integration(&self) -> &Integration {
        &self.integration
    }

    #[must_use]
    pub fn miscellaneous(&self) -> &Miscellaneous {
        &self.miscellaneous
    }

    #[must_use]
    pub fn realtime(&self) -> &Realtime {
        &self.realtime_api
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn users(&self) -> &Users {
        &self.users
    }
}

/// Rejections of the login endpoint itself are authentication failures.
fn authentication_error(error: ClientError) -> ClientError {
    match error {
        ClientError::Api { status: 400 | 401 | 403, message, .. } => ClientError::Authentication { message },
        other => other,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

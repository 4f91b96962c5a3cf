//! Connection configuration.
//!
//! DESIGN
//! ======
//! Two construction styles resolve to one [`ConnectionConfig`]: a bag of
//! optional [`ClientOptions`] (deserializable, or read from the environment)
//! and the positional `(protocol, host, port, username, password)` form.
//! Missing or falsy values (empty strings, port 0) fall back to defaults
//! rather than erroring.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::client::RocketChatClient;
use crate::error::ClientError;

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_WEBSOCKET_PROTOCOL: &str = "ws";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Handler invoked once with the outcome of the construction-time login.
pub type ConnectedHandler = Arc<dyn Fn(Result<&RocketChatClient, &ClientError>) + Send + Sync>;

/// Loosely-specified client options; every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientOptions {
    pub protocol: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "basepath")]
    pub base_path: Option<String>,
    pub websocket_protocol: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ClientOptions {
    /// Read options from `ROCKETCHAT_*` environment variables.
    ///
    /// - `ROCKETCHAT_PROTOCOL`, `ROCKETCHAT_HOST`, `ROCKETCHAT_PORT`
    /// - `ROCKETCHAT_USERNAME`, `ROCKETCHAT_PASSWORD`
    /// - `ROCKETCHAT_BASE_PATH`, `ROCKETCHAT_WS_PROTOCOL`
    /// - `ROCKETCHAT_TIMEOUT_SECS`
    ///
    /// Unset or unparseable values are left as `None`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            protocol: env_string("ROCKETCHAT_PROTOCOL"),
            host: env_string("ROCKETCHAT_HOST"),
            port: env_parse("ROCKETCHAT_PORT"),
            username: env_string("ROCKETCHAT_USERNAME"),
            password: env_string("ROCKETCHAT_PASSWORD"),
            base_path: env_string("ROCKETCHAT_BASE_PATH"),
            websocket_protocol: env_string("ROCKETCHAT_WS_PROTOCOL"),
            timeout_secs: env_parse("ROCKETCHAT_TIMEOUT_SECS"),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

/// Canonical, immutable connection configuration.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    /// Empty means "skip automatic login".
    pub username: String,
    pub password: String,
    /// Normalized: no leading or trailing `/`.
    pub base_path: String,
    pub websocket_protocol: String,
    pub timeout: Duration,
    on_connected: Option<ConnectedHandler>,
}

impl ConnectionConfig {
    /// Resolve loosely-specified options into a canonical config.
    #[must_use]
    pub fn from_options(options: ClientOptions) -> Self {
        Self {
            protocol: or_default(options.protocol, DEFAULT_PROTOCOL),
            host: or_default(options.host, DEFAULT_HOST),
            port: options.port.filter(|p| *p != 0).unwrap_or(DEFAULT_PORT),
            username: options.username.unwrap_or_default(),
            password: options.password.unwrap_or_default(),
            base_path: normalize_base_path(options.base_path.as_deref().unwrap_or_default()),
            websocket_protocol: or_default(options.websocket_protocol, DEFAULT_WEBSOCKET_PROTOCOL),
            timeout: Duration::from_secs(
                options.timeout_secs.filter(|t| *t != 0).unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            on_connected: None,
        }
    }

    /// Positional construction kept for callers of the five-argument form.
    #[must_use]
    pub fn positional(protocol: &str, host: &str, port: u16, username: &str, password: &str) -> Self {
        Self::from_options(ClientOptions {
            protocol: Some(protocol.to_owned()),
            host: Some(host.to_owned()),
            port: Some(port),
            username: Some(username.to_owned()),
            password: Some(password.to_owned()),
            ..ClientOptions::default()
        })
    }

    /// Attach the handler that receives the construction-time login outcome.
    #[must_use]
    pub fn with_on_connected<F>(mut self, handler: F) -> Self
    where
        F: Fn(Result<&RocketChatClient, &ClientError>) + Send + Sync + 'static,
    {
        self.on_connected = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn on_connected(&self) -> Option<&ConnectedHandler> {
        self.on_connected.as_ref()
    }

    /// Whether construction should log in automatically.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// `protocol://host:port/<basePath>/api/v1/`
    #[must_use]
    pub fn rest_base_url(&self) -> String {
        format!(
            "{}://{}:{}/{}api/v1/",
            self.protocol,
            self.host,
            self.port,
            path_prefix(&self.base_path)
        )
    }

    /// `ws://host:port/<basePath>/websocket`
    #[must_use]
    pub fn websocket_url(&self) -> String {
        format!(
            "{}://{}:{}/{}websocket",
            self.websocket_protocol,
            self.host,
            self.port,
            path_prefix(&self.base_path)
        )
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from_options(ClientOptions::default())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "<redacted>" })
            .field("base_path", &self.base_path)
            .field("websocket_protocol", &self.websocket_protocol)
            .field("timeout", &self.timeout)
            .field("on_connected", &self.on_connected.is_some())
            .finish()
    }
}

/// Strip every leading and trailing `/` from a base path.
#[must_use]
pub fn normalize_base_path(raw: &str) -> String {
    raw.trim_matches('/').to_owned()
}

fn path_prefix(base_path: &str) -> String {
    if base_path.is_empty() {
        String::new()
    } else {
        format!("{base_path}/")
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

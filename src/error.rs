//! Client error taxonomy.
//!
//! Every failure, whether REST, socket, or login sequencing, travels through
//! the single error channel of the operation that produced it. Nothing is
//! retried here; [`ClientError::retryable`] is a hint for callers.

/// Errors produced by client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("http transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The websocket connection or a send/receive on it failed.
    #[error("websocket transport failed: {0}")]
    Socket(Box<tokio_tungstenite::tungstenite::Error>),

    /// The websocket was closed before the expected reply arrived.
    #[error("websocket closed")]
    SocketClosed,

    /// No reply arrived before the configured deadline.
    #[error("timed out waiting for {0}")]
    Timeout(String),

    /// The platform returned an application-level error for an endpoint.
    #[error("{endpoint} failed with status {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The REST login endpoint rejected the credentials.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The socket login was rejected after the REST login succeeded.
    #[error("realtime authentication failed: {message}")]
    RealtimeAuthentication { message: String },

    /// A realtime method call returned an error result.
    #[error("realtime method {method} failed: {message}")]
    Method { method: String, message: String },

    /// The socket handshake was refused by the server.
    #[error("realtime handshake rejected: {0}")]
    Handshake(String),

    /// A realtime frame could not be decoded.
    #[error("realtime frame decode failed: {0}")]
    Codec(#[from] ddp::CodecError),

    /// A session value cannot be carried in an HTTP header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// A payload could not be (de)serialized.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A response payload lacked a required field.
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
}

impl ClientError {
    /// Grepable error code, stable across releases.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Socket(_) => "E_SOCKET",
            Self::SocketClosed => "E_SOCKET_CLOSED",
            Self::Timeout(_) => "E_TIMEOUT",
            Self::Api { .. } => "E_API",
            Self::Authentication { .. } => "E_AUTHENTICATION",
            Self::RealtimeAuthentication { .. } => "E_REALTIME_AUTHENTICATION",
            Self::Method { .. } => "E_METHOD",
            Self::Handshake(_) => "E_HANDSHAKE",
            Self::Codec(_) => "E_CODEC",
            Self::InvalidHeader(_) => "E_INVALID_HEADER",
            Self::Json(_) => "E_JSON",
            Self::MissingField(_) => "E_MISSING_FIELD",
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::Socket(_)
                | Self::SocketClosed
                | Self::Timeout(_)
                | Self::Api { status: 429 | 500..=599, .. }
        )
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Socket(Box::new(e))
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

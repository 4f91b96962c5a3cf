//! Message model and JSON codec for the realtime (DDP) socket protocol.
//!
//! This crate owns the wire representation spoken over the `/websocket`
//! endpoint. It does no I/O: transports encode outgoing messages with
//! [`encode_message`] and feed incoming text frames to [`decode_message`].

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Protocol version requested in the `connect` handshake.
pub const PROTOCOL_VERSION: &str = "1";

/// Versions offered in the `connect` handshake, most preferred first.
pub const SUPPORTED_VERSIONS: [&str; 3] = ["1", "pre2", "pre1"];

/// Error returned by [`decode_message`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text frame was not valid JSON or did not match a known message shape.
    #[error("failed to decode ddp message: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A single message on the realtime wire protocol.
///
/// Collection traffic (`added`, `changed`, `ready`, ...) and frames without a
/// `msg` field decode to [`Message::Other`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", rename_all = "lowercase")]
pub enum Message {
    /// Client handshake.
    Connect { version: String, support: Vec<String> },
    /// Server accepted the handshake.
    Connected { session: String },
    /// Server rejected the handshake and proposes a version.
    Failed { version: String },
    /// Keepalive probe; must be answered with a `pong` carrying the same id.
    Ping {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    /// Keepalive answer.
    Pong {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    /// Remote method invocation.
    Method {
        id: String,
        method: String,
        params: Vec<Value>,
    },
    /// Outcome of a method invocation, correlated by `id`.
    Result {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<MethodError>,
    },
    /// Protocol-level error (malformed client message).
    Error {
        #[serde(default)]
        reason: Option<String>,
    },
    /// Anything else.
    #[serde(other)]
    Other,
}

impl Message {
    /// Client handshake offering [`SUPPORTED_VERSIONS`].
    #[must_use]
    pub fn connect() -> Self {
        Self::Connect {
            version: PROTOCOL_VERSION.to_owned(),
            support: SUPPORTED_VERSIONS.iter().map(|v| (*v).to_owned()).collect(),
        }
    }

    /// Method call with the given correlation id.
    #[must_use]
    pub fn method(id: impl Into<String>, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self::Method {
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// Error payload attached to a `result` message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodError {
    /// Numeric status or string code, depending on the server method.
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl MethodError {
    /// Human-readable description: `reason`, then `message`, then the raw code.
    #[must_use]
    pub fn describe(&self) -> String {
        if let Some(reason) = self.reason.as_deref().filter(|r| !r.is_empty()) {
            return reason.to_owned();
        }
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return message.to_owned();
        }
        match &self.error {
            Some(Value::String(code)) => code.clone(),
            Some(other) => other.to_string(),
            None => "unknown method error".to_owned(),
        }
    }
}

/// Encode a message as a JSON text frame.
#[must_use]
pub fn encode_message(message: &Message) -> String {
    // Serializing this enum cannot fail: all keys are strings and all
    // payloads are already `serde_json::Value`.
    serde_json::to_string(message).unwrap_or_default()
}

/// Decode a JSON text frame into a message.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON or a known `msg` type
/// with missing required fields.
pub fn decode_message(text: &str) -> Result<Message, CodecError> {
    let value = serde_json::from_str::<Value>(text)?;
    if value.get("msg").is_none() {
        return Ok(Message::Other);
    }
    Ok(serde_json::from_value(value)?)
}

/// Parameters for the `login` method using a username (or email) and password.
///
/// The password never leaves the client in clear text; only its SHA-256
/// digest is sent.
#[must_use]
pub fn password_login_params(username: &str, password: &str) -> Value {
    let user = if username.contains('@') {
        serde_json::json!({ "email": username })
    } else {
        serde_json::json!({ "username": username })
    };
    serde_json::json!({
        "user": user,
        "password": {
            "digest": sha256_hex(password),
            "algorithm": "sha-256",
        },
    })
}

/// Parameters for the `login` method resuming an existing auth token.
#[must_use]
pub fn resume_login_params(token: &str) -> Value {
    serde_json::json!({ "resume": token })
}

fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut s = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(s, "{b:02x}");
    }
    s
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

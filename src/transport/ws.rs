//! Realtime transport: DDP method calls over `tokio-tungstenite`.
//!
//! ARCHITECTURE
//! ============
//! The socket is opened lazily on the first call (connect handshake, then
//! `connected`) and kept behind an async mutex, so calls on one client are
//! serialized. While waiting for a `result`, server `ping`s are answered and
//! unrelated traffic is skipped. A failed exchange drops the socket; the next
//! call opens a fresh one. Nothing is retried automatically.

use std::time::Duration;

use ddp::Message as DdpMessage;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, warn};
use uuid::Uuid;

use super::RealtimeTransport;
use crate::error::ClientError;

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

pub struct WsClient {
    url: String,
    timeout: Duration,
    socket: Mutex<Option<Socket>>,
}

impl WsClient {
    /// Create an unconnected client for `url` (ends in `/websocket`).
    #[must_use]
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout, socket: Mutex::new(None) }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn open(&self) -> Result<Socket, ClientError> {
        debug!(url = %self.url, "ws: connecting");
        let (mut socket, _) = connect_async(self.url.as_str()).await?;
        send(&mut socket, &DdpMessage::connect()).await?;
        tokio::time::timeout(self.timeout, await_connected(&mut socket))
            .await
            .map_err(|_| ClientError::Timeout("realtime handshake".to_owned()))??;
        Ok(socket)
    }
}

#[async_trait::async_trait]
impl RealtimeTransport for WsClient {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        let mut guard = self.socket.lock().await;
        if guard.is_none() {
            *guard = Some(self.open().await?);
        }
        let socket = guard.as_mut().ok_or(ClientError::SocketClosed)?;

        let id = Uuid::new_v4().to_string();
        debug!(%method, %id, "ws: calling method");
        let outcome = exchange(socket, &id, method, params, self.timeout).await;

        if matches!(
            outcome,
            Err(ClientError::Socket(_) | ClientError::SocketClosed | ClientError::Timeout(_) | ClientError::Codec(_))
        ) {
            warn!(%method, "ws: dropping connection after failed exchange");
            *guard = None;
        }
        outcome
    }

    async fn close(&self) -> Result<(), ClientError> {
        let mut guard = self.socket.lock().await;
        if let Some(mut socket) = guard.take() {
            debug!(url = %self.url, "ws: closing");
            socket.close(None).await?;
        }
        Ok(())
    }
}

async fn exchange(
    socket: &mut Socket,
    id: &str,
    method: &str,
    params: Vec<Value>,
    timeout: Duration,
) -> Result<Value, ClientError> {
    send(socket, &DdpMessage::method(id, method, params)).await?;
    tokio::time::timeout(timeout, await_result(socket, id, method))
        .await
        .map_err(|_| ClientError::Timeout(format!("result of {method}")))?
}

async fn await_connected(socket: &mut Socket) -> Result<(), ClientError> {
    loop {
        match recv(socket).await? {
            DdpMessage::Connected { session } => {
                debug!(%session, "ws: handshake complete");
                return Ok(());
            }
            DdpMessage::Failed { version } => {
                return Err(ClientError::Handshake(format!("server requires protocol version {version}")));
            }
            DdpMessage::Ping { id } => send(socket, &DdpMessage::Pong { id }).await?,
            _ => {}
        }
    }
}

async fn await_result(socket: &mut Socket, id: &str, method: &str) -> Result<Value, ClientError> {
    loop {
        match recv(socket).await? {
            DdpMessage::Result { id: reply_id, result, error } if reply_id == id => {
                return match error {
                    Some(error) => Err(ClientError::Method { method: method.to_owned(), message: error.describe() }),
                    None => Ok(result.unwrap_or(Value::Null)),
                };
            }
            DdpMessage::Ping { id: ping_id } => send(socket, &DdpMessage::Pong { id: ping_id }).await?,
            DdpMessage::Error { reason } => {
                return Err(ClientError::Method {
                    method: method.to_owned(),
                    message: reason.unwrap_or_else(|| "protocol error".to_owned()),
                });
            }
            _ => {}
        }
    }
}

async fn send(socket: &mut Socket, message: &DdpMessage) -> Result<(), ClientError> {
    socket.send(WsMessage::text(ddp::encode_message(message))).await?;
    Ok(())
}

async fn recv(socket: &mut Socket) -> Result<DdpMessage, ClientError> {
    loop {
        let Some(frame) = socket.next().await else {
            return Err(ClientError::SocketClosed);
        };
        match frame? {
            WsMessage::Text(text) => return Ok(ddp::decode_message(text.as_str())?),
            WsMessage::Close(_) => return Err(ClientError::SocketClosed),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;

//! Messaging (`chat.*`).

use serde_json::Value;

use super::{dispatch, object_params};
use crate::error::ClientError;
use crate::transport::HttpMethod;

facade! {
    Chat {
        /// Send a complete message object, e.g. `{"rid": "...", "msg": "hi"}`.
        fn send_message(message: &Value => "message") -> Post "chat.sendMessage";
        fn update(room_id: &str => "roomId", msg_id: &str => "msgId", text: &str => "text") -> Post "chat.update";
        fn delete(room_id: &str => "roomId", msg_id: &str => "msgId", as_user: bool => "asUser") -> Post "chat.delete";
        fn get_message(msg_id: &str => "msgId") -> Get "chat.getMessage";
        fn pin_message(message_id: &str => "messageId") -> Post "chat.pinMessage";
        fn unpin_message(message_id: &str => "messageId") -> Post "chat.unPinMessage";
        fn star_message(message_id: &str => "messageId") -> Post "chat.starMessage";
        fn unstar_message(message_id: &str => "messageId") -> Post "chat.unStarMessage";
        /// Toggle `emoji` (e.g. `":smile:"`) on a message.
        fn react(emoji: &str => "emoji", message_id: &str => "messageId") -> Post "chat.react";
    }
}

impl Chat {
    /// Post a message. The fields of `message` (`roomId` or `channel`,
    /// `text`, `alias`, `attachments`, ...) become the request body.
    ///
    /// # Errors
    ///
    /// Returns the transport or platform error for this call.
    pub async fn post_message(&self, message: &Value) -> Result<Value, ClientError> {
        dispatch(self.transport.as_ref(), HttpMethod::Post, "chat.postMessage", object_params(message)).await
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

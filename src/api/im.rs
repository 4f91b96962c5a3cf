//! Direct messages (`im.*`).

use serde_json::Value;

use super::{HistoryOptions, PageQuery, dispatch, history_params};
use crate::error::ClientError;
use crate::transport::HttpMethod;

facade! {
    /// One-to-one conversations.
    Im {
        /// Open (or reuse) a direct conversation with `username`.
        fn create(username: &str => "username") -> Post "im.create";
        fn open(room_id: &str => "roomId") -> Post "im.open";
        fn close(room_id: &str => "roomId") -> Post "im.close";
        fn counters(room_id: &str => "roomId") -> Get "im.counters";
        fn list() -> Get "im.list" [page];
        /// Requires the `view-room-administration` permission.
        fn list_everyone() -> Get "im.list.everyone" [page];
        fn messages_others(room_id: &str => "roomId") -> Get "im.messages.others" [page];
        fn set_topic(room_id: &str => "roomId", topic: &str => "topic") -> Post "im.setTopic";
    }
}

impl Im {
    /// Messages of a direct conversation within a time window.
    ///
    /// # Errors
    ///
    /// Returns the transport or platform error for this call.
    pub async fn history(
        &self,
        room_id: &str,
        history: &HistoryOptions,
        page: &PageQuery,
    ) -> Result<Value, ClientError> {
        dispatch(self.transport.as_ref(), HttpMethod::Get, "im.history", history_params(room_id, history, page)).await
    }
}

#[cfg(test)]
#[path = "im_test.rs"]
mod tests;

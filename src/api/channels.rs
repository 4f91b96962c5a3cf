//! Public channel management (`channels.*`). Mirrors [`super::groups`]
//! with a few channel-only endpoints.

use serde_json::Value;

use super::{HistoryOptions, PageQuery, dispatch, history_params};
use crate::error::ClientError;
use crate::transport::HttpMethod;

facade! {
    /// Public channels.
    Channels {
        fn add_all(room_id: &str => "roomId", active_users_only: bool => "activeUsersOnly") -> Post "channels.addAll";
        fn add_moderator(room_id: &str => "roomId", user_id: &str => "userId") -> Post "channels.addModerator";
        fn remove_moderator(room_id: &str => "roomId", user_id: &str => "userId") -> Post "channels.removeModerator";
        fn add_owner(room_id: &str => "roomId", user_id: &str => "userId") -> Post "channels.addOwner";
        fn remove_owner(room_id: &str => "roomId", user_id: &str => "userId") -> Post "channels.removeOwner";
        fn archive(room_id: &str => "roomId") -> Post "channels.archive";
        fn unarchive(room_id: &str => "roomId") -> Post "channels.unarchive";
        fn close(room_id: &str => "roomId") -> Post "channels.close";
        fn delete(room_id: &str => "roomId") -> Post "channels.delete";
        fn create(name: &str => "name", members: &[&str] => "members") -> Post "channels.create";
        fn get_integrations(room_id: &str => "roomId") -> Get "channels.getIntegrations" [page];
        fn info(room_id: &str => "roomId") -> Get "channels.info";
        fn kick(room_id: &str => "roomId", user_id: &str => "userId") -> Post "channels.kick";
        fn invite(room_id: &str => "roomId", user_id: &str => "userId") -> Post "channels.invite";
        fn join(room_id: &str => "roomId") -> Post "channels.join";
        fn leave(room_id: &str => "roomId") -> Post "channels.leave";
        fn open(room_id: &str => "roomId") -> Post "channels.open";
        /// Every public channel on the server.
        fn list() -> Get "channels.list" [page];
        /// Channels the caller has joined.
        fn list_joined() -> Get "channels.list.joined" [page];
        fn members(room_id: &str => "roomId") -> Get "channels.members" [page];
        /// Online users of the channels matching a selector such as `{"_id": "..."}`.
        fn online(query: &Value => "query") -> Get "channels.online";
        fn roles(room_id: &str => "roomId") -> Get "channels.roles";
        fn rename(room_id: &str => "roomId", name: &str => "name") -> Post "channels.rename";
        fn set_description(room_id: &str => "roomId", description: &str => "description") -> Post "channels.setDescription";
        fn set_join_code(room_id: &str => "roomId", join_code: &str => "joinCode") -> Post "channels.setJoinCode";
        fn set_purpose(room_id: &str => "roomId", purpose: &str => "purpose") -> Post "channels.setPurpose";
        fn set_read_only(room_id: &str => "roomId", read_only: bool => "readOnly") -> Post "channels.setReadOnly";
        fn set_topic(room_id: &str => "roomId", topic: &str => "topic") -> Post "channels.setTopic";
        fn set_type(room_id: &str => "roomId", room_type: &str => "type") -> Post "channels.setType";
        fn counters(room_id: &str => "roomId") -> Get "channels.counters";
    }
}

impl Channels {
    /// Messages of a channel within a time window.
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
        dispatch(self.transport.as_ref(), HttpMethod::Get, "channels.history", history_params(room_id, history, page))
            .await
    }
}

#[cfg(test)]
#[path = "channels_test.rs"]
mod tests;

//! Private group management (`groups.*`).

use serde_json::Value;

use super::{HistoryOptions, PageQuery, dispatch, history_params};
use crate::error::ClientError;
use crate::transport::HttpMethod;

facade! {
    /// Private groups.
    Groups {
        /// Add every user of the server to the group.
        fn add_all(room_id: &str => "roomId", active_users_only: bool => "activeUsersOnly") -> Post "groups.addAll";
        fn add_moderator(room_id: &str => "roomId", user_id: &str => "userId") -> Post "groups.addModerator";
        fn remove_moderator(room_id: &str => "roomId", user_id: &str => "userId") -> Post "groups.removeModerator";
        fn add_owner(room_id: &str => "roomId", user_id: &str => "userId") -> Post "groups.addOwner";
        fn remove_owner(room_id: &str => "roomId", user_id: &str => "userId") -> Post "groups.removeOwner";
        fn archive(room_id: &str => "roomId") -> Post "groups.archive";
        fn unarchive(room_id: &str => "roomId") -> Post "groups.unarchive";
        /// Hide the group from the caller's room list.
        fn close(room_id: &str => "roomId") -> Post "groups.close";
        fn delete(room_id: &str => "roomId") -> Post "groups.delete";
        fn create(name: &str => "name", members: &[&str] => "members") -> Post "groups.create";
        fn get_integrations(room_id: &str => "roomId") -> Get "groups.getIntegrations" [page];
        fn info(room_id: &str => "roomId") -> Get "groups.info";
        fn kick(room_id: &str => "roomId", user_id: &str => "userId") -> Post "groups.kick";
        fn invite(room_id: &str => "roomId", user_id: &str => "userId") -> Post "groups.invite";
        fn leave(room_id: &str => "roomId") -> Post "groups.leave";
        fn open(room_id: &str => "roomId") -> Post "groups.open";
        /// Groups the caller belongs to.
        fn list() -> Get "groups.list" [page];
        fn members(room_id: &str => "roomId") -> Get "groups.members";
        fn roles(room_id: &str => "roomId") -> Get "groups.roles";
        fn rename(room_id: &str => "roomId", name: &str => "name") -> Post "groups.rename";
        fn set_description(room_id: &str => "roomId", description: &str => "description") -> Post "groups.setDescription";
        fn set_purpose(room_id: &str => "roomId", purpose: &str => "purpose") -> Post "groups.setPurpose";
        fn set_read_only(room_id: &str => "roomId", read_only: bool => "readOnly") -> Post "groups.setReadOnly";
        fn set_topic(room_id: &str => "roomId", topic: &str => "topic") -> Post "groups.setTopic";
        /// `room_type` is `"c"` (public) or `"p"` (private).
        fn set_type(room_id: &str => "roomId", room_type: &str => "type") -> Post "groups.setType";
        fn counters(room_id: &str => "roomId") -> Get "groups.counters";
    }
}

impl Groups {
    /// Messages of a group within a time window.
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
        dispatch(self.transport.as_ref(), HttpMethod::Get, "groups.history", history_params(room_id, history, page)).await
    }
}

#[cfg(test)]
#[path = "groups_test.rs"]
mod tests;

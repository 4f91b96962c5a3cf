//! User administration (`users.*`).

use serde_json::Value;

use super::{dispatch, object_params};
use crate::error::ClientError;
use crate::transport::HttpMethod;

facade! {
    Users {
        /// Replace fields of a user; `data` holds the changed fields.
        fn update(user_id: &str => "userId", data: &Value => "data") -> Post "users.update";
        fn delete(user_id: &str => "userId") -> Post "users.delete";
        fn info(user_id: &str => "userId") -> Get "users.info";
        fn info_by_username(username: &str => "username") -> Get "users.info";
        fn list() -> Get "users.list" [page];
        fn get_presence(user_id: &str => "userId") -> Get "users.getPresence";
        fn set_avatar(avatar_url: &str => "avatarUrl") -> Post "users.setAvatar";
        fn reset_avatar(user_id: &str => "userId") -> Post "users.resetAvatar";
    }
}

impl Users {
    /// Create a user from an object with `email`, `name`, `password`,
    /// `username` and any optional fields.
    ///
    /// # Errors
    ///
    /// Returns the transport or platform error for this call.
    pub async fn create(&self, user: &Value) -> Result<Value, ClientError> {
        dispatch(self.transport.as_ref(), HttpMethod::Post, "users.create", object_params(user)).await
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;

//! Raw authentication endpoints.
//!
//! These only send the requests. Use [`crate::client::RocketChatClient::login`]
//! to also update the session and the realtime socket.

facade! {
    Authentication {
        fn login(username: &str => "username", password: &str => "password") -> Post "login";
        fn logout() -> Post "logout";
        /// The authenticated user's own record.
        fn me() -> Get "me";
    }
}

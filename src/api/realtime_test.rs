use serde_json::json;

use super::*;
use crate::transport::test_helpers::MockRealtime;

fn realtime() -> (Arc<MockRealtime>, Realtime) {
    let socket = MockRealtime::new();
    let realtime = Realtime::new(Arc::clone(&socket) as Arc<dyn RealtimeTransport>);
    (socket, realtime)
}

#[tokio::test]
async fn login_sends_digest_params() {
    let (socket, realtime) = realtime();
    realtime.login("alice", "secret").await.expect("login");

    let calls = socket.calls.lock().unwrap().clone();
    assert_eq!(calls[0].0, "login");
    assert_eq!(calls[0].1, vec![ddp::password_login_params("alice", "secret")]);
}

#[tokio::test]
async fn rejected_token_is_realtime_authentication_error() {
    let (socket, realtime) = realtime();
    socket.push_reply(Err(ClientError::Method { method: "login".to_owned(), message: "token expired".to_owned() }));

    let err = realtime.login_with_token("T1").await.expect_err("resume");
    assert!(matches!(err, ClientError::RealtimeAuthentication { ref message } if message == "token expired"));
    assert_eq!(socket.calls.lock().unwrap()[0].1, vec![json!({ "resume": "T1" })]);
}

#[tokio::test]
async fn named_methods_map_to_server_method_names() {
    let (socket, realtime) = realtime();
    realtime.get_public_settings().await.expect("settings");
    realtime.get_user_roles().await.expect("roles");
    realtime.logout().await.expect("logout");
    realtime.call("rooms/get", vec![json!({ "$date": 0 })]).await.expect("call");

    assert_eq!(socket.methods(), ["public-settings/get", "getUserRoles", "logout", "rooms/get"]);
}

#[tokio::test]
async fn socket_errors_pass_through_call() {
    let (socket, realtime) = realtime();
    socket.push_reply(Err(ClientError::SocketClosed));

    let err = realtime.call("anything", Vec::new()).await.expect_err("closed");
    assert!(matches!(err, ClientError::SocketClosed));
}

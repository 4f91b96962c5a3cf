use super::test_helpers::MockRealtime;
use super::*;

#[test]
fn http_method_parses_case_insensitively() {
    assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
    assert_eq!("Post".parse::<HttpMethod>(), Ok(HttpMethod::Post));
    assert!("PATCH".parse::<HttpMethod>().is_err());
}

#[test]
fn only_get_and_delete_use_query_strings() {
    assert!(HttpMethod::Get.uses_query());
    assert!(HttpMethod::Delete.uses_query());
    assert!(!HttpMethod::Post.uses_query());
    assert!(!HttpMethod::Put.uses_query());
}

#[test]
fn descriptor_keeps_endpoint_and_params() {
    let mut params = Map::new();
    params.insert("roomId".into(), Value::from("R1"));
    let req = RequestDescriptor::new(HttpMethod::Post, "groups.archive", params);
    assert_eq!(req.method.to_string(), "POST");
    assert_eq!(req.endpoint, "groups.archive");
    assert_eq!(req.params.get("roomId"), Some(&Value::from("R1")));
}

#[tokio::test]
async fn default_login_sends_digested_credentials() {
    let realtime = MockRealtime::new();
    realtime.login("alice", "abc").await.expect("login");

    let calls = realtime.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (method, params) = &calls[0];
    assert_eq!(method, "login");
    assert_eq!(params[0]["user"]["username"], "alice");
    assert_eq!(
        params[0]["password"]["digest"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[tokio::test]
async fn default_login_maps_method_errors_to_realtime_authentication() {
    let realtime = MockRealtime::new();
    realtime.push_reply(Err(ClientError::Method { method: "login".into(), message: "User not found".into() }));

    let err = realtime.login("alice", "wrong").await.expect_err("login should fail");
    assert!(matches!(err, ClientError::RealtimeAuthentication { message } if message == "User not found"));
}

#[tokio::test]
async fn default_login_passes_socket_errors_through() {
    let realtime = MockRealtime::new();
    realtime.push_reply(Err(ClientError::SocketClosed));

    let err = realtime.login("alice", "secret").await.expect_err("login should fail");
    assert!(matches!(err, ClientError::SocketClosed));
}

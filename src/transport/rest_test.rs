use std::collections::HashMap;

use axum::extract::Query;
use axum::{Json, Router};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::json;

use super::*;
use crate::transport::test_helpers::spawn_server;

fn header(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map_or(Value::Null, |v| Value::String(v.to_owned()))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "alice" && body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({ "status": "success", "data": { "authToken": "T1", "userId": "U1" } })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": "error", "message": "Unauthorized" })),
        )
    }
}

async fn echo_query(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "query": query,
        "token": header(&headers, "x-auth-token"),
        "userId": header(&headers, "x-user-id"),
    }))
}

async fn echo_body(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "success": true, "body": body, "token": header(&headers, "x-auth-token") }))
}

async fn soft_failure() -> Json<Value> {
    Json(json!({ "success": false, "error": "room not found" }))
}

async fn empty_server_error() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn rest_client(session: Session) -> RestClient {
    let app = Router::new()
        .route("/chat/api/v1/login", post(login))
        .route("/chat/api/v1/groups.list", get(echo_query))
        .route("/chat/api/v1/groups.archive", post(echo_body))
        .route("/chat/api/v1/groups.info", get(soft_failure))
        .route("/chat/api/v1/info", get(empty_server_error));
    let addr = spawn_server(app).await;
    RestClient::new(format!("http://{addr}/chat/api/v1/"), session, Duration::from_secs(5)).expect("client")
}

fn params(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

// =============================================================================
// query encoding
// =============================================================================

#[test]
fn query_pairs_encode_scalars_and_structures() {
    let pairs = query_pairs(&params(json!({
        "roomId": "R1",
        "count": 20,
        "inclusive": true,
        "sort": { "ts": -1 },
        "latest": null,
    })));
    let pairs: HashMap<_, _> = pairs.into_iter().collect();
    assert_eq!(pairs.get("roomId").map(String::as_str), Some("R1"));
    assert_eq!(pairs.get("count").map(String::as_str), Some("20"));
    assert_eq!(pairs.get("inclusive").map(String::as_str), Some("true"));
    assert_eq!(pairs.get("sort").map(String::as_str), Some(r#"{"ts":-1}"#));
    assert!(!pairs.contains_key("latest"));
}

#[test]
fn error_message_prefers_message_then_error() {
    assert_eq!(error_message(&json!({ "message": "m", "error": "e" })), "m");
    assert_eq!(error_message(&json!({ "error": "e" })), "e");
    assert_eq!(error_message(&Value::Null), "empty response");
    assert_eq!(error_message(&Value::String("oops".into())), "oops");
}

// =============================================================================
// live round trips
// =============================================================================

#[tokio::test]
async fn post_sends_json_body() {
    let client = rest_client(Session::new()).await;
    let reply = client
        .send(RequestDescriptor::new(
            HttpMethod::Post,
            "groups.archive",
            params(json!({ "roomId": "R1" })),
        ))
        .await
        .expect("archive");
    assert_eq!(reply["body"], json!({ "roomId": "R1" }));
    assert_eq!(reply["token"], Value::Null);
}

#[tokio::test]
async fn get_sends_query_and_session_headers() {
    let session = Session::new();
    session.establish("T1".into(), "U1".into());
    let client = rest_client(session).await;

    let reply = client
        .send(RequestDescriptor::new(
            HttpMethod::Get,
            "groups.list",
            params(json!({ "count": 20, "query": { "name": "dev" } })),
        ))
        .await
        .expect("list");

    assert_eq!(reply["query"]["count"], "20");
    assert_eq!(reply["query"]["query"], r#"{"name":"dev"}"#);
    assert!(reply["query"].get("offset").is_none());
    assert_eq!(reply["token"], "T1");
    assert_eq!(reply["userId"], "U1");
}

#[tokio::test]
async fn headers_follow_session_updates_between_requests() {
    let session = Session::new();
    let client = rest_client(session.clone()).await;
    let list = || RequestDescriptor::new(HttpMethod::Get, "groups.list", Map::new());

    let before = client.send(list()).await.expect("list");
    assert_eq!(before["token"], Value::Null);

    session.set_auth_token(Some("T2".into()));
    let after = client.send(list()).await.expect("list");
    assert_eq!(after["token"], "T2");
}

#[tokio::test]
async fn login_success_returns_payload() {
    let client = rest_client(Session::new()).await;
    let reply = client
        .send(RequestDescriptor::new(
            HttpMethod::Post,
            "login",
            params(json!({ "username": "alice", "password": "secret" })),
        ))
        .await
        .expect("login");
    assert_eq!(reply["data"]["authToken"], "T1");
}

#[tokio::test]
async fn unauthorized_status_becomes_api_error() {
    let client = rest_client(Session::new()).await;
    let err = client
        .send(RequestDescriptor::new(
            HttpMethod::Post,
            "login",
            params(json!({ "username": "bob", "password": "wrong" })),
        ))
        .await
        .expect_err("login should fail");
    assert!(matches!(
        err,
        ClientError::Api { ref endpoint, status: 401, ref message } if endpoint == "login" && message == "Unauthorized"
    ));
}

#[tokio::test]
async fn success_false_body_becomes_api_error() {
    let client = rest_client(Session::new()).await;
    let err = client
        .send(RequestDescriptor::new(HttpMethod::Get, "groups.info", Map::new()))
        .await
        .expect_err("soft failure");
    assert!(matches!(err, ClientError::Api { status: 200, ref message, .. } if message == "room not found"));
}

#[tokio::test]
async fn empty_error_body_is_described() {
    let client = rest_client(Session::new()).await;
    let err = client
        .send(RequestDescriptor::new(HttpMethod::Get, "info", Map::new()))
        .await
        .expect_err("server error");
    assert!(matches!(err, ClientError::Api { status: 500, ref message, .. } if message == "empty response"));
    assert!(err.retryable());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client =
        RestClient::new(format!("http://{addr}/api/v1/"), Session::new(), Duration::from_secs(2)).expect("client");
    let err = client
        .send(RequestDescriptor::new(HttpMethod::Get, "info", Map::new()))
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, ClientError::Transport(_)));
}

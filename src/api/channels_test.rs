use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::session::Session;
use crate::transport::RequestTransport;
use crate::transport::test_helpers::MockRest;

fn channels() -> (Arc<MockRest>, Channels) {
    let rest = MockRest::new(Session::new());
    let channels = Channels::new(Arc::clone(&rest) as Arc<dyn RequestTransport>);
    (rest, channels)
}

#[tokio::test]
async fn join_posts_room_id() {
    let (rest, channels) = channels();
    channels.join("GENERAL").await.expect("join");

    let sent = rest.last();
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.endpoint, "channels.join");
    assert_eq!(Value::Object(sent.params), json!({ "roomId": "GENERAL" }));
}

#[tokio::test]
async fn list_joined_without_options_sends_nothing() {
    let (rest, channels) = channels();
    channels.list_joined(&PageQuery::new()).await.expect("list.joined");

    let sent = rest.last();
    assert_eq!(sent.endpoint, "channels.list.joined");
    assert!(sent.params.is_empty());
}

#[tokio::test]
async fn online_forwards_selector() {
    let (rest, channels) = channels();
    channels.online(&json!({ "_id": "GENERAL" })).await.expect("online");

    assert_eq!(Value::Object(rest.last().params), json!({ "query": { "_id": "GENERAL" } }));
}

#[tokio::test]
async fn members_is_paged() {
    let (rest, channels) = channels();
    channels.members("GENERAL", &PageQuery::new().with_offset(10).with_count(10)).await.expect("members");

    assert_eq!(Value::Object(rest.last().params), json!({ "roomId": "GENERAL", "offset": 10, "count": 10 }));
}

#[tokio::test]
async fn history_targets_channel_endpoint() {
    let (rest, channels) = channels();
    channels.history("GENERAL", &HistoryOptions::new().with_unreads(true), &PageQuery::new()).await.expect("history");

    let sent = rest.last();
    assert_eq!(sent.endpoint, "channels.history");
    assert_eq!(Value::Object(sent.params), json!({ "roomId": "GENERAL", "unreads": true }));
}

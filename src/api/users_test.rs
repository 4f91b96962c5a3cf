use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::api::PageQuery;
use crate::session::Session;
use crate::transport::RequestTransport;
use crate::transport::test_helpers::MockRest;

fn users() -> (Arc<MockRest>, Users) {
    let rest = MockRest::new(Session::new());
    let users = Users::new(Arc::clone(&rest) as Arc<dyn RequestTransport>);
    (rest, users)
}

#[tokio::test]
async fn create_sends_user_fields_as_body() {
    let (rest, users) = users();
    let user = json!({ "email": "a@example.com", "name": "Alice", "password": "pw", "username": "alice" });
    users.create(&user).await.expect("create");

    let sent = rest.last();
    assert_eq!(sent.endpoint, "users.create");
    assert_eq!(Value::Object(sent.params), user);
}

#[tokio::test]
async fn update_nests_changed_fields_under_data() {
    let (rest, users) = users();
    users.update("U1", &json!({ "name": "Alice B" })).await.expect("update");

    assert_eq!(Value::Object(rest.last().params), json!({ "userId": "U1", "data": { "name": "Alice B" } }));
}

#[tokio::test]
async fn info_variants_share_endpoint() {
    let (rest, users) = users();
    users.info("U1").await.expect("by id");
    users.info_by_username("alice").await.expect("by name");

    let requests = rest.requests();
    assert_eq!(requests[0].endpoint, "users.info");
    assert_eq!(Value::Object(requests[0].params.clone()), json!({ "userId": "U1" }));
    assert_eq!(Value::Object(requests[1].params.clone()), json!({ "username": "alice" }));
}

#[tokio::test]
async fn list_forwards_query_filter() {
    let (rest, users) = users();
    users.list(&PageQuery::new().with_query(json!({ "active": true }))).await.expect("list");

    let sent = rest.last();
    assert_eq!(sent.method, HttpMethod::Get);
    assert_eq!(Value::Object(sent.params), json!({ "query": { "active": true } }));
}

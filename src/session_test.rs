use super::*;

#[test]
fn new_session_is_empty() {
    let session = Session::new();
    assert_eq!(session.snapshot(), Credentials::default());
    assert!(session.headers().expect("headers").is_empty());
}

#[test]
fn setters_update_getters_and_headers() {
    let session = Session::new();
    session.set_auth_token(Some("T1".into()));
    session.set_user_id(Some("U1".into()));

    assert_eq!(session.auth_token().as_deref(), Some("T1"));
    assert_eq!(session.user_id().as_deref(), Some("U1"));

    let headers = session.headers().expect("headers");
    assert_eq!(headers.get("X-Auth-Token").and_then(|v| v.to_str().ok()), Some("T1"));
    assert_eq!(headers.get("X-User-Id").and_then(|v| v.to_str().ok()), Some("U1"));
}

#[test]
fn empty_string_is_accepted_and_sent() {
    let session = Session::new();
    session.set_auth_token(Some(String::new()));
    assert_eq!(session.auth_token().as_deref(), Some(""));
    let headers = session.headers().expect("headers");
    assert_eq!(headers.get(AUTH_TOKEN_HEADER).map(HeaderValue::as_bytes), Some(&b""[..]));
}

#[test]
fn none_clears_a_single_value() {
    let session = Session::new();
    session.establish("T1".into(), "U1".into());
    session.set_auth_token(None);
    assert_eq!(session.auth_token(), None);
    assert_eq!(session.user_id().as_deref(), Some("U1"));
    let headers = session.headers().expect("headers");
    assert!(headers.get(AUTH_TOKEN_HEADER).is_none());
    assert!(headers.get(USER_ID_HEADER).is_some());
}

#[test]
fn establish_sets_both_values() {
    let session = Session::new();
    session.establish("T1".into(), "U1".into());
    assert_eq!(
        session.snapshot(),
        Credentials { auth_token: Some("T1".into()), user_id: Some("U1".into()) }
    );
}

#[test]
fn clones_share_state() {
    let session = Session::new();
    let transport_view = session.clone();
    session.establish("T1".into(), "U1".into());
    assert_eq!(transport_view.auth_token().as_deref(), Some("T1"));

    transport_view.clear();
    assert_eq!(session.snapshot(), Credentials::default());
}

#[test]
fn last_write_wins() {
    let session = Session::new();
    session.set_auth_token(Some("first".into()));
    session.set_auth_token(Some("second".into()));
    assert_eq!(session.auth_token().as_deref(), Some("second"));
}

#[test]
fn headers_reject_control_characters() {
    let session = Session::new();
    session.set_user_id(Some("bad\nvalue".into()));
    let err = session.headers().expect_err("newline is not a valid header value");
    assert!(matches!(err, ClientError::InvalidHeader(_)));
}

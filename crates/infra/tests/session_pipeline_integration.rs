//! End-to-end tests: `CitadelHttpClient` over `ReqwestTransport` against a
//! WireMock server.
//!
//! **Coverage:**
//! - Resolve with a live session (allow)
//! - Resolve without a session (redirect)
//! - Revoke passing `responseHeaders` through
//! - Bearer rejected with 400 `{errorId, error}`
//! - Wire format: path, headers, body signature
//! - Non-400 failures, redirects and unreachable servers

#[path = "support.rs"]
mod support;

use std::net::TcpListener;

use chrono::{TimeZone, Utc};
use citadel_core::{sign, RequestSigner};
use citadel_domain::constants::{SDK_VERSION, SDK_VERSION_HEADER, SIGNATURE_HEADER};
use citadel_domain::{CitadelError, CitadelErrorCategory, ClaimValue};
use serde_json::{json, Value};
use support::{blocking, client_for, init_test_tracing, session_json, TEST_PSK};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn resolve_session_with_live_session() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions.resolve"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "cookieHeader": "sid=abc",
            "clientId": "client-1",
            "clientSecret": "secret-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session": session_json(),
            "recommended": {"action": "allow", "responseHeaders": {}, "reason": "valid"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let response =
        blocking(move || client_for(&uri).resolve_session("sid=abc", "client-1", "secret-1"))
            .await?;

    let session = response.session.expect("session should be present");
    assert_eq!(session.id, "sess_1");
    assert_eq!(session.resolved_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 6, 0).unwrap());
    assert_eq!(session.identities.len(), 1);

    let values: Vec<_> = session.identities[0].data.iter().map(|v| v.value.clone()).collect();
    assert_eq!(
        values,
        vec![
            ClaimValue::Text("admin".into()),
            ClaimValue::Integer(3),
            ClaimValue::Boolean(true),
            ClaimValue::Null
        ]
    );

    assert!(response.recommended.is_allow());
    assert_eq!(response.recommended.reason, "valid");
    assert!(response.recommended.response_headers.is_empty());
    Ok(())
}

#[tokio::test]
async fn resolve_session_without_session_redirects() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions.resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommended": {
                "action": "redirect",
                "reason": "expired",
                "responseHeaders": {"Location": ["https://login"]}
            }
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let response =
        blocking(move || client_for(&uri).resolve_session("sid=old", "client-1", "secret-1"))
            .await?;

    assert!(response.session.is_none());
    assert!(response.recommended.is_redirect());
    assert_eq!(
        response.recommended.response_headers.get("Location"),
        Some(&["https://login".to_string()][..])
    );
    Ok(())
}

#[tokio::test]
async fn revoke_session_returns_headers_verbatim() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions.revoke"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseHeaders": {"Set-Cookie": ["sid=; Max-Age=0", "csrf=; Max-Age=0"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let response =
        blocking(move || client_for(&uri).revoke_session("sid=abc", "client-1", "secret-1"))
            .await?;

    assert_eq!(response.response_headers.len(), 1);
    assert_eq!(
        response.response_headers.get("Set-Cookie"),
        Some(&["sid=; Max-Age=0".to_string(), "csrf=; Max-Age=0".to_string()][..])
    );
    Ok(())
}

#[tokio::test]
async fn resolve_bearer_rejected_with_application_error() {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions.resolveBearer"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"errorId": "E_BAD_TOKEN", "error": "token invalid"})),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || client_for(&uri).resolve_bearer("bogus"))
        .await
        .expect_err("400 should surface as an error");

    assert_eq!(
        err,
        CitadelError::Api { error_id: "E_BAD_TOKEN".into(), error: "token invalid".into() }
    );
    assert_eq!(err.category(), CitadelErrorCategory::Application);
    assert_eq!(err.error_id(), Some("E_BAD_TOKEN"));
}

#[tokio::test]
async fn requests_carry_sdk_version_and_body_signature() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions.resolveBearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": session_json()})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let response = blocking(move || client_for(&uri).resolve_bearer("tok_123")).await?;
    assert_eq!(response.session.map(|s| s.sid).as_deref(), Some("abc"));

    let requests = server.received_requests().await.expect("recording should be enabled");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let body: Value = serde_json::from_slice(&request.body)?;
    assert_eq!(body, json!({"token": "tok_123"}));

    let version = request.headers.get(SDK_VERSION_HEADER).expect("sdk version header");
    assert_eq!(version.to_str()?, SDK_VERSION);

    let signature = request.headers.get(SIGNATURE_HEADER).expect("signature header").to_str()?;
    assert_eq!(signature, sign(TEST_PSK, &request.body)?);
    assert!(RequestSigner::new(TEST_PSK)?.verify(&request.body, signature));
    Ok(())
}

#[tokio::test]
async fn resolve_with_null_session_is_absent() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions.resolveBearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": null})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let response = blocking(move || client_for(&uri).resolve_bearer("tok")).await?;
    assert!(response.session.is_none());
    Ok(())
}

#[tokio::test]
async fn unexpected_status_keeps_status_and_body() {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions.resolve"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || client_for(&uri).resolve_session("sid=abc", "id", "secret"))
        .await
        .expect_err("503 should surface as an error");

    assert_eq!(err, CitadelError::UnexpectedStatus { status: 503, body: "maintenance".into() });
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn malformed_timestamp_names_the_field() {
    init_test_tracing();
    let server = MockServer::start().await;

    let mut session = session_json();
    session["identities"][0]["assignedAt"] = json!("yesterday");

    Mock::given(method("POST"))
        .and(path("/sessions.resolveBearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": session})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || client_for(&uri).resolve_bearer("tok"))
        .await
        .expect_err("bad timestamp should fail");

    match err {
        CitadelError::MalformedResponse { field, .. } => {
            assert_eq!(field, "session.identities[0].assignedAt");
        }
        other => panic!("expected malformed response, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_transport_failure() {
    init_test_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = blocking(move || client_for(&format!("http://{addr}")).resolve_bearer("tok"))
        .await
        .expect_err("closed port should fail");

    assert_eq!(err.category(), CitadelErrorCategory::Transport);
}

#[tokio::test]
async fn redirect_is_not_followed() {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions.revoke"))
        .respond_with(ResponseTemplate::new(307).insert_header("Location", "/elsewhere"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/elsewhere"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"responseHeaders": {"Set-Cookie": ["x=1"]}})),
        )
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || client_for(&uri).revoke_session("sid=abc", "client-1", "secret"))
        .await
        .expect_err("307 should surface as an error");

    assert!(matches!(err, CitadelError::UnexpectedStatus { status: 307, .. }));

    let requests = server.received_requests().await.expect("recording should be enabled");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/sessions.revoke");
}

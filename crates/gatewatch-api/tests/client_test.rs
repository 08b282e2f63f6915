#![allow(clippy::unwrap_used)]
// Integration tests for `GatewayClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gatewatch_api::{Error, GatewayClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GatewayClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = GatewayClient::with_client(
        reqwest::Client::new(),
        base_url,
        "admin".into(),
        secrecy::SecretString::from("test-password".to_string()),
    );
    (server, client)
}

fn login_ok(session_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "response": { "sessionID": session_id }
    }))
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_session_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(login_ok("abc123"))
        .mount(&server)
        .await;

    client.login().await.unwrap();

    assert!(client.has_session());
    assert_eq!(client.session_id().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_login_missing_token_is_unreachable() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Unreachable { .. })),
        "expected Unreachable error, got: {result:?}"
    );
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_login_server_error_is_unreachable() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.login().await;

    assert!(matches!(result, Err(Error::Unreachable { .. })));
}

// ── ensure_authenticated ────────────────────────────────────────────

#[tokio::test]
async fn test_ensure_authenticated_logs_in_without_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(login_ok("first"))
        .expect(1)
        .mount(&server)
        .await;

    client.ensure_authenticated().await.unwrap();
    assert_eq!(client.session_id().as_deref(), Some("first"));
}

#[tokio::test]
async fn test_ensure_authenticated_keeps_valid_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(login_ok("keep-me"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "sessionID": "keep-me" }
        })))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.ensure_authenticated().await.unwrap();

    // expect(1) on the POST mock verifies no re-login happened
    assert_eq!(client.session_id().as_deref(), Some("keep-me"));
}

#[tokio::test]
async fn test_ensure_authenticated_relogins_on_error_marker() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(login_ok("tok"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "message": "session expired" }
        })))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.ensure_authenticated().await.unwrap();
}

#[tokio::test]
async fn test_ensure_authenticated_relogins_on_probe_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(login_ok("tok"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.ensure_authenticated().await.unwrap();
}

// ── Logout ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_logout_clears_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(login_ok("bye"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.logout().await;
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_logout_failure_is_swallowed() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(login_ok("bye"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.logout().await; // must not panic or error
    assert!(!client.has_session());
}

// ── Device endpoint ─────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "dev-1", "name": "GW1", "status": "online" }
        ])))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["_id"], "dev-1");
}

#[tokio::test]
async fn test_list_devices_sends_session_cookie() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(login_ok("cookie-tok"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .and(header("Cookie", "sessionID=cookie-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.list_devices().await.unwrap();
}

#[tokio::test]
async fn test_list_devices_non_array_is_unreachable() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "oops": true })))
        .mount(&server)
        .await;

    let result = client.list_devices().await;
    assert!(matches!(result, Err(Error::Unreachable { .. })));
}

// ── Route endpoint ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_routes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/gateway/dev-1/routes"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "name": "Main", "id": "r1", "elapsedTime": "1:02:03" }
            ]
        })))
        .mount(&server)
        .await;

    let routes = client.list_routes("dev-1", 250).await.unwrap();

    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["name"], "Main");
}

#[tokio::test]
async fn test_list_routes_missing_data_is_unreachable() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/gateway/dev-1/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0 })))
        .mount(&server)
        .await;

    let result = client.list_routes("dev-1", 500).await;
    assert!(matches!(result, Err(Error::Unreachable { .. })));
}

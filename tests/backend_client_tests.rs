// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend client tests against a wiremock server.

use saas_dashboard::error::AppError;
use saas_dashboard::services::{BackendClient, ProvisioningOutcome, ProvisioningReconciler, UserApi};
use saas_dashboard::storage::{KeyValueStore, MemoryStore};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

fn backend_client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, TEST_TIMEOUT).unwrap()
}

fn user_json(email: &str) -> serde_json::Value {
    json!({
        "id": 42,
        "email": email,
        "subscription_status": "PAID",
        "plan_id": 3,
        "created_at": "2025-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_get_user_by_email_encodes_identity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/by-email/a%2Bb%40x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("a+b@x.com")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = backend_client(&mock_server.uri());
    let user = client.get_user_by_email("a+b@x.com").await.unwrap();

    assert_eq!(user.id, 42);
    assert_eq!(user.email, "a+b@x.com");
    assert_eq!(user.plan_id, Some(3));
}

#[tokio::test]
async fn test_get_user_404_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/by-email/nobody%40x.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})))
        .mount(&mock_server)
        .await;

    let client = backend_client(&mock_server.uri());
    let err = client.get_user_by_email("nobody@x.com").await.unwrap_err();

    assert!(err.is_not_found());
    // Proxied 404s must not leak the backend's request path.
    assert!(!err.to_string().contains("by-email"));
    assert!(!err.to_string().contains("nobody"));
}

#[tokio::test]
async fn test_get_user_500_is_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = backend_client(&mock_server.uri());
    let err = client.get_user_by_email("b@x.com").await.unwrap_err();

    assert!(!err.is_not_found());
    assert!(matches!(err, AppError::BackendApi(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_malformed_body_is_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = backend_client(&mock_server.uri());
    let err = client.get_user_by_email("b@x.com").await.unwrap_err();

    assert!(matches!(err, AppError::BackendApi(ref msg) if msg.contains("JSON")));
}

#[tokio::test]
async fn test_unreachable_backend_is_backend_error() {
    // Grab a free port, then close it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = backend_client(&format!("http://{}", addr));
    let err = client.list_users().await.unwrap_err();

    assert!(matches!(err, AppError::BackendApi(_)));
}

#[tokio::test]
async fn test_create_user_posts_identity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/"))
        .and(body_json(json!({"email": "a@x.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("a@x.com")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = backend_client(&format!("{}/", mock_server.uri()));
    let user = client.create_user("a@x.com").await.unwrap();

    assert_eq!(user.email, "a@x.com");
}

#[tokio::test]
async fn test_subscription_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subscriptions/check/a%40x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": true})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/sync/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"synced": true})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/subscriptions/sync-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 5})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/health/setup-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ready": false})))
        .mount(&mock_server)
        .await;

    let client = backend_client(&mock_server.uri());

    assert_eq!(
        client.check_subscription("a@x.com").await.unwrap()["active"],
        true
    );
    assert_eq!(
        client.sync_user_subscription(42).await.unwrap()["synced"],
        true
    );
    assert_eq!(client.sync_all_subscriptions().await.unwrap()["count"], 5);
    assert_eq!(client.setup_status().await.unwrap()["ready"], false);
}

#[tokio::test]
async fn test_reconciler_creates_missing_user_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/by-email/a%40x.com"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/"))
        .and(body_json(json!({"email": "a@x.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("a@x.com")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = Arc::new(MemoryStore::new());
    let reconciler = ProvisioningReconciler::new(
        Arc::new(backend_client(&mock_server.uri())),
        session.clone(),
        Duration::from_millis(10),
    );

    let outcome = reconciler.reconcile(Some("a@x.com")).await;

    assert!(matches!(outcome, ProvisioningOutcome::Created(_)));
    assert_eq!(
        session.get("user_created_a@x.com").unwrap().as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn test_reconciler_does_not_create_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = Arc::new(MemoryStore::new());
    let reconciler = ProvisioningReconciler::new(
        Arc::new(backend_client(&mock_server.uri())),
        session.clone(),
        Duration::from_millis(10),
    );

    let outcome = reconciler.reconcile(Some("b@x.com")).await;

    assert_eq!(outcome, ProvisioningOutcome::LookupFailed);
    assert_eq!(
        session.get("user_created_b@x.com").unwrap().as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn test_stalled_backend_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_json("h@x.com"))
                .set_delay(Duration::from_secs(600)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = Arc::new(MemoryStore::new());
    let backend = BackendClient::new(&mock_server.uri(), Duration::from_millis(200)).unwrap();
    let reconciler =
        ProvisioningReconciler::new(Arc::new(backend), session.clone(), Duration::ZERO);

    let outcome = tokio::time::timeout(
        Duration::from_secs(15),
        reconciler.reconcile(Some("h@x.com")),
    )
    .await
    .expect("reconcile must not hang on a stalled backend");

    assert_eq!(outcome, ProvisioningOutcome::LookupFailed);
    assert_eq!(
        session.get("user_created_h@x.com").unwrap().as_deref(),
        Some("true")
    );
}

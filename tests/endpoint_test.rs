mod common;

use axum::http::StatusCode;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use common::{test_config, TestApp, TEST_BASE_URL};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    app.state.store.create_endpoint("abc123");

    let response = app.server.get("/health").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"].as_str().unwrap(), "healthy");
    assert_eq!(body["endpoints"].as_u64().unwrap(), 1);
}

#[tokio::test]
async fn test_create_endpoint() {
    let app = TestApp::new();

    let response = app.server.post("/api/endpoints").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let id = body["endpoint"]["id"].as_str().unwrap();
    assert_eq!(id.len(), 16);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(
        body["url"].as_str().unwrap(),
        format!("{}/w/{}", TEST_BASE_URL, id)
    );

    let created_at =
        OffsetDateTime::parse(body["endpoint"]["created_at"].as_str().unwrap(), &Rfc3339).unwrap();
    let expires_at =
        OffsetDateTime::parse(body["endpoint"]["expires_at"].as_str().unwrap(), &Rfc3339).unwrap();
    assert_eq!(expires_at - created_at, Duration::hours(24));

    assert!(app.state.store.get_endpoint(id).is_ok());
}

#[tokio::test]
async fn test_create_endpoint_url_from_host_header() {
    let mut config = test_config();
    config.public_base_url = None;
    let app = TestApp::with_config(config);

    let response = app
        .server
        .post("/api/endpoints")
        .add_header("Host", "capture.example.com:8080")
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let id = body["endpoint"]["id"].as_str().unwrap();
    assert_eq!(
        body["url"].as_str().unwrap(),
        format!("http://capture.example.com:8080/w/{}", id)
    );
}

#[tokio::test]
async fn test_create_endpoint_ids_are_unique() {
    let app = TestApp::new();

    let first = app.create_endpoint().await;
    let second = app.create_endpoint().await;

    assert_ne!(first, second);
    assert_eq!(app.state.store.endpoint_count(), 2);
}

#[tokio::test]
async fn test_get_endpoint_empty() {
    let app = TestApp::new();
    let id = app.create_endpoint().await;

    let response = app.server.get(&format!("/api/endpoints/{}", id)).await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["endpoint"]["id"].as_str().unwrap(), id);
    assert_eq!(body["webhooks"].as_array().unwrap().len(), 0);
    assert_eq!(body["count"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn test_get_endpoint_with_webhooks() {
    let app = TestApp::new();
    let id = app.create_endpoint().await;

    for event in ["created", "updated"] {
        app.server
            .post(&format!("/w/{}", id))
            .text(event)
            .await
            .assert_status(StatusCode::OK);
    }

    let response = app.server.get(&format!("/api/endpoints/{}", id)).await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let webhooks = body["webhooks"].as_array().unwrap();
    assert_eq!(body["count"].as_u64().unwrap(), 2);
    assert_eq!(webhooks[0]["body"].as_str().unwrap(), "created");
    assert_eq!(webhooks[1]["body"].as_str().unwrap(), "updated");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/api/endpoints/0000000000000000").await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Not found");
    assert_eq!(body["details"].as_str().unwrap(), "Endpoint");
}

#[tokio::test]
async fn test_list_webhooks() {
    let app = TestApp::new();
    let id = app.create_endpoint().await;

    app.server
        .put(&format!("/w/{}", id))
        .text("payload")
        .await
        .assert_status(StatusCode::OK);

    let response = app
        .server
        .get(&format!("/api/endpoints/{}/webhooks", id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["total"].as_u64().unwrap(), 1);
    assert_eq!(body["data"][0]["method"].as_str().unwrap(), "PUT");
}

#[tokio::test]
async fn test_list_webhooks_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/api/endpoints/missing/webhooks").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_purged_endpoint_is_gone() {
    let app = TestApp::new();
    let id = app.create_endpoint().await;
    let endpoint = app.state.store.get_endpoint(&id).unwrap();

    let removed = hookpeek::store::sweep_once(app.state.store.as_ref(), endpoint.expires_at);
    assert_eq!(removed, 1);

    app.server
        .get(&format!("/api/endpoints/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .post(&format!("/w/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

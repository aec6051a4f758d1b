use std::sync::Arc;

use axum_test::TestServer;
use hookpeek::build_router;
use hookpeek::config::{Config, LogFormat};
use hookpeek::state::AppState;
use hookpeek::store::InMemoryStore;

/// Public base URL handed out by the test app
pub const TEST_BASE_URL: &str = "http://hooks.test";

/// Test configuration
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_base_url: Some(TEST_BASE_URL.to_string()),
        max_body_bytes: 64 * 1024,
        sweep_interval_secs: 0,
        log_format: LogFormat::Text,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: Config) -> Self {
        let state = AppState::with_store(config, Arc::new(InMemoryStore::new()));

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }

    /// Create an endpoint through the API and return its id
    pub async fn create_endpoint(&self) -> String {
        let response = self.server.post("/api/endpoints").await;
        let body: serde_json::Value = response.json();
        body["endpoint"]["id"].as_str().unwrap().to_string()
    }
}

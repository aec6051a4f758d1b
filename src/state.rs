use std::sync::Arc;

use crate::config::Config;
use crate::store::{InMemoryStore, WebhookStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Endpoints and their captured requests
    pub store: Arc<dyn WebhookStore>,
}

impl AppState {
    /// Create a new AppState backed by an empty in-memory store
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(InMemoryStore::new()))
    }

    /// Create AppState with a custom store (for testing)
    pub fn with_store(config: Config, store: Arc<dyn WebhookStore>) -> Self {
        Self { config, store }
    }
}

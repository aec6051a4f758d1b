pub mod memory_store;
pub mod sweeper;

pub use memory_store::{InMemoryStore, MAX_CAPTURES_PER_ENDPOINT};
pub use sweeper::{spawn_sweeper, sweep_once};

use time::OffsetDateTime;

use crate::models::{CapturedRequest, Endpoint};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Endpoint {0} not found")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Registry of endpoints and their bounded capture histories.
///
/// Every operation is in-memory and completes without awaiting I/O, so the
/// trait is synchronous and safe to call from async handlers.
pub trait WebhookStore: Send + Sync {
    /// Register an endpoint with an empty history.
    /// An existing endpoint with the same id is replaced, history included.
    fn create_endpoint(&self, id: &str) -> Endpoint;

    fn get_endpoint(&self, id: &str) -> StoreResult<Endpoint>;

    /// Append a record, evicting the oldest once the per-endpoint cap is hit
    fn store_captured_request(&self, endpoint_id: &str, record: CapturedRequest)
        -> StoreResult<()>;

    /// Snapshot of an endpoint's history, oldest first
    fn get_captured_requests(&self, endpoint_id: &str) -> StoreResult<Vec<CapturedRequest>>;

    /// The endpoint and its history read together, so both belong to the
    /// same incarnation of the id
    fn get_endpoint_with_captures(
        &self,
        endpoint_id: &str,
    ) -> StoreResult<(Endpoint, Vec<CapturedRequest>)>;

    /// Drop every endpoint whose `expires_at` is at or before `now`.
    /// Returns how many were removed.
    fn purge_expired(&self, now: OffsetDateTime) -> usize;

    fn endpoint_count(&self) -> usize;
}

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use time::OffsetDateTime;

use crate::models::{CapturedRequest, Endpoint};
use crate::store::{StoreError, StoreResult, WebhookStore};

/// Number of captures retained per endpoint; older ones are evicted first
pub const MAX_CAPTURES_PER_ENDPOINT: usize = 100;

struct EndpointSlot {
    endpoint: Endpoint,
    captures: Mutex<VecDeque<CapturedRequest>>,
}

impl EndpointSlot {
    fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            captures: Mutex::new(VecDeque::with_capacity(MAX_CAPTURES_PER_ENDPOINT)),
        }
    }
}

/// In-memory webhook store.
///
/// The endpoint map sits behind one `RwLock`; only creation and purging take
/// it for writing. Each endpoint's history has its own `Mutex`, so appends to
/// different endpoints run in parallel under the shared read lock. Holding
/// the read lock for the whole append means an endpoint cannot be replaced
/// or purged halfway through one.
#[derive(Clone)]
pub struct InMemoryStore {
    slots: Arc<RwLock<HashMap<String, EndpointSlot>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// Every critical section below is a single insert/remove/push/pop, so the
// data is consistent even if a holder panicked; poisoning is ignored.
impl WebhookStore for InMemoryStore {
    fn create_endpoint(&self, id: &str) -> Endpoint {
        let endpoint = Endpoint::new(id, OffsetDateTime::now_utc());

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if slots
            .insert(id.to_string(), EndpointSlot::new(endpoint.clone()))
            .is_some()
        {
            tracing::warn!(endpoint_id = %id, "Endpoint id reused, previous history discarded");
        }

        endpoint
    }

    fn get_endpoint(&self, id: &str) -> StoreResult<Endpoint> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(id)
            .map(|slot| slot.endpoint.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn store_captured_request(
        &self,
        endpoint_id: &str,
        record: CapturedRequest,
    ) -> StoreResult<()> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let slot = slots
            .get(endpoint_id)
            .ok_or_else(|| StoreError::NotFound(endpoint_id.to_string()))?;

        let mut captures = slot.captures.lock().unwrap_or_else(PoisonError::into_inner);
        if captures.len() >= MAX_CAPTURES_PER_ENDPOINT {
            captures.pop_front();
        }
        captures.push_back(record);

        Ok(())
    }

    fn get_captured_requests(&self, endpoint_id: &str) -> StoreResult<Vec<CapturedRequest>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let slot = slots
            .get(endpoint_id)
            .ok_or_else(|| StoreError::NotFound(endpoint_id.to_string()))?;

        let captures = slot.captures.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(captures.iter().cloned().collect())
    }

    fn get_endpoint_with_captures(
        &self,
        endpoint_id: &str,
    ) -> StoreResult<(Endpoint, Vec<CapturedRequest>)> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let slot = slots
            .get(endpoint_id)
            .ok_or_else(|| StoreError::NotFound(endpoint_id.to_string()))?;

        let captures = slot.captures.lock().unwrap_or_else(PoisonError::into_inner);
        Ok((slot.endpoint.clone(), captures.iter().cloned().collect()))
    }

    fn purge_expired(&self, now: OffsetDateTime) -> usize {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let before = slots.len();
        slots.retain(|_, slot| !slot.endpoint.is_expired_at(now));
        before - slots.len()
    }

    fn endpoint_count(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

use serde::Serialize;
use time::{Duration, OffsetDateTime};

/// How long an endpoint is advertised as valid after creation
pub const ENDPOINT_TTL: Duration = Duration::hours(24);

/// A capture target. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl Endpoint {
    pub fn new(id: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            created_at,
            expires_at: created_at + ENDPOINT_TTL,
        }
    }

    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

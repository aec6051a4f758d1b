use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;

/// Snapshot of one inbound request delivered to an endpoint.
///
/// `headers` and `query` keep a single value per name: when the sender repeats
/// a header or query key, only the first occurrence is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedRequest {
    pub id: String,
    pub method: String,
    pub path: String,
    /// Keyed by lowercase header name (`content-type`, not `Content-Type`)
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: String,
    /// Remote address as reported by the transport
    pub ip: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

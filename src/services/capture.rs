use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::{HeaderMap, Method, Uri};
use time::OffsetDateTime;

use crate::models::CapturedRequest;

/// Reported as the source address when the transport does not provide one
pub const UNKNOWN_SOURCE: &str = "unknown";

pub struct CaptureService;

impl CaptureService {
    /// 16 lowercase hex characters from 8 random bytes
    pub fn generate_id() -> String {
        let bytes: [u8; 8] = rand::random();
        hex::encode(bytes)
    }

    /// One value per header name; the first occurrence wins
    pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
        let mut flat = BTreeMap::new();
        for (name, value) in headers {
            flat.entry(name.as_str().to_string())
                .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        flat
    }

    /// One value per query key; the first occurrence wins.
    /// A query string that cannot be decoded yields no parameters.
    pub fn flatten_query(uri: &Uri) -> BTreeMap<String, String> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let mut flat = BTreeMap::new();
        for (key, value) in pairs {
            flat.entry(key).or_insert(value);
        }
        flat
    }

    /// Snapshot an inbound request as a new record with a fresh id
    pub fn build_record(
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        remote_addr: Option<SocketAddr>,
        body: &[u8],
    ) -> CapturedRequest {
        CapturedRequest {
            id: Self::generate_id(),
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            headers: Self::flatten_headers(headers),
            query: Self::flatten_query(uri),
            body: String::from_utf8_lossy(body).into_owned(),
            ip: remote_addr
                .map(|addr| addr.to_string())
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

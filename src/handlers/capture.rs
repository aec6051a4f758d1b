use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, ConnectInfo, Path, State},
    http::{Extensions, HeaderMap, Method, Uri},
};

use crate::error::AppResult;
use crate::services::CaptureService;
use crate::state::AppState;

/// Plain-text body sent back to webhook senders
pub const CAPTURED_MESSAGE: &str = "Webhook captured";

/// Capture an inbound webhook. Every HTTP method is accepted.
///
/// The endpoint is looked up before any body rejection is reported, so an
/// unknown id answers 404 whatever the payload size.
#[utoipa::path(
    post,
    path = "/w/{id}",
    params(
        ("id" = String, Path, description = "Endpoint ID")
    ),
    request_body(content = String, description = "Any payload; stored as text"),
    responses(
        (status = 200, description = "Request captured", body = String),
        (status = 404, description = "Endpoint not found"),
        (status = 413, description = "Body exceeds the configured limit")
    ),
    tag = "Capture"
)]
pub async fn capture_webhook(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    extensions: Extensions,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<&'static str> {
    state.store.get_endpoint(&endpoint_id)?;
    let body = body?;

    let remote_addr = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let record = CaptureService::build_record(&method, &uri, &headers, remote_addr, &body);
    let record_id = record.id.clone();

    state.store.store_captured_request(&endpoint_id, record)?;

    tracing::info!(
        endpoint_id = %endpoint_id,
        webhook_id = %record_id,
        method = %method,
        bytes = body.len(),
        "Webhook captured"
    );

    Ok(CAPTURED_MESSAGE)
}

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::{header::HOST, HeaderMap, Uri},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{CapturedRequest, Endpoint};
use crate::services::CaptureService;
use crate::state::AppState;

// ============ Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointResponse {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub expires_at: time::OffsetDateTime,
}

impl From<Endpoint> for EndpointResponse {
    fn from(e: Endpoint) -> Self {
        Self {
            id: e.id,
            created_at: e.created_at,
            expires_at: e.expires_at,
        }
    }
}

/// A captured request as returned to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookResponse {
    pub id: String,
    pub method: String,
    pub path: String,
    /// Keyed by lowercase header name; first value wins when repeated
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub query: BTreeMap<String, String>,
    pub ip: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub timestamp: time::OffsetDateTime,
}

impl From<CapturedRequest> for WebhookResponse {
    fn from(r: CapturedRequest) -> Self {
        Self {
            id: r.id,
            method: r.method,
            path: r.path,
            headers: r.headers,
            body: r.body,
            query: r.query,
            ip: r.ip,
            timestamp: r.timestamp,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateEndpointResponse {
    pub endpoint: EndpointResponse,
    /// Where senders should deliver webhooks
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointDetailResponse {
    pub endpoint: EndpointResponse,
    /// Oldest first
    pub webhooks: Vec<WebhookResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookListResponse {
    pub data: Vec<WebhookResponse>,
    pub total: usize,
}

// ============ Handlers ============

/// Create a new capture endpoint
#[utoipa::path(
    post,
    path = "/api/endpoints",
    responses(
        (status = 200, description = "Endpoint created", body = CreateEndpointResponse),
        (status = 400, description = "No base URL configured and no Host header sent")
    ),
    tag = "Endpoints"
)]
pub async fn create_endpoint(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> AppResult<Json<CreateEndpointResponse>> {
    let base = base_url(&state, &uri, &headers)?;

    let id = CaptureService::generate_id();
    let endpoint = state.store.create_endpoint(&id);
    tracing::info!(endpoint_id = %id, "Endpoint created");

    Ok(Json(CreateEndpointResponse {
        endpoint: endpoint.into(),
        url: format!("{}/w/{}", base, id),
    }))
}

/// Get an endpoint together with its captured requests
#[utoipa::path(
    get,
    path = "/api/endpoints/{id}",
    params(
        ("id" = String, Path, description = "Endpoint ID")
    ),
    responses(
        (status = 200, description = "Endpoint details", body = EndpointDetailResponse),
        (status = 404, description = "Endpoint not found")
    ),
    tag = "Endpoints"
)]
pub async fn get_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EndpointDetailResponse>> {
    let (endpoint, webhooks) = state.store.get_endpoint_with_captures(&id)?;

    Ok(Json(EndpointDetailResponse {
        endpoint: endpoint.into(),
        count: webhooks.len(),
        webhooks: webhooks.into_iter().map(|w| w.into()).collect(),
    }))
}

/// List the captured requests of an endpoint
#[utoipa::path(
    get,
    path = "/api/endpoints/{id}/webhooks",
    params(
        ("id" = String, Path, description = "Endpoint ID")
    ),
    responses(
        (status = 200, description = "Captured requests, oldest first", body = WebhookListResponse),
        (status = 404, description = "Endpoint not found")
    ),
    tag = "Endpoints"
)]
pub async fn list_webhooks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<WebhookListResponse>> {
    let webhooks = state.store.get_captured_requests(&id)?;

    Ok(Json(WebhookListResponse {
        total: webhooks.len(),
        data: webhooks.into_iter().map(|w| w.into()).collect(),
    }))
}

/// Configured public base URL, else `http://<host>` of the incoming request
fn base_url(state: &AppState, uri: &Uri, headers: &HeaderMap) -> AppResult<String> {
    if let Some(base) = &state.config.public_base_url {
        return Ok(base.clone());
    }

    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .ok_or_else(|| AppError::Validation("Host header is required".to_string()))?;

    Ok(format!("http://{}", host))
}

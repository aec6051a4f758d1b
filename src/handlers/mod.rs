pub mod capture;
pub mod endpoint;
pub mod health;

pub use capture::{capture_webhook, CAPTURED_MESSAGE};
pub use endpoint::{
    create_endpoint, get_endpoint, list_webhooks, CreateEndpointResponse, EndpointDetailResponse,
    EndpointResponse, WebhookListResponse, WebhookResponse,
};
pub use health::{health, HealthResponse};

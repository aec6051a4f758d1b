use anyhow::Context;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hookpeek::config::{Config, LogFormat};
use hookpeek::handlers::{
    CreateEndpointResponse, EndpointDetailResponse, EndpointResponse, HealthResponse,
    WebhookListResponse, WebhookResponse,
};
use hookpeek::state::AppState;
use hookpeek::store::spawn_sweeper;
use hookpeek::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::endpoint::create_endpoint,
        handlers::endpoint::get_endpoint,
        handlers::endpoint::list_webhooks,
        handlers::capture::capture_webhook,
    ),
    components(schemas(
        HealthResponse,
        EndpointResponse,
        WebhookResponse,
        CreateEndpointResponse,
        EndpointDetailResponse,
        WebhookListResponse,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Endpoints", description = "Create endpoints and inspect what they captured"),
        (name = "Capture", description = "Webhook delivery targets")
    )
)]
struct ApiDoc;

fn init_tracing(format: LogFormat) {
    let builder =
        tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    init_tracing(config.log_format);

    let addr = config.server_addr();
    let state = AppState::new(config);

    match state.config.sweep_interval() {
        Some(period) => {
            spawn_sweeper(state.store.clone(), period);
        }
        None => tracing::info!("Endpoint expiry is advisory; sweeper disabled"),
    }

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

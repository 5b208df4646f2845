//! NadRelay API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use nad_common::config::AppConfig;
use nad_engine::client::UpstreamClient;

use nad_api::routes::create_router;
use nad_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("nad_api=debug,nad_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting NadRelay API server...");

    // Load configuration
    let config = AppConfig::from_env()?;
    let port = config.listen_port;

    // Build application state
    let state = AppState::new(UpstreamClient::new(), config);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

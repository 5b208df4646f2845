//! Shared application state for the Axum API server.

use nad_common::config::AppConfig;
use nad_engine::client::UpstreamClient;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(upstream: UpstreamClient, config: AppConfig) -> Self {
        Self { upstream, config }
    }
}

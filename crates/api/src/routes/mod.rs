pub mod health;
pub mod tokens;

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, Method, header};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the complete API router with all routes.
///
/// The CORS layer answers every `OPTIONS` request before routing, so
/// preflights short-circuit without touching auth or the upstream. All other
/// unmatched paths land in the holdings fallback, which does its own kind
/// recognition by path substring.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .fallback(tokens::holdings)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-api-key")])
        .max_age(Duration::from_secs(86_400))
}

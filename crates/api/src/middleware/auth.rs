//! Shared-secret authentication for inbound requests.
//!
//! Provides an `ApiKey` Axum extractor that checks the `X-API-Key` header
//! against the configured secret by exact equality. Rejected requests never
//! reach the upstream.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use nad_common::error::AppError;

use crate::state::AppState;

/// Proof that the request presented the configured API key.
///
/// Use as an Axum extractor on protected routes:
/// ```ignore
/// async fn handler(_key: ApiKey) -> impl IntoResponse {
///     // only reached with a valid X-API-Key header
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let provided = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let expected = state.config.api_key.clone();

        async move {
            match provided {
                Some(key) if key == expected => Ok(ApiKey),
                _ => Err(AppError::Auth(
                    "Unauthorized. Invalid or missing API key.".to_string(),
                )),
            }
        }
    }
}

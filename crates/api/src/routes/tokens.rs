//! Holdings proxy routes: kind selection, upstream pagination, envelopes.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use nad_common::config::AppConfig;
use nad_common::error::AppError;
use nad_common::types::TokenKind;
use nad_engine::paginator::{PaginationPolicy, fetch_all};

use crate::middleware::auth::ApiKey;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HoldingsParams {
    pub address: Option<String>,
}

/// Envelope for fungible and multi-token queries.
#[derive(Debug, Serialize)]
pub struct BalancesResponse {
    pub balances: Vec<Value>,
}

/// Envelope for NFT queries, carrying the holder flag for the configured
/// contract alongside the records.
#[derive(Debug, Serialize)]
pub struct NftHoldingsResponse {
    #[serde(rename = "is1MillionNadHolder")]
    pub is_nad_holder: bool,
    pub nfts: Vec<Value>,
}

/// Catch-all holdings handler.
///
/// Any authenticated GET whose path names a known asset kind is proxied
/// upstream; everything else is an invalid endpoint. The kind is recognized
/// by path substring, so versioned prefixes keep working.
pub async fn holdings(
    State(state): State<AppState>,
    _key: ApiKey,
    uri: Uri,
    Query(params): Query<HoldingsParams>,
) -> Result<Response, AppError> {
    let address = params
        .address
        .ok_or_else(|| AppError::Validation("Address parameter is required".to_string()))?;

    let client_id = state
        .config
        .upstream_client_id
        .clone()
        .ok_or_else(|| AppError::Config("UPSTREAM_CLIENT_ID is not configured".to_string()))?;

    let kind = TokenKind::from_path(uri.path()).ok_or(AppError::InvalidEndpoint)?;

    let base_url = holdings_url(&state.config, kind, &address);
    let policy = PaginationPolicy {
        stop_after_empty: state.config.stop_after_empty,
        max_pages: state.config.max_pages,
    };
    // The holder flag only makes sense for NFTs; other kinds skip the scan.
    let holder_target =
        (kind == TokenKind::Erc721).then_some(state.config.holder_contract.as_str());

    let result = fetch_all(&state.upstream, &base_url, &client_id, &policy, holder_target).await;

    tracing::info!(
        kind = %kind,
        address = %address,
        items = result.items.len(),
        "Holdings query complete"
    );

    let response = match kind {
        TokenKind::Erc721 => Json(NftHoldingsResponse {
            is_nad_holder: result.holder,
            nfts: result.items,
        })
        .into_response(),
        TokenKind::Erc20 | TokenKind::Erc1155 => Json(BalancesResponse {
            balances: result.items,
        })
        .into_response(),
    };

    Ok(response)
}

/// Upstream query URL carrying every fixed parameter except `page` and
/// `clientId`, which are appended per fetch.
fn holdings_url(config: &AppConfig, kind: TokenKind, address: &str) -> String {
    let mut url = format!(
        "{}/tokens/{}/{}?chain={}&metadata=true",
        config.upstream_base_url, kind, address, config.chain_id
    );
    if kind.include_spam() {
        url.push_str("&include_spam=true");
    }
    url.push_str(&format!("&limit={}", config.page_limit));
    url
}

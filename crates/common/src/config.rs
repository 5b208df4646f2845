use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Shared secret that inbound callers must present in the `X-API-Key` header
    pub api_key: String,

    /// Credential injected into every upstream request as the `clientId` query
    /// parameter. Optional at startup; requests fail with a configuration error
    /// while it is unset.
    pub upstream_client_id: Option<String>,

    /// Base URL of the upstream token-indexing API
    pub upstream_base_url: String,

    /// Chain id forwarded upstream on every query (the relay is single-chain)
    pub chain_id: String,

    /// Page size requested from upstream (default: 100)
    pub page_limit: u32,

    /// Consecutive empty or failed pages before pagination stops (default: 2)
    pub stop_after_empty: u32,

    /// Absolute cap on pages fetched per request (default: 50)
    pub max_pages: u32,

    /// Contract whose holders are flagged on NFT queries
    pub holder_contract: String,

    /// TCP port the API server listens on (default: 3000)
    pub listen_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key: std::env::var("PROTECTION_API_KEY")
                .map_err(|_| anyhow::anyhow!("PROTECTION_API_KEY environment variable is required"))?,
            upstream_client_id: std::env::var("UPSTREAM_CLIENT_ID").ok(),
            upstream_base_url: std::env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "https://insight.thirdweb.com/v1".to_string()),
            chain_id: std::env::var("CHAIN_ID").unwrap_or_else(|_| "10143".to_string()),
            page_limit: std::env::var("PAGE_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PAGE_LIMIT must be a valid u32"))?,
            stop_after_empty: std::env::var("PAGINATION_STOP_AFTER_EMPTY")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PAGINATION_STOP_AFTER_EMPTY must be a valid u32"))?,
            max_pages: std::env::var("PAGINATION_MAX_PAGES")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PAGINATION_MAX_PAGES must be a valid u32"))?,
            holder_contract: std::env::var("HOLDER_CONTRACT")
                .unwrap_or_else(|_| "0x922da3512e2bebbe32bcce59adf7e6759fb8cea2".to_string()),
            listen_port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?,
        })
    }
}

//! Pagination driver with an empty-page stop heuristic.
//!
//! The upstream API exposes no total-count header, so completion is inferred
//! by watching for N consecutive non-productive pages (default 2). A single
//! empty or failed page between productive ones does not truncate the result
//! set; it only counts toward the stop threshold. An absolute page cap bounds
//! the loop against a misbehaving upstream.
//!
//! State is scoped to one `fetch_all` call. Concurrent requests each drive
//! their own run and share nothing.

use serde_json::Value;

use crate::client::PageFetcher;
use crate::holder;

/// Stop rule for one pagination run.
#[derive(Debug, Clone)]
pub struct PaginationPolicy {
    /// Consecutive empty or failed pages before the run stops.
    pub stop_after_empty: u32,
    /// Hard cap on total pages fetched, productive or not.
    pub max_pages: u32,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            stop_after_empty: 2,
            max_pages: 50,
        }
    }
}

/// Everything one pagination run accumulated.
#[derive(Debug, Default)]
pub struct Holdings {
    /// Records in page order, then intra-page order.
    pub items: Vec<Value>,
    /// Whether any record belongs to the requested holder contract.
    /// Always `false` when no holder check was requested.
    pub holder: bool,
}

/// Mutable state of a single run. Never shared across requests.
#[derive(Debug, Default)]
struct AggregationState {
    items: Vec<Value>,
    consecutive_empty: u32,
    holder: bool,
}

/// Drive `fetcher` over successive page indices starting at 0 and accumulate
/// results until the stop rule fires.
///
/// Pages are fetched strictly sequentially; the stop condition depends on
/// each page's outcome. A fetch error is treated exactly like an empty page:
/// logged, counted toward the threshold, and never surfaced to the caller.
/// Two initial non-productive pages therefore yield an empty `Holdings` with
/// no error, indistinguishable from an address with no holdings.
///
/// When `holder_target` is set, newly fetched pages are scanned for a record
/// of that contract, and after the loop the whole aggregate is rescanned
/// once in case an earlier page hid the match under a different field shape.
/// The flag is monotonic: once set it stays set.
pub async fn fetch_all<F: PageFetcher>(
    fetcher: &F,
    base_url: &str,
    client_id: &str,
    policy: &PaginationPolicy,
    holder_target: Option<&str>,
) -> Holdings {
    let mut state = AggregationState::default();
    let mut page: u32 = 0;

    while state.consecutive_empty < policy.stop_after_empty && page < policy.max_pages {
        let url = format!("{base_url}&page={page}");

        match fetcher.fetch_page(&url, client_id).await {
            Ok(body) => {
                let items = page_items(&body);
                if items.is_empty() {
                    state.consecutive_empty += 1;
                } else {
                    if let Some(target) = holder_target
                        && !state.holder
                    {
                        state.holder = items
                            .iter()
                            .any(|record| holder::matches_contract(record, target));
                    }
                    state.items.extend(items);
                    state.consecutive_empty = 0;
                }
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "Page fetch failed, counting as empty");
                state.consecutive_empty += 1;
            }
        }

        page += 1;
    }

    // Safety net: one full rescan over everything accumulated, not just the
    // last page.
    if let Some(target) = holder_target
        && !state.holder
    {
        state.holder = state
            .items
            .iter()
            .any(|record| holder::matches_contract(record, target));
    }

    tracing::debug!(
        pages = page,
        items = state.items.len(),
        holder = state.holder,
        "Pagination complete"
    );

    Holdings {
        items: state.items,
        holder: state.holder,
    }
}

/// Records carried by one upstream page. A missing or non-array `data`
/// field is an empty page, not an error.
fn page_items(body: &Value) -> Vec<Value> {
    body.get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TARGET: &str = "0x922da3512e2bebbe32bcce59adf7e6759fb8cea2";

    /// One scripted page outcome.
    enum Page {
        Items(Vec<Value>),
        Empty,
        /// 2xx body without a `data` array.
        Bare,
        Error,
    }

    /// Fetcher that replays a fixed script and counts calls. Pages past the
    /// end of the script are empty.
    struct ScriptedFetcher {
        script: Vec<Page>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Page>) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PageFetcher for ScriptedFetcher {
        async fn fetch_page(&self, _url: &str, _client_id: &str) -> Result<Value, FetchError> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script.get(index) {
                Some(Page::Items(items)) => Ok(json!({ "data": items })),
                Some(Page::Bare) => Ok(json!({ "message": "no data field" })),
                Some(Page::Error) => Err(FetchError::Status {
                    status: 500,
                    body: "internal error".to_string(),
                }),
                Some(Page::Empty) | None => Ok(json!({ "data": [] })),
            }
        }
    }

    fn record(name: &str) -> Value {
        json!({ "name": name, "contract": { "address": "0x1111" } })
    }

    fn nad_record() -> Value {
        // Mixed case on purpose; matching must be case-insensitive.
        json!({ "contract": { "address": "0x922DA3512E2BEBBE32BCCE59ADF7E6759FB8CEA2" } })
    }

    #[tokio::test]
    async fn test_concatenates_pages_in_order_and_stops_after_two_empty() {
        let fetcher = ScriptedFetcher::new(vec![
            Page::Items(vec![record("a"), record("b")]),
            Page::Items(vec![record("c")]),
            Page::Empty,
            Page::Empty,
        ]);

        let result = fetch_all(&fetcher, "http://u?x=1", "id", &PaginationPolicy::default(), None).await;

        let names: Vec<_> = result.items.iter().map(|r| r["name"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
        // Two productive pages plus two stop-probe pages.
        assert_eq!(fetcher.calls(), 4);
    }

    #[tokio::test]
    async fn test_single_empty_page_does_not_truncate() {
        let fetcher = ScriptedFetcher::new(vec![
            Page::Items(vec![record("a")]),
            Page::Empty,
            Page::Items(vec![record("b")]),
            Page::Empty,
            Page::Empty,
        ]);

        let result = fetch_all(&fetcher, "http://u?x=1", "id", &PaginationPolicy::default(), None).await;

        assert_eq!(result.items.len(), 2);
        assert_eq!(fetcher.calls(), 5);
    }

    #[tokio::test]
    async fn test_fetch_errors_count_like_empty_pages() {
        let fetcher = ScriptedFetcher::new(vec![
            Page::Items(vec![record("a")]),
            Page::Error,
            Page::Items(vec![record("b")]),
            Page::Error,
            Page::Empty,
        ]);

        let result = fetch_all(&fetcher, "http://u?x=1", "id", &PaginationPolicy::default(), None).await;

        // Errors are swallowed; both productive pages survive.
        assert_eq!(result.items.len(), 2);
        assert_eq!(fetcher.calls(), 5);
    }

    #[tokio::test]
    async fn test_two_initial_failures_yield_empty_result_without_error() {
        let fetcher = ScriptedFetcher::new(vec![Page::Error, Page::Empty]);

        let result = fetch_all(
            &fetcher,
            "http://u?x=1",
            "id",
            &PaginationPolicy::default(),
            Some(TARGET),
        )
        .await;

        assert!(result.items.is_empty());
        assert!(!result.holder);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_body_without_data_array_counts_as_empty() {
        let fetcher = ScriptedFetcher::new(vec![
            Page::Items(vec![record("a")]),
            Page::Bare,
            Page::Bare,
        ]);

        let result = fetch_all(&fetcher, "http://u?x=1", "id", &PaginationPolicy::default(), None).await;

        assert_eq!(result.items.len(), 1);
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn test_page_cap_bounds_endlessly_productive_upstream() {
        let script = (0..10)
            .map(|i| Page::Items(vec![record(&format!("r{i}"))]))
            .collect();
        let fetcher = ScriptedFetcher::new(script);
        let policy = PaginationPolicy {
            stop_after_empty: 2,
            max_pages: 5,
        };

        let result = fetch_all(&fetcher, "http://u?x=1", "id", &policy, None).await;

        assert_eq!(result.items.len(), 5);
        assert_eq!(fetcher.calls(), 5);
    }

    #[tokio::test]
    async fn test_holder_flag_set_from_mid_run_page() {
        let fetcher = ScriptedFetcher::new(vec![
            Page::Items(vec![record("a")]),
            Page::Items(vec![nad_record()]),
            Page::Items(vec![record("b")]),
            Page::Empty,
            Page::Empty,
        ]);

        let result = fetch_all(
            &fetcher,
            "http://u?x=1",
            "id",
            &PaginationPolicy::default(),
            Some(TARGET),
        )
        .await;

        // Case-differing address on page 1; flag set and kept through the run.
        assert!(result.holder);
        assert_eq!(result.items.len(), 3);
    }

    #[tokio::test]
    async fn test_holder_flag_matches_alternate_field_shape() {
        let fetcher = ScriptedFetcher::new(vec![
            Page::Items(vec![json!({ "token_address": TARGET })]),
            Page::Empty,
            Page::Empty,
        ]);

        let result = fetch_all(
            &fetcher,
            "http://u?x=1",
            "id",
            &PaginationPolicy::default(),
            Some(TARGET),
        )
        .await;

        assert!(result.holder);
    }

    #[tokio::test]
    async fn test_holder_flag_stays_false_when_not_requested() {
        let fetcher = ScriptedFetcher::new(vec![
            Page::Items(vec![nad_record()]),
            Page::Empty,
            Page::Empty,
        ]);

        let result = fetch_all(&fetcher, "http://u?x=1", "id", &PaginationPolicy::default(), None).await;

        assert!(!result.holder);
        assert_eq!(result.items.len(), 1);
    }

    #[tokio::test]
    async fn test_page_parameter_appended_to_base_url() {
        struct UrlCapture {
            urls: std::sync::Mutex<Vec<String>>,
        }

        impl PageFetcher for UrlCapture {
            async fn fetch_page(&self, url: &str, _client_id: &str) -> Result<Value, FetchError> {
                self.urls.lock().unwrap().push(url.to_string());
                Ok(json!({ "data": [] }))
            }
        }

        let fetcher = UrlCapture {
            urls: std::sync::Mutex::new(Vec::new()),
        };

        fetch_all(
            &fetcher,
            "http://u/tokens?chain=1&limit=100",
            "id",
            &PaginationPolicy::default(),
            None,
        )
        .await;

        let urls = fetcher.urls.lock().unwrap();
        assert_eq!(
            *urls,
            vec![
                "http://u/tokens?chain=1&limit=100&page=0".to_string(),
                "http://u/tokens?chain=1&limit=100&page=1".to_string(),
            ]
        );
    }
}

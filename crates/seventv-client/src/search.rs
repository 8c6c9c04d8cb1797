//! Throttled, paginated emote catalog search.
//!
//! One controller owns one search session. A fetch is accepted only when no
//! other fetch is outstanding and the minimum interval since the last
//! accepted fetch has elapsed; otherwise it is dropped without touching
//! state. Requests are never queued or cancelled.

#[cfg(test)]
mod tests;

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::client::CatalogTransport;
use crate::gql::GqlRequest;
use crate::models::{EmoteItem, GqlResponse, SearchData};
use crate::settings::Settings;

/// Minimum time between two accepted fetches.
pub const MIN_FETCH_INTERVAL: Duration = Duration::from_millis(500);

/// What happened to a fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Dropped: too soon after the previous accepted fetch.
    Throttled,
    /// Dropped: another fetch is still outstanding.
    Busy,
    /// New results stored.
    Loaded { count: usize },
    /// Server answered without a result list; nothing stored.
    NoResults,
    /// Server reported an error; message stored, results left as they were.
    ServerError(String),
    /// Request never completed; logged only.
    TransportFailed,
}

/// Session state. Read it through [`SearchController::snapshot`].
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub page: u32,
    /// Empty means no error.
    pub error: String,
    pub fetching: bool,
    /// Last successful result list; `None` until a fetch succeeds.
    pub results: Option<Vec<EmoteItem>>,
    /// Total matches reported with the last successful result list.
    pub total: u32,
    last_accepted: Option<Instant>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            error: String::new(),
            fetching: false,
            results: None,
            total: 0,
            last_accepted: None,
        }
    }
}

/// Clears the in-flight flag when a fetch finishes or its future is dropped.
struct InFlight<'a> {
    state: &'a Mutex<SearchState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.fetching = false;
    }
}

pub struct SearchController<T> {
    transport: T,
    settings: Settings,
    min_interval: Duration,
    state: Mutex<SearchState>,
}

impl<T: CatalogTransport> SearchController<T> {
    pub fn new(transport: T, settings: Settings) -> Self {
        Self::with_min_interval(transport, settings, MIN_FETCH_INTERVAL)
    }

    pub fn with_min_interval(transport: T, settings: Settings, min_interval: Duration) -> Self {
        Self {
            transport,
            settings,
            min_interval,
            state: Mutex::new(SearchState::default()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    /// Replace the search text and go back to the first page.
    pub fn set_query(&self, text: &str) {
        let mut state = self.lock();
        state.query = text.to_string();
        state.page = 1;
    }

    pub fn set_page(&self, page: u32) {
        self.lock().page = page.max(1);
    }

    pub fn next_page(&self) -> u32 {
        let mut state = self.lock();
        state.page = state.page.saturating_add(1);
        state.page
    }

    pub fn prev_page(&self) -> u32 {
        let mut state = self.lock();
        state.page = state.page.saturating_sub(1).max(1);
        state.page
    }

    /// Pages available for the current query, at least one.
    pub fn total_pages(&self) -> u32 {
        let total = self.lock().total;
        total.div_ceil(self.settings.page_limit()).max(1)
    }

    /// The stored server error, or the page indicator when there is none.
    pub fn status_line(&self) -> String {
        let (page, error) = {
            let state = self.lock();
            (state.page, state.error.clone())
        };
        if error.is_empty() {
            format!("Page {page} of {}", self.total_pages())
        } else {
            error
        }
    }

    /// Set the query and fetch its first page.
    pub async fn search(&self, text: &str) -> FetchOutcome {
        self.set_query(text);
        self.fetch().await
    }

    /// Current results, fetching first if nothing has loaded yet.
    pub async fn results(&self) -> Vec<EmoteItem> {
        if self.lock().results.is_none() {
            self.fetch().await;
        }
        self.lock().results.clone().unwrap_or_default()
    }

    /// Fetch the current page for the current query.
    pub async fn fetch(&self) -> FetchOutcome {
        let request = {
            let mut state = self.lock();
            if state.fetching {
                tracing::debug!("Search already in flight, dropping request");
                return FetchOutcome::Busy;
            }
            let now = Instant::now();
            if let Some(last) = state.last_accepted {
                if now.duration_since(last) < self.min_interval {
                    tracing::debug!("Search throttled");
                    return FetchOutcome::Throttled;
                }
            }

            state.last_accepted = Some(now);
            state.error.clear();
            state.fetching = true;
            state.page = state.page.max(1);
            GqlRequest::search(&state.query, state.page, &self.settings)
        };
        let _in_flight = InFlight { state: &self.state };

        match self.transport.post_gql(&request).await {
            Ok(body) => match serde_json::from_str::<GqlResponse<SearchData>>(&body) {
                Ok(resp) => self.apply_response(resp),
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed search response");
                    FetchOutcome::TransportFailed
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Search request failed");
                FetchOutcome::TransportFailed
            }
        }
    }

    fn apply_response(&self, resp: GqlResponse<SearchData>) -> FetchOutcome {
        let mut state = self.lock();

        if let Some(message) = resp.error_message() {
            tracing::warn!(error = message, query = %state.query, "Search rejected by server");
            state.error = message.to_string();
            return FetchOutcome::ServerError(state.error.clone());
        }

        let Some(found) = resp.data.and_then(|d| d.emotes) else {
            return FetchOutcome::NoResults;
        };
        let Some(items) = found.items else {
            return FetchOutcome::NoResults;
        };

        let count = items.len();
        tracing::debug!(count, total = found.count, page = state.page, "Search results loaded");
        state.total = found.count;
        state.results = Some(items);
        FetchOutcome::Loaded { count }
    }
}

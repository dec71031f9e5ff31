//! Session-level search flow: speculative pre-fetch, loading floor, pagination

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::query_service::CollegeQueryServiceTrait;
use crate::domain::search::no_results_message;
use crate::domain::{College, DomainError, ErrorCategory, LocationCache, SearchState};

/// Timing and paging of the search screen
#[derive(Debug, Clone)]
pub struct SearchOrchestratorConfig {
    /// A pipeline search never completes faster than this
    pub min_loading: Duration,
    pub page_size: usize,
    /// Quiet period before a scheduled pre-fetch starts
    pub debounce: Duration,
}

impl Default for SearchOrchestratorConfig {
    fn default() -> Self {
        Self {
            min_loading: Duration::from_millis(300),
            page_size: 6,
            debounce: Duration::from_millis(500),
        }
    }
}

/// Owns the visible search state and the speculative cache of one session
pub struct SearchOrchestrator {
    query: Arc<dyn CollegeQueryServiceTrait>,
    speculative: Arc<dyn LocationCache>,
    state: RwLock<SearchState>,
    generation: AtomicU64,
    /// Cancels the debounce wait of the most recently scheduled pre-fetch
    pending_prefetch: Mutex<Option<CancellationToken>>,
    config: SearchOrchestratorConfig,
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("speculative", &self.speculative)
            .field("generation", &self.generation)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SearchOrchestrator {
    pub fn new(
        query: Arc<dyn CollegeQueryServiceTrait>,
        speculative: Arc<dyn LocationCache>,
        config: SearchOrchestratorConfig,
    ) -> Self {
        Self {
            query,
            speculative,
            state: RwLock::new(SearchState {
                display_count: config.page_size,
                ..Default::default()
            }),
            generation: AtomicU64::new(0),
            pending_prefetch: Mutex::new(None),
            config,
        }
    }

    /// Foreground search. Only the most recently started search changes visible state.
    pub async fn search(&self, location: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.location = Some(location.to_string());
            state.display_count = self.config.page_size;
        }

        if let Some(hit) = self.speculative.get(location).await {
            info!(location = %location, count = hit.colleges.len(), "Using pre-fetched colleges");
            self.apply(generation, location, Ok(hit.colleges)).await;
            return;
        }

        if self.is_current(generation) {
            self.state.write().await.colleges.clear();
        }

        debug!(location = %location, generation, "No pre-fetched results, querying");

        let (result, _) = tokio::join!(
            self.query.fetch(location),
            tokio::time::sleep(self.config.min_loading)
        );

        if let Ok(colleges) = &result {
            if !colleges.is_empty() {
                self.speculative.insert(location, colleges.clone()).await;
            }
        }

        self.apply(generation, location, result).await;
    }

    /// Pre-fetch into the speculative cache without touching visible state
    pub async fn background_search(&self, location: &str) {
        if self.speculative.contains(location).await {
            debug!(location = %location, "Pre-fetch skipped, already cached");
            return;
        }

        info!(location = %location, "Pre-fetching colleges");

        match self.query.fetch(location).await {
            Ok(colleges) if colleges.is_empty() => {
                info!(location = %location, "Pre-fetch returned no colleges");
            }
            Ok(colleges) => {
                let count = colleges.len();
                self.speculative.insert(location, colleges).await;
                info!(location = %location, count, "Pre-fetch completed");
            }
            Err(e) => {
                warn!(location = %location, error = %e, "Pre-fetch failed");
            }
        }
    }

    /// Debounced pre-fetch: each call replaces the previously scheduled one.
    ///
    /// Only the debounce wait is cancelled; a pre-fetch that already started runs to
    /// completion and fills the speculative cache.
    pub async fn schedule_background_search(self: &Arc<Self>, location: &str) {
        let location = location.trim().to_string();

        if let Some(previous) = self.take_pending_prefetch() {
            previous.cancel();
        }

        if location.is_empty() || self.state.read().await.loading {
            return;
        }

        let token = CancellationToken::new();
        let debounce_cancelled = token.clone();
        let orchestrator = Arc::clone(self);
        let debounce = self.config.debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = debounce_cancelled.cancelled() => {
                    debug!(location = %location, "Scheduled pre-fetch replaced");
                    return;
                }
                _ = tokio::time::sleep(debounce) => {}
            }

            if orchestrator.state.read().await.loading {
                debug!(location = %location, "Pre-fetch dropped, search in progress");
                return;
            }

            orchestrator.background_search(&location).await;
        });

        if let Ok(mut pending) = self.pending_prefetch.lock() {
            *pending = Some(token);
        }
    }

    /// Reveal the next page of the current results
    pub async fn load_more(&self) {
        let mut state = self.state.write().await;
        state.display_count += self.config.page_size;
    }

    pub async fn visible_colleges(&self) -> Vec<College> {
        self.state.read().await.visible().to_vec()
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more()
    }

    pub async fn snapshot(&self) -> SearchState {
        self.state.read().await.clone()
    }

    pub async fn is_prefetched(&self, location: &str) -> bool {
        self.speculative.contains(location).await
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn take_pending_prefetch(&self) -> Option<CancellationToken> {
        self.pending_prefetch
            .lock()
            .ok()
            .and_then(|mut pending| pending.take())
    }

    async fn apply(
        &self,
        generation: u64,
        location: &str,
        result: Result<Vec<College>, DomainError>,
    ) {
        let mut state = self.state.write().await;

        if !self.is_current(generation) {
            debug!(location = %location, generation, "Discarding superseded search result");
            return;
        }

        match result {
            Ok(colleges) if colleges.is_empty() => {
                state.colleges.clear();
                state.error = Some(no_results_message(location));
            }
            Ok(colleges) => {
                info!(location = %location, count = colleges.len(), "Search completed");
                state.colleges = colleges;
            }
            Err(e) => {
                let category = ErrorCategory::classify(&e);
                warn!(location = %location, error = %e, ?category, "Search failed");
                state.colleges.clear();
                state.error = Some(category.user_message().to_string());
            }
        }

        state.loading = false;
    }
}

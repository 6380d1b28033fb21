//! Calculation workflow
//!
//! Owns the application state: active tab, the ranked list and the single
//! view slot that shows either nothing, a spinner, a result or an error. Only
//! one calculation runs at a time; the loading state is released on every
//! exit path, including cancellation of the calculation future.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use shared::{
    normalize, normalize_top_pair, ActiveTab, CoordinateResolver, ErrorResult, NormalizedResult,
    TopPairEntry,
};

use super::pair_cache::PairCache;
use crate::error::{ClientError, ClientResult};
use crate::external::{PredictionApi, PredictionOutcome};

/// What the result area currently shows
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    ResultShown(NormalizedResult),
    ErrorShown(ErrorResult),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Application state snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppState {
    pub active_tab: ActiveTab,
    pub view: ViewState,
    pub top_pairs: Vec<TopPairEntry>,
}

/// Where the ranked list came from on the last load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopPairsSource {
    Cache,
    Network,
    /// Fetch failed; the list stays empty
    Unavailable,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the loading latch for one calculation
struct LoadingGuard<'a> {
    state: &'a Mutex<AppState>,
    released: bool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(state: &'a Mutex<AppState>) -> ClientResult<Self> {
        let mut app = lock(state);
        if app.view.is_loading() {
            return Err(ClientError::CalculationInFlight);
        }
        app.view = ViewState::Loading;
        Ok(Self {
            state,
            released: false,
        })
    }

    fn release(mut self, view: ViewState) {
        lock(self.state).view = view;
        self.released = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!("Calculation abandoned before completion");
            lock(self.state).view = ViewState::Idle;
        }
    }
}

/// Drives calculations, ranked-list selection and cache refresh
pub struct WorkflowController<'r> {
    api: Arc<dyn PredictionApi>,
    cache: PairCache,
    resolver: &'r CoordinateResolver,
    state: Mutex<AppState>,
}

impl<'r> WorkflowController<'r> {
    pub fn new(
        api: Arc<dyn PredictionApi>,
        cache: PairCache,
        resolver: &'r CoordinateResolver,
    ) -> Self {
        Self {
            api,
            cache,
            resolver,
            state: Mutex::new(AppState::default()),
        }
    }

    pub fn snapshot(&self) -> AppState {
        lock(&self.state).clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).view.is_loading()
    }

    pub fn active_tab(&self) -> ActiveTab {
        lock(&self.state).active_tab
    }

    pub fn set_active_tab(&self, tab: ActiveTab) {
        lock(&self.state).active_tab = tab;
    }

    /// Submitting is allowed only while no calculation is running
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    /// Populate the ranked list from cache, or fetch and cache it.
    ///
    /// An empty list from the service is cached like any other. Fetch
    /// failures leave the list empty and are only logged.
    pub async fn initialize(&self) -> TopPairsSource {
        if let Some(pairs) = self.cache.load() {
            tracing::info!("Loaded {} top pairs from cache", pairs.len());
            lock(&self.state).top_pairs = pairs;
            return TopPairsSource::Cache;
        }

        tracing::info!("Top pairs cache miss, fetching from service");
        match self.api.fetch_top_pairs().await {
            Ok(pairs) => {
                if let Err(e) = self.cache.store(&pairs) {
                    tracing::warn!("Failed to cache top pairs: {}", e);
                }
                tracing::info!("Fetched {} top pairs", pairs.len());
                lock(&self.state).top_pairs = pairs;
                TopPairsSource::Network
            }
            Err(e) => {
                tracing::error!("Failed to fetch top pairs: {}", e);
                TopPairsSource::Unavailable
            }
        }
    }

    /// Drop the cached list and reload from scratch
    pub async fn refresh(&self) -> ClientResult<TopPairsSource> {
        {
            let mut app = lock(&self.state);
            if app.view.is_loading() {
                return Err(ClientError::CalculationInFlight);
            }
            *app = AppState::default();
        }
        if let Err(e) = self.cache.invalidate() {
            tracing::warn!("Failed to invalidate top pairs cache: {}", e);
        }
        Ok(self.initialize().await)
    }

    /// Run a prediction for the active tab.
    ///
    /// Service rejections and transport failures both end in
    /// `ViewState::ErrorShown`; the only error returned is a second
    /// submission while one is in flight.
    pub async fn calculate(&self, plant_a: &str, plant_b: Option<&str>) -> ClientResult<ViewState> {
        let guard = LoadingGuard::acquire(&self.state)?;
        let tab = self.active_tab();
        tracing::debug!("Calculation started in {} mode", tab.code());

        let outcome = match (tab, plant_b) {
            (ActiveTab::Single, _) => {
                tracing::info!("Predicting best partner for {}", plant_a);
                self.api.predict_single(plant_a).await
            }
            (ActiveTab::Cross, Some(plant_b)) => {
                tracing::info!("Predicting pair {} x {}", plant_a, plant_b);
                self.api.predict_pair(plant_a, plant_b).await
            }
            (ActiveTab::Cross, None) => Err(shared::SubmissionError::MissingPlantB.into()),
        };

        let view = match outcome {
            Ok(PredictionOutcome::Prediction(raw)) if raw.is_error() => {
                let reason = raw.reason.unwrap_or_default();
                tracing::warn!("Prediction rejected: {}", reason);
                ViewState::ErrorShown(ErrorResult::new(reason))
            }
            Ok(PredictionOutcome::Prediction(raw)) => {
                ViewState::ResultShown(normalize(&raw, self.resolver))
            }
            Ok(PredictionOutcome::Rejected { reason }) => {
                tracing::warn!("Prediction rejected: {}", reason);
                ViewState::ErrorShown(ErrorResult::new(reason))
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                ViewState::ErrorShown(ErrorResult::new(e.user_message()))
            }
        };

        guard.release(view.clone());
        Ok(view)
    }

    /// Show a ranked row as the result without any network call.
    ///
    /// Ranked rows are always pairs, so this switches to the cross tab.
    pub fn select_top_pair(&self, entry: &TopPairEntry) -> ClientResult<NormalizedResult> {
        let mut app = lock(&self.state);
        if app.view.is_loading() {
            return Err(ClientError::CalculationInFlight);
        }
        app.active_tab = ActiveTab::Cross;
        let result = normalize_top_pair(entry, self.resolver);
        app.view = ViewState::ResultShown(result.clone());
        Ok(result)
    }

    /// Select by 1-based rank in the current list
    pub fn select_rank(&self, rank: usize) -> ClientResult<NormalizedResult> {
        let entry = {
            let app = lock(&self.state);
            rank.checked_sub(1)
                .and_then(|index| app.top_pairs.get(index))
                .cloned()
                .ok_or_else(|| {
                    ClientError::Validation(format!(
                        "rank {} is out of range (1-{})",
                        rank,
                        app.top_pairs.len()
                    ))
                })?
        };
        self.select_top_pair(&entry)
    }

    /// Return to the ranked list; a running calculation is left alone
    pub fn clear_result(&self) {
        let mut app = lock(&self.state);
        if !app.view.is_loading() {
            app.view = ViewState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl PredictionApi for Unreachable {
        async fn predict_single(&self, _: &str) -> ClientResult<PredictionOutcome> {
            Err(ClientError::Http { status: 503 })
        }

        async fn predict_pair(&self, _: &str, _: &str) -> ClientResult<PredictionOutcome> {
            Err(ClientError::Http { status: 503 })
        }

        async fn fetch_top_pairs(&self) -> ClientResult<Vec<TopPairEntry>> {
            Err(ClientError::Http { status: 503 })
        }
    }

    fn controller() -> WorkflowController<'static> {
        let store = Arc::new(crate::storage::MemoryStore::new());
        WorkflowController::new(
            Arc::new(Unreachable),
            PairCache::new(store),
            CoordinateResolver::builtin(),
        )
    }

    #[test]
    fn test_guard_blocks_second_acquire() {
        let state = Mutex::new(AppState::default());
        let guard = LoadingGuard::acquire(&state).unwrap();
        assert!(matches!(
            LoadingGuard::acquire(&state),
            Err(ClientError::CalculationInFlight)
        ));
        drop(guard);
        assert_eq!(lock(&state).view, ViewState::Idle);
    }

    #[test]
    fn test_guard_release_sets_view() {
        let state = Mutex::new(AppState::default());
        let guard = LoadingGuard::acquire(&state).unwrap();
        guard.release(ViewState::ErrorShown(ErrorResult::new("")));
        assert!(matches!(lock(&state).view, ViewState::ErrorShown(_)));
    }

    #[test]
    fn test_clear_result_keeps_loading() {
        let controller = controller();
        lock(&controller.state).view = ViewState::Loading;
        controller.clear_result();
        assert!(controller.is_loading());
        assert!(!controller.can_submit());
    }

    #[test]
    fn test_select_rank_out_of_range() {
        let controller = controller();
        assert!(matches!(controller.select_rank(0), Err(ClientError::Validation(_))));
        assert!(matches!(controller.select_rank(1), Err(ClientError::Validation(_))));
    }

    #[tokio::test]
    async fn test_cross_without_second_parent_shows_error() {
        let controller = controller();
        controller.set_active_tab(ActiveTab::Cross);
        let view = controller.calculate("Triticum", None).await.unwrap();
        match view {
            ViewState::ErrorShown(err) => assert!(err.reason.contains("second parent")),
            other => panic!("expected error card, got {:?}", other),
        }
        assert!(controller.can_submit());
    }

    #[tokio::test]
    async fn test_unavailable_ranking_leaves_list_empty() {
        let controller = controller();
        assert_eq!(controller.initialize().await, TopPairsSource::Unavailable);
        assert!(controller.snapshot().top_pairs.is_empty());
    }
}

//! Debounced autocomplete for one plant input field
//!
//! Every keystroke restarts a single-slot quiet-period timer. When the timer
//! fires with the panel still open, one search request goes out. The request
//! runs detached from the timer, so a later keystroke never cancels a request
//! already sent; instead each request is tagged with the field generation and
//! its response is dropped if the field has moved on.
//!
//! Methods that arm the timer spawn onto the current Tokio runtime and must be
//! called from within one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::{is_searchable_query, should_open_on_focus, shows_no_matches, SearchSuggestion};
use tokio::task::JoinHandle;

use crate::config::SearchConfig;
use crate::external::PlantSearchApi;

/// Lifecycle of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Text changed but is too short to search
    Typing,
    /// Quiet-period timer armed
    Debouncing,
    /// Request in flight
    Fetching,
    /// Last request answered (or failed)
    Settled,
}

/// Render-ready view of a field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    pub text: String,
    pub committed: Option<String>,
    pub open: bool,
    pub searching: bool,
    pub suggestions: Vec<SearchSuggestion>,
    pub phase: SearchPhase,
}

impl SearchSnapshot {
    /// Whether the "no matches" hint should be shown
    pub fn no_matches(&self) -> bool {
        shows_no_matches(&self.text, self.open, self.searching, self.suggestions.len())
    }
}

#[derive(Debug, Default)]
struct FieldState {
    snapshot: SearchSnapshot,
    generation: u64,
}

/// Autocomplete coordinator for a single input field
pub struct SearchCoordinator {
    api: Arc<dyn PlantSearchApi>,
    config: SearchConfig,
    state: Arc<Mutex<FieldState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SearchCoordinator {
    pub fn new(api: Arc<dyn PlantSearchApi>, config: SearchConfig) -> Self {
        Self {
            api,
            config,
            state: Arc::new(Mutex::new(FieldState::default())),
            pending: Mutex::new(None),
        }
    }

    /// Handle a keystroke: record the text, void any committed pick, open the
    /// panel and restart the quiet period.
    pub fn input(&self, text: impl Into<String>) {
        let text = text.into();
        let searchable = is_searchable_query(&text, self.config.min_query_len);

        let generation = {
            let mut field = lock(&self.state);
            field.generation += 1;
            let snap = &mut field.snapshot;
            snap.text = text;
            snap.committed = None;
            snap.open = true;
            snap.searching = false;
            if searchable {
                snap.phase = SearchPhase::Debouncing;
            } else {
                snap.suggestions.clear();
                snap.phase = SearchPhase::Typing;
            }
            field.generation
        };

        if searchable {
            self.arm(generation);
        } else {
            self.disarm();
        }
    }

    /// Commit a suggestion: show its display name, keep its canonical id and
    /// close the panel.
    pub fn select(&self, suggestion: &SearchSuggestion) {
        {
            let mut field = lock(&self.state);
            field.generation += 1;
            let snap = &mut field.snapshot;
            snap.text = suggestion.display_name.clone();
            snap.committed = Some(suggestion.canonical_id.clone());
            snap.suggestions.clear();
            snap.open = false;
            snap.searching = false;
            snap.phase = SearchPhase::Idle;
        }
        self.disarm();
        tracing::debug!("Committed {} for input", suggestion.canonical_id);
    }

    /// Reopen the panel when the field regains focus with enough text.
    ///
    /// Only a closed panel triggers a new search.
    pub fn focus(&self) {
        let generation = {
            let mut field = lock(&self.state);
            if field.snapshot.open || !should_open_on_focus(&field.snapshot.text) {
                return;
            }
            field.snapshot.open = true;
            if !is_searchable_query(&field.snapshot.text, self.config.min_query_len) {
                return;
            }
            field.snapshot.phase = SearchPhase::Debouncing;
            field.generation
        };
        self.arm(generation);
    }

    /// Close the panel, keeping text and committed id
    pub fn blur(&self) {
        lock(&self.state).snapshot.open = false;
    }

    /// Reset the field entirely
    pub fn clear(&self) {
        {
            let mut field = lock(&self.state);
            field.generation += 1;
            field.snapshot = SearchSnapshot::default();
        }
        self.disarm();
    }

    /// Value to send for prediction: the committed id, else the raw text
    pub fn submission_value(&self) -> String {
        let field = lock(&self.state);
        field
            .snapshot
            .committed
            .clone()
            .unwrap_or_else(|| field.snapshot.text.clone())
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        lock(&self.state).snapshot.clone()
    }

    /// Replace the pending timer with a new one for `generation`
    fn arm(&self, generation: u64) {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let delay = self.config.debounce();

        let mut pending = lock(&self.pending);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let query = {
                let mut field = lock(&state);
                if field.generation != generation {
                    return;
                }
                if !field.snapshot.open {
                    field.snapshot.phase = SearchPhase::Idle;
                    return;
                }
                field.snapshot.searching = true;
                field.snapshot.phase = SearchPhase::Fetching;
                field.snapshot.text.clone()
            };

            // Detached: disarming the timer must not cancel a sent request
            tokio::spawn(run_search(api, state, generation, query));
        }));
    }

    fn disarm(&self) {
        if let Some(previous) = lock(&self.pending).take() {
            previous.abort();
        }
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.disarm();
    }
}

async fn run_search(
    api: Arc<dyn PlantSearchApi>,
    state: Arc<Mutex<FieldState>>,
    generation: u64,
    query: String,
) {
    tracing::debug!("Searching plants for {:?}", query);
    let result = api.search_plants(&query).await;

    let mut field = lock(&state);
    if field.generation != generation {
        tracing::debug!("Discarding stale suggestions for {:?}", query);
        return;
    }

    let snap = &mut field.snapshot;
    snap.searching = false;
    snap.phase = SearchPhase::Settled;
    match result {
        Ok(suggestions) => {
            tracing::debug!("{} suggestions for {:?}", suggestions.len(), query);
            snap.suggestions = suggestions;
        }
        Err(e) => {
            tracing::warn!("Plant search failed for {:?}: {}", query, e);
            snap.suggestions.clear();
        }
    }
}

//! Presentation state shared with the UI layer.
//!
//! [`StateStore`] owns the current [`PipelineState`] inside a
//! `tokio::sync::watch` channel. Every mutation notifies subscribers, and
//! search results are only committed when they belong to the latest fetch
//! generation.

use std::sync::Arc;

use cinesearch_core::movie::MovieSummary;
use cinesearch_core::search_count::TrendingEntry;
use serde::Serialize;
use tokio::sync::watch;

/// Lifecycle of the movie list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything a front-end needs to render the search screen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineState {
    /// Latest raw input.
    pub search_term: String,
    /// Latest settled input.
    pub debounced_term: String,
    pub status: SearchStatus,
    /// User-facing message; set only while `status` is `Error`.
    pub error_message: Option<String>,
    pub movies: Vec<MovieSummary>,
    pub trending: Vec<TrendingEntry>,
    /// Generation of the most recently started fetch.
    pub generation: u64,
}

impl PipelineState {
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }
}

/// Cloneable handle to the shared [`PipelineState`].
#[derive(Clone)]
pub struct StateStore {
    tx: Arc<watch::Sender<PipelineState>>,
}

impl StateStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(PipelineState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Receive a notification after every state change.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> PipelineState {
        self.tx.borrow().clone()
    }

    pub fn set_search_term(&self, term: &str) {
        self.tx.send_if_modified(|state| {
            if state.search_term == term {
                return false;
            }
            state.search_term = term.to_string();
            true
        });
    }

    /// Store a settled term. Returns `false` if it equals the current one.
    pub fn settle(&self, term: &str) -> bool {
        self.tx.send_if_modified(|state| {
            if state.debounced_term == term {
                return false;
            }
            state.debounced_term = term.to_string();
            true
        })
    }

    /// Enter `Loading` for a new fetch and return its generation.
    ///
    /// The previous movie list stays visible until the fetch resolves.
    pub fn begin_search(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.status = SearchStatus::Loading;
            state.error_message = None;
            generation = state.generation;
        });
        generation
    }

    /// Commit results for `generation`. Returns `false` if a newer fetch
    /// has started since, in which case nothing changes.
    pub fn commit_success(&self, generation: u64, movies: Vec<MovieSummary>) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.status = SearchStatus::Success;
            state.error_message = None;
            state.movies = movies;
            true
        })
    }

    /// Commit an error for `generation`, clearing the movie list. Returns
    /// `false` if a newer fetch has started since.
    pub fn commit_failure(&self, generation: u64, message: &str) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.status = SearchStatus::Error;
            state.error_message = Some(message.to_string());
            state.movies.clear();
            true
        })
    }

    pub fn set_trending(&self, trending: Vec<TrendingEntry>) {
        self.tx.send_modify(|state| state.trending = trending);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

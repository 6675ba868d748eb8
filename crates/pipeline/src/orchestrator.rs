//! Catalog fetch orchestration.
//!
//! [`FetchOrchestrator::run_search`] performs one catalog lookup for a
//! settled term and resolves the presentation state to `Success` or
//! `Error`. Each call takes a fresh generation from the [`StateStore`];
//! a result is committed only while its generation is still the latest,
//! so a slow response for an old term can never overwrite a newer one.

use std::sync::Arc;

use cinesearch_catalog::{CatalogRequest, CatalogService};
use cinesearch_core::movie::MovieSummary;
use cinesearch_core::search::FETCH_ERROR_MESSAGE;
use cinesearch_events::{kinds, EventBus, PipelineEvent};

use crate::recorder::PopularityRecorder;
use crate::state::StateStore;

/// How a single `run_search` call resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were committed (possibly zero of them).
    Success { results: usize },
    /// An error message was committed.
    Failed { message: String },
    /// A newer search started first; nothing was committed.
    Superseded,
}

/// Runs catalog fetches against the shared state.
pub struct FetchOrchestrator {
    catalog: Arc<dyn CatalogService>,
    state: StateStore,
    recorder: PopularityRecorder,
    events: Arc<EventBus>,
}

impl FetchOrchestrator {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        state: StateStore,
        recorder: PopularityRecorder,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            catalog,
            state,
            recorder,
            events,
        }
    }

    pub fn recorder(&self) -> &PopularityRecorder {
        &self.recorder
    }

    /// Fetch the catalog for `term` and commit the outcome.
    ///
    /// An empty term lists the popular catalog instead of searching. When a
    /// non-empty term yields results, the first one is handed to the
    /// popularity recorder after the results are committed.
    pub async fn run_search(&self, term: &str) -> SearchOutcome {
        let generation = self.state.begin_search();
        self.run_started(term, generation).await
    }

    /// Like [`run_search`](Self::run_search), for a generation already
    /// taken with [`StateStore::begin_search`].
    ///
    /// Callers that dispatch searches onto tasks take the generation before
    /// spawning, so generations follow dispatch order rather than the order
    /// the tasks happen to be polled in.
    pub async fn run_started(&self, term: &str, generation: u64) -> SearchOutcome {
        let request = CatalogRequest::for_term(term);
        let mut in_flight = InFlight::new(&self.state, generation);

        tracing::debug!(term, generation, "Search started");
        self.publish(kinds::SEARCH_STARTED, term, generation, serde_json::json!({}));

        let page = match self.catalog.fetch(&request).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(term, generation, error = %e, "Error fetching movies");
                return self.resolve_failure(&mut in_flight, term, FETCH_ERROR_MESSAGE);
            }
        };

        if page.is_failure() {
            let message = page.error_message().unwrap_or(FETCH_ERROR_MESSAGE).to_string();
            tracing::warn!(term, generation, error = %message, "Catalog reported a failure");
            return self.resolve_failure(&mut in_flight, term, &message);
        }

        let first = page.results.first().cloned();
        let results = page.results.len();

        if !in_flight.succeed(page.results) {
            return self.superseded(term, generation);
        }

        tracing::info!(term, generation, results, "Search succeeded");
        self.publish(
            kinds::SEARCH_SUCCEEDED,
            term,
            generation,
            serde_json::json!({ "results": results }),
        );

        if let (true, Some(movie)) = (request.is_search(), first) {
            self.recorder.spawn_record(term.to_string(), movie);
        }

        SearchOutcome::Success { results }
    }

    fn resolve_failure(
        &self,
        in_flight: &mut InFlight<'_>,
        term: &str,
        message: &str,
    ) -> SearchOutcome {
        let generation = in_flight.generation;
        if !in_flight.fail(message) {
            return self.superseded(term, generation);
        }
        self.publish(
            kinds::SEARCH_FAILED,
            term,
            generation,
            serde_json::json!({ "message": message }),
        );
        SearchOutcome::Failed {
            message: message.to_string(),
        }
    }

    fn superseded(&self, term: &str, generation: u64) -> SearchOutcome {
        tracing::debug!(term, generation, "Discarding superseded search result");
        self.publish(kinds::SEARCH_SUPERSEDED, term, generation, serde_json::json!({}));
        SearchOutcome::Superseded
    }

    fn publish(&self, event_type: &str, term: &str, generation: u64, payload: serde_json::Value) {
        self.events.publish(
            PipelineEvent::new(event_type)
                .with_term(term)
                .with_generation(generation)
                .with_payload(payload),
        );
    }
}

/// Guarantees a started fetch leaves `Loading`.
///
/// If the fetch future is dropped or unwinds before resolving, the guard
/// commits the generic error for its generation.
struct InFlight<'a> {
    state: &'a StateStore,
    generation: u64,
    resolved: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a StateStore, generation: u64) -> Self {
        Self {
            state,
            generation,
            resolved: false,
        }
    }

    fn succeed(&mut self, movies: Vec<MovieSummary>) -> bool {
        self.resolved = true;
        self.state.commit_success(self.generation, movies)
    }

    fn fail(&mut self, message: &str) -> bool {
        self.resolved = true;
        self.state.commit_failure(self.generation, message)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.resolved && self.state.commit_failure(self.generation, FETCH_ERROR_MESSAGE) {
            tracing::warn!(generation = self.generation, "Search abandoned before resolving");
        }
    }
}

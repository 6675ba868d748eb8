//! Best-effort search popularity recording.
//!
//! [`PopularityRecorder`] increments the counter for a normalized search
//! term. Failures are logged and swallowed: a counter update must never
//! surface to the user or hold up a search.

use std::sync::Arc;

use cinesearch_core::movie::MovieSummary;
use cinesearch_core::search::normalize_term;
use cinesearch_core::search_count::{CounterStore, SearchCountRecord};
use cinesearch_events::{kinds, EventBus, PipelineEvent};
use tokio_util::task::TaskTracker;

/// Records (term → best-match movie) popularity counters.
#[derive(Clone)]
pub struct PopularityRecorder {
    store: Arc<dyn CounterStore>,
    events: Arc<EventBus>,
    tracker: TaskTracker,
}

impl PopularityRecorder {
    pub fn new(store: Arc<dyn CounterStore>, events: Arc<EventBus>) -> Self {
        Self {
            store,
            events,
            tracker: TaskTracker::new(),
        }
    }

    /// Create or increment the counter for `term`.
    ///
    /// Returns the updated record, or `None` when the term normalizes to
    /// nothing or the store failed.
    pub async fn record_search(
        &self,
        term: &str,
        movie: &MovieSummary,
    ) -> Option<SearchCountRecord> {
        let Some(key) = normalize_term(term) else {
            tracing::debug!(term, "Skipping popularity record for blank term");
            return None;
        };

        match self.store.increment_count(&key, &movie.to_search_hit()).await {
            Ok(record) => {
                tracing::debug!(
                    term = %record.term,
                    count = record.count,
                    movie_id = record.movie_id,
                    "Search count recorded",
                );
                self.events.publish(
                    PipelineEvent::new(kinds::SEARCH_RECORDED)
                        .with_term(record.term.clone())
                        .with_payload(serde_json::json!({
                            "count": record.count,
                            "movie_id": record.movie_id,
                        })),
                );
                Some(record)
            }
            Err(e) => {
                tracing::warn!(
                    term = %key,
                    movie_id = movie.id,
                    error = %e,
                    "Failed to record search count",
                );
                None
            }
        }
    }

    /// Record in the background without waiting for the store.
    pub fn spawn_record(&self, term: String, movie: MovieSummary) {
        let recorder = self.clone();
        self.tracker.spawn(async move {
            recorder.record_search(&term, &movie).await;
        });
    }

    /// Wait for every background recording started so far.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }
}

//! One-shot trending shortlist load.

use std::sync::Arc;

use cinesearch_core::search_count::{rank_records, CounterStore};
use cinesearch_events::{kinds, EventBus, PipelineEvent};

use crate::state::StateStore;

/// Loads the top-N search counters into the presentation state.
pub struct TrendingAggregator {
    store: Arc<dyn CounterStore>,
    events: Arc<EventBus>,
    limit: usize,
}

impl TrendingAggregator {
    pub fn new(store: Arc<dyn CounterStore>, events: Arc<EventBus>, limit: usize) -> Self {
        Self {
            store,
            events,
            limit,
        }
    }

    /// Read the top counters and publish them to `state`.
    ///
    /// Returns the number of entries loaded. On failure the trending list
    /// is left untouched and `0` is returned.
    pub async fn load_trending(&self, state: &StateStore) -> usize {
        match self.store.top_by_count(self.limit).await {
            Ok(records) => {
                let entries = rank_records(records, self.limit);
                let loaded = entries.len();
                state.set_trending(entries);
                tracing::info!(loaded, limit = self.limit, "Trending movies loaded");
                self.events.publish(
                    PipelineEvent::new(kinds::TRENDING_LOADED)
                        .with_payload(serde_json::json!({ "loaded": loaded })),
                );
                loaded
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching trending movies");
                self.events.publish(PipelineEvent::new(kinds::TRENDING_FAILED));
                0
            }
        }
    }
}

//! Lifecycle notifications for the search pipeline.
//!
//! Every settlement, fetch resolution, popularity write and trending load
//! is announced as a [`PipelineEvent`] on an [`EventBus`]. Observers (the
//! terminal front-end, tests) subscribe independently; the pipeline never
//! waits for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Notification emitted by a pipeline stage.
///
/// `term` and `generation` tie the event to a particular settled query and
/// fetch; stage-wide events such as `trending.loaded` leave them unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// One of the names in [`crate::kinds`].
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
    /// Stage-specific details, e.g. `{"results": 20}` for a success.
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl PipelineEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            term: None,
            generation: None,
            payload: serde_json::json!({}),
            timestamp: Utc::now(),
        }
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn is(&self, event_type: &str) -> bool {
        self.event_type == event_type
    }
}

/// Events buffered per subscriber before the slowest one starts lagging.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of [`PipelineEvent`]s to any number of observers.
///
/// Publishing never blocks. A subscriber that falls more than the channel
/// capacity behind loses the oldest events and sees
/// [`broadcast::error::RecvError::Lagged`] once.
///
/// ```rust
/// use cinesearch_events::{kinds, EventBus, PipelineEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PipelineEvent::new(kinds::SEARCH_SETTLED).with_term("bat"));
/// assert!(rx.try_recv().unwrap().is(kinds::SEARCH_SETTLED));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PipelineEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Announce `event`. Dropped when nobody is subscribed.
    pub fn publish(&self, event: PipelineEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

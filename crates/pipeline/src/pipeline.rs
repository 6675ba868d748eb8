//! Wiring of the search pipeline components.
//!
//! ```text
//! on_raw_term_change ─▶ Debouncer ─▶ settled loop ─▶ FetchOrchestrator
//!                                                        │
//!                                                        ├─▶ StateStore
//!                                                        └─▶ PopularityRecorder
//! init ─▶ TrendingAggregator ─▶ StateStore
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use cinesearch_catalog::CatalogService;
use cinesearch_core::config::PipelineConfig;
use cinesearch_core::error::CoreError;
use cinesearch_core::search_count::CounterStore;
use cinesearch_events::{kinds, EventBus, PipelineEvent};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::debounce::Debouncer;
use crate::orchestrator::FetchOrchestrator;
use crate::recorder::PopularityRecorder;
use crate::state::{PipelineState, StateStore};
use crate::trending::TrendingAggregator;

/// The search pipeline as seen by a front-end.
///
/// Feed raw edits through [`on_raw_term_change`](Self::on_raw_term_change),
/// call [`init`](Self::init) once, and render from
/// [`subscribe`](Self::subscribe).
pub struct SearchPipeline {
    config: PipelineConfig,
    state: StateStore,
    events: Arc<EventBus>,
    debouncer: Debouncer,
    settled_rx: Mutex<Option<mpsc::UnboundedReceiver<String>>>,
    orchestrator: Arc<FetchOrchestrator>,
    trending: Arc<TrendingAggregator>,
    tasks: TaskTracker,
    cancel: CancellationToken,
    started: AtomicBool,
}

impl SearchPipeline {
    pub fn new(
        config: PipelineConfig,
        catalog: Arc<dyn CatalogService>,
        store: Arc<dyn CounterStore>,
        events: Arc<EventBus>,
    ) -> Self {
        let state = StateStore::new();
        let (debouncer, settled_rx) = Debouncer::new(config.quiet_interval());
        let recorder = PopularityRecorder::new(Arc::clone(&store), Arc::clone(&events));
        let orchestrator = Arc::new(FetchOrchestrator::new(
            catalog,
            state.clone(),
            recorder,
            Arc::clone(&events),
        ));
        let trending = Arc::new(TrendingAggregator::new(
            store,
            Arc::clone(&events),
            config.trending_limit,
        ));

        Self {
            config,
            state,
            events,
            debouncer,
            settled_rx: Mutex::new(Some(settled_rx)),
            orchestrator,
            trending,
            tasks: TaskTracker::new(),
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> PipelineState {
        self.state.snapshot()
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Record a raw edit of the search box.
    pub fn on_raw_term_change(&self, term: impl Into<String>) {
        let term = term.into();
        self.state.set_search_term(&term);
        self.debouncer.push(term);
    }

    /// Start the pipeline: load trending once, fetch the default catalog
    /// for the initial settled term, and begin reacting to settled edits.
    ///
    /// Fails with [`CoreError::Conflict`] if called more than once.
    pub fn init(&self) -> Result<(), CoreError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(CoreError::Conflict("search pipeline already initialised".into()));
        }
        let settled_rx = self
            .settled_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| CoreError::Internal("settled term receiver missing".into()))?;

        tracing::info!(
            quiet_interval_ms = self.config.quiet_interval_ms,
            trending_limit = self.config.trending_limit,
            "Search pipeline starting",
        );

        let trending = Arc::clone(&self.trending);
        let state = self.state.clone();
        self.tasks.spawn(async move {
            trending.load_trending(&state).await;
        });

        let initial = self.state.snapshot().debounced_term;
        let orchestrator = Arc::clone(&self.orchestrator);
        self.tasks.spawn(async move {
            orchestrator.run_search(&initial).await;
        });

        self.tasks.spawn(settled_loop(
            settled_rx,
            self.state.clone(),
            Arc::clone(&self.orchestrator),
            Arc::clone(&self.events),
            self.tasks.clone(),
            self.cancel.clone(),
        ));

        Ok(())
    }

    /// Stop reacting to edits and wait for in-flight searches and
    /// popularity recordings to finish.
    pub async fn shutdown(&self) {
        self.debouncer.cancel_pending();
        self.cancel.cancel();
        self.tasks.close();
        self.tasks.wait().await;
        self.orchestrator.recorder().drain().await;
        tracing::info!("Search pipeline stopped");
    }

    /// Wait for background popularity recordings started so far.
    pub async fn flush_recordings(&self) {
        self.orchestrator.recorder().drain().await;
    }
}

/// Run one search task per settled term until cancelled.
///
/// Searches run concurrently so a newer term is never queued behind an
/// older one; the state generation decides which result lands.
async fn settled_loop(
    mut settled_rx: mpsc::UnboundedReceiver<String>,
    state: StateStore,
    orchestrator: Arc<FetchOrchestrator>,
    events: Arc<EventBus>,
    tasks: TaskTracker,
    cancel: CancellationToken,
) {
    loop {
        let term = tokio::select! {
            _ = cancel.cancelled() => break,
            next = settled_rx.recv() => match next {
                Some(term) => term,
                None => break,
            },
        };

        if !state.settle(&term) {
            tracing::debug!(term = %term, "Settled term unchanged, skipping fetch");
            continue;
        }

        tracing::debug!(term = %term, "Search term settled");
        events.publish(PipelineEvent::new(kinds::SEARCH_SETTLED).with_term(term.clone()));

        let generation = state.begin_search();
        let orchestrator = Arc::clone(&orchestrator);
        tasks.spawn(async move {
            orchestrator.run_started(&term, generation).await;
        });
    }
}

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use cinesearch_catalog::{CatalogError, CatalogRequest, CatalogService};
use cinesearch_core::config::PipelineConfig;
use cinesearch_core::movie::{CatalogPage, MovieSummary};
use cinesearch_core::search_count::{
    CounterStore, CounterStoreError, SearchCountRecord, SearchHit,
};
use cinesearch_events::EventBus;
use cinesearch_pipeline::{FetchOrchestrator, PopularityRecorder, StateStore};

// ---------------------------------------------------------------------------
// Catalog fake
// ---------------------------------------------------------------------------

/// What the scripted catalog answers for a term.
#[derive(Debug, Clone)]
pub enum Reply {
    Movies(Vec<MovieSummary>),
    /// 2xx body with `Response: "False"` and an optional `Error`.
    Failure(Option<String>),
    /// Non-2xx status.
    Status(u16),
}

impl Reply {
    fn into_result(self) -> Result<CatalogPage, CatalogError> {
        match self {
            Reply::Movies(movies) => Ok(CatalogPage::with_results(movies)),
            Reply::Failure(error) => Ok(CatalogPage {
                results: Vec::new(),
                response: Some(serde_json::Value::String("False".into())),
                error,
            }),
            Reply::Status(status) => Err(CatalogError::Api {
                status,
                body: "scripted failure".into(),
            }),
        }
    }
}

/// Catalog that answers from a script keyed by term (`""` = discover).
///
/// A gated term blocks until the test sends its reply.
#[derive(Default)]
pub struct ScriptedCatalog {
    replies: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    calls: Mutex<Vec<CatalogRequest>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, term: &str, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(term.to_string(), reply);
        self
    }

    /// Hold the next request for `term` until the returned sender fires.
    pub fn gate(&self, term: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(term.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<CatalogRequest> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(
        &self,
        request: CatalogRequest,
        key: &str,
    ) -> Result<CatalogPage, CatalogError> {
        self.calls.lock().unwrap().push(request);
        let gate = self.gates.lock().unwrap().remove(key);
        let reply = match gate {
            Some(rx) => rx.await.unwrap_or(Reply::Status(503)),
            None => self.scripted(key),
        };
        reply.into_result()
    }

    fn scripted(&self, key: &str) -> Reply {
        let replies = self.replies.lock().unwrap();
        replies.get(key).cloned().unwrap_or(Reply::Movies(Vec::new()))
    }
}

#[async_trait]
impl CatalogService for ScriptedCatalog {
    async fn search(&self, term: &str) -> Result<CatalogPage, CatalogError> {
        self.respond(CatalogRequest::Search(term.to_string()), term).await
    }

    async fn discover(&self) -> Result<CatalogPage, CatalogError> {
        self.respond(CatalogRequest::Discover, "").await
    }
}

// ---------------------------------------------------------------------------
// Counter store fake
// ---------------------------------------------------------------------------

/// Counter store that always fails.
#[derive(Default)]
pub struct FailingCounterStore {
    pub calls: AtomicUsize,
}

impl FailingCounterStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn offline() -> CounterStoreError {
    CounterStoreError::backend(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "counter backend offline",
    ))
}

#[async_trait]
impl CounterStore for FailingCounterStore {
    async fn increment_count(
        &self,
        _term: &str,
        _hit: &SearchHit,
    ) -> Result<SearchCountRecord, CounterStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(offline())
    }

    async fn top_by_count(
        &self,
        _limit: usize,
    ) -> Result<Vec<SearchCountRecord>, CounterStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(offline())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn movie(id: i64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/{id}.jpg")),
        popularity: 50.0,
        release_date: Some("2008-07-16".into()),
        vote_average: Some(8.5),
        original_language: Some("en".into()),
    }
}

/// `count` movies titled `"{prefix} {n}"`.
pub fn movies(prefix: &str, count: usize) -> Vec<MovieSummary> {
    (1..=count)
        .map(|n| movie(n as i64, &format!("{prefix} {n}")))
        .collect()
}

pub fn test_config() -> PipelineConfig {
    PipelineConfig::new("http://catalog.test/3", "test-key")
}

/// An orchestrator wired to `catalog` and `store` with a fresh state.
pub fn orchestrator(
    catalog: Arc<ScriptedCatalog>,
    store: Arc<dyn CounterStore>,
) -> (Arc<FetchOrchestrator>, StateStore, Arc<EventBus>) {
    let events = Arc::new(EventBus::default());
    let state = StateStore::new();
    let recorder = PopularityRecorder::new(store, Arc::clone(&events));
    let orchestrator = Arc::new(FetchOrchestrator::new(
        catalog,
        state.clone(),
        recorder,
        Arc::clone(&events),
    ));
    (orchestrator, state, events)
}

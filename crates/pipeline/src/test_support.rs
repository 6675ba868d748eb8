//! Shared fakes for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use cinesearch_core::movie::MovieSummary;
use cinesearch_core::search_count::{
    CounterStore, CounterStoreError, SearchCountRecord, SearchHit,
};

/// Counter store whose every call fails with a backend error.
#[derive(Default)]
pub struct FailingCounterStore {
    pub calls: AtomicUsize,
}

#[async_trait]
impl CounterStore for FailingCounterStore {
    async fn increment_count(
        &self,
        _term: &str,
        _hit: &SearchHit,
    ) -> Result<SearchCountRecord, CounterStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CounterStoreError::backend(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "counter backend offline",
        )))
    }

    async fn top_by_count(
        &self,
        _limit: usize,
    ) -> Result<Vec<SearchCountRecord>, CounterStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CounterStoreError::backend(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "counter backend offline",
        )))
    }
}

pub fn movie(id: i64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.into(),
        poster_path: Some(format!("/{id}.jpg")),
        popularity: 10.0,
        release_date: None,
        vote_average: None,
        original_language: None,
    }
}

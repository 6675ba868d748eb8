//! Process-local [`CounterStore`].
//!
//! Used when no database is configured, and by tests. Counters live for
//! the lifetime of the process.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use cinesearch_core::search_count::{
    trending_order, CounterStore, CounterStoreError, SearchCountRecord, SearchHit,
};
use cinesearch_core::types::Timestamp;

#[derive(Default)]
struct Inner {
    records: HashMap<String, SearchCountRecord>,
    next_id: i64,
    last_stamp: Option<Timestamp>,
}

impl Inner {
    /// Wall-clock time, bumped past the previous stamp so every increment
    /// gets a strictly later `updated_at`.
    fn next_stamp(&mut self) -> Timestamp {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

/// In-memory counter store with the same semantics as the PostgreSQL one.
#[derive(Default)]
pub struct MemoryCounterStore {
    inner: Mutex<Inner>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter for a normalized term.
    pub fn get(&self, term: &str) -> Option<SearchCountRecord> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.records.get(term).cloned()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment_count(
        &self,
        term: &str,
        hit: &SearchHit,
    ) -> Result<SearchCountRecord, CounterStoreError> {
        if term.is_empty() {
            return Err(CounterStoreError::EmptyTerm);
        }

        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let now = inner.next_stamp();

        if let Some(record) = inner.records.get_mut(term) {
            record.count += 1;
            record.updated_at = now;
            return Ok(record.clone());
        }

        inner.next_id += 1;
        let record = SearchCountRecord {
            id: inner.next_id,
            term: term.to_string(),
            movie_id: hit.movie_id,
            title: hit.title.clone(),
            poster_url: hit.poster_url.clone(),
            count: 1,
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(term.to_string(), record.clone());
        Ok(record)
    }

    async fn top_by_count(
        &self,
        limit: usize,
    ) -> Result<Vec<SearchCountRecord>, CounterStoreError> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records: Vec<&SearchCountRecord> = inner.records.values().collect();
        records.sort_by(|a, b| trending_order(a, b));
        Ok(records.into_iter().take(limit).cloned().collect())
    }
}

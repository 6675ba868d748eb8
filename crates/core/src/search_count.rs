//! Search popularity counters and the trending projection.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// The movie details pinned to a counter when it is first created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub movie_id: i64,
    pub title: String,
    pub poster_url: String,
}

/// One counter per normalized search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCountRecord {
    pub id: DbId,
    pub term: String,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: String,
    pub count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A ranked row of the trending shortlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    /// 1-based position in the shortlist.
    pub rank: usize,
    pub term: String,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: String,
    pub count: i64,
}

impl TrendingEntry {
    pub fn from_record(rank: usize, record: &SearchCountRecord) -> Self {
        Self {
            rank,
            term: record.term.clone(),
            movie_id: record.movie_id,
            title: record.title.clone(),
            poster_url: record.poster_url.clone(),
            count: record.count,
        }
    }
}

/// Trending order: count descending, then most recently incremented,
/// then highest id.
pub fn trending_order(a: &SearchCountRecord, b: &SearchCountRecord) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Project records into at most `limit` ranked trending entries.
///
/// Records are re-sorted with [`trending_order`] so the result does not
/// depend on the order a store returned them in.
pub fn rank_records(mut records: Vec<SearchCountRecord>, limit: usize) -> Vec<TrendingEntry> {
    records.sort_by(trending_order);
    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, record)| TrendingEntry::from_record(idx + 1, record))
        .collect()
}

/// Errors from a counter store backend.
#[derive(Debug, thiserror::Error)]
pub enum CounterStoreError {
    /// The backing store rejected or failed the operation.
    #[error("Counter store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The term normalized to nothing.
    #[error("Search term is empty after normalization")]
    EmptyTerm,
}

impl CounterStoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Persistence seam for search popularity counters.
///
/// `term` is always an already-normalized key.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Create the counter for `term` with count 1, or increment it.
    ///
    /// An existing counter keeps the movie it was created with.
    async fn increment_count(
        &self,
        term: &str,
        hit: &SearchHit,
    ) -> Result<SearchCountRecord, CounterStoreError>;

    /// Counters in trending order, at most `limit` of them.
    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchCountRecord>, CounterStoreError>;
}

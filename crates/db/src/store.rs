//! [`CounterStore`] backed by PostgreSQL.

use async_trait::async_trait;
use cinesearch_core::search_count::{CounterStore, CounterStoreError, SearchCountRecord, SearchHit};

use crate::repositories::SearchCountRepo;
use crate::DbPool;

/// Counter store persisting to the `search_counts` table.
#[derive(Clone)]
pub struct PgCounterStore {
    pool: DbPool,
}

impl PgCounterStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    async fn increment_count(
        &self,
        term: &str,
        hit: &SearchHit,
    ) -> Result<SearchCountRecord, CounterStoreError> {
        if term.is_empty() {
            return Err(CounterStoreError::EmptyTerm);
        }
        let row = SearchCountRepo::increment(
            &self.pool,
            term,
            hit.movie_id,
            &hit.title,
            &hit.poster_url,
        )
        .await
        .map_err(CounterStoreError::backend)?;
        tracing::debug!(term, count = row.count, id = row.id, "Search count incremented");
        Ok(row.into())
    }

    async fn top_by_count(
        &self,
        limit: usize,
    ) -> Result<Vec<SearchCountRecord>, CounterStoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = SearchCountRepo::top_by_count(&self.pool, limit)
            .await
            .map_err(CounterStoreError::backend)?;
        tracing::debug!(limit, rows = rows.len(), "Loaded top search counts");
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

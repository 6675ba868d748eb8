//! Repository for the `search_counts` table.

use cinesearch_core::types::DbId;
use sqlx::PgPool;

use crate::models::search_count::SearchCount;

/// Column list for `search_counts` queries.
const COLUMNS: &str = "id, term, movie_id, title, poster_url, count, created_at, updated_at";

/// Provides read/write operations for search counters.
pub struct SearchCountRepo;

impl SearchCountRepo {
    /// Create the counter for `term` with count 1, or increment it by one.
    ///
    /// On conflict only `count` and `updated_at` change; the movie columns
    /// keep the values from the first insert.
    pub async fn increment(
        pool: &PgPool,
        term: &str,
        movie_id: i64,
        title: &str,
        poster_url: &str,
    ) -> Result<SearchCount, sqlx::Error> {
        let query = format!(
            "INSERT INTO search_counts (term, movie_id, title, poster_url) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (term) DO UPDATE \
                SET count = search_counts.count + 1, \
                    updated_at = clock_timestamp() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SearchCount>(&query)
            .bind(term)
            .bind(movie_id)
            .bind(title)
            .bind(poster_url)
            .fetch_one(pool)
            .await
    }

    /// Find a counter by its normalized term.
    pub async fn find_by_term(
        pool: &PgPool,
        term: &str,
    ) -> Result<Option<SearchCount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM search_counts WHERE term = $1");
        sqlx::query_as::<_, SearchCount>(&query)
            .bind(term)
            .fetch_optional(pool)
            .await
    }

    /// Find a counter by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SearchCount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM search_counts WHERE id = $1");
        sqlx::query_as::<_, SearchCount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Top counters by count, most recently incremented first on ties.
    pub async fn top_by_count(pool: &PgPool, limit: i64) -> Result<Vec<SearchCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM search_counts \
             ORDER BY count DESC, updated_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, SearchCount>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

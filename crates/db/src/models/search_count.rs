//! Search counter entity model.

use cinesearch_core::search_count::SearchCountRecord;
use cinesearch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `search_counts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchCount {
    pub id: DbId,
    pub term: String,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: String,
    pub count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SearchCount> for SearchCountRecord {
    fn from(row: SearchCount) -> Self {
        Self {
            id: row.id,
            term: row.term,
            movie_id: row.movie_id,
            title: row.title,
            poster_url: row.poster_url,
            count: row.count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

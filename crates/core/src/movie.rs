//! Catalog payload types.
//!
//! Only the fields the search pipeline and the movie card read are
//! decoded; everything else in the catalog response is ignored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::search_count::SearchHit;

/// Image CDN prefix for poster paths.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Poster shown when the catalog has no artwork for a movie.
pub const NO_POSTER_PLACEHOLDER: &str = "/no-movie.png";

/// One movie as returned by the search and discover endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl MovieSummary {
    /// Absolute poster URL, or the placeholder when no poster exists.
    pub fn poster_url(&self) -> String {
        match self.poster_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => format!("{POSTER_BASE_URL}{path}"),
            None => NO_POSTER_PLACEHOLDER.to_string(),
        }
    }

    /// Release year, if the release date is present and well-formed.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| y.len() == 4)
    }

    /// The fields persisted alongside a search counter.
    pub fn to_search_hit(&self) -> SearchHit {
        SearchHit {
            movie_id: self.id,
            title: self.title.clone(),
            poster_url: self.poster_url(),
        }
    }
}

/// Decoded body of a catalog response.
///
/// `Response` / `Error` follow the OMDb-style failure envelope some
/// catalog proxies return with a 2xx status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default, deserialize_with = "deserialize_results")]
    pub results: Vec<MovieSummary>,
    #[serde(rename = "Response", default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A `null` result list decodes as empty.
fn deserialize_results<'de, D>(deserializer: D) -> Result<Vec<MovieSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<MovieSummary>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CatalogPage {
    pub fn with_results(results: Vec<MovieSummary>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    /// Whether the payload signals an application-level failure.
    pub fn is_failure(&self) -> bool {
        match &self.response {
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("false"),
            Some(serde_json::Value::Bool(flag)) => !flag,
            _ => false,
        }
    }

    /// The payload's error string, if present and not blank.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

use std::time::Duration;

use crate::error::CoreError;
use crate::search::{DEFAULT_QUIET_INTERVAL_MS, DEFAULT_TRENDING_LIMIT};

/// Default catalog API root (TMDB v3).
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Upper bound for the trending shortlist.
pub const MAX_TRENDING_LIMIT: usize = 50;

/// Search pipeline configuration, injected at construction.
///
/// Loaded from environment variables in production; tests build it
/// directly or through [`PipelineConfig::from_vars`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Catalog API root without a trailing slash.
    pub base_url: String,
    /// Bearer credential sent with every catalog request.
    pub credential: String,
    /// Quiet period before a raw edit is considered settled.
    pub quiet_interval_ms: u64,
    /// Number of trending entries to surface.
    pub trending_limit: usize,
}

impl PipelineConfig {
    /// Build a config with the default quiet interval and trending size.
    pub fn new(base_url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential: credential.into(),
            quiet_interval_ms: DEFAULT_QUIET_INTERVAL_MS,
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                          |
    /// |----------------------------|----------------------------------|
    /// | `CATALOG_BASE_URL`         | `https://api.themoviedb.org/3`   |
    /// | `CATALOG_API_KEY`          | required (or `TMDB_API_KEY`)     |
    /// | `SEARCH_QUIET_INTERVAL_MS` | `4000`                           |
    /// | `TRENDING_LIMIT`           | `5`                              |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CATALOG_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string());

        let credential = lookup("CATALOG_API_KEY")
            .or_else(|| lookup("TMDB_API_KEY"))
            .unwrap_or_default();

        let quiet_interval_ms = match lookup("SEARCH_QUIET_INTERVAL_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                CoreError::Validation(format!(
                    "SEARCH_QUIET_INTERVAL_MS must be a valid u64, got {raw:?}"
                ))
            })?,
            None => DEFAULT_QUIET_INTERVAL_MS,
        };

        let trending_limit = match lookup("TRENDING_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                CoreError::Validation(format!("TRENDING_LIMIT must be a valid usize, got {raw:?}"))
            })?,
            None => DEFAULT_TRENDING_LIMIT,
        };

        let config = Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            credential: credential.trim().to_string(),
            quiet_interval_ms,
            trending_limit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check field invariants.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CoreError::Validation(format!(
                "CATALOG_BASE_URL must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.credential.is_empty() {
            return Err(CoreError::Validation(
                "CATALOG_API_KEY (or TMDB_API_KEY) must be set".into(),
            ));
        }
        if self.trending_limit == 0 || self.trending_limit > MAX_TRENDING_LIMIT {
            return Err(CoreError::Validation(format!(
                "TRENDING_LIMIT must be between 1 and {MAX_TRENDING_LIMIT}, got {}",
                self.trending_limit
            )));
        }
        Ok(())
    }

    pub fn quiet_interval(&self) -> Duration {
        Duration::from_millis(self.quiet_interval_ms)
    }
}

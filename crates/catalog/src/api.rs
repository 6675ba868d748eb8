//! REST client for the catalog search and discovery endpoints.

use std::time::Duration;

use async_trait::async_trait;
use cinesearch_core::config::PipelineConfig;
use cinesearch_core::movie::CatalogPage;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::request::CatalogRequest;

/// HTTP timeout for a single catalog request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// The catalog operations the search pipeline depends on.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Free-text title search.
    async fn search(&self, term: &str) -> Result<CatalogPage, CatalogError>;

    /// Popular-first discovery listing.
    async fn discover(&self) -> Result<CatalogPage, CatalogError>;

    /// Dispatch a [`CatalogRequest`] to the matching endpoint.
    async fn fetch(&self, request: &CatalogRequest) -> Result<CatalogPage, CatalogError> {
        match request {
            CatalogRequest::Search(term) => self.search(term).await,
            CatalogRequest::Discover => self.discover().await,
        }
    }
}

/// HTTP client for a TMDB-compatible catalog.
pub struct CatalogApi {
    client: reqwest::Client,
    base_url: String,
    credential: String,
}

impl CatalogApi {
    /// Create a client with its own connection pool.
    ///
    /// * `base_url`   - API root, e.g. `https://api.themoviedb.org/3`.
    /// * `credential` - bearer token sent on every request.
    pub fn new(base_url: &str, credential: &str) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url, credential))
    }

    /// Create a client from the pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, CatalogError> {
        Self::new(&config.base_url, &config.credential)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str, credential: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential: credential.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, request: &CatalogRequest) -> Result<CatalogPage, CatalogError> {
        let url = format!("{}{}", self.base_url, request.path());
        tracing::debug!(%url, search = request.is_search(), "Fetching catalog page");

        let response = self
            .client
            .get(url)
            .query(&request.query())
            .bearer_auth(&self.credential)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, capturing the body
    /// text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogService for CatalogApi {
    async fn search(&self, term: &str) -> Result<CatalogPage, CatalogError> {
        self.get(&CatalogRequest::Search(term.to_string())).await
    }

    async fn discover(&self) -> Result<CatalogPage, CatalogError> {
        self.get(&CatalogRequest::Discover).await
    }
}

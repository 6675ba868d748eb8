//! Movie catalog client.
//!
//! [`CatalogService`] is the seam the search pipeline fetches through;
//! [`CatalogApi`] implements it against a TMDB-compatible HTTP API using
//! [`reqwest`].

pub mod api;
pub mod request;

pub use api::{CatalogApi, CatalogError, CatalogService};
pub use request::CatalogRequest;

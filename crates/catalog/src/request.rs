/// Which catalog endpoint a settled term maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Free-text title search.
    Search(String),
    /// Popular-first discovery listing, used for the empty term.
    Discover,
}

impl CatalogRequest {
    /// Only the exact empty string maps to discovery.
    pub fn for_term(term: &str) -> Self {
        if term.is_empty() {
            Self::Discover
        } else {
            Self::Search(term.to_string())
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search(_))
    }

    /// Endpoint path relative to the API root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Search(_) => "/search/movie",
            Self::Discover => "/discover/movie",
        }
    }

    /// Query-string pairs; values are escaped by the HTTP client.
    pub fn query(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Search(term) => vec![("query", term.as_str())],
            Self::Discover => vec![("sort_by", "popularity.desc")],
        }
    }
}

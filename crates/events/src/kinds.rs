//! Dot-separated event type names published by the search pipeline.

/// A raw edit settled after the quiet interval.
pub const SEARCH_SETTLED: &str = "search.settled";

/// A catalog fetch started and the state entered `Loading`.
pub const SEARCH_STARTED: &str = "search.started";

/// A catalog fetch committed results to the state.
pub const SEARCH_SUCCEEDED: &str = "search.succeeded";

/// A catalog fetch committed an error to the state.
pub const SEARCH_FAILED: &str = "search.failed";

/// A catalog fetch resolved after a newer one started and was discarded.
pub const SEARCH_SUPERSEDED: &str = "search.superseded";

/// A popularity counter was created or incremented.
pub const SEARCH_RECORDED: &str = "search.recorded";

/// The trending shortlist was loaded into the state.
pub const TRENDING_LOADED: &str = "trending.loaded";

/// The trending shortlist could not be read.
pub const TRENDING_FAILED: &str = "trending.failed";

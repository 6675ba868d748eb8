//! Search pipeline constants and helpers.

/// Default debounce quiet period. Large on purpose so bursts of typing
/// collapse into one catalog request.
pub const DEFAULT_QUIET_INTERVAL_MS: u64 = 4000;

/// Default size of the trending shortlist.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// User-facing message for every catalog failure without its own message.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Normalize a search term into a counter-store key.
///
/// - Trims surrounding whitespace.
/// - Collapses internal whitespace runs to a single space.
/// - Lowercases (Unicode-aware).
///
/// Returns `None` if nothing remains.
///
/// # Examples
///
/// ```
/// use cinesearch_core::search::normalize_term;
/// assert_eq!(normalize_term("  The   Dark Knight "), Some("the dark knight".to_string()));
/// assert_eq!(normalize_term("   "), None);
/// ```
pub fn normalize_term(term: &str) -> Option<String> {
    let collapsed = term.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.to_lowercase())
    }
}

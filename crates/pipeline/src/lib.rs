//! Search orchestration pipeline.
//!
//! Turns a stream of raw query edits into settled queries, fetches the
//! catalog once per settled query, keeps the presentation state current
//! and records popularity counters for the trending shortlist.
//!
//! - [`Debouncer`]: single-slot quiet-interval debouncing.
//! - [`StateStore`]: watch-backed [`PipelineState`] with generation checks.
//! - [`FetchOrchestrator`]: one authoritative catalog fetch at a time.
//! - [`PopularityRecorder`]: best-effort counter increments.
//! - [`TrendingAggregator`]: one-shot top-N load.
//! - [`SearchPipeline`]: wires the above together.

pub mod debounce;
pub mod memory;
pub mod orchestrator;
pub mod pipeline;
pub mod recorder;
pub mod state;
pub mod trending;

#[cfg(test)]
pub(crate) mod test_support;

pub use debounce::Debouncer;
pub use memory::MemoryCounterStore;
pub use orchestrator::{FetchOrchestrator, SearchOutcome};
pub use pipeline::SearchPipeline;
pub use recorder::PopularityRecorder;
pub use state::{PipelineState, SearchStatus, StateStore};
pub use trending::TrendingAggregator;

//! Search pipeline event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PipelineEvent`]: the event envelope published at every pipeline
//!   transition.
//! - [`kinds`]: the event type names.

pub mod bus;
pub mod kinds;

pub use bus::{EventBus, PipelineEvent};

//! Domain types shared by every cinesearch crate.
//!
//! This crate has no internal dependencies so it can be used by the
//! catalog client, the counter stores, the pipeline and the binary alike.

pub mod config;
pub mod error;
pub mod movie;
pub mod search;
pub mod search_count;
pub mod types;

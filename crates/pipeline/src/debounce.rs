//! Quiet-interval debouncing for raw query edits.
//!
//! [`Debouncer::push`] schedules an emission of the pushed value after the
//! quiet interval. The schedule is single-slot: pushing again cancels the
//! pending emission and starts a new wait, so a burst of edits settles into
//! exactly one emission carrying the last value.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Single-slot debouncer emitting settled values on an mpsc channel.
pub struct Debouncer {
    quiet_interval: Duration,
    settled_tx: mpsc::UnboundedSender<String>,
    slot: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    /// Create a debouncer and the receiver its settled values arrive on.
    pub fn new(quiet_interval: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet_interval,
            settled_tx,
            slot: Mutex::new(None),
        };
        (debouncer, settled_rx)
    }

    pub fn quiet_interval(&self) -> Duration {
        self.quiet_interval
    }

    /// Record a raw edit, replacing any pending emission.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn push(&self, value: impl Into<String>) {
        let value = value.into();
        let token = CancellationToken::new();

        if let Some(previous) = self.lock_slot().replace(token.clone()) {
            previous.cancel();
        }

        let settled_tx = self.settled_tx.clone();
        let quiet_interval = self.quiet_interval;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(quiet_interval) => {
                    tracing::trace!(term = %value, "Raw term settled");
                    // A closed receiver means the pipeline is gone.
                    let _ = settled_tx.send(value);
                }
            }
        });
    }

    /// Drop the pending emission, if any.
    pub fn cancel_pending(&self) {
        if let Some(pending) = self.lock_slot().take() {
            pending.cancel();
        }
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

//! Stale-response guard.
//!
//! A view issues a token per fetch; when a newer fetch begins before an
//! older one resolves, the older response is recognizable as stale and
//! discarded instead of overwriting newer view state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotone generation counter for one view.
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fetch. The returned token stays current until the next call.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

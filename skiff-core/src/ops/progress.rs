//! src/ops/progress.rs
//! ============================================================================
//! # Upload Progress Cell
//!
//! Shared 0-100 percentage derived from the well-typed
//! `(bytes_done, bytes_total)` progress contract. The cell is cloned into
//! the gateway callback while the dialog surface reads it concurrently.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::gateway::types::ProgressFn;

/// Lock-free percentage cell for one upload dialog.
#[derive(Debug, Clone, Default)]
pub struct ProgressCell {
    percent: Arc<AtomicU32>,
}

impl ProgressCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a progress report. Percentage is `round(done * 100 / total)`;
    /// a zero total reads as 0 until a real report arrives.
    pub fn observe(&self, bytes_done: u64, bytes_total: u64) {
        let percent = if bytes_total == 0 {
            0
        } else {
            ((bytes_done as f64) * 100.0 / (bytes_total as f64)).round() as u32
        };
        self.percent.store(percent.min(100), Ordering::Relaxed);
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        self.percent.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.percent.store(0, Ordering::Relaxed);
    }

    /// Adapter handed to [`StorageGateway::upload`].
    ///
    /// [`StorageGateway::upload`]: crate::gateway::storage::StorageGateway::upload
    #[must_use]
    pub fn callback(&self) -> ProgressFn {
        let cell = self.clone();
        Arc::new(move |done, total| cell.observe(done, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds() {
        let cell = ProgressCell::new();
        cell.observe(1, 3);
        assert_eq!(cell.percent(), 33);
        cell.observe(2, 3);
        assert_eq!(cell.percent(), 67);
        cell.observe(3, 3);
        assert_eq!(cell.percent(), 100);
    }

    #[test]
    fn test_zero_total_reads_zero() {
        let cell = ProgressCell::new();
        cell.observe(0, 0);
        assert_eq!(cell.percent(), 0);
    }

    #[test]
    fn test_callback_feeds_cell() {
        let cell = ProgressCell::new();
        let cb = cell.callback();
        cb(50, 100);
        assert_eq!(cell.percent(), 50);

        cell.reset();
        assert_eq!(cell.percent(), 0);
    }
}

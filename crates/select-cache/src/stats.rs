//! Cache statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for dependent-cache operations.
///
/// All counters are atomic and can be safely read from multiple threads.
/// The rebuild counter is how the exactly-once-per-generation property is
/// observed from tests.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Accesses served by the current table.
    hits: AtomicU64,
    /// Completed selection-table rebuilds.
    rebuilds: AtomicU64,
    /// Rebuild attempts that failed.
    rebuild_failures: AtomicU64,
    /// Accesses served a stale table while a rebuild was in flight.
    stale_served: AtomicU64,
}

impl CacheStats {
    /// Create new cache statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an access served by the current table.
    #[inline]
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed rebuild.
    #[inline]
    pub(crate) fn record_rebuild(&self) {
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed rebuild attempt.
    #[inline]
    pub(crate) fn record_rebuild_failure(&self) {
        self.rebuild_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an access served a stale table during a rebuild.
    #[inline]
    pub(crate) fn record_stale(&self) {
        self.stale_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total accesses served by the current table.
    #[inline]
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get total completed rebuilds.
    #[inline]
    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }

    /// Get total failed rebuild attempts.
    #[inline]
    #[must_use]
    pub fn rebuild_failures(&self) -> u64 {
        self.rebuild_failures.load(Ordering::Relaxed)
    }

    /// Get total accesses served a stale table during a rebuild.
    #[inline]
    #[must_use]
    pub fn stale_served(&self) -> u64 {
        self.stale_served.load(Ordering::Relaxed)
    }

    /// Reset all statistics.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.rebuilds.store(0, Ordering::Relaxed);
        self.rebuild_failures.store(0, Ordering::Relaxed);
        self.stale_served.store(0, Ordering::Relaxed);
    }
}

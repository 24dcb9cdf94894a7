//! Generation-tracked cache of the current selection table.
//!
//! [`DependentCache`] holds at most one [`SelectionTable`] with the
//! generation it was built from. On access it compares that generation with
//! the source's current one; on mismatch it rebuilds the table exactly once
//! per generation transition while concurrent readers keep the previous
//! table (or block, depending on [`ConsistencyMode`]).
//!
//! ## Concurrency
//!
//! - The published entry is replaced atomically (`ArcSwapOption`); a reader
//!   that captured a table keeps a fully valid object across any swap.
//! - Rebuilds are single-flight behind a `Mutex<()>` with a double check
//!   under the lock, so racing triggers for the same transition collapse
//!   into one build.
//! - No operation performs I/O; everything here is CPU-bound and safe to
//!   call from async contexts without suspension.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::ArcSwapOption;
use select_core::{Generation, Result, SelectError};
use tracing::{debug, trace};

use crate::source::EndpointSource;
use crate::stats::CacheStats;
use crate::table::SelectionTable;
use crate::watch::ChangeWatch;

/// What a reader gets while a rebuild for a newer generation is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsistencyMode {
    /// Serve the previous table immediately. Staleness is bounded by one
    /// rebuild latency; the default, biased for read latency.
    #[default]
    StaleOk,
    /// Block until the rebuild completes. Use when a caller must observe
    /// its own publish on the next access.
    Strict,
}

/// A selection table paired with the generation it was built from.
#[derive(Debug)]
struct CacheEntry {
    generation: Generation,
    table: Arc<SelectionTable>,
}

/// Lazy, invalidation-driven holder of the current selection table.
///
/// The cache never mutates a published table; a rebuild constructs the new
/// table off to the side and publishes it in one atomic swap. A failed
/// rebuild leaves the previous table authoritative and surfaces the error
/// only to the caller that triggered it; the next access retries.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use select_core::{Endpoint, RouteValues};
/// use select_cache::{DependentCache, EndpointRegistry};
///
/// let registry = Arc::new(EndpointRegistry::new());
/// let cache = DependentCache::new(Arc::clone(&registry));
///
/// registry.publish(vec![
///     Endpoint::builder("Home").require("controller", "Home").build(),
/// ]);
///
/// let table = cache.ensure_current().unwrap();
/// assert_eq!(table.endpoint_count(), 1);
/// ```
#[derive(Debug)]
pub struct DependentCache<S: EndpointSource> {
    source: Arc<S>,
    mode: ConsistencyMode,
    /// Current entry, replaced atomically; `None` before the first build
    /// and after disposal.
    entry: ArcSwapOption<CacheEntry>,
    /// Single-flight guard for rebuilds. Held only while building.
    rebuild: Mutex<()>,
    /// Registry subscription, released on disposal.
    subscription: Mutex<Option<ChangeWatch>>,
    disposed: AtomicBool,
    stats: CacheStats,
}

impl<S: EndpointSource> DependentCache<S> {
    /// Create a cache over the given source with the default
    /// [`ConsistencyMode::StaleOk`].
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self::with_mode(source, ConsistencyMode::default())
    }

    /// Create a cache with an explicit consistency mode.
    #[must_use]
    pub fn with_mode(source: Arc<S>, mode: ConsistencyMode) -> Self {
        let subscription = source.subscribe();
        Self {
            source,
            mode,
            entry: ArcSwapOption::const_empty(),
            rebuild: Mutex::new(()),
            subscription: Mutex::new(Some(subscription)),
            disposed: AtomicBool::new(false),
            stats: CacheStats::new(),
        }
    }

    /// Get a selection table no older than the source generation observed
    /// at call entry (strict mode), or at most one rebuild behind it
    /// (stale-ok mode while a rebuild is in flight).
    ///
    /// The first call builds synchronously. Repeated calls without an
    /// intervening generation change return the same `Arc` without any
    /// rebuild work.
    pub fn ensure_current(&self) -> Result<Arc<SelectionTable>> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(SelectError::Disposed);
        }

        let generation = self.source.generation();
        let stale = self.entry.load_full();
        if let Some(entry) = &stale {
            if entry.generation == generation {
                self.stats.record_hit();
                return Ok(Arc::clone(&entry.table));
            }
        }

        match self.mode {
            ConsistencyMode::Strict => {
                let guard = self.rebuild.lock().expect("rebuild lock poisoned");
                self.rebuild_current(&guard)
            }
            ConsistencyMode::StaleOk => {
                if let Ok(guard) = self.rebuild.try_lock() {
                    self.rebuild_current(&guard)
                } else if let Some(entry) = stale {
                    // Another caller is rebuilding; keep serving the
                    // previous table until the new one is published.
                    self.stats.record_stale();
                    trace!(
                        current = %generation,
                        cached = %entry.generation,
                        "serving stale selection table during rebuild"
                    );
                    Ok(Arc::clone(&entry.table))
                } else {
                    // First build: nothing stale to serve, wait our turn.
                    let guard = self.rebuild.lock().expect("rebuild lock poisoned");
                    self.rebuild_current(&guard)
                }
            }
        }
    }

    /// Rebuild the table from a fresh source snapshot. Caller holds the
    /// rebuild lock.
    fn rebuild_current(&self, _guard: &MutexGuard<'_, ()>) -> Result<Arc<SelectionTable>> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(SelectError::Disposed);
        }

        let snapshot = self.source.snapshot()?;

        // Double check: whoever held the lock before us may have already
        // built the table for this generation.
        if let Some(entry) = self.entry.load_full() {
            if entry.generation == snapshot.generation() {
                return Ok(Arc::clone(&entry.table));
            }
        }

        let table = match SelectionTable::build(snapshot.endpoints()) {
            Ok(table) => Arc::new(table),
            Err(err) => {
                self.stats.record_rebuild_failure();
                debug!(
                    generation = %snapshot.generation(),
                    error = %err,
                    "selection table rebuild failed"
                );
                return Err(err);
            }
        };

        self.entry.store(Some(Arc::new(CacheEntry {
            generation: snapshot.generation(),
            table: Arc::clone(&table),
        })));
        self.stats.record_rebuild();

        debug!(
            generation = %snapshot.generation(),
            endpoints = table.endpoint_count(),
            buckets = table.bucket_count(),
            "rebuilt selection table"
        );
        Ok(table)
    }

    /// Dispose the cache, releasing the registry subscription and the
    /// published table.
    ///
    /// Idempotent and safe to call concurrently with in-flight
    /// [`DependentCache::ensure_current`] calls: those complete against the
    /// table they already captured, later calls fail with
    /// [`SelectError::Disposed`].
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        let subscription = self
            .subscription
            .lock()
            .expect("subscription lock poisoned")
            .take();
        if let Some(watch) = subscription {
            self.source.unsubscribe(watch.id());
        }
        self.entry.store(None);
        debug!("dependent cache disposed");
    }

    /// Check whether the cache has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Get the configured consistency mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> ConsistencyMode {
        self.mode
    }

    /// Get the generation the published table was built from, if any.
    #[must_use]
    pub fn cached_generation(&self) -> Option<Generation> {
        self.entry.load_full().map(|entry| entry.generation)
    }

    /// Get cache statistics.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<S: EndpointSource> Drop for DependentCache<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

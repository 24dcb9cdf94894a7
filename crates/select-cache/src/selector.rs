//! Selector facade: the lookup entry point surrounding code uses.

use std::sync::Arc;

use select_core::{Endpoint, Result, RouteValues};
use tracing::trace;

use crate::cache::{ConsistencyMode, DependentCache};
use crate::source::EndpointSource;

/// Public lookup facade over a [`DependentCache`].
///
/// Resolves route values against whatever endpoint set the source currently
/// publishes. Lookups are CPU-bound with no await points, so the selector
/// can be called directly from async handlers; wrapping the result in a
/// ready future is the caller's choice, not a need of this type.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use select_core::{Endpoint, RouteValues};
/// use select_cache::{EndpointRegistry, EndpointSelector};
///
/// let registry = Arc::new(EndpointRegistry::new());
/// registry.publish(vec![
///     Endpoint::builder("Page:/About")
///         .require("controller", "Page")
///         .require("page", "/About")
///         .build(),
/// ]);
///
/// let selector = EndpointSelector::new(Arc::clone(&registry));
/// let matches = selector
///     .select_endpoints(&RouteValues::new().with("controller", "Page").with("page", "/About"))
///     .unwrap();
///
/// assert_eq!(matches.len(), 1);
/// ```
#[derive(Debug)]
pub struct EndpointSelector<S: EndpointSource> {
    cache: DependentCache<S>,
}

impl<S: EndpointSource> EndpointSelector<S> {
    /// Create a selector with the default consistency mode.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self {
            cache: DependentCache::new(source),
        }
    }

    /// Create a selector with an explicit consistency mode.
    #[must_use]
    pub fn with_mode(source: Arc<S>, mode: ConsistencyMode) -> Self {
        Self {
            cache: DependentCache::with_mode(source, mode),
        }
    }

    /// Resolve route values to the matching endpoints, in registration order.
    ///
    /// An empty result means no endpoint matched; that is a normal outcome,
    /// not an error. Errors are limited to rebuild failures triggered by
    /// this call and use after disposal.
    pub fn select_endpoints(&self, values: &RouteValues) -> Result<Vec<Arc<Endpoint>>> {
        let table = self.cache.ensure_current()?;
        let matches = table.select(values);
        trace!(candidates = matches.len(), "selected endpoints");
        Ok(matches.to_vec())
    }

    /// Access the underlying cache (mode, stats, generation).
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &DependentCache<S> {
        &self.cache
    }

    /// Dispose the selector. Idempotent; subsequent lookups fail with
    /// [`select_core::SelectError::Disposed`].
    pub fn dispose(&self) {
        self.cache.dispose();
    }
}

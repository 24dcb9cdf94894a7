//! Registry snapshots: immutable, versioned endpoint lists.
//!
//! A [`RegistrySnapshot`] is the unit the registry hands to the cache. It
//! pairs an ordered endpoint list with the [`Generation`] it belongs to:
//!
//! - **Immutable**: once created, a snapshot cannot be modified
//! - **Consistent**: the list and its generation are captured together
//! - **Cheap to clone**: the endpoint list is shared behind an `Arc`

use std::sync::Arc;

use crate::{Endpoint, Generation};

/// An immutable, versioned view of the registry's endpoint list.
///
/// Endpoint order is registration order and is what determines match
/// precedence within a selection-table bucket.
///
/// # Example
///
/// ```rust
/// use select_core::{Endpoint, Generation, RegistrySnapshot};
///
/// let endpoints = vec![Endpoint::builder("Home/Index").build()];
/// let snapshot = RegistrySnapshot::new(endpoints, Generation::initial().next());
///
/// assert_eq!(snapshot.len(), 1);
/// assert_eq!(snapshot.generation().as_u64(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    endpoints: Arc<[Arc<Endpoint>]>,
    generation: Generation,
}

impl RegistrySnapshot {
    /// Create a snapshot from an ordered endpoint list.
    #[must_use]
    pub fn new(endpoints: impl IntoIterator<Item = Endpoint>, generation: Generation) -> Self {
        Self {
            endpoints: endpoints.into_iter().map(Arc::new).collect(),
            generation,
        }
    }

    /// Create a snapshot from already-shared endpoints.
    #[must_use]
    pub fn from_shared(endpoints: Vec<Arc<Endpoint>>, generation: Generation) -> Self {
        Self {
            endpoints: endpoints.into(),
            generation,
        }
    }

    /// The empty snapshot at the initial generation.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            endpoints: Arc::from([]),
            generation: Generation::initial(),
        }
    }

    /// Get the ordered endpoint list.
    #[inline]
    #[must_use]
    pub fn endpoints(&self) -> &[Arc<Endpoint>] {
        &self.endpoints
    }

    /// Get the generation this snapshot belongs to.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Get the number of endpoints.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Check whether the snapshot has no endpoints.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl Default for RegistrySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

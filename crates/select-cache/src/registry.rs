//! In-memory endpoint registry.
//!
//! [`EndpointRegistry`] is the reference [`EndpointSource`]: it holds the
//! current snapshot behind an atomic pointer, serializes publishes, and
//! fans out change notifications after each swap. Reads never block.

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use select_core::{Endpoint, Generation, RegistrySnapshot, Result};
use tracing::debug;

use crate::source::EndpointSource;
use crate::watch::{ChangeHub, ChangeWatch, SubscriberId};

/// Registry holding the current versioned endpoint list.
///
/// Each [`EndpointRegistry::publish`] replaces the whole list: a new
/// [`RegistrySnapshot`] with the next generation is built off to the side
/// and swapped in atomically, so readers always observe a complete list.
/// Subscribers are notified after the swap.
///
/// # Example
///
/// ```rust
/// use select_core::Endpoint;
/// use select_cache::{EndpointRegistry, EndpointSource};
///
/// let registry = EndpointRegistry::new();
/// let generation = registry.publish(vec![
///     Endpoint::builder("Home/Index").require("controller", "Home").build(),
/// ]);
///
/// assert_eq!(generation.as_u64(), 1);
/// let snapshot = registry.snapshot().unwrap();
/// assert_eq!(snapshot.len(), 1);
/// ```
#[derive(Debug)]
pub struct EndpointRegistry {
    /// Current snapshot, replaced atomically on publish.
    current: ArcSwap<RegistrySnapshot>,
    /// Serializes publishes so generations stay monotonic.
    publish_lock: Mutex<()>,
    /// Change-notification fan-out.
    hub: ChangeHub,
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointRegistry {
    /// Create a registry with an empty endpoint list at the initial generation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(RegistrySnapshot::empty()),
            publish_lock: Mutex::new(()),
            hub: ChangeHub::new(),
        }
    }

    /// Create a registry with a custom notification buffer size.
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            current: ArcSwap::from_pointee(RegistrySnapshot::empty()),
            publish_lock: Mutex::new(()),
            hub: ChangeHub::with_buffer_size(buffer_size),
        }
    }

    /// Replace the endpoint list, advancing to a new generation.
    ///
    /// The new snapshot becomes visible in a single atomic swap; subscribers
    /// are notified afterwards. Returns the new generation.
    pub fn publish(&self, endpoints: impl IntoIterator<Item = Endpoint>) -> Generation {
        let generation = {
            let _guard = self.publish_lock.lock().expect("publish lock poisoned");
            let generation = self.current.load().generation().next();
            let snapshot = RegistrySnapshot::new(endpoints, generation);
            let count = snapshot.len();
            self.current.store(Arc::new(snapshot));

            debug!(
                generation = %generation,
                endpoints = count,
                "published endpoint set"
            );
            generation
        };

        // Notify after the swap, with the publish lock released.
        self.hub.notify(generation);
        generation
    }

    /// Get the number of endpoints in the current snapshot.
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.current.load().len()
    }

    /// Get the number of active change subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }
}

impl EndpointSource for EndpointRegistry {
    fn snapshot(&self) -> Result<RegistrySnapshot> {
        Ok((**self.current.load()).clone())
    }

    fn generation(&self) -> Generation {
        self.current.load().generation()
    }

    fn subscribe(&self) -> ChangeWatch {
        self.hub.subscribe()
    }

    fn unsubscribe(&self, id: SubscriberId) {
        self.hub.unsubscribe(id);
    }
}

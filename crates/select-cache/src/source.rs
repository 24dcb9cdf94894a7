//! The registry boundary: where endpoint lists come from.

use select_core::{Generation, RegistrySnapshot, Result};

use crate::watch::{ChangeWatch, SubscriberId};

/// Trait for sources of versioned endpoint lists.
///
/// Implementations own the endpoint list and its generation; the cache only
/// reads. [`EndpointSource::snapshot`] must return the list and its
/// generation captured together, so a rebuild reflects exactly one version
/// of the registry, never a partial update.
pub trait EndpointSource: Send + Sync {
    /// Capture the current endpoint list and its generation.
    fn snapshot(&self) -> Result<RegistrySnapshot>;

    /// Get the current generation without capturing the list.
    ///
    /// This is the cheap poll the cache performs on every access.
    fn generation(&self) -> Generation;

    /// Subscribe to generation-change notifications.
    fn subscribe(&self) -> ChangeWatch;

    /// Cancel a change subscription.
    fn unsubscribe(&self, id: SubscriberId);
}

//! Endpoint descriptors.
//!
//! This module provides [`Endpoint`], an immutable matchable target defined
//! by a set of route-value constraints plus arbitrary metadata, along with
//! [`EndpointBuilder`] and the [`EndpointId`] identity used for equality.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::RouteValue;

/// Unique identity for an endpoint.
///
/// Identity is what equality and tie-breaking use; two endpoints with
/// identical constraints are still distinct endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(u64);

impl EndpointId {
    /// Create a new process-unique endpoint ID.
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the numeric value of this endpoint ID.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint-{}", self.0)
    }
}

/// Ordered collection of arbitrary endpoint metadata.
///
/// Metadata items are opaque to the selection core; callers attach whatever
/// they need and retrieve it by type. When multiple items of the same type
/// are present, the most recently added one wins.
///
/// # Example
///
/// ```rust
/// use select_core::Metadata;
///
/// #[derive(Debug, PartialEq)]
/// struct PageInfo(&'static str);
///
/// let mut metadata = Metadata::new();
/// metadata.push(PageInfo("/About"));
///
/// assert_eq!(metadata.get::<PageInfo>(), Some(&PageInfo("/About")));
/// assert_eq!(metadata.get::<String>(), None);
/// ```
#[derive(Clone, Default)]
pub struct Metadata {
    items: Vec<Arc<dyn Any + Send + Sync>>,
}

impl Metadata {
    /// Create an empty metadata collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metadata item.
    pub fn push<T: Any + Send + Sync>(&mut self, item: T) {
        self.items.push(Arc::new(item));
    }

    /// Get the most recently added item of type `T`, if any.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.items.iter().rev().find_map(|item| item.downcast_ref())
    }

    /// Get all items of type `T`, in insertion order.
    pub fn get_all<T: Any>(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter_map(|item| item.downcast_ref())
    }

    /// Get the number of metadata items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether there are no metadata items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metadata")
            .field("len", &self.items.len())
            .finish()
    }
}

/// A matchable target defined by required route-value constraints.
///
/// An endpoint is selected when every one of its constraints matches the
/// incoming route values. Endpoints are immutable once built; equality and
/// hashing use the [`EndpointId`] identity only.
///
/// # Example
///
/// ```rust
/// use select_core::Endpoint;
///
/// let endpoint = Endpoint::builder("Home/Index")
///     .require("controller", "Home")
///     .require("action", "Index")
///     .build();
///
/// assert_eq!(endpoint.name(), "Home/Index");
/// assert_eq!(endpoint.constraints().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    id: EndpointId,
    name: String,
    constraints: Vec<(String, RouteValue)>,
    metadata: Metadata,
}

impl Endpoint {
    /// Create a builder for an endpoint with the given display name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder {
            name: name.into(),
            constraints: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Get the stable identity of this endpoint.
    #[inline]
    #[must_use]
    pub fn id(&self) -> EndpointId {
        self.id
    }

    /// Get the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the required route-value constraints, in declaration order.
    #[inline]
    #[must_use]
    pub fn constraints(&self) -> &[(String, RouteValue)] {
        &self.constraints
    }

    /// Get the metadata collection.
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Check whether this endpoint has no constraints (a catch-all).
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Endpoint {}

impl std::hash::Hash for Endpoint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Builder for creating endpoints.
#[derive(Debug)]
pub struct EndpointBuilder {
    name: String,
    constraints: Vec<(String, RouteValue)>,
    metadata: Metadata,
}

impl EndpointBuilder {
    /// Add a required route-value constraint.
    ///
    /// Constraints are kept in declaration order. Duplicate keys are not
    /// rejected here; the selection table reports them at build time.
    #[must_use]
    pub fn require(mut self, key: impl Into<String>, value: impl Into<RouteValue>) -> Self {
        self.constraints.push((key.into(), value.into()));
        self
    }

    /// Attach a metadata item.
    #[must_use]
    pub fn metadata<T: Any + Send + Sync>(mut self, item: T) -> Self {
        self.metadata.push(item);
        self
    }

    /// Build the endpoint, assigning it a fresh identity.
    #[must_use]
    pub fn build(self) -> Endpoint {
        Endpoint {
            id: EndpointId::next(),
            name: self.name,
            constraints: self.constraints,
            metadata: self.metadata,
        }
    }
}

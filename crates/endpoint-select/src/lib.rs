//! # endpoint-select
//!
//! Endpoint selection against a dynamically changing registry.
//!
//! This crate resolves incoming route values (a mapping of route-parameter
//! names to runtime values) against a registry whose endpoint list is
//! rebuilt by an external registration process. It provides:
//!
//! - An immutable selection table grouping endpoints by route-value signature
//! - A generation-tracked cache that rebuilds the table exactly once per
//!   registry update while concurrent readers keep a consistent snapshot
//! - A selector facade and an in-memory registry with change notifications
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use endpoint_select::prelude::*;
//!
//! // Create a registry and a selector over it
//! let registry = Arc::new(EndpointRegistry::new());
//! let selector = EndpointSelector::new(Arc::clone(&registry));
//!
//! // Register endpoints; each publish advances the generation
//! registry.publish(vec![
//!     Endpoint::builder("Page:/About")
//!         .require("controller", "Page")
//!         .require("page", "/About")
//!         .build(),
//! ]);
//!
//! // Resolve route values to endpoints
//! let matches = selector
//!     .select_endpoints(
//!         &RouteValues::new().with("controller", "Page").with("page", "/About"),
//!     )
//!     .unwrap();
//! assert_eq!(matches[0].name(), "Page:/About");
//! ```
//!
//! ## Architecture
//!
//! This library is organized into two crates:
//!
//! - `select-core` - Core types and error handling
//! - `select-cache` - Selection table, dependent cache, registry, selector
//!
//! This crate (`endpoint-select`) re-exports both for convenience.
//!
//! ## Design Principles
//!
//! 1. **No panics in library code** - All errors are returned as `Result`
//! 2. **Publish by replacement** - Tables and snapshots are immutable and
//!    swapped atomically; readers never see partial state
//! 3. **Token equality over event ordering** - Staleness is decided by
//!    comparing generation tokens on access, so missed notifications are safe
//! 4. **Observable** - Rebuild and staleness counters plus tracing support

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Re-export the sub-crates
pub use select_cache as cache;
pub use select_core as core;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use endpoint_select::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use select_core::{
        Endpoint, EndpointBuilder, EndpointId, Generation, Metadata, RegistrySnapshot,
        RouteValue, RouteValues, SelectError, SelectResult,
    };

    // Cache types
    pub use select_cache::{
        CacheStats, ChangeWatch, ConsistencyMode, DependentCache, EndpointRegistry,
        EndpointSelector, EndpointSource, SelectionTable, SubscriberId,
    };
}

/// Version information for this crate.
pub mod version {
    /// Crate version.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Minimum supported Rust version.
    pub const MSRV: &str = "1.75";

    /// Get version info as a string.
    pub fn version_string() -> String {
        format!("endpoint-select {} (MSRV {})", VERSION, MSRV)
    }
}

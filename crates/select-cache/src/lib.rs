//! # select-cache
//!
//! Change-tracked selection table cache for endpoint selection.
//!
//! This crate provides the core machinery for resolving route values
//! against a dynamically changing endpoint collection:
//!
//! - [`SelectionTable`] - Immutable signature-to-endpoints index
//! - [`DependentCache`] - Lazy cache rebuilding the table once per generation
//! - [`EndpointSelector`] - Lookup facade combining both
//! - [`EndpointRegistry`] - In-memory [`EndpointSource`] with change notifications
//!
//! ## Key Design Decisions
//!
//! - Published tables are immutable and replaced by atomic swap; readers
//!   never observe a table under construction
//! - Rebuilds are single-flight: racing triggers for one generation
//!   transition collapse into a single build
//! - Staleness is detected by generation-token equality on access, never by
//!   notification ordering, so missed or duplicated notifications are safe
//! - No locks are held across await points; nothing here suspends
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use select_core::{Endpoint, RouteValues};
//! use select_cache::{EndpointRegistry, EndpointSelector};
//!
//! let registry = Arc::new(EndpointRegistry::new());
//! let selector = EndpointSelector::new(Arc::clone(&registry));
//!
//! registry.publish(vec![
//!     Endpoint::builder("Home").require("controller", "Home").build(),
//! ]);
//!
//! let matches = selector
//!     .select_endpoints(&RouteValues::new().with("controller", "Home"))
//!     .unwrap();
//! assert_eq!(matches.len(), 1);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod registry;
mod selector;
mod source;
mod stats;
mod table;
mod watch;

pub use cache::{ConsistencyMode, DependentCache};
pub use registry::EndpointRegistry;
pub use selector::EndpointSelector;
pub use source::EndpointSource;
pub use stats::CacheStats;
pub use table::SelectionTable;
pub use watch::{ChangeHub, ChangeWatch, SubscriberId};

//! # select-core
//!
//! Core types and error handling for endpoint selection.
//!
//! This crate provides the foundational types used across the other
//! selection crates:
//!
//! - [`SelectError`] - Error type covering build, source, and lifecycle failures
//! - [`Endpoint`] - Immutable matchable target with constraints and metadata
//! - [`RouteValue`] / [`RouteValues`] - Typed route-parameter values
//! - [`Generation`] - Version marker for the registry's endpoint list
//! - [`RegistrySnapshot`] - Immutable, versioned endpoint list
//!
//! ## Example
//!
//! ```rust
//! use select_core::{Endpoint, RouteValues};
//!
//! // Describe an endpoint by its required route values
//! let endpoint = Endpoint::builder("Page:/About")
//!     .require("controller", "Page")
//!     .require("page", "/About")
//!     .build();
//!
//! // Incoming values, keys matched case-insensitively
//! let values = RouteValues::new()
//!     .with("Controller", "Page")
//!     .with("Page", "/About");
//!
//! assert!(values.contains_key("controller"));
//! assert_eq!(endpoint.constraints().len(), 2);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod endpoint;
mod error;
mod generation;
mod snapshot;
mod values;

pub use endpoint::{Endpoint, EndpointBuilder, EndpointId, Metadata};
pub use error::SelectError;
pub use generation::Generation;
pub use snapshot::RegistrySnapshot;
pub use values::{RouteValue, RouteValues};

/// Result type alias using [`SelectError`].
pub type Result<T> = std::result::Result<T, SelectError>;

/// Alias for Result, for callers that already have a `Result` in scope.
pub type SelectResult<T> = Result<T>;

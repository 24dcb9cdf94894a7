//! Integration tests for the endpoint-select workspace.
//!
//! These tests drive the public API through the `endpoint-select` facade:
//! table semantics, cache concurrency, disposal, and the change-watch flow.

#[cfg(test)]
mod cache_tests;
#[cfg(test)]
mod selector_tests;

//! Generation tracking for the endpoint registry.
//!
//! This module provides [`Generation`], a token identifying one version of
//! the registry's endpoint list. The cache compares tokens for equality to
//! detect staleness; it never relies on notification ordering.

use std::fmt;

/// Version marker for a registry endpoint list.
///
/// The registry mints a new `Generation` on every publish. A cached
/// selection table is current exactly when its generation equals the
/// registry's. Tokens are compared for equality, not ordering.
///
/// # Example
///
/// ```rust
/// use select_core::Generation;
///
/// let g0 = Generation::initial();
/// let g1 = g0.next();
///
/// assert_ne!(g0, g1);
/// assert_eq!(g1.as_u64(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Generation(u64);

impl Generation {
    /// The initial generation, before any publish.
    #[must_use]
    pub fn initial() -> Self {
        Self(0)
    }

    /// Create a generation from a raw counter value.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// The generation that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Get the raw counter value.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}

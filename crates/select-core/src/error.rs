//! Error types for endpoint selection.
//!
//! This module provides [`SelectError`], the error type shared by the
//! selection table, the dependent cache, and the selector facade.

/// Error type for endpoint-selection operations.
///
/// This error type is designed to:
/// - Cover all failure modes without using panics
/// - Keep failures local: an error surfaces only to the caller whose
///   action triggered it, never to other concurrent readers
/// - Support error chaining via the `source` field
///
/// # Example
///
/// ```rust
/// use select_core::SelectError;
///
/// fn check_constraint(key: &str) -> Result<(), SelectError> {
///     if key.is_empty() {
///         return Err(SelectError::InvalidEndpoint {
///             endpoint: "pages/About".to_string(),
///             reason: "constraint key cannot be empty".to_string(),
///         });
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// An endpoint's constraints are malformed and the selection table
    /// cannot be built from them.
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint {
        /// Display name of the offending endpoint.
        endpoint: String,
        /// Reason the endpoint is malformed.
        reason: String,
    },

    /// The cache or selector was used after disposal.
    #[error("selection cache has been disposed")]
    Disposed,

    /// Reading the endpoint source failed.
    #[error("endpoint source error: {message}")]
    SourceError {
        /// Description of the source failure.
        message: String,
        /// Optional underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A change-notification subscription was closed.
    #[error("subscription closed: subscriber_id={subscriber_id}")]
    SubscriptionClosed {
        /// ID of the closed subscription.
        subscriber_id: u64,
    },

    /// Unexpected internal error.
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
        /// Optional underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SelectError {
    /// Create a source error from any error type.
    pub fn source_error<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SourceError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error from any error type.
    pub fn internal<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check whether this error is retryable on the next access.
    ///
    /// Build and source failures do not poison the cache; the next
    /// `ensure_current` call retries the rebuild. Disposal is terminal.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Disposed)
    }
}

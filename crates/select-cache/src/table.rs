//! Selection table: immutable index from route-value signature to endpoints.
//!
//! A [`SelectionTable`] is a pure function of one registry snapshot. It is:
//!
//! - **Immutable**: built once, never mutated, safe to share across threads
//! - **Order-preserving**: endpoints in a bucket keep registration order
//! - **Exact-match**: lookups reduce the candidate values to a signature and
//!   match whole buckets, never partially

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Arc;

use fnv::FnvHashMap;
use select_core::{Endpoint, RouteValue, RouteValues, SelectError};

/// Normalized index key: candidate values projected positionally onto the
/// table's key set. Keys absent from the candidate map to [`RouteValue::Empty`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Signature(Box<[RouteValue]>);

/// Immutable mapping from route-value signature to ordered endpoint list.
///
/// The table collects every distinct constraint key across the endpoint
/// list (ASCII-lowercased, sorted), then indexes each endpoint under its
/// constraints projected onto that key set. Lookups project the incoming
/// values the same way, so extra unindexed parameters are ignored and
/// endpoints with zero constraints act as catch-alls under the all-empty
/// signature.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use select_core::{Endpoint, RouteValues};
/// use select_cache::SelectionTable;
///
/// let endpoints = vec![
///     Arc::new(Endpoint::builder("Home").require("controller", "Home").build()),
///     Arc::new(Endpoint::builder("About").require("controller", "About").build()),
/// ];
///
/// let table = SelectionTable::build(&endpoints).unwrap();
/// let matches = table.select(&RouteValues::new().with("controller", "Home"));
///
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].name(), "Home");
/// ```
#[derive(Debug)]
pub struct SelectionTable {
    /// Normalized constraint keys, sorted and deduplicated.
    keys: Box<[String]>,
    /// Buckets keyed by projected signature.
    buckets: FnvHashMap<Signature, Vec<Arc<Endpoint>>>,
    /// Total endpoints indexed.
    endpoint_count: usize,
}

impl SelectionTable {
    /// Build a table from an ordered endpoint list.
    ///
    /// Registration order is preserved as match precedence within each
    /// bucket. Fails only when an endpoint is malformed: the same
    /// constraint key (case-insensitive) declared more than once.
    pub fn build(endpoints: &[Arc<Endpoint>]) -> Result<Self, SelectError> {
        let mut keys = BTreeSet::new();
        for endpoint in endpoints {
            let mut seen: Vec<String> = Vec::with_capacity(endpoint.constraints().len());
            for (key, _) in endpoint.constraints() {
                let normalized = key.to_ascii_lowercase();
                if seen.contains(&normalized) {
                    return Err(SelectError::InvalidEndpoint {
                        endpoint: endpoint.name().to_string(),
                        reason: format!("duplicate constraint key `{normalized}`"),
                    });
                }
                seen.push(normalized.clone());
                keys.insert(normalized);
            }
        }
        let keys: Box<[String]> = keys.into_iter().collect();

        let mut buckets: FnvHashMap<Signature, Vec<Arc<Endpoint>>> = FnvHashMap::default();
        for endpoint in endpoints {
            let constraints: HashMap<String, &RouteValue> = endpoint
                .constraints()
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect();
            let signature = Signature(
                keys.iter()
                    .map(|key| {
                        constraints
                            .get(key)
                            .map_or(RouteValue::Empty, |v| v.normalized())
                    })
                    .collect(),
            );
            buckets.entry(signature).or_default().push(Arc::clone(endpoint));
        }

        Ok(Self {
            keys,
            buckets,
            endpoint_count: endpoints.len(),
        })
    }

    /// Look up the endpoints matching the given route values.
    ///
    /// Returns the matching bucket in registration order, or an empty slice
    /// when nothing matches. "No match" is a normal outcome, not an error.
    #[must_use]
    pub fn select(&self, values: &RouteValues) -> &[Arc<Endpoint>] {
        let signature = Signature(
            self.keys
                .iter()
                .map(|key| values.get(key).map_or(RouteValue::Empty, RouteValue::normalized))
                .collect(),
        );
        self.buckets
            .get(&signature)
            .map_or(&[], |bucket| bucket.as_slice())
    }

    /// Get the number of endpoints indexed in this table.
    #[inline]
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.endpoint_count
    }

    /// Get the number of distinct signatures.
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Get the normalized constraint keys this table indexes on.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Check whether the table indexes no endpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoint_count == 0
    }
}

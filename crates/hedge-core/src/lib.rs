#![deny(missing_docs)]
#![doc = "Core types for generalized hypergraphs: unique identifiers, the hyperedge record, ordered id-set algebra and many-to-many id mappings."]

use serde::{Deserialize, Serialize};

pub mod edge;
pub mod errors;
pub mod mapping;

pub use edge::{Hyperedge, LABEL_KEY};
pub use errors::{ErrorInfo, HedgeError};
pub use mapping::Mapping;

/// Opaque unique identifier of a hyperedge within a hypergraph.
///
/// Identifiers are caller supplied and never allocated automatically; the
/// engine only checks availability. Two edges carrying the same id in
/// different graphs denote the same entity for import and merge purposes.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UniqueId(String);

impl UniqueId {
    /// Wraps a raw string as an identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UniqueId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for UniqueId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for UniqueId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UniqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered, duplicate-free sequence of hyperedge identifiers.
///
/// Ordering is insertion order; deduplication is enforced by the set algebra
/// below and by the incidence mutators of [`Hyperedge`].
pub type Hyperedges = Vec<UniqueId>;

/// Unites two id sequences, keeping the first occurrence of every id.
pub fn unite(a: &Hyperedges, b: &Hyperedges) -> Hyperedges {
    let mut result = Hyperedges::new();
    for id in a.iter().chain(b.iter()) {
        if !result.contains(id) {
            result.push(id.clone());
        }
    }
    result
}

/// Intersects two id sequences, keeping the order of the first.
pub fn intersect(a: &Hyperedges, b: &Hyperedges) -> Hyperedges {
    let mut result = Hyperedges::new();
    for id in a {
        if b.contains(id) && !result.contains(id) {
            result.push(id.clone());
        }
    }
    result
}

/// Returns all ids which are in `a` but not in `b`, in the order of `a`.
pub fn subtract(a: &Hyperedges, b: &Hyperedges) -> Hyperedges {
    let mut result = Hyperedges::new();
    for id in a {
        if !b.contains(id) && !result.contains(id) {
            result.push(id.clone());
        }
    }
    result
}

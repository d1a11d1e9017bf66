//! Many-to-many relations between hyperedge identifiers.

use serde::{Deserialize, Serialize};

use crate::{Hyperedges, UniqueId};

/// An ordered many-to-many relation over [`UniqueId`]s.
///
/// Pairs keep their insertion order and duplicates are rejected. Equality is
/// defined over the *set* of pairs, so two mappings built in different orders
/// compare equal when they relate the same ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mapping {
    pairs: Vec<(UniqueId, UniqueId)>,
}

impl Mapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs the identity mapping over the given ids.
    pub fn identity(ids: &Hyperedges) -> Self {
        let mut result = Self::new();
        for id in ids {
            result.insert(id.clone(), id.clone());
        }
        result
    }

    /// Adds a pair to the relation; duplicate pairs are rejected.
    pub fn insert(&mut self, x: UniqueId, y: UniqueId) {
        if !self.contains(&x, &y) {
            self.pairs.push((x, y));
        }
    }

    /// Removes every pair whose source is `x`.
    pub fn remove_source(&mut self, x: &UniqueId) {
        self.pairs.retain(|(sx, _)| sx != x);
    }

    /// Returns whether the exact pair `(x, y)` is present.
    pub fn contains(&self, x: &UniqueId, y: &UniqueId) -> bool {
        self.pairs.iter().any(|(sx, sy)| sx == x && sy == y)
    }

    /// Returns whether `x` occurs as a source.
    pub fn maps_source(&self, x: &UniqueId) -> bool {
        self.pairs.iter().any(|(sx, _)| sx == x)
    }

    /// Returns whether `y` occurs as a target.
    pub fn maps_target(&self, y: &UniqueId) -> bool {
        self.pairs.iter().any(|(_, sy)| sy == y)
    }

    /// Returns all targets of `x`, in insertion order.
    pub fn targets_of(&self, x: &UniqueId) -> Hyperedges {
        let mut result = Hyperedges::new();
        for (sx, sy) in &self.pairs {
            if sx == x && !result.contains(sy) {
                result.push(sy.clone());
            }
        }
        result
    }

    /// Returns all sources of `y`, in insertion order.
    pub fn sources_of(&self, y: &UniqueId) -> Hyperedges {
        let mut result = Hyperedges::new();
        for (sx, sy) in &self.pairs {
            if sy == y && !result.contains(sx) {
                result.push(sx.clone());
            }
        }
        result
    }

    /// Returns the inverse relation.
    pub fn invert(&self) -> Self {
        let mut result = Self::new();
        for (x, y) in &self.pairs {
            result.insert(y.clone(), x.clone());
        }
        result
    }

    /// Inner join: given `self: X → Y` and `other: X → Z`, returns `Y → Z`.
    pub fn join(&self, other: &Self) -> Self {
        let mut result = Self::new();
        for (x, y) in &self.pairs {
            for (x2, z) in &other.pairs {
                if x == x2 {
                    result.insert(y.clone(), z.clone());
                }
            }
        }
        result
    }

    /// Number of pairs in the relation.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns whether the relation is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(UniqueId, UniqueId)> {
        self.pairs.iter()
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self.pairs.iter().all(|(x, y)| other.contains(x, y))
    }
}

impl Eq for Mapping {}

impl FromIterator<(UniqueId, UniqueId)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (UniqueId, UniqueId)>>(iter: T) -> Self {
        let mut result = Self::new();
        for (x, y) in iter {
            result.insert(x, y);
        }
        result
    }
}

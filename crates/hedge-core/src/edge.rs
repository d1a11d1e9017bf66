//! The hyperedge record, the single primitive of the generalized hypergraph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Hyperedges, UniqueId};

/// Reserved property key under which the label of an edge is stored.
pub const LABEL_KEY: &str = "label";

/// A directed generalized hyperedge.
///
/// A hyperedge may point from any set of edges and to any set of edges;
/// plain nodes are simply edges whose incidence sets are empty. The incidence
/// sets store identifiers only, never owning references, which is what makes
/// reflexive structures (an edge containing its own id) representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperedge {
    id: UniqueId,
    properties: BTreeMap<String, String>,
    from: Hyperedges,
    to: Hyperedges,
}

impl Hyperedge {
    /// Creates a new, unconnected edge with the given id and label.
    pub fn new(id: impl Into<UniqueId>, label: &str) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(LABEL_KEY.to_string(), label.to_string());
        Self {
            id: id.into(),
            properties,
            from: Hyperedges::new(),
            to: Hyperedges::new(),
        }
    }

    /// Returns the identifier of this edge.
    pub fn id(&self) -> &UniqueId {
        &self.id
    }

    /// Returns the label of this edge (empty string when unset).
    pub fn label(&self) -> &str {
        self.property(LABEL_KEY).unwrap_or("")
    }

    /// Replaces the label of this edge.
    pub fn update_label(&mut self, label: &str) {
        self.set_property(LABEL_KEY, label);
    }

    /// Returns the value stored under the given property key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns whether a value is stored under the given property key.
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Stores a value under the given property key.
    pub fn set_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }

    /// Returns all properties of this edge.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Returns the ordered set of tails (the edges this one points from).
    pub fn pointing_from(&self) -> &Hyperedges {
        &self.from
    }

    /// Returns the ordered set of heads (the edges this one points to).
    pub fn pointing_to(&self) -> &Hyperedges {
        &self.to
    }

    /// Returns whether `id` is among the tails of this edge.
    pub fn is_pointing_from(&self, id: &UniqueId) -> bool {
        self.from.contains(id)
    }

    /// Returns whether `id` is among the heads of this edge.
    pub fn is_pointing_to(&self, id: &UniqueId) -> bool {
        self.to.contains(id)
    }

    /// Adds `id` to the tails, preserving insertion order and rejecting duplicates.
    pub fn points_from(&mut self, id: &UniqueId) {
        if !self.from.contains(id) {
            self.from.push(id.clone());
        }
    }

    /// Adds `id` to the heads, preserving insertion order and rejecting duplicates.
    pub fn points_to(&mut self, id: &UniqueId) {
        if !self.to.contains(id) {
            self.to.push(id.clone());
        }
    }

    /// Removes `id` from both incidence sets.
    pub fn forget(&mut self, id: &UniqueId) {
        self.from.retain(|other| other != id);
        self.to.retain(|other| other != id);
    }

    /// Replaces every occurrence of `old` in the incidence sets by `new`.
    ///
    /// Used by the rewriter when identified edges collapse; positions are
    /// preserved unless `new` is already present, in which case `old` is
    /// simply dropped.
    pub fn redirect(&mut self, old: &UniqueId, new: &UniqueId) {
        redirect_in(&mut self.from, old, new);
        redirect_in(&mut self.to, old, new);
    }

    /// Number of tails of this edge.
    pub fn indegree(&self) -> usize {
        self.from.len()
    }

    /// Number of heads of this edge.
    pub fn outdegree(&self) -> usize {
        self.to.len()
    }
}

fn redirect_in(set: &mut Hyperedges, old: &UniqueId, new: &UniqueId) {
    if !set.contains(old) {
        return;
    }
    if set.contains(new) {
        set.retain(|id| id != old);
    } else {
        for id in set.iter_mut() {
            if id == old {
                *id = new.clone();
            }
        }
    }
}

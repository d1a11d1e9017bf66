use std::collections::BTreeMap;

use hedge_core::errors::{ErrorInfo, HedgeError};
use hedge_core::{unite, Hyperedge, Hyperedges, UniqueId};

/// An owned repository of hyperedges, keyed by their unique identifiers.
///
/// The graph exclusively owns every edge it stores; incidence sets carry ids
/// only, and every id mentioned in an incidence set refers to an edge present
/// in the repository. No reverse index is materialized; neighbour queries
/// reconstruct back-pointers by scanning, trading lookup cost for trivially
/// correct reflexive structures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hypergraph {
    edges: BTreeMap<UniqueId, Hyperedge>,
}

impl Hypergraph {
    /// Creates an empty hypergraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of edges stored in the graph.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph stores no edges at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns whether an edge with the given id exists.
    pub fn exists(&self, id: &UniqueId) -> bool {
        self.edges.contains_key(id)
    }

    /// Gives read access to the edge with the given id.
    pub fn read(&self, id: &UniqueId) -> Result<&Hyperedge, HedgeError> {
        self.edges.get(id).ok_or_else(|| missing_reference(id))
    }

    /// Returns the edge with the given id, if present.
    pub fn get(&self, id: &UniqueId) -> Option<&Hyperedge> {
        self.edges.get(id)
    }

    pub(crate) fn edge_mut(&mut self, id: &UniqueId) -> Result<&mut Hyperedge, HedgeError> {
        self.edges.get_mut(id).ok_or_else(|| missing_reference(id))
    }

    /// Returns all ids stored in the graph, in ascending id order.
    pub fn ids(&self) -> Hyperedges {
        self.edges.keys().cloned().collect()
    }

    /// Iterates over all edges in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Hyperedge> {
        self.edges.values()
    }

    /// Tries to create an edge with the given id and label.
    ///
    /// Creating an edge whose id is taken by an edge with the *same* label is
    /// an idempotent success; a differing label fails with `duplicate-id`.
    pub fn create(
        &mut self,
        id: impl Into<UniqueId>,
        label: &str,
    ) -> Result<Hyperedges, HedgeError> {
        let id = id.into();
        if let Some(existing) = self.edges.get(&id) {
            if existing.label() == label {
                return Ok(vec![id]);
            }
            return Err(HedgeError::Graph(
                ErrorInfo::new("duplicate-id", "id is taken by an edge with another label")
                    .with_context("id", id.as_str())
                    .with_context("label", label)
                    .with_context("existing", existing.label()),
            ));
        }
        self.edges.insert(id.clone(), Hyperedge::new(id.clone(), label));
        Ok(vec![id])
    }

    /// Removes the edge with the given id and every reference to it. Idempotent.
    pub fn destroy(&mut self, id: &UniqueId) {
        self.disconnect(id);
        self.edges.remove(id);
    }

    /// Removes `id` from every incidence set while leaving the edge itself.
    pub fn disconnect(&mut self, id: &UniqueId) {
        for edge in self.edges.values_mut() {
            edge.forget(id);
        }
    }

    pub(crate) fn redirect_references(&mut self, old: &UniqueId, new: &UniqueId) {
        for edge in self.edges.values_mut() {
            edge.redirect(old, new);
        }
    }

    /// Finds all ids whose label matches; the empty label matches every edge.
    pub fn find(&self, label: &str) -> Hyperedges {
        self.edges
            .values()
            .filter(|edge| label.is_empty() || edge.label() == label)
            .map(|edge| edge.id().clone())
            .collect()
    }

    /// Makes every edge in `src_ids` point to every edge in `dst_ids`.
    ///
    /// Fails with `missing-reference` before any wiring happens if one of the
    /// mentioned ids is absent; on success returns `unite(src_ids, dst_ids)`.
    pub fn connect_to(
        &mut self,
        src_ids: &Hyperedges,
        dst_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.check_all_exist(src_ids.iter().chain(dst_ids.iter()))?;
        for src in src_ids {
            let edge = self.edge_mut(src)?;
            for dst in dst_ids {
                edge.points_to(dst);
            }
        }
        Ok(unite(src_ids, dst_ids))
    }

    /// Makes every edge in `dst_ids` point from every edge in `src_ids`.
    ///
    /// The mirror of [`connect_to`](Self::connect_to): only the `from` sets of
    /// the destinations change.
    pub fn connect_from(
        &mut self,
        src_ids: &Hyperedges,
        dst_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.check_all_exist(src_ids.iter().chain(dst_ids.iter()))?;
        for dst in dst_ids {
            let edge = self.edge_mut(dst)?;
            for src in src_ids {
                edge.points_from(src);
            }
        }
        Ok(unite(src_ids, dst_ids))
    }

    /// Projects the tail sets of the given edges, filtered by label.
    pub fn from_of(&self, ids: &Hyperedges, label: &str) -> Hyperedges {
        let mut result = Hyperedges::new();
        for id in ids {
            if let Some(edge) = self.get(id) {
                for tail in edge.pointing_from() {
                    if self.label_matches(tail, label) && !result.contains(tail) {
                        result.push(tail.clone());
                    }
                }
            }
        }
        result
    }

    /// Projects the head sets of the given edges, filtered by label.
    pub fn to_of(&self, ids: &Hyperedges, label: &str) -> Hyperedges {
        let mut result = Hyperedges::new();
        for id in ids {
            if let Some(edge) = self.get(id) {
                for head in edge.pointing_to() {
                    if self.label_matches(head, label) && !result.contains(head) {
                        result.push(head.clone());
                    }
                }
            }
        }
        result
    }

    /// Successor scan: the heads of `ids` united with every edge pointing from one of `ids`.
    pub fn next_neighbours_of(&self, ids: &Hyperedges, label: &str) -> Hyperedges {
        let mut result = self.to_of(ids, label);
        for edge in self.edges.values() {
            if ids.iter().any(|id| edge.is_pointing_from(id))
                && (label.is_empty() || edge.label() == label)
                && !result.contains(edge.id())
            {
                result.push(edge.id().clone());
            }
        }
        result
    }

    /// Predecessor scan: the tails of `ids` united with every edge pointing to one of `ids`.
    pub fn prev_neighbours_of(&self, ids: &Hyperedges, label: &str) -> Hyperedges {
        let mut result = self.from_of(ids, label);
        for edge in self.edges.values() {
            if ids.iter().any(|id| edge.is_pointing_to(id))
                && (label.is_empty() || edge.label() == label)
                && !result.contains(edge.id())
            {
                result.push(edge.id().clone());
            }
        }
        result
    }

    /// Union of predecessor and successor scans.
    pub fn all_neighbours_of(&self, ids: &Hyperedges, label: &str) -> Hyperedges {
        unite(
            &self.prev_neighbours_of(ids, label),
            &self.next_neighbours_of(ids, label),
        )
    }

    /// Imports every edge of `other` unless its id already exists, then
    /// re-unions the incidence sets of all imported ids.
    ///
    /// Labels of already present edges win over the imported ones; the
    /// incidence union keeps every graph reference valid across merges.
    pub fn import_from(&mut self, other: &Hypergraph) {
        for edge in other.iter() {
            if !self.exists(edge.id()) {
                self.edges.insert(
                    edge.id().clone(),
                    Hyperedge::new(edge.id().clone(), edge.label()),
                );
            }
        }
        for edge in other.iter() {
            if let Some(own) = self.edges.get_mut(edge.id()) {
                for tail in edge.pointing_from() {
                    own.points_from(tail);
                }
                for head in edge.pointing_to() {
                    own.points_to(head);
                }
            }
        }
    }

    /// Builds a new hypergraph whose edge set is the union of `a` and `b`.
    ///
    /// For shared ids the label of `a` wins and the incidence sets are
    /// unioned.
    pub fn merge(a: &Hypergraph, b: &Hypergraph) -> Hypergraph {
        let mut result = Hypergraph::new();
        result.import_from(a);
        result.import_from(b);
        result
    }

    pub(crate) fn label_matches(&self, id: &UniqueId, label: &str) -> bool {
        label.is_empty() || self.get(id).map(|edge| edge.label() == label).unwrap_or(false)
    }

    fn check_all_exist<'a>(
        &self,
        mut ids: impl Iterator<Item = &'a UniqueId>,
    ) -> Result<(), HedgeError> {
        match ids.find(|id| !self.exists(id)) {
            Some(id) => Err(missing_reference(id)),
            None => Ok(()),
        }
    }
}

fn missing_reference(id: &UniqueId) -> HedgeError {
    HedgeError::Graph(
        ErrorInfo::new("missing-reference", "edge does not exist").with_context("id", id.as_str()),
    )
}

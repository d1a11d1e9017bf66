use hedge_core::{Hyperedge, Hyperedges, Mapping, UniqueId};

use crate::hypergraph::Hypergraph;

/// Resumable state of a backtracking subgraph-isomorphism search.
///
/// The stack holds partial mappings still to be explored. It is the only
/// stateful object shared across successive matcher calls; keep one per
/// query/data pair and never mutate it concurrently. A complete mapping
/// pushed back onto the stack is yielded again by the next call, which is
/// how the rewriter reuses a match found by a caller.
#[derive(Debug, Clone, Default)]
pub struct SearchSpace {
    stack: Vec<Mapping>,
    started: bool,
}

impl SearchSpace {
    /// Creates a fresh, unexplored search space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a partial (or complete) mapping to be explored next.
    pub fn push(&mut self, mapping: Mapping) {
        self.stack.push(mapping);
        self.started = true;
    }

    /// Returns whether the search has started and no alternatives remain.
    pub fn is_exhausted(&self) -> bool {
        self.started && self.stack.is_empty()
    }

    fn pop(&mut self) -> Option<Mapping> {
        self.stack.pop()
    }
}

/// Default candidate enumeration for a query edge.
///
/// If the query id exists in the data graph it is the sole candidate;
/// otherwise every data edge sharing the query label qualifies. Candidates
/// with fewer tails or heads than the query edge can never embed it and are
/// filtered out.
pub fn default_candidates(data: &Hypergraph, query_edge: &Hyperedge) -> Hyperedges {
    let candidates = if data.exists(query_edge.id()) {
        vec![query_edge.id().clone()]
    } else {
        data.find(query_edge.label())
    };
    candidates
        .into_iter()
        .filter(|id| match data.get(id) {
            Some(edge) => {
                edge.indegree() >= query_edge.indegree()
                    && edge.outdegree() >= query_edge.outdegree()
            }
            None => false,
        })
        .collect()
}

impl Hypergraph {
    /// Produces the next embedding of `query` into this graph.
    ///
    /// The returned mapping is injective and preserves incidence: the image
    /// of a query edge points from the images of its tails and to the images
    /// of its heads. Query ids are assigned in the query's iteration order;
    /// `candidates_for` supplies the admissible images of a query edge (see
    /// [`default_candidates`]). An empty mapping signals that the search
    /// space is exhausted.
    pub fn next_match<F>(
        &self,
        query: &Hypergraph,
        space: &mut SearchSpace,
        mut candidates_for: F,
    ) -> Mapping
    where
        F: FnMut(&Hypergraph, &Hyperedge) -> Hyperedges,
    {
        if !space.started {
            space.push(Mapping::new());
        }
        let query_ids = query.ids();

        while let Some(partial) = space.pop() {
            if partial.len() >= query_ids.len() {
                return partial;
            }
            let Some(next_query) = query_ids.iter().find(|id| !partial.maps_source(id)) else {
                return partial;
            };
            let Some(query_edge) = query.get(next_query) else {
                continue;
            };
            // Reverse push order so the first candidate is explored first.
            for candidate in candidates_for(self, query_edge).iter().rev() {
                if self.is_consistent(query, &partial, next_query, candidate) {
                    let mut extended = partial.clone();
                    extended.insert(next_query.clone(), candidate.clone());
                    space.push(extended);
                }
            }
        }
        Mapping::new()
    }

    fn is_consistent(
        &self,
        query: &Hypergraph,
        partial: &Mapping,
        query_id: &UniqueId,
        candidate: &UniqueId,
    ) -> bool {
        if partial.maps_target(candidate) {
            return false;
        }
        let (Some(query_edge), Some(candidate_edge)) = (query.get(query_id), self.get(candidate))
        else {
            return false;
        };
        // Self-loops constrain the candidate directly.
        if query_edge.is_pointing_from(query_id) && !candidate_edge.is_pointing_from(candidate) {
            return false;
        }
        if query_edge.is_pointing_to(query_id) && !candidate_edge.is_pointing_to(candidate) {
            return false;
        }
        for (assigned_query, assigned_data) in partial.iter() {
            let (Some(other_query), Some(other_data)) =
                (query.get(assigned_query), self.get(assigned_data))
            else {
                return false;
            };
            if query_edge.is_pointing_from(assigned_query)
                && !candidate_edge.is_pointing_from(assigned_data)
            {
                return false;
            }
            if query_edge.is_pointing_to(assigned_query)
                && !candidate_edge.is_pointing_to(assigned_data)
            {
                return false;
            }
            if other_query.is_pointing_from(query_id) && !other_data.is_pointing_from(candidate) {
                return false;
            }
            if other_query.is_pointing_to(query_id) && !other_data.is_pointing_to(candidate) {
                return false;
            }
        }
        true
    }
}

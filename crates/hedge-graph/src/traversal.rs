use std::collections::{BTreeSet, VecDeque};

use hedge_core::{Hyperedge, Hyperedges, UniqueId};

use crate::hypergraph::Hypergraph;

/// Direction of a traversal relative to the orientation of the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// With the direction of the edges (tails towards heads).
    Down,
    /// Against the direction of the edges.
    Up,
    /// In both directions.
    Both,
}

impl Hypergraph {
    /// Breadth-first traversal starting at `root`.
    ///
    /// Every edge popped from the queue is visited at most once and lands in
    /// the result iff `result_filter` accepts it. Expansion asks
    /// `edge_filter(current, mediator)` whether the mediating edge may be
    /// followed:
    ///
    /// - going [`Direction::Down`], a crossing edge with the current edge in
    ///   its tail set mediates a hop onto its heads; the current edge
    ///   mediates itself (`edge_filter(current, current)`) for the direct
    ///   steps onto its own heads;
    /// - going [`Direction::Up`], the mirror holds for tail sets;
    /// - [`Direction::Both`] does both.
    ///
    /// Results appear in discovery order, ties broken by the insertion order
    /// of the incidence sets.
    pub fn traverse<R, E>(
        &self,
        root: &UniqueId,
        mut result_filter: R,
        mut edge_filter: E,
        direction: Direction,
    ) -> Hyperedges
    where
        R: FnMut(&Hyperedge) -> bool,
        E: FnMut(&Hyperedge, &Hyperedge) -> bool,
    {
        let down = matches!(direction, Direction::Down | Direction::Both);
        let up = matches!(direction, Direction::Up | Direction::Both);

        let mut result = Hyperedges::new();
        let mut visited: BTreeSet<UniqueId> = BTreeSet::new();
        let mut queue: VecDeque<UniqueId> = VecDeque::new();
        queue.push_back(root.clone());

        while let Some(current_id) = queue.pop_front() {
            if visited.contains(&current_id) {
                continue;
            }
            let Some(current) = self.get(&current_id) else {
                continue;
            };
            visited.insert(current_id.clone());
            if result_filter(current) {
                result.push(current_id.clone());
            }

            // Direct steps along the current edge's own incidence sets; the
            // current edge is its own mediator and must qualify.
            if edge_filter(current, current) {
                if down {
                    for head in current.pointing_to() {
                        queue.push_back(head.clone());
                    }
                }
                if up {
                    for tail in current.pointing_from() {
                        queue.push_back(tail.clone());
                    }
                }
            }

            // Crossings through edges mentioning the current one.
            for crossing in self.iter() {
                if !edge_filter(current, crossing) {
                    continue;
                }
                if down && crossing.is_pointing_from(&current_id) {
                    for head in crossing.pointing_to() {
                        queue.push_back(head.clone());
                    }
                }
                if up && crossing.is_pointing_to(&current_id) {
                    for tail in crossing.pointing_from() {
                        queue.push_back(tail.clone());
                    }
                }
            }
        }
        result
    }
}

use std::collections::BTreeMap;

use hedge_core::errors::{ErrorInfo, HedgeError};
use hedge_core::{Hyperedge, Hyperedges, Mapping, UniqueId};

use crate::hypergraph::Hypergraph;
use crate::matching::SearchSpace;

impl Hypergraph {
    /// Single-pushout rewriting of this graph.
    ///
    /// `lhs` is the pattern, `rhs` the replacement, and `partial` a partial
    /// morphism from `lhs` ids to `rhs` ids: pattern edges without an image
    /// are deleted, replacement edges outside the image are created fresh,
    /// and identified edges (several pattern edges mapped to one replacement
    /// edge) collapse into a single host edge carrying the union of their
    /// incidences. Deletion precedes creation, so references that dangle are
    /// silently dropped.
    ///
    /// The next match is taken from `space` (seeding it on first use); when
    /// the search is exhausted an empty graph is returned. Callers iterate a
    /// rule by re-invoking with the same search space.
    pub fn rewrite<F>(
        &self,
        lhs: &Hypergraph,
        rhs: &Hypergraph,
        partial: &Mapping,
        space: &mut SearchSpace,
        candidates_for: F,
    ) -> Result<Hypergraph, HedgeError>
    where
        F: FnMut(&Hypergraph, &Hyperedge) -> Hyperedges,
    {
        for (left, right) in partial.iter() {
            if !lhs.exists(left) || !rhs.exists(right) {
                return Err(HedgeError::Rewrite(
                    ErrorInfo::new("partial-map-unknown-id", "partial map mentions unknown ids")
                        .with_context("from", left.as_str())
                        .with_context("to", right.as_str()),
                ));
            }
        }

        let matched = self.next_match(lhs, space, candidates_for);
        if matched.is_empty() && lhs.size() > 0 {
            return Ok(Hypergraph::new());
        }

        let mut result = self.clone();

        // Delete phase: pattern edges without an image vanish together with
        // every reference to them.
        for left in lhs.ids() {
            if partial.targets_of(&left).is_empty() {
                for host in matched.targets_of(&left) {
                    result.destroy(&host);
                }
            }
        }

        // Add phase: replacement edges outside the image of the partial map
        // are created under their own id, or a suffixed variant if taken.
        let mut glue = partial.join(&matched);
        for right in rhs.ids() {
            if !partial.maps_target(&right) {
                let label = rhs.read(&right)?.label().to_string();
                let mut fresh = right.clone();
                let mut attempt = 0usize;
                while result.exists(&fresh) {
                    attempt += 1;
                    fresh = UniqueId::new(format!("{right}:{attempt}"));
                }
                result.create(fresh.clone(), &label)?;
                glue.insert(right, fresh);
            }
        }

        // Glue phase: identified host edges collapse onto the first image;
        // the survivor inherits the union of the incidences and every
        // reference to a collapsed edge is redirected onto it.
        let mut collapsed: BTreeMap<UniqueId, UniqueId> = BTreeMap::new();
        for right in rhs.ids() {
            let targets = resolve_all(&collapsed, &glue.targets_of(&right));
            let Some(survivor) = targets.first().cloned() else {
                continue;
            };
            for extra in targets.iter().skip(1) {
                if !result.exists(extra) {
                    continue;
                }
                let (tails, heads) = {
                    let edge = result.read(extra)?;
                    (edge.pointing_from().clone(), edge.pointing_to().clone())
                };
                let survivor_edge = result.edge_mut(&survivor)?;
                for tail in &tails {
                    survivor_edge.points_from(tail);
                }
                for head in &heads {
                    survivor_edge.points_to(head);
                }
                result.redirect_references(extra, &survivor);
                result.destroy(extra);
                collapsed.insert(extra.clone(), survivor.clone());
            }
        }

        // Reconnect phase: every replacement edge imposes its wiring (and,
        // when labelled, its label) on its host image.
        for right in rhs.ids() {
            let Some(target) = glue
                .targets_of(&right)
                .first()
                .map(|id| resolve(&collapsed, id))
            else {
                continue;
            };
            let replacement = rhs.read(&right)?;
            if !replacement.label().is_empty() && result.read(&target)?.label() != replacement.label()
            {
                result.edge_mut(&target)?.update_label(replacement.label());
            }
            let tails: Hyperedges = resolve_images(&collapsed, &glue, replacement.pointing_from());
            let heads: Hyperedges = resolve_images(&collapsed, &glue, replacement.pointing_to());
            result.connect_from(&tails, &vec![target.clone()])?;
            result.connect_to(&vec![target], &heads)?;
        }

        Ok(result)
    }
}

fn resolve(collapsed: &BTreeMap<UniqueId, UniqueId>, id: &UniqueId) -> UniqueId {
    let mut current = id.clone();
    while let Some(next) = collapsed.get(&current) {
        current = next.clone();
    }
    current
}

fn resolve_all(collapsed: &BTreeMap<UniqueId, UniqueId>, ids: &Hyperedges) -> Hyperedges {
    let mut result = Hyperedges::new();
    for id in ids {
        let resolved = resolve(collapsed, id);
        if !result.contains(&resolved) {
            result.push(resolved);
        }
    }
    result
}

fn resolve_images(
    collapsed: &BTreeMap<UniqueId, UniqueId>,
    glue: &Mapping,
    rhs_ids: &Hyperedges,
) -> Hyperedges {
    let mut result = Hyperedges::new();
    for rhs_id in rhs_ids {
        if let Some(image) = glue.targets_of(rhs_id).first() {
            let resolved = resolve(collapsed, image);
            if !result.contains(&resolved) {
                result.push(resolved);
            }
        }
    }
    result
}

use std::collections::BTreeSet;

use hedge_core::errors::HedgeError;
use hedge_core::{Hyperedges, UniqueId};

use crate::hash::derived_id;
use crate::hypergraph::Hypergraph;
use crate::traversal::Direction;

/// A hypergraph in which concepts and relations are distinguished.
///
/// Two reserved ur-edges encode the distinction: an edge is a *concept* iff
/// it is in the head set of the `CONCEPT` ur-edge (id `"1"`), and a
/// *relation* iff it is in the head set of the `RELATION` ur-edge (id `"2"`).
/// The layer adds no storage of its own; it owns a plain [`Hypergraph`] and
/// a vocabulary of operations over it.
#[derive(Debug, Clone)]
pub struct Conceptgraph {
    base: Hypergraph,
}

impl Default for Conceptgraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Conceptgraph {
    /// Reserved id of the ur-edge whose head set contains every concept.
    pub const CONCEPT_ID: &'static str = "1";
    /// Reserved id of the ur-edge whose head set contains every relation.
    pub const RELATION_ID: &'static str = "2";

    const CONCEPT_LABEL: &'static str = "CONCEPT";
    const RELATION_LABEL: &'static str = "RELATION";

    /// Creates an empty concept graph with the two ur-edges installed.
    pub fn new() -> Self {
        Self::from_hypergraph(Hypergraph::new())
            .expect("reserved ids are free in an empty graph")
    }

    /// Promotes an existing hypergraph by installing the ur-edges.
    ///
    /// Installation is idempotent; it fails only when a reserved id is taken
    /// by an edge with a conflicting label.
    pub fn from_hypergraph(mut base: Hypergraph) -> Result<Self, HedgeError> {
        base.create(Self::CONCEPT_ID, Self::CONCEPT_LABEL)?;
        base.create(Self::RELATION_ID, Self::RELATION_LABEL)?;
        Ok(Self { base })
    }

    /// Read access to the underlying hypergraph.
    pub fn base(&self) -> &Hypergraph {
        &self.base
    }

    /// Write access to the underlying hypergraph.
    pub fn base_mut(&mut self) -> &mut Hypergraph {
        &mut self.base
    }

    /// Releases the underlying hypergraph.
    pub fn into_base(self) -> Hypergraph {
        self.base
    }

    /// Returns whether `id` is registered as a concept.
    pub fn is_concept(&self, id: &UniqueId) -> bool {
        self.membership(Self::CONCEPT_ID).contains(id)
    }

    /// Returns whether `id` is registered as a relation.
    pub fn is_relation(&self, id: &UniqueId) -> bool {
        self.membership(Self::RELATION_ID).contains(id)
    }

    /// Creates a concept with the given id and label.
    pub fn create_concept(
        &mut self,
        id: impl Into<UniqueId>,
        label: &str,
    ) -> Result<Hyperedges, HedgeError> {
        let id = id.into();
        let created = self.base.create(id.clone(), label)?;
        self.base
            .connect_to(&vec![Self::CONCEPT_ID.into()], &vec![id])?;
        Ok(created)
    }

    /// Creates a concept whose id is derived from its label.
    pub fn concept_from_label(&mut self, label: &str) -> Result<Hyperedges, HedgeError> {
        self.create_concept(derived_id::<&str>(&[], &[], label), label)
    }

    /// Finds concepts by label; the empty label matches every concept.
    pub fn concepts(&self, label: &str) -> Hyperedges {
        self.members_with_label(Self::CONCEPT_ID, label)
    }

    /// Finds relations by label; the empty label matches every relation.
    pub fn relations(&self, label: &str) -> Hyperedges {
        self.members_with_label(Self::RELATION_ID, label)
    }

    /// Creates an N:M relation with an explicit id.
    ///
    /// The new edge points from every id in `from_ids` and to every id in
    /// `to_ids`; relations may relate relations, not only concepts.
    /// Re-relating an existing id with the same label unions the endpoints
    /// into the existing edge.
    pub fn relate(
        &mut self,
        id: impl Into<UniqueId>,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        label: &str,
    ) -> Result<Hyperedges, HedgeError> {
        let id = id.into();
        // Endpoints are checked up front so nothing is wired on failure.
        for endpoint in from_ids.iter().chain(to_ids.iter()) {
            self.base.read(endpoint)?;
        }
        self.base.create(id.clone(), label)?;
        self.base
            .connect_to(&vec![Self::RELATION_ID.into()], &vec![id.clone()])?;
        self.base.connect_from(from_ids, &vec![id.clone()])?;
        self.base.connect_to(&vec![id.clone()], to_ids)?;
        Ok(vec![id])
    }

    /// Creates an N:M relation whose id is derived from the endpoint labels
    /// and the relation label.
    ///
    /// Distinct relations with identical label tuples therefore coalesce
    /// into one edge; callers wanting them apart must pass explicit ids.
    pub fn relate_derived(
        &mut self,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        label: &str,
    ) -> Result<Hyperedges, HedgeError> {
        let id = self.derive_relation_id(from_ids, to_ids, label)?;
        self.relate(id, from_ids, to_ids, label)
    }

    /// Creates a relation with an explicit id, borrowing the label of a
    /// template relation.
    pub fn relate_templated(
        &mut self,
        id: impl Into<UniqueId>,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        template_id: &UniqueId,
    ) -> Result<Hyperedges, HedgeError> {
        let label = self.base.read(template_id)?.label().to_string();
        self.relate(id, from_ids, to_ids, &label)
    }

    /// Creates a relation with a derived id, borrowing the label of a
    /// template relation.
    pub fn relate_derived_templated(
        &mut self,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        template_id: &UniqueId,
    ) -> Result<Hyperedges, HedgeError> {
        let label = self.base.read(template_id)?.label().to_string();
        self.relate_derived(from_ids, to_ids, &label)
    }

    /// Finds relations pointing from one of `ids`, filtered by label.
    pub fn relations_from(&self, ids: &Hyperedges, label: &str) -> Hyperedges {
        self.relation_scan(ids, label, |edge, id| edge.is_pointing_from(id))
    }

    /// Finds relations pointing to one of `ids`, filtered by label.
    pub fn relations_to(&self, ids: &Hyperedges, label: &str) -> Hyperedges {
        self.relation_scan(ids, label, |edge, id| edge.is_pointing_to(id))
    }

    /// Finds relations mentioning one of `ids` on either side.
    pub fn relations_of(&self, ids: &Hyperedges, label: &str) -> Hyperedges {
        self.relation_scan(ids, label, |edge, id| {
            edge.is_pointing_from(id) || edge.is_pointing_to(id)
        })
    }

    /// Breadth-first traversal following registered relations only.
    ///
    /// Visited edges land in the result when their label is in
    /// `visit_labels` (empty list: all of them); an edge is crossed only if
    /// it is a relation whose label is in `relation_labels` (empty list:
    /// nothing is followed).
    pub fn traverse(
        &self,
        root: &UniqueId,
        visit_labels: &[String],
        relation_labels: &[String],
        direction: Direction,
    ) -> Hyperedges {
        let relation_members = self.membership(Self::RELATION_ID);
        self.base.traverse(
            root,
            |edge| {
                visit_labels.is_empty()
                    || visit_labels.iter().any(|label| label == edge.label())
            },
            |_, crossing| {
                relation_members.contains(crossing.id())
                    && relation_labels.iter().any(|label| label == crossing.label())
            },
            direction,
        )
    }

    /// Destroys a concept, a relation, or a plain edge.
    ///
    /// Destroying a concept first destroys every relation mentioning it.
    pub fn destroy(&mut self, id: &UniqueId) {
        if self.is_concept(id) {
            for relation in self.relations_of(&vec![id.clone()], "") {
                self.base.destroy(&relation);
            }
        }
        self.base.destroy(id);
    }

    fn derive_relation_id(
        &self,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        label: &str,
    ) -> Result<UniqueId, HedgeError> {
        let mut from_labels = Vec::new();
        for id in from_ids {
            from_labels.push(self.base.read(id)?.label().to_string());
        }
        let mut to_labels = Vec::new();
        for id in to_ids {
            to_labels.push(self.base.read(id)?.label().to_string());
        }
        Ok(derived_id(&from_labels, &to_labels, label))
    }

    fn membership(&self, ur_id: &str) -> BTreeSet<UniqueId> {
        match self.base.get(&ur_id.into()) {
            Some(edge) => edge.pointing_to().iter().cloned().collect(),
            None => BTreeSet::new(),
        }
    }

    fn members_with_label(&self, ur_id: &str, label: &str) -> Hyperedges {
        match self.base.get(&ur_id.into()) {
            Some(edge) => edge
                .pointing_to()
                .iter()
                .filter(|id| self.base.label_matches(id, label))
                .cloned()
                .collect(),
            None => Hyperedges::new(),
        }
    }

    fn relation_scan<P>(&self, ids: &Hyperedges, label: &str, mut mentions: P) -> Hyperedges
    where
        P: FnMut(&hedge_core::Hyperedge, &UniqueId) -> bool,
    {
        let mut result = Hyperedges::new();
        for member in self.members_with_label(Self::RELATION_ID, label) {
            let Some(edge) = self.base.get(&member) else {
                continue;
            };
            if ids.iter().any(|id| mentions(edge, id)) && !result.contains(&member) {
                result.push(member);
            }
        }
        result
    }
}

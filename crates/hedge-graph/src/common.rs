use hedge_core::errors::{ErrorInfo, HedgeError};
use hedge_core::{unite, Hyperedges, UniqueId};

use crate::concepts::Conceptgraph;
use crate::hash::derived_id;
use crate::hypergraph::Hypergraph;
use crate::traversal::Direction;

/// A concept graph equipped with the common vocabulary of subsumption,
/// instantiation, aggregation, composition and topology.
///
/// Seven relation ur-edges are reserved. `FACT-OF` is special: a relation
/// instance is witnessed by a `FACT-OF` edge from the instance to its
/// relation class, but that witness is itself a relation instance of
/// `FACT-OF`. The regress collapses by letting the single `FACT-OF` ur-edge
/// stand for every meta-level witness at once: each witness id is
/// accumulated in the ur-edge's tail set, and the ur-edge contains its own
/// id in both incidence sets.
#[derive(Debug, Clone)]
pub struct CommonConceptGraph {
    base: Conceptgraph,
}

impl Default for CommonConceptGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CommonConceptGraph {
    /// Reserved id of the `FACT-OF` ur-edge (relation instantiation).
    pub const FACT_OF_ID: &'static str = "3";
    /// Reserved id of the `SUBREL-OF` ur-edge (relation subsumption).
    pub const SUBREL_OF_ID: &'static str = "4";
    /// Reserved id of the `IS-A` ur-edge (concept subsumption).
    pub const IS_A_ID: &'static str = "5";
    /// Reserved id of the `HAS-A` ur-edge (aggregation).
    pub const HAS_A_ID: &'static str = "6";
    /// Reserved id of the `PART-OF` ur-edge (composition).
    pub const PART_OF_ID: &'static str = "7";
    /// Reserved id of the `CONNECTS` ur-edge (topology).
    pub const CONNECTS_ID: &'static str = "8";
    /// Reserved id of the `INSTANCE-OF` ur-edge (concept instantiation).
    pub const INSTANCE_OF_ID: &'static str = "9";

    /// Creates an empty common concept graph with all ur-edges installed.
    pub fn new() -> Self {
        Self::from_conceptgraph(Conceptgraph::new())
            .expect("reserved ids are free in an empty graph")
    }

    /// Promotes a concept graph by installing the common relation ur-edges.
    pub fn from_conceptgraph(mut base: Conceptgraph) -> Result<Self, HedgeError> {
        let relation: Hyperedges = vec![Conceptgraph::RELATION_ID.into()];
        let concept: Hyperedges = vec![Conceptgraph::CONCEPT_ID.into()];
        base.relate(Self::FACT_OF_ID, &relation, &relation, "FACT-OF")?;
        base.relate(Self::SUBREL_OF_ID, &relation, &relation, "SUBREL-OF")?;
        base.relate(Self::IS_A_ID, &concept, &concept, "IS-A")?;
        base.relate(Self::HAS_A_ID, &concept, &concept, "HAS-A")?;
        base.relate(Self::PART_OF_ID, &concept, &concept, "PART-OF")?;
        base.relate(Self::CONNECTS_ID, &concept, &concept, "CONNECTS")?;
        base.relate(Self::INSTANCE_OF_ID, &concept, &concept, "INSTANCE-OF")?;
        // The self-loop that encodes all meta-level fact witnesses at once.
        let fact_of = Self::FACT_OF_ID.into();
        let ur_edge = base.base_mut().edge_mut(&fact_of)?;
        ur_edge.points_from(&fact_of);
        ur_edge.points_to(&fact_of);
        Ok(Self { base })
    }

    /// Promotes a plain hypergraph through both layers.
    pub fn from_hypergraph(base: Hypergraph) -> Result<Self, HedgeError> {
        Self::from_conceptgraph(Conceptgraph::from_hypergraph(base)?)
    }

    /// Read access to the concept layer.
    pub fn base(&self) -> &Conceptgraph {
        &self.base
    }

    /// Write access to the concept layer.
    pub fn base_mut(&mut self) -> &mut Conceptgraph {
        &mut self.base
    }

    /// Read access to the underlying hypergraph.
    pub fn graph(&self) -> &Hypergraph {
        self.base.base()
    }

    /// Write access to the underlying hypergraph.
    pub fn graph_mut(&mut self) -> &mut Hypergraph {
        self.base.base_mut()
    }

    /// Declares every relation in `fact_ids` a fact of every relation class
    /// in `class_ids`.
    ///
    /// The witness is a derived-id relation labelled like the `FACT-OF`
    /// ur-edge, pointing from the facts to the classes; its id is also
    /// accumulated in the ur-edge's tail set. Arguments which are not
    /// relations make the call fall through to the empty result.
    pub fn fact_of(
        &mut self,
        fact_ids: &Hyperedges,
        class_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.check_arity("fact-of", fact_ids, class_ids)?;
        let relations = self.base.relations("");
        if fact_ids
            .iter()
            .chain(class_ids.iter())
            .any(|id| !relations.contains(id))
        {
            return Ok(Hyperedges::new());
        }
        let witness =
            self.base
                .relate_derived_templated(fact_ids, class_ids, &Self::FACT_OF_ID.into())?;
        let ur_edge = self.base.base_mut().edge_mut(&Self::FACT_OF_ID.into())?;
        for id in &witness {
            ur_edge.points_from(id);
        }
        Ok(witness)
    }

    /// Creates a relation instance of the relation class `super_id`.
    ///
    /// The instance carries the class label, points from `from_ids` to
    /// `to_ids`, and is immediately declared a fact of its class.
    pub fn relate_from(
        &mut self,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        super_id: &UniqueId,
    ) -> Result<Hyperedges, HedgeError> {
        self.check_arity("relate-from", from_ids, to_ids)?;
        let created = self
            .base
            .relate_derived_templated(from_ids, to_ids, super_id)?;
        self.fact_of(&created, &vec![super_id.clone()])?;
        Ok(created)
    }

    /// Declares the relations in `sub_ids` subrelations of those in `super_ids`.
    pub fn subrelation_of(
        &mut self,
        sub_ids: &Hyperedges,
        super_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.check_arity("subrelation-of", sub_ids, super_ids)?;
        let relations = self.base.relations("");
        if sub_ids
            .iter()
            .chain(super_ids.iter())
            .any(|id| !relations.contains(id))
        {
            return Ok(Hyperedges::new());
        }
        self.relate_from(sub_ids, super_ids, &Self::SUBREL_OF_ID.into())
    }

    /// Declares the concepts in `sub_ids` subclasses of those in `super_ids`.
    pub fn is_a(
        &mut self,
        sub_ids: &Hyperedges,
        super_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.concept_fact("is-a", sub_ids, super_ids, Self::IS_A_ID)
    }

    /// Declares aggregation: every parent has every child.
    pub fn has_a(
        &mut self,
        parent_ids: &Hyperedges,
        child_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.concept_fact("has-a", parent_ids, child_ids, Self::HAS_A_ID)
    }

    /// Declares composition: every part is part of every whole.
    pub fn part_of(
        &mut self,
        part_ids: &Hyperedges,
        whole_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.concept_fact("part-of", part_ids, whole_ids, Self::PART_OF_ID)
    }

    /// Declares topology: every connector connects every interface.
    pub fn connects(
        &mut self,
        connector_ids: &Hyperedges,
        interface_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.concept_fact("connects", connector_ids, interface_ids, Self::CONNECTS_ID)
    }

    /// Declares every individual an instance of every class.
    pub fn instance_of(
        &mut self,
        individual_ids: &Hyperedges,
        class_ids: &Hyperedges,
    ) -> Result<Hyperedges, HedgeError> {
        self.concept_fact("instance-of", individual_ids, class_ids, Self::INSTANCE_OF_ID)
    }

    /// Creates a fresh concept per class in `super_ids` and declares it an
    /// instance of that class.
    ///
    /// An empty label borrows the class label. The concept id is derived
    /// from the label alone, so same-labelled instances coalesce; pass
    /// explicit ids through [`Conceptgraph::create_concept`] to keep them
    /// apart.
    pub fn instantiate_from(
        &mut self,
        super_ids: &Hyperedges,
        label: &str,
    ) -> Result<Hyperedges, HedgeError> {
        if super_ids.is_empty() {
            return Err(arity_violation("instantiate-from"));
        }
        let mut created = Hyperedges::new();
        for super_id in super_ids {
            let class_label = self.graph().read(super_id)?.label().to_string();
            let effective = if label.is_empty() { class_label } else { label.to_string() };
            let id = derived_id::<&str>(&[], &[], &effective);
            self.base.create_concept(id.clone(), &effective)?;
            self.instance_of(&vec![id.clone()], &vec![super_id.clone()])?;
            if !created.contains(&id) {
                created.push(id);
            }
        }
        Ok(created)
    }

    /// Returns the facts of the given relation classes, filtered by label.
    ///
    /// Non-transitive: only direct `FACT-OF` witnesses are consulted.
    pub fn facts_of(&self, class_ids: &Hyperedges, label: &str) -> Hyperedges {
        let fact_label = self.label_of(Self::FACT_OF_ID);
        let mut result = Hyperedges::new();
        for class_id in class_ids {
            for witness in self.base.relations_to(&vec![class_id.clone()], &fact_label) {
                result = unite(&result, &self.graph().from_of(&vec![witness], label));
            }
        }
        result
    }

    /// Returns the given relation classes together with all their transitive
    /// subrelations.
    pub fn subrelations_of(&self, class_ids: &Hyperedges) -> Hyperedges {
        let subrel_label = self.label_of(Self::SUBREL_OF_ID);
        let mut result = Hyperedges::new();
        for class_id in class_ids {
            result = unite(
                &result,
                &self
                    .base
                    .traverse(class_id, &[], &[subrel_label.clone()], Direction::Up),
            );
        }
        result
    }

    /// Transitive closure from `root` along `rel_id` and all its
    /// subrelations.
    ///
    /// Traversal follows edges by *label*: two distinct relation classes
    /// sharing a label are followed alike, which is what makes subrelation
    /// composition work after computing the label cover.
    pub fn transitive_closure(
        &self,
        root: &UniqueId,
        rel_id: &UniqueId,
        label: &str,
        direction: Direction,
    ) -> Hyperedges {
        let mut follow: Vec<String> = Vec::new();
        for id in self.subrelations_of(&vec![rel_id.clone()]) {
            let rel_label = self.label_of(id.as_str());
            if !rel_label.is_empty() && !follow.contains(&rel_label) {
                follow.push(rel_label);
            }
        }
        let visit: Vec<String> = if label.is_empty() {
            Vec::new()
        } else {
            vec![label.to_string()]
        };
        self.base.traverse(root, &visit, &follow, direction)
    }

    /// All transitive subclasses of the given classes (including them).
    pub fn subclasses_of(&self, class_ids: &Hyperedges, label: &str) -> Hyperedges {
        self.closure_over(class_ids, Self::IS_A_ID, label, Direction::Up)
    }

    /// All transitive superclasses of the given classes (including them).
    pub fn superclasses_of(&self, class_ids: &Hyperedges, label: &str) -> Hyperedges {
        self.closure_over(class_ids, Self::IS_A_ID, label, Direction::Down)
    }

    /// All transitive parts of the given wholes (including them).
    pub fn parts_of(&self, whole_ids: &Hyperedges, label: &str) -> Hyperedges {
        self.closure_over(whole_ids, Self::PART_OF_ID, label, Direction::Up)
    }

    /// The direct instances of the given classes.
    pub fn instances_of(&self, class_ids: &Hyperedges, label: &str) -> Hyperedges {
        let mut result = Hyperedges::new();
        for instance_label in self.subrelation_labels(Self::INSTANCE_OF_ID) {
            for class_id in class_ids {
                for fact in self.base.relations_to(&vec![class_id.clone()], &instance_label) {
                    result = unite(&result, &self.graph().from_of(&vec![fact], label));
                }
            }
        }
        result
    }

    /// The direct classes of the given individuals.
    pub fn classes_of(&self, individual_ids: &Hyperedges, label: &str) -> Hyperedges {
        let mut result = Hyperedges::new();
        for instance_label in self.subrelation_labels(Self::INSTANCE_OF_ID) {
            for individual in individual_ids {
                for fact in self
                    .base
                    .relations_from(&vec![individual.clone()], &instance_label)
                {
                    result = unite(&result, &self.graph().to_of(&vec![fact], label));
                }
            }
        }
        result
    }

    /// The direct children of the given parents along `HAS-A` and its
    /// subrelations.
    pub fn children_of(&self, parent_ids: &Hyperedges, label: &str) -> Hyperedges {
        let mut result = Hyperedges::new();
        for has_label in self.subrelation_labels(Self::HAS_A_ID) {
            for parent in parent_ids {
                for relation in self.base.relations_from(&vec![parent.clone()], &has_label) {
                    result = unite(&result, &self.graph().to_of(&vec![relation], label));
                }
            }
        }
        result
    }

    /// Creates a concept with the given id and label. See [`Conceptgraph::create_concept`].
    pub fn create_concept(
        &mut self,
        id: impl Into<UniqueId>,
        label: &str,
    ) -> Result<Hyperedges, HedgeError> {
        self.base.create_concept(id, label)
    }

    /// Creates a concept whose id is derived from its label.
    pub fn concept_from_label(&mut self, label: &str) -> Result<Hyperedges, HedgeError> {
        self.base.concept_from_label(label)
    }

    /// Finds concepts by label.
    pub fn concepts(&self, label: &str) -> Hyperedges {
        self.base.concepts(label)
    }

    /// Finds relations by label.
    pub fn relations(&self, label: &str) -> Hyperedges {
        self.base.relations(label)
    }

    /// Creates an N:M relation class. See [`Conceptgraph::relate`].
    pub fn relate(
        &mut self,
        id: impl Into<UniqueId>,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        label: &str,
    ) -> Result<Hyperedges, HedgeError> {
        self.base.relate(id, from_ids, to_ids, label)
    }

    /// Creates an N:M relation class with a derived id.
    pub fn relate_derived(
        &mut self,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        label: &str,
    ) -> Result<Hyperedges, HedgeError> {
        self.base.relate_derived(from_ids, to_ids, label)
    }

    /// Destroys a concept, relation or plain edge. See [`Conceptgraph::destroy`].
    pub fn destroy(&mut self, id: &UniqueId) {
        self.base.destroy(id);
    }

    fn concept_fact(
        &mut self,
        operation: &str,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
        ur_id: &str,
    ) -> Result<Hyperedges, HedgeError> {
        if from_ids.is_empty() || to_ids.is_empty() {
            return Err(arity_violation(operation));
        }
        let concepts = self.base.concepts("");
        if from_ids
            .iter()
            .chain(to_ids.iter())
            .any(|id| !concepts.contains(id))
        {
            return Ok(Hyperedges::new());
        }
        self.relate_from(from_ids, to_ids, &ur_id.into())
    }

    fn closure_over(
        &self,
        roots: &Hyperedges,
        ur_id: &str,
        label: &str,
        direction: Direction,
    ) -> Hyperedges {
        let rel_id: UniqueId = ur_id.into();
        let mut result = Hyperedges::new();
        for root in roots {
            result = unite(
                &result,
                &self.transitive_closure(root, &rel_id, label, direction),
            );
        }
        result
    }

    fn subrelation_labels(&self, ur_id: &str) -> Vec<String> {
        let mut labels = Vec::new();
        for id in self.subrelations_of(&vec![ur_id.into()]) {
            let label = self.label_of(id.as_str());
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    fn label_of(&self, id: &str) -> String {
        self.graph()
            .get(&id.into())
            .map(|edge| edge.label().to_string())
            .unwrap_or_default()
    }

    fn check_arity(
        &self,
        operation: &str,
        from_ids: &Hyperedges,
        to_ids: &Hyperedges,
    ) -> Result<(), HedgeError> {
        if from_ids.is_empty() || to_ids.is_empty() {
            return Err(arity_violation(operation));
        }
        Ok(())
    }
}

fn arity_violation(operation: &str) -> HedgeError {
    HedgeError::Concept(
        ErrorInfo::new("arity-violation", "operation requires non-empty member sets")
            .with_context("operation", operation),
    )
}

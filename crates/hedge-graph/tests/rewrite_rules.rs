use hedge_core::{Hyperedges, Mapping, UniqueId};
use hedge_graph::{canonical_hash, default_candidates, Hypergraph, SearchSpace};

fn ids(raw: &[&str]) -> Hyperedges {
    raw.iter().map(|id| UniqueId::from(*id)).collect()
}

/// Pattern: two fact witnesses into the same relation class.
fn coalescing_lhs() -> Hypergraph {
    let mut lhs = Hypergraph::new();
    lhs.create("SomeRelation", "").unwrap();
    lhs.create("FirstFact", "").unwrap();
    lhs.create("SecondFact", "").unwrap();
    lhs.create("FACT-OF1", "FACT-OF").unwrap();
    lhs.create("FACT-OF2", "FACT-OF").unwrap();
    lhs.connect_from(&ids(&["FirstFact"]), &ids(&["FACT-OF1"])).unwrap();
    lhs.connect_to(&ids(&["FACT-OF1"]), &ids(&["SomeRelation"])).unwrap();
    lhs.connect_from(&ids(&["SecondFact"]), &ids(&["FACT-OF2"])).unwrap();
    lhs.connect_to(&ids(&["FACT-OF2"]), &ids(&["SomeRelation"])).unwrap();
    lhs
}

/// Replacement: one merged witness carrying both facts.
fn coalescing_rhs() -> Hypergraph {
    let mut rhs = Hypergraph::new();
    rhs.create("SomeRelation", "").unwrap();
    rhs.create("FirstFact", "").unwrap();
    rhs.create("SecondFact", "").unwrap();
    rhs.create("FACT-OF3", "FACT-OF").unwrap();
    rhs.connect_from(&ids(&["FirstFact", "SecondFact"]), &ids(&["FACT-OF3"]))
        .unwrap();
    rhs.connect_to(&ids(&["FACT-OF3"]), &ids(&["SomeRelation"])).unwrap();
    rhs
}

fn coalescing_map() -> Mapping {
    let mut partial = Mapping::identity(&ids(&["SomeRelation", "FirstFact", "SecondFact"]));
    partial.insert("FACT-OF1".into(), "FACT-OF3".into());
    partial.insert("FACT-OF2".into(), "FACT-OF3".into());
    partial
}

/// A relation class with `count` facts, each with its own witness.
fn fact_universe(count: usize) -> Hypergraph {
    let mut graph = Hypergraph::new();
    graph.create("class", "love").unwrap();
    for index in 1..=count {
        let fact = format!("fact-{index}");
        let witness = format!("witness-{index}");
        graph.create(fact.as_str(), "love").unwrap();
        graph.create(witness.as_str(), "FACT-OF").unwrap();
        graph
            .connect_from(&vec![fact.as_str().into()], &vec![witness.as_str().into()])
            .unwrap();
        graph
            .connect_to(&vec![witness.as_str().into()], &ids(&["class"]))
            .unwrap();
    }
    graph
}

fn rewrite_until_quiescent(mut graph: Hypergraph) -> Hypergraph {
    loop {
        let mut space = SearchSpace::new();
        let next = graph
            .rewrite(
                &coalescing_lhs(),
                &coalescing_rhs(),
                &coalescing_map(),
                &mut space,
                default_candidates,
            )
            .unwrap();
        if next.size() == 0 || canonical_hash(&next) == canonical_hash(&graph) {
            return graph;
        }
        graph = next;
    }
}

#[test]
fn one_application_merges_one_pair_of_witnesses() {
    let graph = fact_universe(2);
    let mut space = SearchSpace::new();
    let rewritten = graph
        .rewrite(
            &coalescing_lhs(),
            &coalescing_rhs(),
            &coalescing_map(),
            &mut space,
            default_candidates,
        )
        .unwrap();

    let witnesses = rewritten.find("FACT-OF");
    assert_eq!(witnesses.len(), 1);
    let survivor = rewritten.read(&witnesses[0]).unwrap();
    assert_eq!(
        {
            let mut tails = survivor.pointing_from().clone();
            tails.sort();
            tails
        },
        ids(&["fact-1", "fact-2"])
    );
    assert_eq!(survivor.pointing_to(), &ids(&["class"]));
}

#[test]
fn repeated_application_leaves_a_single_witness() {
    let rewritten = rewrite_until_quiescent(fact_universe(5));

    let witnesses = rewritten.find("FACT-OF");
    assert_eq!(witnesses.len(), 1);
    let survivor = rewritten.read(&witnesses[0]).unwrap();
    assert_eq!(survivor.pointing_from().len(), 5);
    for index in 1..=5 {
        let fact: UniqueId = format!("fact-{index}").as_str().into();
        assert!(survivor.is_pointing_from(&fact));
        assert!(rewritten.exists(&fact));
    }
    assert_eq!(survivor.pointing_to(), &ids(&["class"]));
}

#[test]
fn no_match_yields_the_empty_graph() {
    let graph = fact_universe(1); // a single witness never matches the pair pattern
    let mut space = SearchSpace::new();
    let rewritten = graph
        .rewrite(
            &coalescing_lhs(),
            &coalescing_rhs(),
            &coalescing_map(),
            &mut space,
            default_candidates,
        )
        .unwrap();
    assert_eq!(rewritten.size(), 0);
}

#[test]
fn unmapped_pattern_edges_are_deleted() {
    let mut host = Hypergraph::new();
    host.create("n", "node").unwrap();
    host.create("stale", "marker").unwrap();
    host.connect_to(&ids(&["stale"]), &ids(&["n"])).unwrap();

    let mut lhs = Hypergraph::new();
    lhs.create("m", "marker").unwrap();

    let rhs = Hypergraph::new();
    let partial = Mapping::new();

    let mut space = SearchSpace::new();
    let rewritten = host
        .rewrite(&lhs, &rhs, &partial, &mut space, default_candidates)
        .unwrap();
    assert!(!rewritten.exists(&"stale".into()));
    assert!(rewritten.exists(&"n".into()));
}

#[test]
fn replacement_edges_outside_the_image_are_created_and_wired() {
    let mut host = Hypergraph::new();
    host.create("a", "A").unwrap();

    let mut lhs = Hypergraph::new();
    lhs.create("x", "A").unwrap();

    let mut rhs = Hypergraph::new();
    rhs.create("x", "A").unwrap();
    rhs.create("tag", "TAG").unwrap();
    rhs.connect_from(&ids(&["x"]), &ids(&["tag"])).unwrap();

    let partial = Mapping::identity(&ids(&["x"]));

    let mut space = SearchSpace::new();
    let rewritten = host
        .rewrite(&lhs, &rhs, &partial, &mut space, default_candidates)
        .unwrap();
    assert!(rewritten.exists(&"tag".into()));
    let tag = rewritten.read(&"tag".into()).unwrap();
    assert_eq!(tag.pointing_from(), &ids(&["a"]));
}

#[test]
fn fresh_ids_avoid_collisions_deterministically() {
    let mut host = Hypergraph::new();
    host.create("a", "A").unwrap();
    host.create("tag", "occupied").unwrap();

    let mut lhs = Hypergraph::new();
    lhs.create("x", "A").unwrap();

    let mut rhs = Hypergraph::new();
    rhs.create("x", "A").unwrap();
    rhs.create("tag", "TAG").unwrap();
    rhs.connect_from(&ids(&["x"]), &ids(&["tag"])).unwrap();

    let partial = Mapping::identity(&ids(&["x"]));
    let mut space = SearchSpace::new();
    let rewritten = host
        .rewrite(&lhs, &rhs, &partial, &mut space, default_candidates)
        .unwrap();

    assert_eq!(rewritten.read(&"tag".into()).unwrap().label(), "occupied");
    let fresh = rewritten.read(&"tag:1".into()).unwrap();
    assert_eq!(fresh.label(), "TAG");
    assert_eq!(fresh.pointing_from(), &ids(&["a"]));
}

#[test]
fn nonempty_replacement_labels_relabel_their_image() {
    let mut host = Hypergraph::new();
    host.create("a", "old").unwrap();

    let mut lhs = Hypergraph::new();
    lhs.create("x", "old").unwrap();
    let mut rhs = Hypergraph::new();
    rhs.create("y", "new").unwrap();
    let mut partial = Mapping::new();
    partial.insert("x".into(), "y".into());

    let mut space = SearchSpace::new();
    let rewritten = host
        .rewrite(&lhs, &rhs, &partial, &mut space, default_candidates)
        .unwrap();
    assert_eq!(rewritten.read(&"a".into()).unwrap().label(), "new");
}

#[test]
fn partial_maps_must_stay_inside_the_patterns() {
    let host = fact_universe(2);
    let mut partial = coalescing_map();
    partial.insert("unknown".into(), "FACT-OF3".into());

    let mut space = SearchSpace::new();
    let err = host
        .rewrite(
            &coalescing_lhs(),
            &coalescing_rhs(),
            &partial,
            &mut space,
            default_candidates,
        )
        .unwrap_err();
    assert_eq!(err.code(), "partial-map-unknown-id");
}

#[test]
fn the_search_space_iterates_distinct_applications() {
    // Reusing one search space applies the rule to the next match without
    // revisiting the first one.
    let graph = fact_universe(3);
    let mut space = SearchSpace::new();
    let first = graph
        .rewrite(
            &coalescing_lhs(),
            &coalescing_rhs(),
            &coalescing_map(),
            &mut space,
            default_candidates,
        )
        .unwrap();
    assert!(first.size() > 0);
    let second = graph
        .rewrite(
            &coalescing_lhs(),
            &coalescing_rhs(),
            &coalescing_map(),
            &mut space,
            default_candidates,
        )
        .unwrap();
    assert!(second.size() > 0);
    assert_ne!(canonical_hash(&first), canonical_hash(&second));
}

use hedge_core::{Hyperedges, Mapping, UniqueId};
use hedge_graph::{default_candidates, CommonConceptGraph, Hypergraph, SearchSpace};

fn ids(raw: &[&str]) -> Hyperedges {
    raw.iter().map(|id| UniqueId::from(*id)).collect()
}

/// Person class with Alice and Bob loving each other.
fn love_universe() -> (CommonConceptGraph, Hyperedges) {
    let mut graph = CommonConceptGraph::new();
    graph.create_concept("PERSON", "Person").unwrap();
    let love = graph
        .relate_derived(&ids(&["PERSON"]), &ids(&["PERSON"]), "love")
        .unwrap();
    graph.create_concept("ALICE", "Alice").unwrap();
    graph.create_concept("BOB", "Bob").unwrap();
    graph.instance_of(&ids(&["ALICE"]), &ids(&["PERSON"])).unwrap();
    graph.instance_of(&ids(&["BOB"]), &ids(&["PERSON"])).unwrap();
    let mut facts = graph
        .relate_from(&ids(&["ALICE"]), &ids(&["BOB"]), &love[0])
        .unwrap();
    facts.extend(
        graph
            .relate_from(&ids(&["BOB"]), &ids(&["ALICE"]), &love[0])
            .unwrap(),
    );
    (graph, facts)
}

/// Two anonymous persons with a love fact between them.
fn love_query() -> Hypergraph {
    let mut query = Hypergraph::new();
    query.create("*", "").unwrap();
    query.create("**", "").unwrap();
    query.create("personas", "Person").unwrap();
    query.create("inst1", "INSTANCE-OF").unwrap();
    query.create("inst2", "INSTANCE-OF").unwrap();
    query.create("qlove", "love").unwrap();
    query.connect_from(&ids(&["*"]), &ids(&["inst1"])).unwrap();
    query.connect_to(&ids(&["inst1"]), &ids(&["personas"])).unwrap();
    query.connect_from(&ids(&["**"]), &ids(&["inst2"])).unwrap();
    query.connect_to(&ids(&["inst2"]), &ids(&["personas"])).unwrap();
    query.connect_from(&ids(&["*"]), &ids(&["qlove"])).unwrap();
    query.connect_to(&ids(&["qlove"]), &ids(&["**"])).unwrap();
    query
}

fn wildcard_assignment(mapping: &Mapping) -> (UniqueId, UniqueId) {
    let first = mapping.targets_of(&"*".into());
    let second = mapping.targets_of(&"**".into());
    (first[0].clone(), second[0].clone())
}

#[test]
fn matching_enumerates_exactly_the_embeddings() {
    let (universe, facts) = love_universe();
    let query = love_query();
    let data = universe.graph();

    let mut space = SearchSpace::new();
    let mut matches = Vec::new();
    loop {
        let mapping = data.next_match(&query, &mut space, default_candidates);
        if mapping.is_empty() {
            break;
        }
        matches.push(mapping);
    }
    assert_eq!(matches.len(), 2);
    assert!(space.is_exhausted());

    let mut assignments: Vec<(UniqueId, UniqueId)> =
        matches.iter().map(wildcard_assignment).collect();
    assignments.sort();
    assert_eq!(
        assignments,
        vec![
            ("ALICE".into(), "BOB".into()),
            ("BOB".into(), "ALICE".into())
        ]
    );
    for mapping in &matches {
        let image = mapping.targets_of(&"qlove".into());
        assert!(facts.contains(&image[0]));
        assert_eq!(mapping.targets_of(&"personas".into()), ids(&["PERSON"]));
    }
}

#[test]
fn exhausted_search_stays_exhausted() {
    let (universe, _) = love_universe();
    let query = love_query();
    let data = universe.graph();

    let mut space = SearchSpace::new();
    while !data.next_match(&query, &mut space, default_candidates).is_empty() {}
    assert!(data
        .next_match(&query, &mut space, default_candidates)
        .is_empty());
}

#[test]
fn mappings_are_injective_and_incidence_preserving() {
    let (universe, _) = love_universe();
    let query = love_query();
    let data = universe.graph();

    let mut space = SearchSpace::new();
    let mapping = data.next_match(&query, &mut space, default_candidates);
    assert_eq!(mapping.len(), query.size());

    for (query_id, data_id) in mapping.iter() {
        // Injectivity: no other query id shares the image.
        assert_eq!(mapping.sources_of(data_id), vec![query_id.clone()]);
        let query_edge = query.read(query_id).unwrap();
        let data_edge = data.read(data_id).unwrap();
        for tail in query_edge.pointing_from() {
            let image = &mapping.targets_of(tail)[0];
            assert!(data_edge.is_pointing_from(image));
        }
        for head in query_edge.pointing_to() {
            let image = &mapping.targets_of(head)[0];
            assert!(data_edge.is_pointing_to(image));
        }
    }
}

#[test]
fn existing_query_ids_pin_their_candidates() {
    let mut data = Hypergraph::new();
    data.create("a", "X").unwrap();
    data.create("b", "X").unwrap();

    let mut query = Hypergraph::new();
    query.create("a", "X").unwrap();

    let candidates = default_candidates(&data, query.read(&"a".into()).unwrap());
    assert_eq!(candidates, ids(&["a"]));
}

#[test]
fn candidates_are_filtered_by_degree() {
    let mut data = Hypergraph::new();
    data.create("narrow", "X").unwrap();
    data.create("wide", "X").unwrap();
    data.create("t1", "T").unwrap();
    data.create("t2", "T").unwrap();
    data.connect_from(&ids(&["t1", "t2"]), &ids(&["wide"])).unwrap();
    data.connect_from(&ids(&["t1"]), &ids(&["narrow"])).unwrap();

    let mut query = Hypergraph::new();
    query.create("q", "X").unwrap();
    query.create("p", "P").unwrap();
    query.create("r", "P").unwrap();
    query.connect_from(&ids(&["p", "r"]), &ids(&["q"])).unwrap();

    let candidates = default_candidates(&data, query.read(&"q".into()).unwrap());
    assert_eq!(candidates, ids(&["wide"]));
}

#[test]
fn a_pushed_mapping_is_yielded_again() {
    let (universe, _) = love_universe();
    let query = love_query();
    let data = universe.graph();

    let mut space = SearchSpace::new();
    let first = data.next_match(&query, &mut space, default_candidates);
    assert!(!first.is_empty());
    space.push(first.clone());
    let again = data.next_match(&query, &mut space, default_candidates);
    assert_eq!(again, first);
}

use hedge_core::{ErrorInfo, HedgeError, Hyperedge, Mapping};

#[test]
fn hyperedge_roundtrips_through_json() {
    let mut edge = Hyperedge::new("23", "Edge with id 23");
    edge.points_from(&"1".into());
    edge.points_to(&"2".into());
    edge.set_property("weight-class", "light");

    let json = serde_json::to_string(&edge).unwrap();
    let restored: Hyperedge = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, edge);
    assert_eq!(restored.label(), "Edge with id 23");
    assert_eq!(restored.property("weight-class"), Some("light"));
}

#[test]
fn mapping_roundtrips_through_json() {
    let mut m = Mapping::new();
    m.insert("a".into(), "x".into());
    m.insert("a".into(), "y".into());
    let json = serde_json::to_string(&m).unwrap();
    let restored: Mapping = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, m);
}

#[test]
fn errors_roundtrip_through_json() {
    let err = HedgeError::Graph(
        ErrorInfo::new("duplicate-id", "id already taken").with_context("id", "23"),
    );
    let json = serde_json::to_string(&err).unwrap();
    let restored: HedgeError = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, err);
}

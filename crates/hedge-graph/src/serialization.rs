use hedge_core::errors::{ErrorInfo, HedgeError};
use hedge_core::Hyperedge;
use serde::{Deserialize, Serialize};

use crate::hypergraph::Hypergraph;

// Field declaration order is the emission order and must stay lexicographic.
#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    id: String,
    label: String,
    #[serde(rename = "pointingFrom", default, skip_serializing_if = "Vec::is_empty")]
    pointing_from: Vec<String>,
    #[serde(rename = "pointingTo", default, skip_serializing_if = "Vec::is_empty")]
    pointing_to: Vec<String>,
}

impl EdgeRecord {
    fn from_edge(edge: &Hyperedge) -> Self {
        Self {
            id: edge.id().to_string(),
            label: edge.label().to_string(),
            pointing_from: edge.pointing_from().iter().map(|id| id.to_string()).collect(),
            pointing_to: edge.pointing_to().iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Serializes the graph to its durable textual representation.
///
/// One YAML mapping per edge with the keys `id`, `label` and the optional
/// `pointingFrom`/`pointingTo` sequences, keys in lexicographic order; the
/// outer sequence follows the graph's ascending id order. The output is
/// byte-stable under repeated saves of the same graph.
pub fn graph_to_yaml(graph: &Hypergraph) -> Result<String, HedgeError> {
    let records: Vec<EdgeRecord> = graph.iter().map(EdgeRecord::from_edge).collect();
    serde_yaml::to_string(&records)
        .map_err(|err| HedgeError::Serde(ErrorInfo::new("serialize-yaml", err.to_string())))
}

/// Restores a graph from its textual representation.
///
/// Loading is two-pass: every edge is created first, then every link is
/// wired. A duplicate id carrying a differing label and a link to a missing
/// id are both hard errors.
pub fn graph_from_yaml(text: &str) -> Result<Hypergraph, HedgeError> {
    let records: Vec<EdgeRecord> = serde_yaml::from_str(text)
        .map_err(|err| HedgeError::Serde(ErrorInfo::new("deserialize-yaml", err.to_string())))?;

    let mut graph = Hypergraph::new();
    for record in &records {
        graph.create(record.id.as_str(), &record.label)?;
    }
    for record in &records {
        let id = vec![record.id.as_str().into()];
        if !record.pointing_to.is_empty() {
            let heads = record.pointing_to.iter().map(|raw| raw.as_str().into()).collect();
            graph.connect_to(&id, &heads)?;
        }
        if !record.pointing_from.is_empty() {
            let tails = record.pointing_from.iter().map(|raw| raw.as_str().into()).collect();
            graph.connect_from(&tails, &id)?;
        }
    }
    Ok(graph)
}

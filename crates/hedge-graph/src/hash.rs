use hedge_core::UniqueId;
use sha2::{Digest, Sha256};

use crate::hypergraph::Hypergraph;

/// Derives a convenience id from endpoint labels and an edge label.
///
/// The digest covers the plain concatenation `from-labels ∥ to-labels ∥
/// label`, so identical label tuples deliberately collide: distinct
/// relations sharing all labels collapse into one edge unless the caller
/// passes explicit ids.
pub fn derived_id<S: AsRef<str>>(from_labels: &[S], to_labels: &[S], label: &str) -> UniqueId {
    let mut hasher = Sha256::new();
    for from_label in from_labels {
        hasher.update(from_label.as_ref().as_bytes());
    }
    for to_label in to_labels {
        hasher.update(to_label.as_ref().as_bytes());
    }
    hasher.update(label.as_bytes());
    UniqueId::new(format!("{:x}", hasher.finalize()))
}

/// Derives a convenience id for a concept from its label alone.
pub fn derived_concept_id(label: &str) -> UniqueId {
    derived_id::<&str>(&[], &[], label)
}

/// Computes the canonical structural hash of a graph.
///
/// The digest covers every edge in ascending id order with its id, label and
/// incidence sets, all length-prefixed. Two graphs with equal ids, labels
/// and incidence sets hash alike, which makes the hash suitable both for
/// round-trip checks and for quiescence detection during repeated rewriting.
pub fn canonical_hash(graph: &Hypergraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.size() as u64).to_le_bytes());
    for edge in graph.iter() {
        update_str(&mut hasher, edge.id().as_str());
        update_str(&mut hasher, edge.label());
        update_ids(&mut hasher, edge.pointing_from());
        update_ids(&mut hasher, edge.pointing_to());
    }
    format!("{:x}", hasher.finalize())
}

fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_ids(hasher: &mut Sha256, ids: &[UniqueId]) {
    hasher.update((ids.len() as u64).to_le_bytes());
    for id in ids {
        update_str(hasher, id.as_str());
    }
}

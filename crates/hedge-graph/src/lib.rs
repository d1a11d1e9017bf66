#![deny(missing_docs)]
#![doc = include_str!("../docs/graph-api.md")]

mod common;
mod concepts;
mod hash;
mod hypergraph;
mod matching;
mod rewrite;
mod serialization;
mod traversal;

pub use common::CommonConceptGraph;
pub use concepts::Conceptgraph;
pub use hash::{canonical_hash, derived_concept_id, derived_id};
pub use hypergraph::Hypergraph;
pub use matching::{default_candidates, SearchSpace};
pub use serialization::{graph_from_yaml, graph_to_yaml};
pub use traversal::Direction;

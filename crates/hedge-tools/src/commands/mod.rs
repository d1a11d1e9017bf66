pub mod merge;
pub mod query;
pub mod simplify;

use std::error::Error;
use std::fs;
use std::path::Path;

use hedge_graph::{graph_from_yaml, graph_to_yaml, Hypergraph};

pub fn load_graph(path: &Path) -> Result<Hypergraph, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    graph_from_yaml(&text).map_err(|err| err.into())
}

/// Serializes fully before touching the output path, so a failing encode
/// never leaves partial output behind.
pub fn write_graph(path: &Path, graph: &Hypergraph) -> Result<(), Box<dyn Error>> {
    let text = graph_to_yaml(graph)?;
    fs::write(path, text).map_err(|err| format!("cannot write {}: {err}", path.display()))?;
    Ok(())
}

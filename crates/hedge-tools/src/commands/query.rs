use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hedge_core::Mapping;
use hedge_graph::{default_candidates, Hypergraph, SearchSpace};
use serde_json::json;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Data graph to be searched.
    pub data: PathBuf,
    /// Query graph to be found in the data graph.
    pub query: PathBuf,
    /// Enumerate all matches instead of the first one.
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: &QueryArgs) -> Result<i32, Box<dyn Error>> {
    let data = crate::commands::load_graph(&args.data)?;
    let query = crate::commands::load_graph(&args.query)?;

    let mut space = SearchSpace::new();
    let mut matches = 0;
    loop {
        let mapping = data.next_match(&query, &mut space, default_candidates);
        if mapping.is_empty() {
            break;
        }
        print_match(&query, &data, &mapping);
        matches += 1;
        if !args.all {
            break;
        }
    }

    if matches == 0 {
        eprintln!("no match found");
    }
    Ok(matches)
}

fn print_match(query: &Hypergraph, data: &Hypergraph, mapping: &Mapping) {
    let pairs: Vec<serde_json::Value> = mapping
        .iter()
        .map(|(query_id, data_id)| {
            json!({
                "query": { "id": query_id.as_str(), "label": label_of(query, query_id) },
                "data": { "id": data_id.as_str(), "label": label_of(data, data_id) },
            })
        })
        .collect();
    println!("{}", json!({ "match": pairs }));
}

fn label_of(graph: &Hypergraph, id: &hedge_core::UniqueId) -> String {
    graph
        .get(id)
        .map(|edge| edge.label().to_string())
        .unwrap_or_default()
}

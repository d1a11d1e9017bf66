use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hedge_graph::Hypergraph;

use crate::commands::{load_graph, write_graph};

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// First input graph; its labels win on shared ids.
    pub left: PathBuf,
    /// Second input graph.
    pub right: PathBuf,
    /// Output path for the merged graph.
    pub out: PathBuf,
}

pub fn run(args: &MergeArgs) -> Result<i32, Box<dyn Error>> {
    let left = load_graph(&args.left)?;
    let right = load_graph(&args.right)?;
    let merged = Hypergraph::merge(&left, &right);
    write_graph(&args.out, &merged)?;
    Ok(0)
}

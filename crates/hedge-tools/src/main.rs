use clap::{Parser, Subcommand};
use commands::{
    merge::{self, MergeArgs},
    query::{self, QueryArgs},
    simplify::{self, SimplifyArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "hedge", about = "Generalized hypergraph tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge two graphs into one.
    Merge(MergeArgs),
    /// Query a data graph with a query graph via subgraph isomorphism.
    Query(QueryArgs),
    /// Simplify a common concept graph using graph rewriting.
    Simplify(SimplifyArgs),
}

fn main() {
    let cli = Cli::parse();
    let outcome = match &cli.command {
        Command::Merge(args) => merge::run(args),
        Command::Query(args) => query::run(args),
        Command::Simplify(args) => simplify::run(args),
    };
    match outcome {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

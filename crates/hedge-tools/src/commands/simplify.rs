use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hedge_core::{Hyperedges, Mapping, UniqueId};
use hedge_graph::{canonical_hash, default_candidates, Hypergraph, SearchSpace};

use crate::commands::{load_graph, write_graph};

#[derive(Args, Debug)]
pub struct SimplifyArgs {
    /// Input common concept graph.
    pub input: PathBuf,
    /// Output path for the simplified graph.
    pub out: PathBuf,
    /// Re-apply each rule until quiescent instead of once.
    #[arg(long)]
    pub all: bool,
}

struct CoalescingRule {
    lhs: Hypergraph,
    rhs: Hypergraph,
    partial: Mapping,
}

/// Two parallel witnesses of `link_label` into one shared class collapse
/// into a single witness carrying both tails.
fn coalescing_rule(link_label: &str) -> Result<CoalescingRule, Box<dyn Error>> {
    fn ids(raw: &[&str]) -> Hyperedges {
        raw.iter().map(|id| UniqueId::from(*id)).collect()
    }

    let mut lhs = Hypergraph::new();
    lhs.create("SomeClass", "")?;
    lhs.create("First", "")?;
    lhs.create("Second", "")?;
    lhs.create("Link1", link_label)?;
    lhs.create("Link2", link_label)?;
    lhs.connect_from(&ids(&["First"]), &ids(&["Link1"]))?;
    lhs.connect_to(&ids(&["Link1"]), &ids(&["SomeClass"]))?;
    lhs.connect_from(&ids(&["Second"]), &ids(&["Link2"]))?;
    lhs.connect_to(&ids(&["Link2"]), &ids(&["SomeClass"]))?;

    let mut rhs = Hypergraph::new();
    rhs.create("SomeClass", "")?;
    rhs.create("First", "")?;
    rhs.create("Second", "")?;
    rhs.create("Link3", link_label)?;
    rhs.connect_from(&ids(&["First", "Second"]), &ids(&["Link3"]))?;
    rhs.connect_to(&ids(&["Link3"]), &ids(&["SomeClass"]))?;

    let mut partial = Mapping::identity(&ids(&["SomeClass", "First", "Second"]));
    partial.insert("Link1".into(), "Link3".into());
    partial.insert("Link2".into(), "Link3".into());

    Ok(CoalescingRule { lhs, rhs, partial })
}

fn apply_rule(
    graph: Hypergraph,
    rule: &CoalescingRule,
    all: bool,
) -> Result<(Hypergraph, usize), Box<dyn Error>> {
    let mut current = graph;
    let mut applications = 0;
    loop {
        let mut space = SearchSpace::new();
        let next = current.rewrite(
            &rule.lhs,
            &rule.rhs,
            &rule.partial,
            &mut space,
            default_candidates,
        )?;
        if next.size() == 0 || canonical_hash(&next) == canonical_hash(&current) {
            break;
        }
        current = next;
        applications += 1;
        if !all {
            break;
        }
    }
    Ok((current, applications))
}

pub fn run(args: &SimplifyArgs) -> Result<i32, Box<dyn Error>> {
    let graph = load_graph(&args.input)?;

    let mut simplified = graph;
    let mut applications = 0;
    for link_label in ["FACT-OF", "INSTANCE-OF"] {
        let rule = coalescing_rule(link_label)?;
        let (next, count) = apply_rule(simplified, &rule, args.all)?;
        simplified = next;
        applications += count;
    }

    if applications == 0 {
        return Err("no simplification possible".into());
    }
    write_graph(&args.out, &simplified)?;
    eprintln!("applied {applications} rewrite(s)");
    Ok(0)
}

//! Estimate PageRank on the small link graph from the Wikipedia PageRank article.
//!
//! ```bash
//! cargo run --example wiki
//! ```

use walkrank::{AdjacencyList, Counted, Graph, Node, WalkConfig};

const LINKS: &[(&str, &str)] = &[
    ("b", "c"),
    ("c", "b"),
    ("d", "a"),
    ("d", "b"),
    ("e", "d"),
    ("e", "b"),
    ("e", "f"),
    ("f", "b"),
    ("f", "e"),
    ("v", "e"),
    ("v", "b"),
    ("w", "e"),
    ("w", "b"),
    ("x", "e"),
    ("x", "b"),
    ("y", "e"),
    ("z", "e"),
];

fn main() -> walkrank::Result<()> {
    println!("Monte Carlo PageRank");
    println!("====================\n");

    let pages: Vec<Counted<&str>> = {
        let mut names: Vec<&str> = Vec::new();
        for &(from, to) in LINKS {
            for name in [from, to] {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names.into_iter().map(Counted::new).collect()
    };
    let page = |name: &str| pages.iter().find(|p| *p.item() == name);

    let mut adj = AdjacencyList::with_capacity(pages.len());
    for &(from, to) in LINKS {
        if let (Some(from), Some(to)) = (page(from), page(to)) {
            adj.add_edge(from, to);
        }
    }

    let mut graph = Graph::from_adjacency(31337, adj);
    let config = WalkConfig::new(0.15, 2_000);
    let run = graph.calculate_checked(config)?;

    println!("Configuration:");
    println!("  jump probability: {:.2}", config.jump_probability);
    println!("  rounds per node:  {}", config.rounds_per_node);
    println!("  walks: {}  visits: {}\n", run.walks, run.steps);

    println!("{:<6} {:>10} {:>8} {:>8}", "page", "visits", "PR", "PR*N");
    // Every page, including any the walks never reached.
    let mut ranked: Vec<(&Counted<&str>, f64)> =
        graph.nodes().iter().copied().zip(graph.scores(true)?).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (node, score) in ranked {
        let raw = graph.pagerank(&node, false)?;
        println!("{:<6} {:>10} {:>8.4} {:>8.3}", node.item(), node.traversals(), score, raw);
    }

    Ok(())
}

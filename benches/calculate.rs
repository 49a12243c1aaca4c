//! Benchmarks for walk calculation and score queries.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::hint::black_box;
use walkrank::{AdjacencyList, Counted, EdgeResolver, Graph, WalkConfig};

fn ring(nodes: &[Counted<usize>]) -> AdjacencyList<&Counted<usize>> {
    let n = nodes.len();
    let mut adj = AdjacencyList::with_capacity(n);
    for i in 0..n {
        adj.add_edge(&nodes[i], &nodes[(i + 1) % n]);
        adj.add_edge(&nodes[i], &nodes[(i + n - 1) % n]);
    }
    adj
}

/// Preferential attachment graph (Barabási–Albert) with `m` directed edges per new node,
/// pointing at existing nodes proportional to degree, plus back-links.
///
/// Heavy-tailed in-degree is closer to link graphs than a ring.
fn barabasi_albert(
    nodes: &[Counted<usize>],
    m: usize,
    seed: u64,
) -> AdjacencyList<&Counted<usize>> {
    let n = nodes.len();
    assert!(n > m && m >= 1);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut adj = AdjacencyList::with_capacity(n);
    let mut targets: Vec<usize> = Vec::new();

    for i in 0..=m {
        adj.add_node(&nodes[i]);
        for j in 0..=m {
            if i != j {
                adj.add_edge(&nodes[i], &nodes[j]);
                targets.push(j);
            }
        }
    }
    for v in (m + 1)..n {
        let mut chosen: Vec<usize> = Vec::with_capacity(m);
        while chosen.len() < m {
            let u = targets[rng.random_range(0..targets.len())];
            if !chosen.contains(&u) {
                chosen.push(u);
            }
        }
        for &u in &chosen {
            adj.add_edge(&nodes[v], &nodes[u]);
            adj.add_edge(&nodes[u], &nodes[v]);
            targets.push(u);
            targets.push(v);
        }
    }
    adj
}

fn owned_resolver<'a, 'b>(
    adj: &'b AdjacencyList<&'a Counted<usize>>,
) -> impl Fn(&&'a Counted<usize>) -> Vec<&'a Counted<usize>> + 'b {
    move |node| EdgeResolver::outlinks(adj, node).into_owned()
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");

    for n in [1_000usize, 10_000] {
        let nodes: Vec<Counted<usize>> = (0..n).map(Counted::new).collect();
        let graphs = [("ring", ring(&nodes)), ("ba_m4", barabasi_albert(&nodes, 4, 123))];
        let cfg = WalkConfig::new(0.15, 2);

        for (name, adj) in graphs {
            group.bench_with_input(BenchmarkId::new(format!("{name}/adjacency"), n), &n, |b, _| {
                let mut g = Graph::from_adjacency(123, adj.clone());
                b.iter(|| black_box(g.calculate_run(black_box(cfg))))
            });

            group.bench_with_input(BenchmarkId::new(format!("{name}/closure"), n), &n, |b, _| {
                let mut g = Graph::new(123, owned_resolver(&adj), adj.nodes().to_vec());
                b.iter(|| black_box(g.calculate_run(black_box(cfg))))
            });
        }
    }

    group.finish();
}

fn bench_scores(c: &mut Criterion) {
    let nodes: Vec<Counted<usize>> = (0..10_000).map(Counted::new).collect();
    let mut g = Graph::from_adjacency(7, ring(&nodes));
    g.calculate(0.15, 2);

    c.bench_function("scores/10000", |b| {
        b.iter(|| black_box(g.scores(black_box(true))))
    });
    c.bench_function("top_k/10000/k10", |b| {
        b.iter(|| black_box(g.top_k(black_box(10), true).map(|v| v.len())))
    });
}

criterion_group!(benches, bench_calculate, bench_scores);
criterion_main!(benches);

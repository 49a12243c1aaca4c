//! Monte Carlo walk engine.
//!
//! Every starter node launches `rounds_per_node` walks. A walk visits its current node,
//! then stops with probability `jump_probability`; otherwise it follows a uniformly chosen
//! outlink, or stops at a dead end. Visit counts live on the nodes themselves and only
//! ever grow, so a second [`Graph::calculate`] after adding edges refines the estimate
//! instead of starting over.
//!
//! Edge removal is not supported: only aggregate counts are kept, not walk history, so
//! there is nothing to subtract.

use std::cell::OnceCell;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::graph::{AdjacencyList, EdgeResolver};
use crate::node::Node;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkConfig {
    /// Per-step termination probability, compared with `<` against a uniform `[0, 1)` draw.
    ///
    /// `0.0` never jumps (walks end only at dead ends); `1.0` stops every walk after its
    /// first visit.
    pub jump_probability: f64,
    pub rounds_per_node: usize,
    /// Hard cap on visits per walk. `None` leaves walks bounded only by the jump draw and
    /// dead ends.
    pub max_steps: Option<usize>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self { jump_probability: 0.15, rounds_per_node: 100, max_steps: None }
    }
}

impl WalkConfig {
    pub fn new(jump_probability: f64, rounds_per_node: usize) -> Self {
        Self { jump_probability, rounds_per_node, max_steps: None }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.jump_probability.is_finite() || !(0.0..=1.0).contains(&self.jump_probability) {
            return Err(Error::InvalidParameter(format!(
                "jump_probability must be in [0, 1] (got {})",
                self.jump_probability
            )));
        }
        if self.rounds_per_node == 0 {
            return Err(Error::InvalidParameter(
                "rounds_per_node must be >= 1".to_string(),
            ));
        }
        if self.max_steps == Some(0) {
            return Err(Error::InvalidParameter(
                "max_steps must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// True when no jump can ever fire and nothing caps a walk, so only dead ends end it.
    ///
    /// NaN counts: `u < NaN` is always false.
    pub fn jumps_disabled_without_cap(&self) -> bool {
        (self.jump_probability.is_nan() || self.jump_probability <= 0.0) && self.max_steps.is_none()
    }
}

/// What one calculation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkRun {
    /// Starter nodes that launched walks.
    pub starters: usize,
    pub walks: u64,
    /// Total visits recorded (one per `traverse()` call).
    pub steps: u64,
    /// Walks cut off by `max_steps`.
    pub truncated: u64,
}

/// Walk engine over a caller-supplied node view and edge resolver.
///
/// `H` is a node handle (`&T`, `Arc<T>`, ...); the caller keeps ownership of the node
/// objects and their counters. The RNG is private to the instance: run independent
/// instances on separate threads for parallelism, never one instance from several.
pub struct Graph<H, E> {
    nodes: Vec<H>,
    resolver: E,
    rng: ChaCha8Rng,
    jump_probability: f64,
    calculated: bool,
    pub(crate) total: OnceCell<u64>,
}

impl<H, E> Graph<H, E>
where
    H: Node + Clone,
    E: EdgeResolver<H>,
{
    pub fn new(seed: u64, resolver: E, nodes: impl IntoIterator<Item = H>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            resolver,
            rng: ChaCha8Rng::seed_from_u64(seed),
            jump_probability: 0.0,
            calculated: false,
            total: OnceCell::new(),
        }
    }

    /// Append a node to the view. Takes effect from the next calculation.
    pub fn push_node(&mut self, node: H) {
        self.nodes.push(node);
        self.total = OnceCell::new();
    }

    pub fn extend_nodes(&mut self, nodes: impl IntoIterator<Item = H>) {
        self.nodes.extend(nodes);
        self.total = OnceCell::new();
    }

    pub fn nodes(&self) -> &[H] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn resolver(&self) -> &E {
        &self.resolver
    }

    pub fn is_calculated(&self) -> bool {
        self.calculated
    }

    /// Jump probability of the most recent calculation (`0.0` before any).
    pub fn jump_probability(&self) -> f64 {
        self.jump_probability
    }

    /// Run `rounds_per_node` walks from every starter node, in view order.
    ///
    /// Counts accumulate on top of earlier calls. With `jump_probability == 0.0` on a
    /// graph without dead ends this never returns; use [`calculate_run`](Self::calculate_run)
    /// with `max_steps` if that can happen.
    pub fn calculate(&mut self, jump_probability: f64, rounds_per_node: usize) {
        self.calculate_run(WalkConfig::new(jump_probability, rounds_per_node));
    }

    /// Validate `config`, then calculate. An invalid config leaves the graph untouched.
    pub fn calculate_checked(&mut self, config: WalkConfig) -> Result<WalkRun> {
        config.validate()?;
        Ok(self.calculate_run(config))
    }

    pub fn calculate_run(&mut self, config: WalkConfig) -> WalkRun {
        self.jump_probability = config.jump_probability;
        if config.jumps_disabled_without_cap() {
            tracing::warn!(
                jump_probability = config.jump_probability,
                "jump_probability never fires and max_steps is unset; walks end only at dead ends"
            );
        }
        tracing::debug!(
            nodes = self.nodes.len(),
            jump_probability = config.jump_probability,
            rounds_per_node = config.rounds_per_node,
            max_steps = ?config.max_steps,
            "starting walk calculation"
        );

        let mut run = WalkRun::default();
        for start in &self.nodes {
            if !start.is_starter() {
                continue;
            }
            run.starters += 1;
            for _ in 0..config.rounds_per_node {
                let (steps, truncated) = walk_from(
                    &self.resolver,
                    &mut self.rng,
                    start,
                    config.jump_probability,
                    config.max_steps,
                );
                run.walks += 1;
                run.steps += steps;
                run.truncated += u64::from(truncated);
            }
        }

        if run.truncated > 0 {
            tracing::warn!(
                truncated = run.truncated,
                walks = run.walks,
                "walks hit max_steps; scores are biased toward early hops"
            );
        }
        tracing::debug!(
            starters = run.starters,
            walks = run.walks,
            steps = run.steps,
            "walk calculation finished"
        );

        self.total = OnceCell::new();
        self.calculated = true;
        run
    }
}

impl<H> Graph<H, AdjacencyList<H>>
where
    H: Node + Clone + std::hash::Hash + Eq,
{
    /// Build an engine whose view is the adjacency's nodes in insertion order.
    pub fn from_adjacency(seed: u64, adjacency: AdjacencyList<H>) -> Self {
        let nodes = adjacency.nodes().to_vec();
        Self::new(seed, adjacency, nodes)
    }

    /// Add `from -> to` to the adjacency, appending endpoints it had not seen to the view.
    ///
    /// Assumes the view mirrors the adjacency, as [`from_adjacency`](Self::from_adjacency)
    /// sets it up. Existing counts are kept; recalculate to fold the new edge in.
    pub fn add_edge(&mut self, from: H, to: H) {
        let seen = self.resolver.node_count();
        self.resolver.add_edge(from, to);
        if self.resolver.node_count() > seen {
            let fresh = self.resolver.nodes()[seen..].to_vec();
            self.extend_nodes(fresh);
        }
    }

    /// Direct adjacency access. Nodes inserted here are not added to the view.
    pub fn resolver_mut(&mut self) -> &mut AdjacencyList<H> {
        &mut self.resolver
    }
}

/// One walk from `start`. Returns `(visits, hit max_steps)`.
fn walk_from<H, E, R>(
    resolver: &E,
    rng: &mut R,
    start: &H,
    jump_probability: f64,
    max_steps: Option<usize>,
) -> (u64, bool)
where
    H: Node + Clone,
    E: EdgeResolver<H>,
    R: Rng,
{
    let mut curr = start.clone();
    let mut steps = 0usize;
    loop {
        curr.traverse();
        steps += 1;

        if rng.random::<f64>() < jump_probability {
            return (steps as u64, false);
        }

        let outlinks = resolver.outlinks(&curr);
        if outlinks.is_empty() {
            return (steps as u64, false);
        }
        if max_steps.is_some_and(|m| steps >= m) {
            return (steps as u64, true);
        }

        curr = outlinks[rng.random_range(0..outlinks.len())].clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Counted;

    fn chain(n: usize) -> Vec<Counted<usize>> {
        (0..n).map(Counted::new).collect()
    }

    #[test]
    fn jump_probability_one_visits_each_starter_once_per_round() {
        let nodes = chain(3);
        let mut g = Graph::new(1, |n: &&Counted<usize>| vec![&nodes[(*n.item() + 1) % 3]], &nodes);
        g.calculate(1.0, 10);
        assert!(g.is_calculated());
        for n in &nodes {
            assert_eq!(n.traversals(), 10);
        }
    }

    #[test]
    fn dead_end_stops_even_without_jumps() {
        let nodes = chain(1);
        let mut g = Graph::new(3, |_: &&Counted<usize>| Vec::<&Counted<usize>>::new(), &nodes);
        let run = g.calculate_run(WalkConfig::new(0.0, 5));
        assert_eq!(nodes[0].traversals(), 5);
        assert_eq!(run.walks, 5);
        assert_eq!(run.steps, 5);
        assert_eq!(run.truncated, 0);
    }

    #[test]
    fn max_steps_bounds_a_jump_free_cycle() {
        let nodes = chain(2);
        let mut g = Graph::new(9, |n: &&Counted<usize>| vec![&nodes[1 - *n.item()]], &nodes);
        let run = g.calculate_run(WalkConfig::new(0.0, 3).with_max_steps(4));
        assert_eq!(run.walks, 6);
        assert_eq!(run.truncated, 6);
        assert_eq!(run.steps, 24);
        let total: u64 = nodes.iter().map(|n| n.traversals()).sum();
        assert_eq!(total, 24);
    }

    #[test]
    fn invalid_config_is_rejected_without_side_effects() {
        let nodes = chain(2);
        let mut g = Graph::new(0, |_: &&Counted<usize>| Vec::<&Counted<usize>>::new(), &nodes);
        for bad in [
            WalkConfig::new(-0.1, 1),
            WalkConfig::new(1.5, 1),
            WalkConfig::new(f64::NAN, 1),
            WalkConfig::new(0.5, 0),
            WalkConfig::new(0.5, 1).with_max_steps(0),
        ] {
            assert!(matches!(g.calculate_checked(bad), Err(Error::InvalidParameter(_))));
        }
        assert!(!g.is_calculated());
        assert!(nodes.iter().all(|n| n.traversals() == 0));
    }

    #[test]
    fn uncapped_zero_or_nan_jump_is_flagged() {
        assert!(WalkConfig::new(0.0, 1).jumps_disabled_without_cap());
        assert!(WalkConfig::new(-0.5, 1).jumps_disabled_without_cap());
        assert!(WalkConfig::new(f64::NAN, 1).jumps_disabled_without_cap());
        assert!(!WalkConfig::new(f64::NAN, 1).with_max_steps(8).jumps_disabled_without_cap());
        assert!(!WalkConfig::new(0.15, 1).jumps_disabled_without_cap());
    }

    #[test]
    fn nan_jump_never_stops_a_walk_early() {
        let nodes = chain(2);
        let mut g = Graph::new(6, |n: &&Counted<usize>| vec![&nodes[1 - *n.item()]], &nodes);
        let run = g.calculate_run(WalkConfig::new(f64::NAN, 2).with_max_steps(5));
        assert_eq!(run.truncated, run.walks);
        assert_eq!(run.steps, 20);
    }

    #[test]
    fn jump_probability_is_recorded() {
        let nodes = chain(1);
        let mut g = Graph::new(0, |_: &&Counted<usize>| Vec::<&Counted<usize>>::new(), &nodes);
        assert_eq!(g.jump_probability(), 0.0);
        g.calculate(0.25, 1);
        assert_eq!(g.jump_probability(), 0.25);
    }
}

//! PageRank estimates from accumulated visit counts.
//!
//! A node's normalized score is its share of all recorded visits across the view. The
//! unnormalized score multiplies that by the view size, so scores average to about 1.0
//! (the classical "sums to N" convention).
//!
//! The visit total is summed once per calculated state and reused by every later query.
//! Any calculation or view append drops the cached value. Increments made by *other*
//! engines sharing the same node objects are not seen until this engine recalculates.

use crate::graph::EdgeResolver;
use crate::node::Node;
use crate::random_walk::Graph;
use crate::{topk, Error, Result};

impl<H, E> Graph<H, E>
where
    H: Node + Clone,
    E: EdgeResolver<H>,
{
    /// Sum of visits over every node in the view.
    pub fn total_traversals(&self) -> Result<u64> {
        if !self.is_calculated() {
            return Err(Error::NotCalculated);
        }
        Ok(*self.total.get_or_init(|| {
            let total: u64 = self.nodes().iter().map(Node::traversals).sum();
            tracing::trace!(total, nodes = self.node_count(), "cached traversal total");
            total
        }))
    }

    /// PageRank estimate for `node`.
    ///
    /// Fails with [`Error::NotCalculated`] before the first calculation and with
    /// [`Error::NoTraversals`] when nothing was recorded (no starters, or no rounds).
    pub fn pagerank(&self, node: &H, normalized: bool) -> Result<f64> {
        let total = self.nonzero_total()?;
        let share = node.traversals() as f64 / total as f64;
        if normalized {
            Ok(share)
        } else {
            Ok(self.node_count() as f64 * share)
        }
    }

    /// Scores for the whole view, in view order.
    pub fn scores(&self, normalized: bool) -> Result<Vec<f64>> {
        let total = self.nonzero_total()? as f64;
        let scale = if normalized { 1.0 } else { self.node_count() as f64 };
        Ok(self
            .nodes()
            .iter()
            .map(|n| scale * (n.traversals() as f64 / total))
            .collect())
    }

    /// The `k` best scoring nodes, highest first. Ties keep view order.
    ///
    /// Nodes with no recorded visits are skipped, so fewer than `k` entries may come back
    /// even when the view is larger. Use [`scores`](Self::scores) to see every node.
    pub fn top_k(&self, k: usize, normalized: bool) -> Result<Vec<(&H, f64)>> {
        let scores = self.scores(normalized)?;
        Ok(topk::top_k(&scores, k)
            .into_iter()
            .map(|(i, s)| (&self.nodes()[i], s))
            .collect())
    }

    fn nonzero_total(&self) -> Result<u64> {
        match self.total_traversals()? {
            0 => Err(Error::NoTraversals),
            total => Ok(total),
        }
    }
}

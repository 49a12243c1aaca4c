//! Run several independent engines on the rayon pool.
//!
//! Each [`Graph`] keeps its own seeded RNG, so the counts an instance adds depend only on
//! its seed and structure, never on thread count or scheduling. Engines may share node
//! objects; visits are recorded with atomic increments and none are lost.

use rayon::prelude::*;

use crate::graph::EdgeResolver;
use crate::node::Node;
use crate::random_walk::{Graph, WalkConfig, WalkRun};
use crate::Result;

/// `calculate_run` on every graph concurrently. Runs are returned in input order.
pub fn calculate_parallel<H, E>(graphs: &mut [Graph<H, E>], config: WalkConfig) -> Vec<WalkRun>
where
    H: Node + Clone + Send,
    E: EdgeResolver<H> + Send,
{
    graphs
        .par_iter_mut()
        .map(|g| g.calculate_run(config))
        .collect()
}

/// Validate `config` once, then [`calculate_parallel`].
pub fn calculate_parallel_checked<H, E>(
    graphs: &mut [Graph<H, E>],
    config: WalkConfig,
) -> Result<Vec<WalkRun>>
where
    H: Node + Clone + Send,
    E: EdgeResolver<H> + Send,
{
    config.validate()?;
    Ok(calculate_parallel(graphs, config))
}

//! `walkrank`: PageRank estimation by Monte Carlo random walks.
//!
//! Instead of iterating a transition matrix, the engine launches short random walks from
//! every *starter* node and counts how often each node is visited. A node's share of all
//! visits approximates its PageRank (arXiv:1006.2880 shows the estimate and its cheap
//! incremental update).
//!
//! Counts live on the caller's nodes and are never reset, so adding edges and calling
//! [`Graph::calculate`] again refines the previous estimate cheaply. Removing edges is not
//! supported for the same reason: only totals are kept, not walk history.
//!
//! Public invariants:
//! - **Determinism**: the same seed, node order, adjacency and parameters produce identical
//!   counts.
//! - **Ordering**: starter nodes are walked in view order; rounds per starter are sequential.
//! - **No silent NaN**: scoring with zero recorded visits is [`Error::NoTraversals`].
//!
//! ```
//! use walkrank::{AdjacencyList, Counted, Graph, Node};
//!
//! let (a, b, c) = (Counted::new("a"), Counted::new("b"), Counted::new("c"));
//! let mut adj = AdjacencyList::new();
//! adj.add_edge(&a, &b);
//! adj.add_edge(&b, &c);
//! adj.add_edge(&c, &a);
//!
//! let mut graph = Graph::from_adjacency(42, adj);
//! graph.calculate(1.0, 10);
//! assert_eq!(a.traversals(), 10);
//! assert!((graph.pagerank(&&a, true).unwrap() - 1.0 / 3.0).abs() < 1e-12);
//! ```

pub mod graph;
pub mod node;
pub mod pagerank;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod random_walk;
pub mod topk;

pub use graph::{AdjacencyList, EdgeResolver};
pub use node::{Counted, Node, TraversalCounter};
#[cfg(feature = "parallel")]
pub use parallel::{calculate_parallel, calculate_parallel_checked};
pub use random_walk::{Graph, WalkConfig, WalkRun};
pub use topk::{normalize, top_k};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pagerank graph has not yet been calculated")]
    NotCalculated,
    #[error("no traversals recorded; nothing to score")]
    NoTraversals,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

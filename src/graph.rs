//! Edge resolution adapters.
//!
//! The walk engine never stores adjacency. It asks an [`EdgeResolver`] for a node's
//! outlinks at every step and treats the answer as a pure function of the node.

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::Hash;

pub trait EdgeResolver<H: Clone> {
    /// Outgoing neighbors of `node`, in a stable order.
    ///
    /// An empty result is a dead end, not an error. Stored adjacency should lend a
    /// borrowed slice so that a walk step does not allocate.
    fn outlinks(&self, node: &H) -> Cow<'_, [H]>;

    fn out_degree(&self, node: &H) -> usize {
        self.outlinks(node).len()
    }
}

/// Any `Fn(&H) -> Vec<H>` is a resolver; this is the "edge lookup function" shape.
impl<H, F> EdgeResolver<H> for F
where
    H: Clone,
    F: Fn(&H) -> Vec<H>,
{
    fn outlinks(&self, node: &H) -> Cow<'_, [H]> {
        Cow::Owned(self(node))
    }
}

/// Insertion-ordered adjacency lists keyed by node handle.
///
/// Parallel edges are kept: an edge added twice is twice as likely to be followed.
#[derive(Debug, Clone)]
pub struct AdjacencyList<H> {
    index: HashMap<H, usize>,
    nodes: Vec<H>,
    outlinks: Vec<Vec<H>>,
}

impl<H> Default for AdjacencyList<H> {
    fn default() -> Self {
        Self { index: HashMap::new(), nodes: Vec::new(), outlinks: Vec::new() }
    }
}

impl<H: Hash + Eq + Clone> AdjacencyList<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            index: HashMap::with_capacity(nodes),
            nodes: Vec::with_capacity(nodes),
            outlinks: Vec::with_capacity(nodes),
        }
    }

    /// Insert `node` if unseen; returns its position in [`nodes`](Self::nodes).
    pub fn add_node(&mut self, node: H) -> usize {
        if let Some(&i) = self.index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        self.outlinks.push(Vec::new());
        i
    }

    /// Add `from -> to`, inserting either endpoint on first sight (source first).
    pub fn add_edge(&mut self, from: H, to: H) {
        let u = self.add_node(from);
        self.add_node(to.clone());
        self.outlinks[u].push(to);
    }

    pub fn nodes(&self) -> &[H] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outlinks.iter().map(Vec::len).sum()
    }

    pub fn contains(&self, node: &H) -> bool {
        self.index.contains_key(node)
    }

    fn outlinks_ref(&self, node: &H) -> &[H] {
        self.index
            .get(node)
            .map(|&i| self.outlinks[i].as_slice())
            .unwrap_or(&[])
    }
}

impl<H: Hash + Eq + Clone> EdgeResolver<H> for AdjacencyList<H> {
    fn outlinks(&self, node: &H) -> Cow<'_, [H]> {
        Cow::Borrowed(self.outlinks_ref(node))
    }
}

impl<H: Hash + Eq + Clone> EdgeResolver<H> for &AdjacencyList<H> {
    fn outlinks(&self, node: &H) -> Cow<'_, [H]> {
        Cow::Borrowed(self.outlinks_ref(node))
    }
}

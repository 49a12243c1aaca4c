//! Node capability contract.
//!
//! The engine never owns node objects. It only needs three things from a node handle:
//! whether walks may start there, a way to count a visit, and the visit total so far.
//!
//! Counters are bumped through `&self`, so concrete nodes keep their count behind an
//! atomic. Several engines may walk over the same node objects at once (one engine per
//! thread, each with its own RNG); the atomic increment is what makes that sound.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub trait Node {
    /// Whether a walk may originate at this node.
    fn is_starter(&self) -> bool;

    /// Record one visit. Must be safe under concurrent calls.
    fn traverse(&self);

    /// Cumulative visits across every calculation that touched this node.
    fn traversals(&self) -> u64;
}

impl<T: Node + ?Sized> Node for &T {
    fn is_starter(&self) -> bool {
        (**self).is_starter()
    }
    fn traverse(&self) {
        (**self).traverse()
    }
    fn traversals(&self) -> u64 {
        (**self).traversals()
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn is_starter(&self) -> bool {
        (**self).is_starter()
    }
    fn traverse(&self) {
        (**self).traverse()
    }
    fn traversals(&self) -> u64 {
        (**self).traversals()
    }
}

impl<T: Node + ?Sized> Node for Rc<T> {
    fn is_starter(&self) -> bool {
        (**self).is_starter()
    }
    fn traverse(&self) {
        (**self).traverse()
    }
    fn traversals(&self) -> u64 {
        (**self).traversals()
    }
}

impl<T: Node + ?Sized> Node for Arc<T> {
    fn is_starter(&self) -> bool {
        (**self).is_starter()
    }
    fn traverse(&self) {
        (**self).traverse()
    }
    fn traversals(&self) -> u64 {
        (**self).traversals()
    }
}

/// Atomic visit counter plus starter flag.
///
/// Embed one in a node type and delegate the [`Node`] methods to it, or use
/// [`Counted`] to wrap an arbitrary payload.
///
/// Increments use `Relaxed` ordering: the only guarantee needed is that no visit is lost,
/// and a read on one thread observes every increment that happened-before it.
#[derive(Default)]
pub struct TraversalCounter {
    traversals: AtomicU64,
    non_starter: bool,
}

impl TraversalCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter whose node never originates walks (it can still be hopped through).
    pub fn non_starter() -> Self {
        Self { traversals: AtomicU64::new(0), non_starter: true }
    }
}

impl Node for TraversalCounter {
    fn is_starter(&self) -> bool {
        !self.non_starter
    }

    fn traverse(&self) {
        self.traversals.fetch_add(1, Ordering::Relaxed);
    }

    fn traversals(&self) -> u64 {
        self.traversals.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for TraversalCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalCounter")
            .field("traversals", &self.traversals())
            .field("starter", &self.is_starter())
            .finish()
    }
}

/// A caller payload paired with a [`TraversalCounter`].
///
/// Equality and hashing look at the payload only, so `Counted<T>` (or a handle to it)
/// can key an adjacency map while its count keeps changing.
pub struct Counted<T> {
    item: T,
    counter: TraversalCounter,
}

impl<T> Counted<T> {
    pub fn new(item: T) -> Self {
        Self { item, counter: TraversalCounter::new() }
    }

    pub fn non_starter(item: T) -> Self {
        Self { item, counter: TraversalCounter::non_starter() }
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> Node for Counted<T> {
    fn is_starter(&self) -> bool {
        self.counter.is_starter()
    }
    fn traverse(&self) {
        self.counter.traverse()
    }
    fn traversals(&self) -> u64 {
        self.counter.traversals()
    }
}

impl<T> Deref for Counted<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: PartialEq> PartialEq for Counted<T> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl<T: Eq> Eq for Counted<T> {}

impl<T: Hash> Hash for Counted<T> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.item.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Counted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counted")
            .field("item", &self.item)
            .field("traversals", &self.traversals())
            .field("starter", &self.is_starter())
            .finish()
    }
}

//! Node populations and the edges wired between them.

use std::{fmt, ops::Deref, sync::Arc};

/// Fixed-order, immutable sequence of externally owned nodes.
///
/// Cloning is cheap and preserves identity: two populations are the same
/// population (and therefore wire recurrently) only when they share the same
/// allocation, never because their nodes compare equal.
///
/// # Examples
/// ```
/// use tsunagi_core::NodePopulation;
///
/// let layer = NodePopulation::from(vec!["a", "b", "c"]);
/// let alias = layer.clone();
/// let copy = NodePopulation::from(vec!["a", "b", "c"]);
/// assert!(layer.is_same_population(&alias));
/// assert!(!layer.is_same_population(&copy));
/// assert_eq!(layer.len(), 3);
/// ```
pub struct NodePopulation<N> {
    nodes: Arc<[N]>,
}

impl<N> NodePopulation<N> {
    /// Returns whether `other` refers to the same allocation as `self`.
    #[must_use]
    pub fn is_same_population(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }

    /// Returns the nodes in population order.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }
}

impl<N> Clone for NodePopulation<N> {
    fn clone(&self) -> Self {
        Self {
            nodes: Arc::clone(&self.nodes),
        }
    }
}

impl<N> Deref for NodePopulation<N> {
    type Target = [N];

    fn deref(&self) -> &[N] {
        &self.nodes
    }
}

impl<N> From<Vec<N>> for NodePopulation<N> {
    fn from(nodes: Vec<N>) -> Self {
        Self {
            nodes: Arc::from(nodes),
        }
    }
}

impl<N> From<Arc<[N]>> for NodePopulation<N> {
    fn from(nodes: Arc<[N]>) -> Self {
        Self { nodes }
    }
}

impl<N> FromIterator<N> for NodePopulation<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for NodePopulation<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.nodes.iter()).finish()
    }
}

/// Directed edge between a source index and a target index.
///
/// Indices refer to positions in the source and target populations of the
/// connectivity that emitted the edge.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Edge {
    source: usize,
    target: usize,
}

impl Edge {
    /// Creates an edge from `source` to `target`.
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    /// Index of the source node.
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Index of the target node.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Returns whether the edge starts and ends at the same index.
    #[must_use]
    pub const fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl From<(usize, usize)> for Edge {
    fn from((source, target): (usize, usize)) -> Self {
        Self::new(source, target)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

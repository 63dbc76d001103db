//! Edge storage owned outside the connectivity core.

use std::collections::HashMap;

use crate::population::Edge;

/// Destination for edges emitted by sparse wiring.
///
/// The core never keeps its own copy of an edge: the sink owns every edge it
/// accepts and the edge value itself serves as the handle for later removal.
/// Implementations must refuse to store the same `(source, target)` pair
/// twice.
///
/// # Examples
/// ```
/// use tsunagi_core::{Edge, EdgeSink};
///
/// #[derive(Default)]
/// struct Counting(usize);
///
/// impl EdgeSink for Counting {
///     fn reserve(&mut self, _additional: usize) {}
///     fn add_edge(&mut self, _edge: Edge) -> bool { self.0 += 1; true }
///     fn remove_edge(&mut self, _edge: Edge) -> bool { self.0 -= 1; true }
///     fn len(&self) -> usize { self.0 }
/// }
///
/// let mut sink = Counting::default();
/// assert!(sink.add_edge(Edge::new(0, 1)));
/// assert_eq!(sink.len(), 1);
/// assert!(!sink.is_empty());
/// ```
pub trait EdgeSink {
    /// Hints that `additional` more edges are about to arrive.
    fn reserve(&mut self, additional: usize);

    /// Stores `edge`, returning `false` when it was already present.
    fn add_edge(&mut self, edge: Edge) -> bool;

    /// Deletes `edge`, returning `false` when it was not present.
    fn remove_edge(&mut self, edge: Edge) -> bool;

    /// Number of edges currently held.
    fn len(&self) -> usize;

    /// Returns whether the sink holds no edges.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: EdgeSink + ?Sized> EdgeSink for &mut S {
    fn reserve(&mut self, additional: usize) {
        (**self).reserve(additional);
    }

    fn add_edge(&mut self, edge: Edge) -> bool {
        (**self).add_edge(edge)
    }

    fn remove_edge(&mut self, edge: Edge) -> bool {
        (**self).remove_edge(edge)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory [`EdgeSink`] keeping edges in a dense vector.
///
/// A position index rejects duplicate pairs and lets removals run in O(1)
/// by swapping the last edge into the vacated slot, so iteration order is
/// insertion order only until the first removal.
///
/// # Examples
/// ```
/// use tsunagi_core::{Edge, EdgeList, EdgeSink};
///
/// let mut edges = EdgeList::new();
/// assert!(edges.add_edge(Edge::new(0, 1)));
/// assert!(!edges.add_edge(Edge::new(0, 1)));
/// assert!(edges.contains(Edge::new(0, 1)));
/// assert!(edges.remove_edge(Edge::new(0, 1)));
/// assert!(edges.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EdgeList {
    edges: Vec<Edge>,
    positions: HashMap<Edge, usize>,
}

impl EdgeList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `edge` is stored.
    #[must_use]
    pub fn contains(&self, edge: Edge) -> bool {
        self.positions.contains_key(&edge)
    }

    /// Borrows the stored edges.
    #[must_use]
    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterates over the stored edges.
    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Counts the stored edges leaving `source`.
    #[must_use]
    pub fn out_degree(&self, source: usize) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.source() == source)
            .count()
    }

    /// Returns the stored edges sorted by source then target.
    #[must_use]
    pub fn sorted(&self) -> Vec<Edge> {
        let mut edges = self.edges.clone();
        edges.sort_unstable();
        edges
    }
}

impl EdgeSink for EdgeList {
    fn reserve(&mut self, additional: usize) {
        self.edges.reserve(additional);
        self.positions.reserve(additional);
    }

    fn add_edge(&mut self, edge: Edge) -> bool {
        if self.positions.contains_key(&edge) {
            return false;
        }
        self.positions.insert(edge, self.edges.len());
        self.edges.push(edge);
        true
    }

    fn remove_edge(&mut self, edge: Edge) -> bool {
        let Some(position) = self.positions.remove(&edge) else {
            return false;
        };
        self.edges.swap_remove(position);
        if let Some(moved) = self.edges.get(position) {
            self.positions.insert(*moved, position);
        }
        true
    }

    fn len(&self) -> usize {
        self.edges.len()
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_keeps_positions_consistent() {
        let mut list = EdgeList::new();
        for target in 0..5 {
            assert!(list.add_edge(Edge::new(0, target)));
        }
        assert!(list.remove_edge(Edge::new(0, 1)));
        assert!(list.remove_edge(Edge::new(0, 4)));
        assert!(!list.remove_edge(Edge::new(0, 4)));

        assert_eq!(
            list.sorted(),
            vec![Edge::new(0, 0), Edge::new(0, 2), Edge::new(0, 3)]
        );
        for edge in list.iter() {
            assert!(list.contains(*edge));
        }
        assert!(list.remove_edge(Edge::new(0, 3)));
        assert!(list.remove_edge(Edge::new(0, 0)));
        assert_eq!(list.as_slice(), &[Edge::new(0, 2)]);
    }

    fn fill<S: EdgeSink>(mut sink: S) -> usize {
        sink.reserve(2);
        assert!(sink.add_edge(Edge::new(1, 2)));
        assert!(sink.add_edge(Edge::new(1, 3)));
        assert!(sink.remove_edge(Edge::new(1, 3)));
        sink.len()
    }

    #[test]
    fn mutable_reference_forwards_to_sink() {
        let mut list = EdgeList::new();
        assert_eq!(fill(&mut list), 1);
        assert_eq!(list.out_degree(1), 1);
        assert_eq!(list.out_degree(2), 0);
    }
}

//! Shared test utilities for `tsunagi-core`.

use proptest::test_runner::Config as ProptestConfig;
use tsunagi_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::{
    population::{Edge, NodePopulation},
    sink::{EdgeList, EdgeSink},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `TSUNAGI_PBT_CASES` and
/// `TSUNAGI_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Population of `len` nodes labelled by their index.
pub(crate) fn indexed_population(len: usize) -> NodePopulation<usize> {
    (0..len).collect()
}

/// Operation observed by a [`RecordingSink`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SinkOp {
    Reserve(usize),
    Add(Edge),
    Remove(Edge),
}

/// [`EdgeSink`] wrapper that logs every call before forwarding it to an
/// [`EdgeList`].
///
/// # Examples
/// ```ignore
/// use tsunagi_core::{Edge, EdgeSink};
/// use tsunagi_core::test_utils::{RecordingSink, SinkOp};
///
/// let mut sink = RecordingSink::default();
/// sink.add_edge(Edge::new(0, 1));
/// assert_eq!(sink.ops(), &[SinkOp::Add(Edge::new(0, 1))]);
/// ```
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    inner: EdgeList,
    ops: Vec<SinkOp>,
}

impl RecordingSink {
    /// Calls observed so far, in order.
    pub(crate) fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    /// Forgets the recorded calls while keeping the stored edges.
    pub(crate) fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// The edges currently stored.
    pub(crate) fn edges(&self) -> &EdgeList {
        &self.inner
    }
}

impl EdgeSink for RecordingSink {
    fn reserve(&mut self, additional: usize) {
        self.ops.push(SinkOp::Reserve(additional));
        self.inner.reserve(additional);
    }

    fn add_edge(&mut self, edge: Edge) -> bool {
        self.ops.push(SinkOp::Add(edge));
        self.inner.add_edge(edge)
    }

    fn remove_edge(&mut self, edge: Edge) -> bool {
        self.ops.push(SinkOp::Remove(edge));
        self.inner.remove_edge(edge)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

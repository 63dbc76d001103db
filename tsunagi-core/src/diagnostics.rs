//! Non-fatal diagnostics emitted while wiring and reshaping.
//!
//! When the `metrics` feature is enabled the core emits:
//!
//! - `sparse_edges_added` (counter)
//! - `sparse_edges_removed` (counter)
//! - `sparse_degree_overflow` (counter, one per clamped source)

use std::fmt;

use tracing::{debug, warn};

/// A source whose requested degree exceeded the length of its ordering.
///
/// The degree is clamped to `available`; the request is not rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DegreeOverflow {
    /// Index of the clamped source.
    pub source: usize,
    /// Degree the reshape asked for.
    pub requested: usize,
    /// Degree actually applied, equal to the ordering length.
    pub available: usize,
}

impl DegreeOverflow {
    /// Stable machine-readable code attached to overflow diagnostics.
    pub const CODE: &'static str = "SPARSE_DEGREE_OVERFLOW";

    /// Number of edges that could not be added for this source.
    #[must_use]
    pub const fn clamped(&self) -> usize {
        self.requested.saturating_sub(self.available)
    }
}

impl fmt::Display for DegreeOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source {} requested degree {} but only {} targets are available",
            self.source, self.requested, self.available
        )
    }
}

pub(crate) fn report_overflows(overflows: &[DegreeOverflow]) {
    if overflows.is_empty() {
        return;
    }
    for overflow in overflows {
        debug!(
            source = overflow.source,
            requested = overflow.requested,
            available = overflow.available,
            "clamping degree to ordering length"
        );
    }
    let clamped_edges: usize = overflows.iter().map(DegreeOverflow::clamped).sum();
    warn!(
        code = DegreeOverflow::CODE,
        clamped_sources = overflows.len(),
        clamped_edges,
        "requested degrees exceed available targets"
    );
    record_overflows(overflows.len());
}

#[cfg(feature = "metrics")]
fn record_overflows(count: usize) {
    metrics::counter!("sparse_degree_overflow").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_overflows(_count: usize) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_added(count: usize) {
    metrics::counter!("sparse_edges_added").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_added(_count: usize) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_removed(count: usize) {
    metrics::counter!("sparse_edges_removed").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_removed(_count: usize) {}

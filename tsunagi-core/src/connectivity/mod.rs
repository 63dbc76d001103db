//! Built sparse connectivity and its reshaping state.
//!
//! A [`SparseConnectivity`] remembers the random ordering drawn at build
//! time and a cursor per source. The edges leaving source `i` are exactly the
//! first `cursor[i]` entries of its ordering row; the sink holds the edges
//! themselves.

mod reshape;


use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    builder::SparseBuilder,
    degree::{DegreePolicy, assign_degrees, effective_target_count},
    diagnostics::{self, DegreeOverflow},
    error::{PopulationRole, SparseError, validate_density},
    ordering::{OrderingShape, SparseOrdering},
    population::{Edge, NodePopulation},
    sink::EdgeSink,
};

/// Outcome of [`SparseConnectivity::set_density`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DensityChange {
    /// Density rose; the listed edges were added.
    Added(Vec<Edge>),
    /// Density fell; the listed edges were removed, newest first per source.
    Removed(Vec<Edge>),
    /// Density already matched; nothing changed.
    Unchanged,
}

impl DensityChange {
    /// Edges touched by the change, empty when unchanged.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        match self {
            Self::Added(edges) | Self::Removed(edges) => edges,
            Self::Unchanged => &[],
        }
    }
}

/// Sparse wiring between two populations that can be regrown or thinned.
///
/// Created by [`SparseBuilder::build`]. Reshaping reuses the ordering drawn
/// at build time, so lowering density retracts the most recently added edges
/// first and raising it again extends each source along the same sequence.
#[derive(Debug)]
pub struct SparseConnectivity<N> {
    sources: NodePopulation<N>,
    targets: NodePopulation<N>,
    density: f64,
    policy: DegreePolicy,
    allow_self: bool,
    recurrent: bool,
    ordering: SparseOrdering,
    cursors: Vec<usize>,
    overflows: Vec<DegreeOverflow>,
}

impl<N> SparseConnectivity<N> {
    #[instrument(
        name = "sparse.build",
        err,
        skip_all,
        fields(
            sources = sources.len(),
            targets = targets.len(),
            density = config.density(),
            policy = %config.policy(),
            allow_self = config.allows_self_connections(),
            recurrent = sources.is_same_population(targets),
        ),
    )]
    pub(crate) fn wire<S, R>(
        config: SparseBuilder,
        sources: &NodePopulation<N>,
        targets: &NodePopulation<N>,
        sink: &mut S,
        rng: &mut R,
    ) -> Result<Self>
    where
        S: EdgeSink + ?Sized,
        R: Rng + ?Sized,
    {
        let density = validate_density(config.density()).inspect_err(|_| {
            warn!(density = config.density(), "rejecting out-of-range density");
        })?;
        ensure_populated(sources, PopulationRole::Source)?;
        ensure_populated(targets, PopulationRole::Target)?;

        let recurrent = sources.is_same_population(targets);
        let allow_self = config.allows_self_connections();
        let shape = OrderingShape {
            sources: sources.len(),
            targets: targets.len(),
            exclude_self: recurrent && !allow_self,
        };
        let ordering = SparseOrdering::from_shape(shape, rng);
        let candidates = effective_target_count(targets.len(), recurrent, allow_self);
        debug_assert_eq!(candidates, ordering.row_len());
        let cursors = assign_degrees(config.policy(), sources.len(), candidates, density, rng)?;

        let total: usize = cursors.iter().sum();
        debug!(candidates, total, "assigned degrees");
        sink.reserve(total);
        let connectivity = Self {
            sources: sources.clone(),
            targets: targets.clone(),
            density,
            policy: config.policy(),
            allow_self,
            recurrent,
            ordering,
            cursors,
            overflows: Vec::new(),
        };
        let mut emitted = 0_usize;
        for edge in connectivity.active_edges() {
            if sink.add_edge(edge) {
                emitted += 1;
            }
        }
        diagnostics::record_added(emitted);
        info!(edges = emitted, "sparse wiring built");
        Ok(connectivity)
    }

    /// Current density; always the value last requested, never recomputed
    /// from the edge count.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Number of edges the populations could hold.
    ///
    /// Recurrent wiring without self-connections excludes the diagonal.
    #[must_use]
    pub fn max_possible_connections(&self) -> usize {
        self.sources.len().saturating_mul(self.ordering.row_len())
    }

    /// Number of edges currently active.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.cursors.iter().sum()
    }

    /// Degree policy chosen at build time.
    #[must_use]
    pub fn policy(&self) -> DegreePolicy {
        self.policy
    }

    /// Returns whether edges from a node to itself may exist.
    #[must_use]
    pub fn allows_self_connections(&self) -> bool {
        self.allow_self
    }

    /// Returns whether sources and targets are the same population.
    #[must_use]
    pub fn is_recurrent(&self) -> bool {
        self.recurrent
    }

    /// Source population.
    #[must_use]
    pub fn sources(&self) -> &NodePopulation<N> {
        &self.sources
    }

    /// Target population.
    #[must_use]
    pub fn targets(&self) -> &NodePopulation<N> {
        &self.targets
    }

    /// Orderings drawn at build time.
    #[must_use]
    pub fn ordering(&self) -> &SparseOrdering {
        &self.ordering
    }

    /// Out-degree of `source`, or `None` when out of range.
    #[must_use]
    pub fn degree(&self, source: usize) -> Option<usize> {
        self.cursors.get(source).copied()
    }

    /// Out-degree of every source, in population order.
    #[must_use]
    pub fn degrees(&self) -> &[usize] {
        &self.cursors
    }

    /// Active target indices of `source`, oldest first.
    #[must_use]
    pub fn active_targets(&self, source: usize) -> &[usize] {
        let degree = self.degree(source).unwrap_or_default();
        self.ordering
            .row(source)
            .and_then(|row| row.get(..degree))
            .unwrap_or_default()
    }

    /// Iterates over every active edge, sources in population order.
    pub fn active_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.cursors.len()).flat_map(move |source| {
            self.active_targets(source)
                .iter()
                .map(move |&target| Edge::new(source, target))
        })
    }

    /// Resolves an edge to the nodes it connects.
    #[must_use]
    pub fn endpoints(&self, edge: Edge) -> Option<(&N, &N)> {
        let source = self.sources.get(edge.source())?;
        let target = self.targets.get(edge.target())?;
        Some((source, target))
    }

    /// Degrees clamped by the most recent reshape, empty when none were.
    #[must_use]
    pub fn last_overflows(&self) -> &[DegreeOverflow] {
        &self.overflows
    }

    /// Moves to `density`, growing or shrinking as needed.
    ///
    /// Removed edges are always returned.
    ///
    /// # Errors
    /// Returns [`SparseError::InvalidDensity`] when `density` is outside
    /// `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use tsunagi_core::{DegreePolicy, DensityChange, EdgeList, NodePopulation, SparseBuilder};
    ///
    /// let layer = NodePopulation::from(vec!['a', 'b', 'c', 'd', 'e']);
    /// let mut edges = EdgeList::new();
    /// let mut rng = SmallRng::seed_from_u64(2);
    /// let mut wiring = SparseBuilder::new()
    ///     .with_density(0.5)
    ///     .with_policy(DegreePolicy::Equalized)
    ///     .build(&layer, &layer, &mut edges, &mut rng)?;
    ///
    /// let grown = wiring.set_density(1.0, &mut edges, &mut rng)?;
    /// assert!(matches!(grown, DensityChange::Added(ref added) if added.len() == 10));
    /// assert_eq!(wiring.set_density(1.0, &mut edges, &mut rng)?, DensityChange::Unchanged);
    /// # Ok::<(), tsunagi_core::SparseError>(())
    /// ```
    pub fn set_density<S, R>(
        &mut self,
        density: f64,
        sink: &mut S,
        rng: &mut R,
    ) -> Result<DensityChange>
    where
        S: EdgeSink + ?Sized,
        R: Rng + ?Sized,
    {
        let density = validate_density(density)?;
        if density > self.density {
            self.add_to_density(density, sink, rng)
                .map(DensityChange::Added)
        } else if density < self.density {
            let removed = self.remove_to_density(density, true, sink, rng)?;
            Ok(DensityChange::Removed(removed.unwrap_or_default()))
        } else {
            Ok(DensityChange::Unchanged)
        }
    }
}

fn ensure_populated<N>(population: &NodePopulation<N>, role: PopulationRole) -> Result<()> {
    if population.is_empty() {
        warn!(%role, "population is empty, returning error");
        return Err(SparseError::PopulationEmpty { role });
    }
    Ok(())
}

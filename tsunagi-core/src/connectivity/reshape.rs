//! Density reshaping along the stored orderings.
//!
//! Both directions first compute a complete plan (new cursors plus the edges
//! to add or remove) and only then touch the sink, so a rejected request
//! leaves the sink and the cursors as they were.

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::SparseConnectivity;
use crate::{
    Result,
    degree::{DegreePolicy, sample_binomial, scaled_floor},
    diagnostics::{self, DegreeOverflow},
    error::{ReshapeDirection, SparseError, validate_density},
    population::Edge,
    sink::EdgeSink,
};

/// Cursors and edges produced by a reshape before it is committed.
#[derive(Debug, Default)]
struct ReshapePlan {
    cursors: Vec<usize>,
    edges: Vec<Edge>,
    overflows: Vec<DegreeOverflow>,
}

impl<N> SparseConnectivity<N> {
    /// Raises density to `density`, extending each source along its ordering.
    ///
    /// With [`DegreePolicy::Equalized`] the edges needed to reach
    /// `floor(density × max_possible_connections)` are split evenly between
    /// sources and the remainder of that division is dropped. With
    /// [`DegreePolicy::Independent`] each source draws its additions from
    /// `Binomial(degree, 1 − current / density)`. Degrees that would pass the
    /// ordering length are clamped and reported through
    /// [`SparseConnectivity::last_overflows`] and a `warn` event.
    ///
    /// Returns the added edges, which have already been committed to `sink`.
    ///
    /// # Errors
    /// Returns [`SparseError::InvalidDensity`] when `density` is outside
    /// `[0, 1]` and [`SparseError::InvalidDensityDelta`] unless `density` is
    /// strictly greater than the current density.
    #[instrument(
        name = "sparse.add_to_density",
        err,
        skip_all,
        fields(current = self.density, requested = density, policy = %self.policy),
    )]
    pub fn add_to_density<S, R>(
        &mut self,
        density: f64,
        sink: &mut S,
        rng: &mut R,
    ) -> Result<Vec<Edge>>
    where
        S: EdgeSink + ?Sized,
        R: Rng + ?Sized,
    {
        self.check_delta(density, ReshapeDirection::Grow)?;
        let plan = self.plan_growth(density, rng);

        diagnostics::report_overflows(&plan.overflows);
        sink.reserve(plan.edges.len());
        for &edge in &plan.edges {
            if !sink.add_edge(edge) {
                warn!(%edge, "sink already held edge");
            }
        }
        diagnostics::record_added(plan.edges.len());
        self.cursors = plan.cursors;
        self.overflows = plan.overflows;
        self.density = density;
        info!(
            added = plan.edges.len(),
            edges = self.edge_count(),
            "density raised"
        );
        Ok(plan.edges)
    }

    /// Lowers density to `density`, retracting the newest edges of each
    /// source first.
    ///
    /// With [`DegreePolicy::Equalized`] the surplus over
    /// `floor(density × max_possible_connections)` is split evenly between
    /// sources, dropping the remainder. With [`DegreePolicy::Independent`]
    /// each source draws its removals from
    /// `Binomial(degree, 1 − density / current)`.
    ///
    /// The removed edges are returned when `return_removed` is set.
    ///
    /// # Errors
    /// Returns [`SparseError::InvalidDensity`] when `density` is outside
    /// `[0, 1]` and [`SparseError::InvalidDensityDelta`] unless `density` is
    /// strictly less than the current density.
    #[instrument(
        name = "sparse.remove_to_density",
        err,
        skip_all,
        fields(current = self.density, requested = density, policy = %self.policy),
    )]
    pub fn remove_to_density<S, R>(
        &mut self,
        density: f64,
        return_removed: bool,
        sink: &mut S,
        rng: &mut R,
    ) -> Result<Option<Vec<Edge>>>
    where
        S: EdgeSink + ?Sized,
        R: Rng + ?Sized,
    {
        self.check_delta(density, ReshapeDirection::Shrink)?;
        let plan = self.plan_shrink(density, rng);

        for &edge in &plan.edges {
            if !sink.remove_edge(edge) {
                warn!(%edge, "sink did not hold edge");
            }
        }
        diagnostics::record_removed(plan.edges.len());
        self.cursors = plan.cursors;
        self.overflows = plan.overflows;
        self.density = density;
        info!(
            removed = plan.edges.len(),
            edges = self.edge_count(),
            "density lowered"
        );
        Ok(return_removed.then_some(plan.edges))
    }

    fn check_delta(&self, requested: f64, direction: ReshapeDirection) -> Result<()> {
        validate_density(requested)?;
        let moves = match direction {
            ReshapeDirection::Grow => requested > self.density,
            ReshapeDirection::Shrink => requested < self.density,
        };
        if moves {
            return Ok(());
        }
        warn!(
            %direction,
            current = self.density,
            requested,
            "density does not move in the requested direction"
        );
        Err(SparseError::InvalidDensityDelta {
            current: self.density,
            requested,
            direction,
        })
    }

    fn plan_growth<R>(&self, density: f64, rng: &mut R) -> ReshapePlan
    where
        R: Rng + ?Sized,
    {
        let available = self.ordering.row_len();
        let target_total = scaled_floor(density, self.max_possible_connections());
        let add_total = target_total.saturating_sub(self.edge_count());
        let add_per_source = add_total.checked_div(self.cursors.len()).unwrap_or(0);
        let probability = growth_probability(self.density, density);
        debug!(target_total, add_total, add_per_source, "planning growth");

        let mut plan = ReshapePlan {
            cursors: Vec::with_capacity(self.cursors.len()),
            ..ReshapePlan::default()
        };
        for (source, &cursor) in self.cursors.iter().enumerate() {
            let additions = match self.policy {
                DegreePolicy::Equalized => add_per_source,
                DegreePolicy::Independent => sample_binomial(cursor, probability, rng),
            };
            let requested = cursor.saturating_add(additions);
            if requested > available {
                plan.overflows.push(DegreeOverflow {
                    source,
                    requested,
                    available,
                });
            }
            let degree = requested.min(available);
            let row = self.ordering.row(source).unwrap_or_default();
            plan.edges.extend(
                row.get(cursor..degree)
                    .unwrap_or_default()
                    .iter()
                    .map(|&target| Edge::new(source, target)),
            );
            plan.cursors.push(degree);
        }
        plan
    }

    fn plan_shrink<R>(&self, density: f64, rng: &mut R) -> ReshapePlan
    where
        R: Rng + ?Sized,
    {
        let target_total = scaled_floor(density, self.max_possible_connections());
        let remove_total = self.edge_count().saturating_sub(target_total);
        let remove_per_source = remove_total.checked_div(self.cursors.len()).unwrap_or(0);
        let probability = shrink_probability(self.density, density);
        debug!(target_total, remove_total, remove_per_source, "planning shrink");

        let mut plan = ReshapePlan {
            cursors: Vec::with_capacity(self.cursors.len()),
            ..ReshapePlan::default()
        };
        for (source, &cursor) in self.cursors.iter().enumerate() {
            let removals = match self.policy {
                DegreePolicy::Equalized => remove_per_source,
                DegreePolicy::Independent => sample_binomial(cursor, probability, rng),
            };
            let degree = cursor.saturating_sub(removals);
            let row = self.ordering.row(source).unwrap_or_default();
            plan.edges.extend(
                row.get(degree..cursor)
                    .unwrap_or_default()
                    .iter()
                    .rev()
                    .map(|&target| Edge::new(source, target)),
            );
            plan.cursors.push(degree);
        }
        plan
    }
}

/// Probability that an existing edge "spawns" a new one when density rises
/// from `current` to `requested`.
#[expect(
    clippy::float_arithmetic,
    reason = "binomial reshaping is parameterised by a density ratio"
)]
fn growth_probability(current: f64, requested: f64) -> f64 {
    1.0 - current / requested
}

/// Probability that an existing edge is retracted when density falls from
/// `current` to `requested`.
#[expect(
    clippy::float_arithmetic,
    reason = "binomial reshaping is parameterised by a density ratio"
)]
fn shrink_probability(current: f64, requested: f64) -> f64 {
    1.0 - requested / current
}

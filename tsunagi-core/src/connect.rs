//! Stateless one-shot sparse wiring.
//!
//! Wires two populations without keeping orderings or cursors, for callers
//! that never reshape and would rather not hold a [`crate::SparseConnectivity`].

use rand::{
    Rng,
    distributions::{Bernoulli, Distribution},
    seq::SliceRandom,
};
use tracing::{info, instrument};

use crate::{
    Result,
    degree::{DegreePolicy, effective_target_count, scaled_floor},
    error::{PopulationRole, SparseError, validate_density},
    population::{Edge, NodePopulation},
};

/// Wires `sources` to `targets` once and returns the edges.
///
/// With [`DegreePolicy::Equalized`] every source receives
/// `floor(density × max_possible_connections) / sources` distinct targets
/// chosen by a partial shuffle. With [`DegreePolicy::Independent`] each
/// candidate pair is kept with probability `density`.
///
/// # Errors
/// Returns [`SparseError::InvalidDensity`] when `density` is outside
/// `[0, 1]` and [`SparseError::PopulationEmpty`] when either population has
/// no nodes.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use tsunagi_core::{DegreePolicy, NodePopulation, connect_sparse};
///
/// let inputs = NodePopulation::from(vec![0_u8; 3]);
/// let outputs = NodePopulation::from(vec![0_u8; 4]);
/// let mut rng = SmallRng::seed_from_u64(9);
/// let edges = connect_sparse(&inputs, &outputs, 0.5, DegreePolicy::Equalized, false, &mut rng)?;
/// assert_eq!(edges.len(), 6);
/// # Ok::<(), tsunagi_core::SparseError>(())
/// ```
#[instrument(
    name = "sparse.connect",
    err,
    skip_all,
    fields(
        sources = sources.len(),
        targets = targets.len(),
        density = density,
        policy = %policy,
        allow_self = allow_self,
    ),
)]
pub fn connect_sparse<N, R>(
    sources: &NodePopulation<N>,
    targets: &NodePopulation<N>,
    density: f64,
    policy: DegreePolicy,
    allow_self: bool,
    rng: &mut R,
) -> Result<Vec<Edge>>
where
    R: Rng + ?Sized,
{
    let density = validate_density(density)?;
    if sources.is_empty() {
        return Err(SparseError::PopulationEmpty {
            role: PopulationRole::Source,
        });
    }
    if targets.is_empty() {
        return Err(SparseError::PopulationEmpty {
            role: PopulationRole::Target,
        });
    }

    let recurrent = sources.is_same_population(targets);
    let exclude_self = recurrent && !allow_self;
    let candidates = effective_target_count(targets.len(), recurrent, allow_self);
    let edges = match policy {
        DegreePolicy::Equalized => {
            let total = scaled_floor(density, sources.len().saturating_mul(candidates));
            let per_source = total.checked_div(sources.len()).unwrap_or(0);
            connect_equalized(sources.len(), targets.len(), exclude_self, per_source, rng)
        }
        DegreePolicy::Independent => {
            let keep = Bernoulli::new(density)
                .map_err(|_| SparseError::InvalidDensity { density })?;
            connect_independent(sources.len(), targets.len(), exclude_self, keep, rng)
        }
    };
    info!(edges = edges.len(), recurrent, "one-shot wiring built");
    Ok(edges)
}

fn connect_equalized<R>(
    sources: usize,
    targets: usize,
    exclude_self: bool,
    per_source: usize,
    rng: &mut R,
) -> Vec<Edge>
where
    R: Rng + ?Sized,
{
    let mut edges = Vec::with_capacity(sources.saturating_mul(per_source));
    let mut pool = Vec::with_capacity(targets);
    for source in 0..sources {
        pool.clear();
        pool.extend((0..targets).filter(|&target| !(exclude_self && target == source)));
        let (chosen, _) = pool.partial_shuffle(rng, per_source);
        edges.extend(chosen.iter().map(|&target| Edge::new(source, target)));
    }
    edges
}

fn connect_independent<R>(
    sources: usize,
    targets: usize,
    exclude_self: bool,
    keep: Bernoulli,
    rng: &mut R,
) -> Vec<Edge>
where
    R: Rng + ?Sized,
{
    let mut edges = Vec::new();
    for source in 0..sources {
        for target in 0..targets {
            if exclude_self && target == source {
                continue;
            }
            if keep.sample(rng) {
                edges.push(Edge::new(source, target));
            }
        }
    }
    edges
}

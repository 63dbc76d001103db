//! Wiring setup shared by the benchmarks.

use rand::{SeedableRng, rngs::SmallRng};
use tsunagi_core::{EdgeList, NodePopulation, SparseBuilder, SparseConnectivity};

use crate::{error::BenchSetupError, params::WiringBenchParams};

/// Built wiring together with the sink and RNG that produced it.
#[derive(Debug)]
pub struct WiredFixture {
    /// Connectivity state ready to reshape.
    pub wiring: SparseConnectivity<usize>,
    /// Sink holding the active edges.
    pub sink: EdgeList,
    /// RNG positioned after the build, for reshape draws.
    pub rng: SmallRng,
}

/// Builds a population of `nodes` index-labelled nodes.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `nodes` is zero.
pub fn recurrent_population(nodes: usize) -> Result<NodePopulation<usize>, BenchSetupError> {
    if nodes == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "population size",
        });
    }
    Ok((0..nodes).collect())
}

/// Wires `population` onto itself with `params` and a seeded RNG.
///
/// # Errors
/// Returns [`BenchSetupError::Sparse`] when the density is rejected.
pub fn build_recurrent(
    population: &NodePopulation<usize>,
    params: &WiringBenchParams,
    seed: u64,
) -> Result<WiredFixture, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut sink = EdgeList::new();
    let wiring = SparseBuilder::new()
        .with_density(params.density)
        .with_policy(params.policy)
        .build(population, population, &mut sink, &mut rng)?;
    Ok(WiredFixture { wiring, sink, rng })
}

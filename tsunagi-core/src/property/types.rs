//! Fixture types for sparse wiring property tests.

use test_strategy::Arbitrary;

use crate::{DegreePolicy, NodePopulation, test_utils::indexed_population};

/// How the source and target populations relate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum WiringTopology {
    /// One population wired onto itself without self-connections.
    #[weight(3)]
    Recurrent,
    /// One population wired onto itself, self-connections allowed.
    #[weight(1)]
    RecurrentWithSelf,
    /// Two distinct populations.
    #[weight(2)]
    FeedForward,
}

impl WiringTopology {
    pub(super) fn allows_self(self) -> bool {
        matches!(self, Self::RecurrentWithSelf)
    }
}

/// Degree policy sampled by proptest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum PolicyChoice {
    Equalized,
    Independent,
}

impl From<PolicyChoice> for DegreePolicy {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::Equalized => Self::Equalized,
            PolicyChoice::Independent => Self::Independent,
        }
    }
}

/// Shape and parameters of a single wiring request.
#[derive(Clone, Debug)]
pub(super) struct WiringFixture {
    /// Number of source nodes. Recurrent fixtures reuse it for targets.
    pub sources: usize,
    /// Number of target nodes for feed-forward fixtures.
    pub targets: usize,
    pub topology: WiringTopology,
    pub policy: DegreePolicy,
    /// Density requested at build time.
    pub density: f64,
    /// Seed for the wiring RNG.
    pub seed: u64,
}

impl WiringFixture {
    /// Materialises the populations, sharing one for recurrent topologies.
    pub(super) fn populations(&self) -> (NodePopulation<usize>, NodePopulation<usize>) {
        match self.topology {
            WiringTopology::Recurrent | WiringTopology::RecurrentWithSelf => {
                let nodes = indexed_population(self.sources);
                (nodes.clone(), nodes)
            }
            WiringTopology::FeedForward => (
                indexed_population(self.sources),
                indexed_population(self.targets),
            ),
        }
    }
}

/// A wiring fixture plus a second density to reshape towards and back.
#[derive(Clone, Debug)]
pub(super) struct ReshapeFixture {
    pub wiring: WiringFixture,
    /// Density strictly above `wiring.density`.
    pub raised: f64,
}

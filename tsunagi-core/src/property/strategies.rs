//! Strategy builders for sparse wiring property tests.
//!
//! Population sizes stay small so every ordering row can be checked
//! exhaustively. Dyadic fixtures pick densities of the form `k / 8` over
//! eight candidates per source, which keeps the equalized arithmetic exact.

use proptest::prelude::*;

use crate::DegreePolicy;

use super::types::{PolicyChoice, ReshapeFixture, WiringFixture, WiringTopology};

/// Largest population generated.
const MAX_NODES: usize = 24;
/// Resolution of generated densities.
const DENSITY_STEPS: u32 = 1_000;
/// Candidates per source in dyadic fixtures.
const DYADIC_CANDIDATES: usize = 8;
/// Density steps in dyadic fixtures, one per candidate.
const DYADIC_STEPS: u32 = 8;

fn density_from_step(step: u32) -> f64 {
    f64::from(step) / f64::from(DENSITY_STEPS)
}

/// Generates wiring requests across every topology and policy.
pub(super) fn wiring_fixture_strategy() -> impl Strategy<Value = WiringFixture> {
    (
        any::<WiringTopology>(),
        any::<PolicyChoice>(),
        1..=MAX_NODES,
        1..=MAX_NODES,
        0..=DENSITY_STEPS,
        any::<u64>(),
    )
        .prop_map(
            |(topology, policy, sources, targets, step, seed)| WiringFixture {
                sources,
                targets,
                topology,
                policy: policy.into(),
                density: density_from_step(step),
                seed,
            },
        )
}

/// Picks `low < high` from `0..=steps`.
fn ascending_steps(steps: u32) -> impl Strategy<Value = (u32, u32)> {
    (0..steps).prop_flat_map(move |low| (Just(low), (low + 1)..=steps))
}

/// Generates a wiring request plus a strictly higher density.
pub(super) fn reshape_fixture_strategy() -> impl Strategy<Value = ReshapeFixture> {
    (wiring_fixture_strategy(), ascending_steps(DENSITY_STEPS)).prop_map(
        |(mut wiring, (low, high))| {
            wiring.density = density_from_step(low);
            ReshapeFixture {
                wiring,
                raised: density_from_step(high),
            }
        },
    )
}

/// Generates equalized requests whose densities land on whole degrees.
pub(super) fn dyadic_fixture_strategy() -> impl Strategy<Value = ReshapeFixture> {
    (
        any::<WiringTopology>(),
        1..=MAX_NODES,
        ascending_steps(DYADIC_STEPS),
        any::<u64>(),
    )
        .prop_map(|(topology, sources, (low, high), seed)| {
            // Recurrent wiring without self-connections loses one candidate.
            let sources = match topology {
                WiringTopology::Recurrent => DYADIC_CANDIDATES + 1,
                WiringTopology::RecurrentWithSelf => DYADIC_CANDIDATES,
                WiringTopology::FeedForward => sources,
            };
            let eighth = |step: u32| f64::from(step) / f64::from(DYADIC_STEPS);
            ReshapeFixture {
                wiring: WiringFixture {
                    sources,
                    targets: DYADIC_CANDIDATES,
                    topology,
                    policy: DegreePolicy::Equalized,
                    density: eighth(low),
                    seed,
                },
                raised: eighth(high),
            }
        })
}

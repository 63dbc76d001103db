//! Property runners for sparse wiring.
//!
//! - **Ordering**: every row is a permutation of the allowed targets.
//! - **Prefix**: the active edges of a source are its first `degree`
//!   ordering entries, and the sink holds exactly those edges.
//! - **Policy**: equalized degrees all equal `floor(density × row_len)`.
//! - **Reshape**: raising density only adds, lowering only removes, and
//!   equalized round trips restore a superset of the original edges.

use std::collections::HashSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    DegreePolicy, Edge, EdgeList, EdgeSink, SparseBuilder, SparseConnectivity,
    degree::scaled_floor,
};

use super::types::{ReshapeFixture, WiringFixture};

type Wired = (SparseConnectivity<usize>, EdgeList, SmallRng);

fn build(fixture: &WiringFixture) -> Result<Wired, TestCaseError> {
    let (sources, targets) = fixture.populations();
    let mut sink = EdgeList::new();
    let mut rng = SmallRng::seed_from_u64(fixture.seed);
    let wiring = SparseBuilder::new()
        .with_density(fixture.density)
        .with_policy(fixture.policy)
        .with_self_connections(fixture.topology.allows_self())
        .build(&sources, &targets, &mut sink, &mut rng)
        .map_err(|err| TestCaseError::fail(format!("build failed: {err} ({fixture:?})")))?;
    Ok((wiring, sink, rng))
}

fn active_set(wiring: &SparseConnectivity<usize>) -> HashSet<Edge> {
    wiring.active_edges().collect()
}

/// Checks that the sink agrees with the cursors and orderings.
fn validate_sink_matches(wiring: &SparseConnectivity<usize>, sink: &EdgeList) -> TestCaseResult {
    let active = active_set(wiring);
    if active.len() != wiring.edge_count() {
        return Err(TestCaseError::fail(format!(
            "active edges repeat: {} distinct of {}",
            active.len(),
            wiring.edge_count()
        )));
    }
    if sink.len() != active.len() {
        return Err(TestCaseError::fail(format!(
            "sink holds {} edges, cursors describe {}",
            sink.len(),
            active.len()
        )));
    }
    if let Some(stray) = sink.iter().find(|edge| !active.contains(*edge)) {
        return Err(TestCaseError::fail(format!("sink holds inactive edge {stray}")));
    }
    for (source, &degree) in wiring.degrees().iter().enumerate() {
        if sink.out_degree(source) != degree {
            return Err(TestCaseError::fail(format!(
                "source {source} has {} edges in the sink but degree {degree}",
                sink.out_degree(source)
            )));
        }
        if degree > wiring.ordering().row_len() {
            return Err(TestCaseError::fail(format!(
                "source {source} degree {degree} exceeds row length"
            )));
        }
    }
    Ok(())
}

fn validate_orderings(wiring: &SparseConnectivity<usize>) -> TestCaseResult {
    let exclude_self = wiring.is_recurrent() && !wiring.allows_self_connections();
    let targets = wiring.targets().len();
    for (source, row) in wiring.ordering().rows().enumerate() {
        let mut sorted = row.to_vec();
        sorted.sort_unstable();
        let expected: Vec<usize> = (0..targets)
            .filter(|&target| !(exclude_self && target == source))
            .collect();
        if sorted != expected {
            return Err(TestCaseError::fail(format!(
                "row {source} is not a permutation of its candidates: {row:?}"
            )));
        }
    }
    Ok(())
}

/// Runs the build invariants for the given fixture.
pub(super) fn run_build_property(fixture: &WiringFixture) -> TestCaseResult {
    let (wiring, sink, _) = build(fixture)?;

    validate_orderings(&wiring)?;
    validate_sink_matches(&wiring, &sink)?;
    if wiring.density().to_bits() != fixture.density.to_bits() {
        return Err(TestCaseError::fail(format!(
            "stored density {} differs from requested {}",
            wiring.density(),
            fixture.density
        )));
    }
    if wiring.is_recurrent() && !wiring.allows_self_connections() {
        if let Some(edge) = sink.iter().find(|edge| edge.is_self_loop()) {
            return Err(TestCaseError::fail(format!("self-loop {edge} emitted")));
        }
    }
    if fixture.policy == DegreePolicy::Equalized {
        let expected = scaled_floor(fixture.density, wiring.ordering().row_len());
        if wiring.degrees().iter().any(|&degree| degree != expected) {
            return Err(TestCaseError::fail(format!(
                "equalized degrees {:?} differ from {expected}",
                wiring.degrees()
            )));
        }
    }
    Ok(())
}

/// Raises then lowers density, checking monotonicity at each step.
pub(super) fn run_reshape_property(fixture: &ReshapeFixture) -> TestCaseResult {
    let (mut wiring, mut sink, mut rng) = build(&fixture.wiring)?;
    let original = active_set(&wiring);

    let added = wiring
        .add_to_density(fixture.raised, &mut sink, &mut rng)
        .map_err(|err| TestCaseError::fail(format!("growth failed: {err}")))?;
    validate_sink_matches(&wiring, &sink)?;
    let grown = active_set(&wiring);
    if !original.is_subset(&grown) {
        return Err(TestCaseError::fail("growth removed an edge"));
    }
    if let Some(edge) = added.iter().find(|edge| original.contains(*edge)) {
        return Err(TestCaseError::fail(format!("growth re-added {edge}")));
    }
    if grown.len() != original.len() + added.len() {
        return Err(TestCaseError::fail("growth report disagrees with cursors"));
    }

    let removed = wiring
        .remove_to_density(fixture.wiring.density, true, &mut sink, &mut rng)
        .map_err(|err| TestCaseError::fail(format!("shrink failed: {err}")))?
        .unwrap_or_default();
    validate_sink_matches(&wiring, &sink)?;
    let shrunk = active_set(&wiring);
    if !shrunk.is_subset(&grown) {
        return Err(TestCaseError::fail("shrink added an edge"));
    }
    if let Some(edge) = removed.iter().find(|edge| shrunk.contains(*edge)) {
        return Err(TestCaseError::fail(format!("removed edge {edge} still active")));
    }
    if fixture.wiring.policy == DegreePolicy::Equalized && !original.is_subset(&shrunk) {
        return Err(TestCaseError::fail(
            "equalized round trip lost an original edge",
        ));
    }
    Ok(())
}

/// Checks that an equalized round trip on whole degrees is exact.
pub(super) fn run_exact_round_trip_property(fixture: &ReshapeFixture) -> TestCaseResult {
    let (mut wiring, mut sink, mut rng) = build(&fixture.wiring)?;
    let original = sink.sorted();

    wiring
        .add_to_density(fixture.raised, &mut sink, &mut rng)
        .map_err(|err| TestCaseError::fail(format!("growth failed: {err}")))?;
    let expected_raised = scaled_floor(fixture.raised, wiring.max_possible_connections());
    if wiring.edge_count() != expected_raised {
        return Err(TestCaseError::fail(format!(
            "raised to {} edges, expected {expected_raised}",
            wiring.edge_count()
        )));
    }
    wiring
        .remove_to_density(fixture.wiring.density, false, &mut sink, &mut rng)
        .map_err(|err| TestCaseError::fail(format!("shrink failed: {err}")))?;

    if sink.sorted() != original {
        return Err(TestCaseError::fail(format!(
            "round trip {} -> {} -> {} changed the edge set",
            fixture.wiring.density, fixture.raised, fixture.wiring.density
        )));
    }
    Ok(())
}

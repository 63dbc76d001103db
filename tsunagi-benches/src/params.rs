//! Benchmark parameter types.
//!
//! Each type renders as a compact Criterion parameter label.

use std::fmt;

use tsunagi_core::DegreePolicy;

/// Parameters for a single build benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct WiringBenchParams {
    /// Number of nodes in the recurrent population.
    pub nodes: usize,
    /// Density requested at build time.
    pub density: f64,
    /// Degree policy applied to every source.
    pub policy: DegreePolicy,
}

impl fmt::Display for WiringBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},d={},{}", self.nodes, self.density, self.policy)
    }
}

/// Parameters for a grow-then-shrink reshape benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ReshapeBenchParams {
    /// Wiring built before each measured cycle.
    pub base: WiringBenchParams,
    /// Density reached by the growth half of the cycle.
    pub raised: f64,
}

impl fmt::Display for ReshapeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},up={}", self.base, self.raised)
    }
}

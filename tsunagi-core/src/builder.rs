//! Builder utilities for configuring sparse wiring.
//!
//! Holds the density and policy flags chosen before any edges exist and
//! performs the single transition into a built [`SparseConnectivity`].

use rand::Rng;

use crate::{
    Result, connectivity::SparseConnectivity, degree::DegreePolicy, population::NodePopulation,
    sink::EdgeSink,
};

/// Density used when none is configured.
pub const DEFAULT_DENSITY: f64 = 0.1;

/// Configures and builds [`SparseConnectivity`] instances.
///
/// Configuration is not validated until [`SparseBuilder::build`], so the
/// builder may hold an out-of-range density in the meantime.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use tsunagi_core::{DegreePolicy, EdgeList, EdgeSink, NodePopulation, SparseBuilder};
///
/// let layer = NodePopulation::from((0..4).collect::<Vec<u32>>());
/// let mut edges = EdgeList::new();
/// let mut rng = SmallRng::seed_from_u64(11);
///
/// let wiring = SparseBuilder::new()
///     .with_density(0.5)
///     .with_policy(DegreePolicy::Equalized)
///     .build(&layer, &layer, &mut edges, &mut rng)
///     .expect("configuration is valid");
/// assert!(wiring.is_recurrent());
/// assert_eq!(edges.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseBuilder {
    density: f64,
    policy: DegreePolicy,
    allow_self: bool,
}

impl Default for SparseBuilder {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            policy: DegreePolicy::default(),
            allow_self: false,
        }
    }
}

impl SparseBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use tsunagi_core::{DegreePolicy, SparseBuilder};
    ///
    /// let builder = SparseBuilder::new();
    /// assert_eq!(builder.density(), 0.1);
    /// assert_eq!(builder.policy(), DegreePolicy::Independent);
    /// assert!(!builder.allows_self_connections());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the fraction of possible edges to create.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Returns the configured density.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Selects how out-degrees are distributed.
    #[must_use]
    pub fn with_policy(mut self, policy: DegreePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for choosing [`DegreePolicy::Equalized`] or
    /// [`DegreePolicy::Independent`] from a flag.
    ///
    /// # Examples
    /// ```
    /// use tsunagi_core::{DegreePolicy, SparseBuilder};
    ///
    /// let builder = SparseBuilder::new().with_equalized_degrees(true);
    /// assert_eq!(builder.policy(), DegreePolicy::Equalized);
    /// ```
    #[must_use]
    pub fn with_equalized_degrees(self, equalize: bool) -> Self {
        self.with_policy(DegreePolicy::from_equalize(equalize))
    }

    /// Returns the configured degree policy.
    #[must_use]
    pub fn policy(&self) -> DegreePolicy {
        self.policy
    }

    /// Permits edges from a node to itself when wiring a population to
    /// itself. Has no effect on feed-forward wiring.
    #[must_use]
    pub fn with_self_connections(mut self, allow: bool) -> Self {
        self.allow_self = allow;
        self
    }

    /// Returns whether self-connections are permitted.
    #[must_use]
    pub fn allows_self_connections(&self) -> bool {
        self.allow_self
    }

    /// Wires `sources` to `targets`, emitting every edge into `sink`.
    ///
    /// Passing the same population (or a clone of it) for both arguments
    /// wires it recurrently.
    ///
    /// # Errors
    /// Returns [`crate::SparseError::InvalidDensity`] when the density is
    /// outside `[0, 1]` and [`crate::SparseError::PopulationEmpty`] when either
    /// population has no nodes. The sink is untouched on error.
    pub fn build<N, S, R>(
        self,
        sources: &NodePopulation<N>,
        targets: &NodePopulation<N>,
        sink: &mut S,
        rng: &mut R,
    ) -> Result<SparseConnectivity<N>>
    where
        S: EdgeSink + ?Sized,
        R: Rng + ?Sized,
    {
        SparseConnectivity::wire(self, sources, targets, sink, rng)
    }
}

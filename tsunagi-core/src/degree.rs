//! Out-degree assignment for sparse wiring.
//!
//! Decides how many edges each source receives, either as one deterministic
//! equalized count or as independent binomial draws with the same mean.

use std::fmt;

use rand::{
    Rng,
    distributions::{Bernoulli, Distribution},
};

use crate::error::{Result, validate_density};

/// Policy governing how out-degrees are distributed across sources.
///
/// # Examples
/// ```
/// use tsunagi_core::DegreePolicy;
///
/// assert_eq!(DegreePolicy::from_equalize(true), DegreePolicy::Equalized);
/// assert_eq!(DegreePolicy::default(), DegreePolicy::Independent);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DegreePolicy {
    /// Every source receives `floor(density × candidates)` edges.
    Equalized,
    /// Each source draws its degree from `Binomial(candidates, density)`.
    #[default]
    Independent,
}

impl DegreePolicy {
    /// Maps the legacy "equalize efferents" flag onto a policy.
    #[must_use]
    pub const fn from_equalize(equalize: bool) -> Self {
        if equalize {
            Self::Equalized
        } else {
            Self::Independent
        }
    }

    /// Returns whether every source shares one out-degree.
    #[must_use]
    pub const fn is_equalized(self) -> bool {
        matches!(self, Self::Equalized)
    }
}

impl fmt::Display for DegreePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equalized => f.write_str("equalized"),
            Self::Independent => f.write_str("independent"),
        }
    }
}

/// Number of targets a single source may connect to.
///
/// # Examples
/// ```
/// use tsunagi_core::effective_target_count;
///
/// assert_eq!(effective_target_count(4, true, false), 3);
/// assert_eq!(effective_target_count(4, true, true), 4);
/// assert_eq!(effective_target_count(4, false, false), 4);
/// ```
#[must_use]
pub const fn effective_target_count(targets: usize, recurrent: bool, allow_self: bool) -> usize {
    if recurrent && !allow_self {
        targets.saturating_sub(1)
    } else {
        targets
    }
}

/// Assigns an out-degree to each of `sources` sources.
///
/// # Errors
/// Returns [`crate::SparseError::InvalidDensity`] when `density` is outside
/// `[0, 1]`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use tsunagi_core::{DegreePolicy, assign_degrees};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let degrees = assign_degrees(DegreePolicy::Equalized, 4, 3, 0.5, &mut rng)?;
/// assert_eq!(degrees, [1, 1, 1, 1]);
/// # Ok::<(), tsunagi_core::SparseError>(())
/// ```
pub fn assign_degrees<R>(
    policy: DegreePolicy,
    sources: usize,
    candidates: usize,
    density: f64,
    rng: &mut R,
) -> Result<Vec<usize>>
where
    R: Rng + ?Sized,
{
    let density = validate_density(density)?;
    if candidates == 0 {
        return Ok(vec![0; sources]);
    }
    let degrees = match policy {
        DegreePolicy::Equalized => vec![scaled_floor(density, candidates); sources],
        DegreePolicy::Independent => (0..sources)
            .map(|_| sample_binomial(candidates, density, rng))
            .collect(),
    };
    Ok(degrees)
}

/// Computes `floor(fraction × count)`, never exceeding `count`.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_arithmetic,
    reason = "fraction is validated to [0, 1] so the product fits in usize"
)]
pub(crate) fn scaled_floor(fraction: f64, count: usize) -> usize {
    let scaled = (fraction * count as f64).floor() as usize;
    scaled.min(count)
}

/// Draws from `Binomial(trials, probability)` by summing Bernoulli trials.
///
/// Probabilities outside `[0, 1]` are clamped, which absorbs the rounding
/// left over from ratio-derived probabilities during reshaping.
pub(crate) fn sample_binomial<R>(trials: usize, probability: f64, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    if trials == 0 || probability.is_nan() || probability <= 0.0 {
        return 0;
    }
    if probability >= 1.0 {
        return trials;
    }
    match Bernoulli::new(probability) {
        Ok(trial) => (0..trials).filter(|_| trial.sample(rng)).count(),
        Err(_) => 0,
    }
}

//! Error types for the tsunagi core library.
//!
//! Defines the caller-contract violations raised by sparse wiring, their
//! stable machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Which population a validation failure refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PopulationRole {
    /// The population edges originate from.
    Source,
    /// The population edges terminate in.
    Target,
}

impl fmt::Display for PopulationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Direction of a density reshape request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReshapeDirection {
    /// Raising density by appending edges along each ordering.
    Grow,
    /// Lowering density by retracting the most recently added edges.
    Shrink,
}

impl fmt::Display for ReshapeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grow => f.write_str("grow"),
            Self::Shrink => f.write_str("shrink"),
        }
    }
}

/// Error type produced when wiring or reshaping a sparse connection set.
///
/// Every variant is raised before the [`crate::EdgeSink`] is touched.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SparseError {
    /// Density was outside `[0, 1]` or not a number.
    #[error("density must lie within [0, 1] (got {density})")]
    InvalidDensity {
        /// The rejected density.
        density: f64,
    },
    /// A reshape did not move density in the requested direction.
    #[error("cannot {direction} from density {current} to {requested}")]
    InvalidDensityDelta {
        /// Density held by the connectivity when the request arrived.
        current: f64,
        /// Density the caller asked for.
        requested: f64,
        /// Direction implied by the operation that was called.
        direction: ReshapeDirection,
    },
    /// One of the populations contained no nodes.
    #[error("{role} population contains no nodes")]
    PopulationEmpty {
        /// The empty population.
        role: PopulationRole,
    },
}

define_error_codes! {
    /// Stable codes describing [`SparseError`] variants.
    enum SparseErrorCode for SparseError {
        /// Density was outside `[0, 1]` or not a number.
        InvalidDensity => InvalidDensity { .. } => "SPARSE_INVALID_DENSITY",
        /// A reshape did not move density in the requested direction.
        InvalidDensityDelta => InvalidDensityDelta { .. } => "SPARSE_INVALID_DENSITY_DELTA",
        /// One of the populations contained no nodes.
        PopulationEmpty => PopulationEmpty { .. } => "SPARSE_POPULATION_EMPTY",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SparseError>;

/// Checks that `density` is a number within `[0, 1]`.
pub(crate) fn validate_density(density: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(SparseError::InvalidDensity { density })
    }
}

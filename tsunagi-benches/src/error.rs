//! Benchmark setup error type.
//!
//! Lets setup helpers propagate failures with `?` instead of `.expect()`.

use tsunagi_core::SparseError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building or reshaping the wiring failed.
    #[error("sparse wiring failed: {0}")]
    Sparse(#[from] SparseError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}

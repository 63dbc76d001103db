//! Benchmark support crate for tsunagi.
//!
//! Provides population setup and parameter types used by the Criterion
//! benchmarks for building sparse wiring and cycling its density.

pub mod error;
pub mod fixture;
pub mod params;

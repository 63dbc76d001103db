//! Shared test utilities used across tsunagi crates.
//!
//! [`tracing`] captures spans and events so suites can assert on the
//! instrumentation of wiring operations. [`ci`] holds the environment-driven
//! profiles that tune property tests between local runs and CI.

pub mod ci;
pub mod tracing;

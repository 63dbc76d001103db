//! Support library for the tsunagi CLI binary.
//!
//! Exposes the command pipeline so doctests and integration tests can run it
//! without spawning a subprocess.

pub mod cli;
pub mod logging;

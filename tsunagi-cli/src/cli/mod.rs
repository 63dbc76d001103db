//! Command-line interface for generating and reshaping sparse wiring.
//!
//! `wire` builds connectivity between integer-labelled populations, applies
//! any requested density changes in order, and prints a summary.

mod commands;

pub use commands::{
    Cli, CliError, Command, DEFAULT_SEED, ReshapeStep, WireCommand, WiringSummary,
    render_summary, run_cli,
};

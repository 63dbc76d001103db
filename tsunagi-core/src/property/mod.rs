//! Property-based tests for sparse wiring and density reshaping.
//!
//! Generates population shapes, degree policies, and density pairs, then
//! checks that built wiring matches its orderings and that reshaping keeps
//! the sink, cursors, and orderings consistent in both directions.

mod invariants;
mod strategies;
mod types;

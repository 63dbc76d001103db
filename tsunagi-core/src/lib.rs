//! Tsunagi core library.
//!
//! Wires two populations of nodes with a chosen fraction of their possible
//! directed edges and reshapes that wiring as the density changes. Each
//! source keeps a fixed random ordering of its candidate targets: building
//! activates a prefix of every ordering, raising density extends the prefix,
//! and lowering it retracts the newest edges first.
//!
//! Randomness is always supplied by the caller as an explicit [`rand::Rng`]
//! handle, so a seeded generator reproduces a wiring exactly.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod connect;
mod connectivity;
mod degree;
mod diagnostics;
mod error;
mod ordering;
mod population;
mod sink;

#[cfg(test)]
mod property;
#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{DEFAULT_DENSITY, SparseBuilder},
    connect::connect_sparse,
    connectivity::{DensityChange, SparseConnectivity},
    degree::{DegreePolicy, assign_degrees, effective_target_count},
    diagnostics::DegreeOverflow,
    error::{PopulationRole, ReshapeDirection, Result, SparseError, SparseErrorCode},
    ordering::SparseOrdering,
    population::{Edge, NodePopulation},
    sink::{EdgeList, EdgeSink},
};

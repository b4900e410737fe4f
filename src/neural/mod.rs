//! Neural primitives evolved by the genetic algorithm.
//!
//! Implements unit-graph feed-forward networks with:
//! - Per-unit bias + weight vectors
//! - Arena topology with (layer, position) parent wiring
//! - Single-gene multiplicative mutation
//! - Single-point crossover at unit and network granularity

mod network;
mod mutations;
mod crossover;
mod unit;

pub use network::Network;
pub use unit::{Activation, Unit};

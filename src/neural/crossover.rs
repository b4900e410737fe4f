//! Breeding operators: crossover plus a probabilistic mutation gate.
//!
//! Crossover explores the combination space of two known-good parents; the
//! single mutation gate keeps most offspring purely inherited.

use crate::error::{EvolveError, Result};
use crate::neural::network::Network;
use crate::neural::unit::Unit;
use rand::Rng;

impl Unit {
    /// Produce one offspring from two parents.
    ///
    /// A single crossover index is drawn from `0..weights.len()`: weights
    /// before it come from `self`, from it onward from `mate`. The bias is
    /// copied from either parent with equal probability. With probability
    /// `mutation_rate` the child is then mutated once. Neither parent is
    /// modified.
    pub fn breed<R: Rng>(
        &self,
        mate: &Unit,
        mutation_rate: f32,
        mutation_amount: f32,
        rng: &mut R,
    ) -> Result<Unit> {
        if self.weights.len() != mate.weights.len() {
            return Err(EvolveError::StructuralMismatch(format!(
                "cannot breed units with {} and {} weights",
                self.weights.len(),
                mate.weights.len()
            )));
        }

        let mut child = Unit::new(self.weights.len());
        child.activation = self.activation;
        child.round_output = self.round_output;

        let crossover = rng.gen_range(0..self.weights.len());
        for i in 0..self.weights.len() {
            child.weights[i] = if i < crossover { self.weights[i] } else { mate.weights[i] };
        }
        child.bias = if rng.gen_bool(0.5) { self.bias } else { mate.bias };

        if rng.gen::<f32>() < mutation_rate {
            child.mutate(mutation_amount, rng);
        }

        Ok(child)
    }
}

impl Network {
    /// Produce one offspring network from two topology-identical parents.
    ///
    /// A single crossover index is drawn over the flattened layer-major unit
    /// ordering: units before it are copied from `self`, at or after it from
    /// `mate`. Afterwards, one mutation trial runs per unit slot; each
    /// passing trial mutates a freshly drawn random unit, so the mutation
    /// count is probabilistic per network rather than per gene.
    pub fn breed<R: Rng>(
        &self,
        mate: &Network,
        mutation_rate: f32,
        mutation_amount: f32,
        rng: &mut R,
    ) -> Result<Network> {
        if self.input_count != mate.input_count || self.layer_sizes != mate.layer_sizes {
            return Err(EvolveError::StructuralMismatch(format!(
                "cannot breed topology {}x{:?} with {}x{:?}",
                self.input_count, self.layer_sizes, mate.input_count, mate.layer_sizes
            )));
        }

        let mut child = self.clone();
        let total = self.unit_count();
        let crossover = rng.gen_range(0..total);

        for index in 0..total {
            let (layer, position) = self.unflatten(index);
            let source = if index < crossover {
                &self.layers[layer][position]
            } else {
                &mate.layers[layer][position]
            };
            child.layers[layer][position].copy_state_from(source);
        }

        for _ in 0..total {
            if rng.gen::<f32>() < mutation_rate {
                child.mutate_unit(mutation_amount, rng);
            }
        }

        child.reset_error();
        for layer in &mut child.layers {
            for unit in layer {
                unit.reset_error();
            }
        }

        Ok(child)
    }
}

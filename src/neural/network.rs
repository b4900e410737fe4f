//! Layered feed-forward networks over an arena of units.

use crate::error::{EvolveError, Result};
use crate::neural::unit::{Activation, Unit};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A directed acyclic layered graph of [`Unit`]s.
///
/// The network owns every unit, grouped by layer index; units refer to
/// their parents by (layer, position) so the graph carries no ownership
/// cycles. Topology is fixed at construction: layer 0 consumes the raw
/// network inputs, and every later layer consumes all units of the layer
/// before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub input_count: usize,
    pub layer_sizes: Vec<usize>,
    pub layers: Vec<Vec<Unit>>,
    pub sigmoid_output: bool,
    /// Aggregate mean-squared-error accumulator
    pub error: f32,
}

impl Network {
    /// Build a network with randomised weights.
    ///
    /// The output layer's sigmoid is disabled when `sigmoid_output` is
    /// false, leaving raw regression-style outputs.
    pub fn new<R: Rng>(
        input_count: usize,
        layer_sizes: &[usize],
        sigmoid_output: bool,
        spread: f32,
        rng: &mut R,
    ) -> Self {
        let mut network = Self::with_topology(input_count, layer_sizes, sigmoid_output);
        for layer in &mut network.layers {
            for unit in layer {
                unit.randomise(spread, rng);
            }
        }
        network
    }

    /// Build the layer/parent structure with unit weights at their 1.0
    /// starting value
    fn with_topology(input_count: usize, layer_sizes: &[usize], sigmoid_output: bool) -> Self {
        let last = layer_sizes.len().saturating_sub(1);
        let mut layers = Vec::with_capacity(layer_sizes.len());

        for (index, &size) in layer_sizes.iter().enumerate() {
            let fan_in = if index == 0 { input_count } else { layer_sizes[index - 1] };
            let parents: Vec<(usize, usize)> = if index == 0 {
                Vec::new()
            } else {
                (0..layer_sizes[index - 1]).map(|pos| (index - 1, pos)).collect()
            };

            let mut layer = Vec::with_capacity(size);
            for _ in 0..size {
                let mut unit = Unit::new(fan_in);
                if index == last && !sigmoid_output {
                    unit.activation = Activation::None;
                }
                unit.parents = parents.clone();
                layer.push(unit);
            }
            layers.push(layer);
        }

        Self {
            input_count,
            layer_sizes: layer_sizes.to_vec(),
            layers,
            sigmoid_output,
            error: 0.0,
        }
    }

    /// Evaluate the unit at (layer, position), recursively evaluating its
    /// parents on the raw network inputs first.
    ///
    /// Parentless units consume `inputs` directly. Recursion depth equals
    /// the layer index; parent references always point at an earlier layer,
    /// so no cycles are possible.
    pub fn propagate(&self, layer: usize, position: usize, inputs: &[f32]) -> Result<f32> {
        let unit = &self.layers[layer][position];
        if unit.parents.is_empty() {
            return unit.evaluate(inputs);
        }

        let mut upstream = Vec::with_capacity(unit.parents.len());
        for &(parent_layer, parent_pos) in &unit.parents {
            upstream.push(self.propagate(parent_layer, parent_pos, inputs)?);
        }
        unit.evaluate(&upstream)
    }

    /// Single-output convenience: propagate the last unit of the final layer
    pub fn run(&self, inputs: &[f32]) -> Result<f32> {
        let last_layer = self.layers.len() - 1;
        let last_pos = self.layers[last_layer].len() - 1;
        self.propagate(last_layer, last_pos, inputs)
    }

    /// Propagate every unit of the final layer, preserving layer order
    pub fn run_multi(&self, inputs: &[f32]) -> Result<Vec<f32>> {
        let last_layer = self.layers.len() - 1;
        let mut outputs = Vec::with_capacity(self.layers[last_layer].len());
        for position in 0..self.layers[last_layer].len() {
            outputs.push(self.propagate(last_layer, position, inputs)?);
        }
        Ok(outputs)
    }

    /// Add one example's squared-error contribution for the single-output case
    pub fn accumulate_error(&mut self, inputs: &[f32], target: f32, divisor: usize) -> Result<()> {
        let output = self.run(inputs)?;
        self.error += (output - target).powi(2) / divisor as f32;
        Ok(())
    }

    /// Multi-output variant: sums squared error across the final layer.
    ///
    /// `targets` must match the output layer width.
    pub fn accumulate_error_multi(
        &mut self,
        inputs: &[f32],
        targets: &[f32],
        divisor: usize,
    ) -> Result<()> {
        let width = self.layer_sizes[self.layer_sizes.len() - 1];
        if targets.len() != width {
            return Err(EvolveError::InvalidInput {
                expected: width,
                actual: targets.len(),
            });
        }

        let outputs = self.run_multi(inputs)?;
        for (output, target) in outputs.iter().zip(targets) {
            self.error += (output - target).powi(2) / divisor as f32;
        }
        Ok(())
    }

    /// Zero the aggregate error; call once before each evaluation pass.
    /// Skipping this lets error grow monotonically and corrupts fitness
    /// comparisons across generations.
    pub fn reset_error(&mut self) {
        self.error = 0.0;
    }

    /// Rebuild this network as a deep copy of `source`.
    ///
    /// The previous topology and units are discarded, then every unit's
    /// state is copied position by position. Fails with
    /// [`EvolveError::StructuralMismatch`] if the rebuilt topology disagrees
    /// with the source's units.
    pub fn copy_from(&mut self, source: &Network) -> Result<()> {
        *self = Self::with_topology(source.input_count, &source.layer_sizes, source.sigmoid_output);

        if self.layers.len() != source.layers.len() {
            return Err(EvolveError::StructuralMismatch(format!(
                "source declares {} layers but holds {}",
                self.layers.len(),
                source.layers.len()
            )));
        }
        for (layer, source_layer) in self.layers.iter_mut().zip(&source.layers) {
            if layer.len() != source_layer.len() {
                return Err(EvolveError::StructuralMismatch(format!(
                    "source layer declares {} units but holds {}",
                    layer.len(),
                    source_layer.len()
                )));
            }
            for (unit, source_unit) in layer.iter_mut().zip(source_layer) {
                unit.copy_state_from(source_unit);
            }
        }

        self.error = source.error;
        Ok(())
    }

    /// Total number of units across all layers
    pub fn unit_count(&self) -> usize {
        self.layer_sizes.iter().sum()
    }

    /// Map a flattened layer-major index back to (layer, position)
    pub(crate) fn unflatten(&self, mut index: usize) -> (usize, usize) {
        for (layer, &size) in self.layer_sizes.iter().enumerate() {
            if index < size {
                return (layer, index);
            }
            index -= size;
        }
        // Flattened indices are always drawn from 0..unit_count()
        unreachable!("flattened unit index out of range")
    }

    /// Check that every unit holds finite weights
    pub fn is_valid(&self) -> bool {
        self.layers.iter().flatten().all(|unit| unit.is_valid())
    }

    /// Human-readable dump of bias and weights per layer; diagnostic only
    pub fn draw(&self) -> String {
        let mut out = String::new();
        for (index, layer) in self.layers.iter().enumerate() {
            let _ = writeln!(out, "layer {}:", index);
            for (position, unit) in layer.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  unit {}: bias={:.4} weights={:?}",
                    position, unit.bias, unit.weights
                );
            }
        }
        out
    }
}

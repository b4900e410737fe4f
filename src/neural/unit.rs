//! Single computational units and their evaluation.

use crate::error::{EvolveError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Squashing applied to a unit's weighted sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    None,
    Sigmoid,
}

/// A single computational node: bias plus one weight per consumed input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub weights: Vec<f32>,
    pub bias: f32,
    pub activation: Activation,
    /// Round the final output to the nearest integer (classification mode)
    pub round_output: bool,
    /// (layer, position) indices of upstream units; empty for layer 0.
    /// The owning network resolves these against its arena.
    pub parents: Vec<(usize, usize)>,
    /// Running mean-squared-error accumulator
    pub error: f32,
}

impl Unit {
    /// Create a unit with all weights and bias set to 1.0
    pub fn new(n_inputs: usize) -> Self {
        Self {
            weights: vec![1.0; n_inputs],
            bias: 1.0,
            activation: Activation::Sigmoid,
            round_output: false,
            parents: Vec::new(),
            error: 0.0,
        }
    }

    /// Scatter the initial weights by applying one multiplicative mutation
    /// per gene slot (weights plus bias)
    pub fn randomise<R: Rng>(&mut self, spread: f32, rng: &mut R) {
        for _ in 0..self.weights.len() + 1 {
            self.mutate(spread, rng);
        }
    }

    /// Weighted sum of `inputs` plus bias, squashed and rounded per the
    /// unit's flags.
    ///
    /// Fails with [`EvolveError::InvalidInput`] when the input arity does
    /// not match the weight vector.
    pub fn evaluate(&self, inputs: &[f32]) -> Result<f32> {
        if inputs.len() != self.weights.len() {
            return Err(EvolveError::InvalidInput {
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }

        let mut total = self.bias;
        for (weight, input) in self.weights.iter().zip(inputs) {
            total += weight * input;
        }

        if self.activation == Activation::Sigmoid {
            total = sigmoid(total);
        }
        if self.round_output {
            total = total.round();
        }

        Ok(total)
    }

    /// Add one example's mean-squared-error contribution to the accumulator.
    ///
    /// The caller supplies `divisor = dataset size` so a full pass yields
    /// true MSE.
    pub fn accumulate_error(&mut self, inputs: &[f32], target: f32, divisor: usize) -> Result<()> {
        let output = self.evaluate(inputs)?;
        self.error += (output - target).powi(2) / divisor as f32;
        Ok(())
    }

    /// Zero the error accumulator; call once before each evaluation pass
    pub fn reset_error(&mut self) {
        self.error = 0.0;
    }

    /// Deep-copy weights, bias, error, and flags from `source`.
    ///
    /// Parent wiring is not copied: topology belongs to the owning network.
    pub fn copy_state_from(&mut self, source: &Unit) {
        self.weights.clear();
        self.weights.extend_from_slice(&source.weights);
        self.bias = source.bias;
        self.error = source.error;
        self.activation = source.activation;
        self.round_output = source.round_output;
    }

    /// Check that every weight and the bias are finite
    pub fn is_valid(&self) -> bool {
        self.bias.is_finite() && self.weights.iter().all(|w| w.is_finite())
    }
}

/// Logistic squashing function
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_unit(weights: Vec<f32>, bias: f32) -> Unit {
        Unit {
            weights,
            bias,
            activation: Activation::None,
            round_output: false,
            parents: Vec::new(),
            error: 0.0,
        }
    }

    #[test]
    fn test_evaluate_weighted_sum() {
        let unit = linear_unit(vec![2.0, -1.0], 0.5);
        let out = unit.evaluate(&[3.0, 4.0]).unwrap();
        assert_eq!(out, 0.5 + 6.0 - 4.0);
    }

    #[test]
    fn test_evaluate_arity_mismatch() {
        let unit = linear_unit(vec![1.0, 1.0], 0.0);
        let err = unit.evaluate(&[1.0]).unwrap_err();
        assert_eq!(err, EvolveError::InvalidInput { expected: 2, actual: 1 });

        let err = unit.evaluate(&[]).unwrap_err();
        assert_eq!(err, EvolveError::InvalidInput { expected: 2, actual: 0 });
    }

    #[test]
    fn test_sigmoid_activation() {
        let mut unit = linear_unit(vec![0.0, 0.0], 0.0);
        unit.activation = Activation::Sigmoid;

        // Zero pre-activation squashes to 0.5
        let out = unit.evaluate(&[1.0, 1.0]).unwrap();
        assert!((out - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_round_output() {
        let mut unit = linear_unit(vec![1.0], 0.0);
        unit.activation = Activation::Sigmoid;
        unit.round_output = true;

        assert_eq!(unit.evaluate(&[10.0]).unwrap(), 1.0);
        assert_eq!(unit.evaluate(&[-10.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_error_accumulation() {
        let mut unit = linear_unit(vec![1.0], 0.0);

        // Output 2.0 against target 0.0 over a 4-example set: 4/4 = 1.0
        unit.accumulate_error(&[2.0], 0.0, 4).unwrap();
        assert!((unit.error - 1.0).abs() < 1e-6);

        unit.accumulate_error(&[2.0], 0.0, 4).unwrap();
        assert!((unit.error - 2.0).abs() < 1e-6);

        unit.reset_error();
        assert_eq!(unit.error, 0.0);
    }

    #[test]
    fn test_copy_state_ignores_parents() {
        let mut source = linear_unit(vec![0.25, -0.75], 1.5);
        source.error = 3.0;
        source.parents = vec![(0, 0), (0, 1)];

        let mut target = Unit::new(2);
        target.parents = vec![(1, 0)];
        target.copy_state_from(&source);

        assert_eq!(target.weights, source.weights);
        assert_eq!(target.bias, source.bias);
        assert_eq!(target.error, source.error);
        assert_eq!(target.activation, source.activation);
        assert_eq!(target.parents, vec![(1, 0)]);
    }

    #[test]
    fn test_randomise_scatters_weights() {
        let mut rng = rand::thread_rng();
        let mut unit = Unit::new(3);
        unit.randomise(10.0, &mut rng);

        assert!(unit.is_valid());
        // At least one gene must have left its 1.0 starting value
        let moved = unit.weights.iter().chain(std::iter::once(&unit.bias)).any(|&g| g != 1.0);
        assert!(moved, "randomise should perturb at least one gene");
    }
}

//! Training set types.
//!
//! A training set is an ordered sequence of (inputs, target) pairs supplied
//! by the caller. Targets may be a single value or one value per output
//! unit; the loop passes the set size down as the mean-squared-error
//! divisor.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Expected output for one training example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    /// Single-output networks and perceptrons
    Single(f32),
    /// One value per unit of the output layer
    Multi(Vec<f32>),
}

/// One (inputs, target) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub inputs: Vec<f32>,
    pub target: Target,
}

/// An ordered collection of training examples with uniform input arity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSet {
    /// Input vector length shared by every example
    pub input_count: usize,
    pub examples: Vec<Example>,
}

impl TrainingSet {
    /// Create a training set, checking that every example matches `input_count`
    pub fn new(input_count: usize, examples: Vec<Example>) -> Result<Self, String> {
        for (i, example) in examples.iter().enumerate() {
            if example.inputs.len() != input_count {
                return Err(format!(
                    "example {} has {} inputs, expected {}",
                    i,
                    example.inputs.len(),
                    input_count
                ));
            }
        }
        Ok(Self { input_count, examples })
    }

    /// Load a training set from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let set: TrainingSet = serde_yaml::from_str(&contents)?;
        Self::new(set.input_count, set.examples).map_err(Into::into)
    }

    /// The four-row logical-OR toy set used by the demos and tests
    pub fn logical_or() -> Self {
        Self {
            input_count: 2,
            examples: vec![
                Example { inputs: vec![0.0, 0.0], target: Target::Single(0.0) },
                Example { inputs: vec![0.0, 1.0], target: Target::Single(1.0) },
                Example { inputs: vec![1.0, 0.0], target: Target::Single(1.0) },
                Example { inputs: vec![1.0, 1.0], target: Target::Single(1.0) },
            ],
        }
    }

    /// Four-row input-summation set; linearly separable with raw outputs
    pub fn input_sum() -> Self {
        Self {
            input_count: 2,
            examples: vec![
                Example { inputs: vec![0.0, 1.0], target: Target::Single(1.0) },
                Example { inputs: vec![0.0, 0.0], target: Target::Single(0.0) },
                Example { inputs: vec![1.0, 0.0], target: Target::Single(1.0) },
                Example { inputs: vec![1.0, 1.0], target: Target::Single(2.0) },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_checked() {
        let examples = vec![Example { inputs: vec![1.0, 2.0, 3.0], target: Target::Single(0.0) }];
        assert!(TrainingSet::new(2, examples).is_err());
    }

    #[test]
    fn test_logical_or_shape() {
        let set = TrainingSet::logical_or();
        assert_eq!(set.len(), 4);
        assert_eq!(set.input_count, 2);
        assert!(set.examples.iter().all(|e| e.inputs.len() == 2));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let set = TrainingSet::logical_or();
        let yaml = serde_yaml::to_string(&set).unwrap();
        let loaded: TrainingSet = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(loaded.examples, set.examples);
    }

    #[test]
    fn test_multi_target_parses() {
        let yaml = "
input_count: 2
examples:
  - inputs: [0.0, 1.0]
    target: [1.0, 0.0]
  - inputs: [1.0, 0.0]
    target: 0.5
";
        let set: TrainingSet = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(set.examples[0].target, Target::Multi(vec![1.0, 0.0]));
        assert_eq!(set.examples[1].target, Target::Single(0.5));
    }
}

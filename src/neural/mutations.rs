//! Mutation operators for units and networks.

use crate::neural::network::Network;
use crate::neural::unit::Unit;
use rand::Rng;

impl Unit {
    /// Multiply one uniformly chosen gene by a random factor in
    /// `[-max_magnitude, max_magnitude)`.
    ///
    /// The index is drawn from `0..=weights.len()`; the extra slot denotes
    /// the bias. Mutation is multiplicative, so a zero-valued gene can never
    /// leave zero (a known limitation of the operator). A non-positive
    /// magnitude leaves the unit untouched.
    pub fn mutate<R: Rng>(&mut self, max_magnitude: f32, rng: &mut R) {
        if max_magnitude <= 0.0 {
            return;
        }

        let factor = rng.gen_range(-max_magnitude..max_magnitude);
        let index = rng.gen_range(0..=self.weights.len());

        if index == self.weights.len() {
            self.bias *= factor;
        } else {
            self.weights[index] *= factor;
        }
    }
}

impl Network {
    /// Mutate one uniformly chosen unit anywhere in the network
    pub(crate) fn mutate_unit<R: Rng>(&mut self, max_magnitude: f32, rng: &mut R) {
        let index = rng.gen_range(0..self.unit_count());
        let (layer, position) = self.unflatten(index);
        self.layers[layer][position].mutate(max_magnitude, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_mutation_changes_one_gene() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut unit = Unit::new(4);
        let before: Vec<f32> = unit.weights.clone();
        let bias_before = unit.bias;

        unit.mutate(5.0, &mut rng);

        let weight_changes = unit
            .weights
            .iter()
            .zip(&before)
            .filter(|(a, b)| a != b)
            .count();
        let bias_changed = unit.bias != bias_before;

        assert_eq!(weight_changes + usize::from(bias_changed), 1);
    }

    #[test]
    fn test_mutation_factor_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let mut unit = Unit::new(1);
            unit.mutate(2.0, &mut rng);
            // Genes start at 1.0, so the surviving value is the factor itself
            let gene = if unit.weights[0] != 1.0 { unit.weights[0] } else { unit.bias };
            assert!((-2.0..2.0).contains(&gene) || gene == 1.0);
        }
    }

    #[test]
    fn test_zero_gene_stays_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut unit = Unit::new(1);
        unit.weights[0] = 0.0;
        unit.bias = 0.0;

        for _ in 0..100 {
            unit.mutate(10.0, &mut rng);
        }

        assert_eq!(unit.weights[0], 0.0);
        assert_eq!(unit.bias, 0.0);
    }

    #[test]
    fn test_non_positive_magnitude_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut unit = Unit::new(3);
        let before = unit.clone();

        unit.mutate(0.0, &mut rng);
        unit.mutate(-1.0, &mut rng);

        assert_eq!(unit, before);
    }

    #[test]
    fn test_network_mutation_targets_one_unit() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut net = Network::new(2, &[2, 1], true, 10.0, &mut rng);
        let before = net.clone();

        net.mutate_unit(5.0, &mut rng);

        let changed = net
            .layers
            .iter()
            .flatten()
            .zip(before.layers.iter().flatten())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed <= 1);
    }
}

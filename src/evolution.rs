//! The evolutionary training loop.
//!
//! A [`Trainer`] owns a fixed-size pool of individuals, scores every one of
//! them against the training set each generation, selects a breeding subset
//! by truncation, breeds a full replacement pool from shuffled sliding
//! pairs, and carries the best individual ever seen across generations.

use crate::config::{Config, EvolutionConfig};
use crate::dataset::{Example, Target, TrainingSet};
use crate::error::{EvolveError, Result};
use crate::neural::{Network, Unit};
use crate::stats::{GenerationStats, TrainingHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::cmp::Ordering;

/// An individual that can be scored, bred, and cloned in place.
///
/// Implemented by [`Network`] and, for the single-perceptron variant, by
/// [`Unit`] directly; both run through the same [`Trainer`].
pub trait Individual: Clone + Send + Sync {
    /// Zero the error accumulator before an evaluation pass
    fn reset_error(&mut self);

    /// The accumulated error from the last evaluation pass
    fn error(&self) -> f32;

    /// Accumulate one example's mean-squared-error contribution
    fn accumulate_example(&mut self, example: &Example, divisor: usize) -> Result<()>;

    /// Produce one offspring; neither parent is modified
    fn breed_with<R: Rng>(
        &self,
        mate: &Self,
        mutation_rate: f32,
        mutation_amount: f32,
        rng: &mut R,
    ) -> Result<Self>;

    /// Deep-copy `source` into this individual
    fn copy_from(&mut self, source: &Self) -> Result<()>;
}

impl Individual for Network {
    fn reset_error(&mut self) {
        Network::reset_error(self);
    }

    fn error(&self) -> f32 {
        self.error
    }

    fn accumulate_example(&mut self, example: &Example, divisor: usize) -> Result<()> {
        match &example.target {
            Target::Single(target) => self.accumulate_error(&example.inputs, *target, divisor),
            Target::Multi(targets) => {
                self.accumulate_error_multi(&example.inputs, targets, divisor)
            }
        }
    }

    fn breed_with<R: Rng>(
        &self,
        mate: &Self,
        mutation_rate: f32,
        mutation_amount: f32,
        rng: &mut R,
    ) -> Result<Self> {
        self.breed(mate, mutation_rate, mutation_amount, rng)
    }

    fn copy_from(&mut self, source: &Self) -> Result<()> {
        Network::copy_from(self, source)
    }
}

impl Individual for Unit {
    fn reset_error(&mut self) {
        Unit::reset_error(self);
    }

    fn error(&self) -> f32 {
        self.error
    }

    fn accumulate_example(&mut self, example: &Example, divisor: usize) -> Result<()> {
        match &example.target {
            Target::Single(target) => self.accumulate_error(&example.inputs, *target, divisor),
            Target::Multi(targets) => Err(EvolveError::InvalidInput {
                expected: 1,
                actual: targets.len(),
            }),
        }
    }

    fn breed_with<R: Rng>(
        &self,
        mate: &Self,
        mutation_rate: f32,
        mutation_amount: f32,
        rng: &mut R,
    ) -> Result<Self> {
        self.breed(mate, mutation_rate, mutation_amount, rng)
    }

    fn copy_from(&mut self, source: &Self) -> Result<()> {
        self.copy_state_from(source);
        Ok(())
    }
}

/// Result of a full training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    /// Generations actually executed
    pub generations: u64,
    /// Error of the best individual ever seen
    pub best_error: f32,
    /// Whether the run hit an exact fit before the budget ran out
    pub converged: bool,
}

/// The evolution loop and its population
pub struct Trainer<G: Individual> {
    pool: Vec<G>,
    offspring: Vec<G>,
    best_ever: G,
    best_error: f32,
    generation: u64,
    evolution: EvolutionConfig,
    history: TrainingHistory,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Trainer<Network> {
    /// Create a trainer with a freshly randomised network pool
    pub fn new(config: &Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a trainer with a specific seed for reproducibility
    pub fn new_with_seed(config: &Config, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pool: Vec<Network> = (0..config.evolution.pool_size)
            .map(|_| {
                Network::new(
                    config.network.input_count,
                    &config.network.layer_sizes,
                    config.network.sigmoid_output,
                    config.network.init_weight_spread,
                    &mut rng,
                )
            })
            .collect();

        Self::from_parts(config, pool, rng, seed)
    }
}

impl<G: Individual> Trainer<G> {
    /// Create a trainer over a caller-built pool (e.g. bare perceptrons)
    pub fn with_pool(config: &Config, pool: Vec<G>, seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::from_parts(config, pool, rng, seed)
    }

    fn from_parts(config: &Config, pool: Vec<G>, rng: ChaCha8Rng, seed: u64) -> Self {
        assert!(!pool.is_empty(), "trainer pool must not be empty");
        let best_ever = pool[0].clone();

        Self {
            pool,
            offspring: Vec::new(),
            best_ever,
            best_error: f32::INFINITY,
            generation: 0,
            evolution: config.evolution.clone(),
            history: TrainingHistory::new(config.logging.stats_interval),
            rng,
            seed,
        }
    }

    /// Run one full generation: evaluate, select, breed, replace.
    ///
    /// Returns the generation's error snapshot, taken after evaluation and
    /// before the pool is replaced by offspring.
    pub fn step(&mut self, data: &TrainingSet) -> Result<GenerationStats> {
        if data.is_empty() {
            return Err(EvolveError::InvalidInput { expected: 1, actual: 0 });
        }

        // Phase 1: evaluation. Each individual reads the shared set and
        // writes only its own accumulator, so this fans out cleanly.
        let divisor = data.len();
        self.pool.par_iter_mut().try_for_each(|individual| -> Result<()> {
            individual.reset_error();
            for example in &data.examples {
                individual.accumulate_example(example, divisor)?;
            }
            Ok(())
        })?;

        // Phase 2: sort ascending by error. The sort is stable, so ties
        // keep their pool order.
        self.pool
            .sort_by(|a, b| a.error().partial_cmp(&b.error()).unwrap_or(Ordering::Equal));

        // Phase 3: elitism. The best-ever snapshot outlives every pool.
        let champion_error = self.pool[0].error();
        if champion_error < self.best_error {
            self.best_ever.copy_from(&self.pool[0])?;
            self.best_error = champion_error;
        }

        self.generation += 1;
        let stats = self.snapshot(champion_error);
        self.history.record(&stats);

        // Phase 4: truncation selection of the breeding subset. When the
        // pool has regressed below the historical best, the weakest
        // breeding slot is overwritten with the best-ever individual.
        let subset_size = (self.pool.len() / self.evolution.tournament_divisor).max(1);
        let mut breeding: Vec<G> = self.pool[..subset_size].to_vec();
        if champion_error > self.best_error {
            log::debug!(
                "generation {}: champion {} worse than best ever {}, reinjecting",
                self.generation,
                champion_error,
                self.best_error
            );
            breeding[subset_size - 1].copy_from(&self.best_ever)?;
        }

        // Phase 5: shuffle, then breed sliding pairs over the subset
        breeding.shuffle(&mut self.rng);

        self.offspring.clear();
        for index in 0..self.pool.len() {
            let parent_a = &breeding[index % subset_size];
            let parent_b = &breeding[(index + 1) % subset_size];
            self.offspring.push(parent_a.breed_with(
                parent_b,
                self.evolution.mutation_rate,
                self.evolution.mutation_amount,
                &mut self.rng,
            )?);
        }

        // Phase 6: clone offspring over the pool in place
        for (individual, child) in self.pool.iter_mut().zip(&self.offspring) {
            individual.copy_from(child)?;
        }

        Ok(stats)
    }

    /// Run generations until exact fit or the budget is exhausted
    pub fn run(&mut self, data: &TrainingSet) -> Result<TrainOutcome> {
        for _ in 0..self.evolution.generation_budget {
            self.step(data)?;
            if self.best_error <= 0.0 {
                break;
            }
        }

        Ok(TrainOutcome {
            generations: self.generation,
            best_error: self.best_error,
            converged: self.best_error <= 0.0,
        })
    }

    fn snapshot(&self, champion_error: f32) -> GenerationStats {
        let sum: f32 = self.pool.iter().map(|g| g.error()).sum();
        let worst = self.pool[self.pool.len() - 1].error();

        GenerationStats {
            generation: self.generation,
            best_error: champion_error,
            mean_error: sum / self.pool.len() as f32,
            worst_error: worst,
            best_ever_error: self.best_error,
        }
    }

    /// The best individual seen across all generations
    pub fn best(&self) -> &G {
        &self.best_ever
    }

    /// Error of the best individual seen across all generations
    pub fn best_error(&self) -> f32 {
        self.best_error
    }

    /// Generations executed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The seed this trainer's random source was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Recorded per-generation statistics
    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    /// The current pool, sorted by the last evaluation pass
    pub fn pool(&self) -> &[G] {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.evolution.pool_size = 40;
        config.evolution.generation_budget = 30;
        config.network.sigmoid_output = true;
        config
    }

    #[test]
    fn test_step_keeps_pool_size() {
        let config = small_config();
        let data = TrainingSet::logical_or();
        let mut trainer = Trainer::new_with_seed(&config, 1);

        for _ in 0..5 {
            trainer.step(&data).unwrap();
        }
        assert_eq!(trainer.pool().len(), 40);
        assert_eq!(trainer.generation(), 5);
    }

    #[test]
    fn test_best_error_is_monotonic() {
        let config = small_config();
        let data = TrainingSet::logical_or();
        let mut trainer = Trainer::new_with_seed(&config, 2);

        let mut previous = f32::INFINITY;
        for _ in 0..20 {
            trainer.step(&data).unwrap();
            assert!(trainer.best_error() <= previous);
            previous = trainer.best_error();
        }
    }

    #[test]
    fn test_empty_training_set_rejected() {
        let config = small_config();
        let data = TrainingSet { input_count: 2, examples: Vec::new() };
        let mut trainer = Trainer::new_with_seed(&config, 3);

        assert!(trainer.step(&data).is_err());
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let config = small_config();
        let data = TrainingSet::logical_or();

        let mut first = Trainer::new_with_seed(&config, 99);
        let mut second = Trainer::new_with_seed(&config, 99);
        first.run(&data).unwrap();
        second.run(&data).unwrap();

        assert_eq!(first.best_error(), second.best_error());
        assert_eq!(first.best(), second.best());
    }

    #[test]
    fn test_perceptron_pool_variant() {
        let mut config = small_config();
        config.evolution.generation_budget = 40;
        let data = TrainingSet::logical_or();

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let pool: Vec<Unit> = (0..config.evolution.pool_size)
            .map(|_| {
                let mut unit = Unit::new(2);
                unit.randomise(config.network.init_weight_spread, &mut rng);
                unit
            })
            .collect();

        let mut trainer = Trainer::with_pool(&config, pool, 4);
        let outcome = trainer.run(&data).unwrap();

        assert!(outcome.best_error.is_finite());
        assert!(outcome.best_error < 0.25, "should beat the all-zero baseline");
    }

    #[test]
    fn test_multi_target_rejected_for_units() {
        let mut unit = Unit::new(2);
        let example = Example {
            inputs: vec![0.0, 1.0],
            target: Target::Multi(vec![1.0, 0.0]),
        };
        let err = unit.accumulate_example(&example, 1).unwrap_err();
        assert_eq!(err, EvolveError::InvalidInput { expected: 1, actual: 2 });
    }

    #[test]
    fn test_stats_shape() {
        let config = small_config();
        let data = TrainingSet::logical_or();
        let mut trainer = Trainer::new_with_seed(&config, 5);

        let stats = trainer.step(&data).unwrap();
        assert_eq!(stats.generation, 1);
        assert!(stats.best_error <= stats.mean_error);
        assert!(stats.mean_error <= stats.worst_error);
        assert_eq!(stats.best_ever_error, stats.best_error);
    }
}

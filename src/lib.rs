//! # EVONET
//!
//! Genetic-algorithm training for feed-forward neural networks.
//!
//! Instead of gradient descent, a fixed-size pool of candidate networks is
//! scored against a training set each generation; the fittest are selected,
//! bred via weight crossover, randomly mutated, and the cycle repeats until
//! the error converges or the generation budget runs out. The best
//! individual ever seen is carried across generations and returned to the
//! caller.
//!
//! ## Features
//!
//! - **Unit-graph networks**: per-unit bias + weights over an arena with
//!   (layer, position) wiring
//! - **Parallel**: fitness evaluation fans out across CPU cores via Rayon
//! - **Reproducible**: one seeded random source drives every operator
//! - **Configurable**: YAML configuration files
//! - **Generic**: the same loop trains full networks or bare perceptrons
//!
//! ## Quick Start
//!
//! ```rust
//! use evonet::{Config, Trainer, TrainingSet};
//!
//! let mut config = Config::default();
//! config.evolution.pool_size = 50;
//! config.evolution.generation_budget = 20;
//! config.network.sigmoid_output = true;
//!
//! let data = TrainingSet::logical_or();
//! let mut trainer = Trainer::new_with_seed(&config, 42);
//! let outcome = trainer.run(&data).unwrap();
//!
//! println!("best error: {}", outcome.best_error);
//! println!("{}", trainer.best().draw());
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod evolution;
pub mod neural;
pub mod stats;

// Re-export main types
pub use config::Config;
pub use dataset::{Example, Target, TrainingSet};
pub use error::{EvolveError, Result};
pub use evolution::{Individual, TrainOutcome, Trainer};
pub use neural::{Activation, Network, Unit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark against the built-in logical-OR set
pub fn benchmark(generations: u64, pool_size: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    config.evolution.pool_size = pool_size;
    config.evolution.generation_budget = generations;
    config.network.sigmoid_output = true;

    let data = TrainingSet::logical_or();
    let mut trainer = Trainer::new(&config);

    let start = Instant::now();
    let outcome = trainer.run(&data).expect("benchmark training failed");
    let elapsed = start.elapsed();

    BenchmarkResult {
        generations: outcome.generations,
        pool_size,
        best_error: outcome.best_error,
        elapsed_secs: elapsed.as_secs_f64(),
        generations_per_second: outcome.generations as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: u64,
    pub pool_size: usize,
    pub best_error: f32,
    pub elapsed_secs: f64,
    pub generations_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(f, "Pool size: {}", self.pool_size)?;
        writeln!(f, "Best error: {:.6}", self.best_error)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} generations/s", self.generations_per_second)?;
        Ok(())
    }
}

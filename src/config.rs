//! Configuration system for evolutionary training.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub evolution: EvolutionConfig,
    pub logging: LoggingConfig,
}

/// Network topology configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of network inputs
    pub input_count: usize,
    /// Units per layer, in order; the last entry is the output layer
    pub layer_sizes: Vec<usize>,
    /// Apply sigmoid activation on the output layer
    pub sigmoid_output: bool,
    /// Magnitude used when randomising initial weights
    pub init_weight_spread: f32,
}

/// Evolution loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of individuals in the pool
    pub pool_size: usize,
    /// Maximum number of generations to run
    pub generation_budget: u64,
    /// The breeding subset holds `pool_size / tournament_divisor` individuals.
    ///
    /// The name is historical; the selection itself is truncation
    /// (best N), not a true tournament.
    pub tournament_divisor: usize,
    /// Probability that an offspring receives a mutation
    pub mutation_rate: f32,
    /// Magnitude of the multiplicative mutation factor
    pub mutation_amount: f32,
}

/// Logging and stats configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Generations between stats snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            evolution: EvolutionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_count: 2,
            layer_sizes: vec![1],
            sigmoid_output: true,
            init_weight_spread: 10.0,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            pool_size: 200,
            generation_budget: 500,
            tournament_divisor: 5,
            mutation_rate: 0.3,
            mutation_amount: 1.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.network.input_count == 0 {
            return Err("input_count must be > 0".to_string());
        }
        if self.network.layer_sizes.is_empty() {
            return Err("layer_sizes must not be empty".to_string());
        }
        if self.network.layer_sizes.iter().any(|&s| s == 0) {
            return Err("every layer must have at least one unit".to_string());
        }
        if self.evolution.pool_size == 0 {
            return Err("pool_size must be > 0".to_string());
        }
        if self.evolution.tournament_divisor == 0 {
            return Err("tournament_divisor must be > 0".to_string());
        }
        if self.evolution.pool_size / self.evolution.tournament_divisor == 0 {
            return Err("pool_size / tournament_divisor must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.evolution.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".to_string());
        }
        if self.evolution.mutation_amount <= 0.0 {
            return Err("mutation_amount must be > 0".to_string());
        }
        if self.network.init_weight_spread <= 0.0 {
            return Err("init_weight_spread must be > 0".to_string());
        }
        Ok(())
    }
}

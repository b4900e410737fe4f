//! Statistics tracking for training runs.

use serde::{Deserialize, Serialize};

/// Snapshot of one generation's error landscape
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number, counting from 1
    pub generation: u64,
    /// Lowest error in the current pool
    pub best_error: f32,
    /// Mean error across the pool
    pub mean_error: f32,
    /// Highest error in the current pool
    pub worst_error: f32,
    /// Lowest error ever observed across all generations
    pub best_ever_error: f32,
}

impl GenerationStats {
    /// One-line summary for progress output
    pub fn summary(&self) -> String {
        format!(
            "gen {:>5} | best {:>10.6} | mean {:>10.6} | best ever {:>10.6}",
            self.generation, self.best_error, self.mean_error, self.best_ever_error
        )
    }
}

/// History of generation snapshots, recorded at a fixed interval
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub snapshots: Vec<GenerationStats>,
    interval: u64,
}

impl TrainingHistory {
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// Record a snapshot if its generation falls on the interval
    pub fn record(&mut self, stats: &GenerationStats) {
        if stats.generation % self.interval == 0 || stats.generation == 1 {
            self.snapshots.push(stats.clone());
        }
    }

    /// (generation, best_ever_error) series for plotting convergence
    pub fn best_error_series(&self) -> Vec<(u64, f32)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.best_ever_error))
            .collect()
    }

    /// Save the history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshots)?;
        std::fs::write(path, json)
    }
}

//! EVONET - CLI entry point
//!
//! Evolves feed-forward networks against a training set.

use clap::{Parser, Subcommand};
use evonet::dataset::Target;
use evonet::{benchmark, Config, Network, Trainer, TrainingSet};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "evonet")]
#[command(version)]
#[command(about = "Genetic-algorithm training for feed-forward neural networks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a network against a training set
    Train {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "evonet.yaml")]
        config: PathBuf,

        /// Training set file (YAML); defaults to the built-in logical-OR set
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Write the stats history to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run a performance benchmark
    Benchmark {
        /// Number of generations
        #[arg(short, long, default_value = "200")]
        generations: u64,

        /// Pool size
        #[arg(short, long, default_value = "500")]
        pool: usize,
    },

    /// Generate a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "evonet.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            config,
            data,
            seed,
            output,
            quiet,
        } => run_training(config, data, seed, output, quiet),

        Commands::Benchmark { generations, pool } => run_benchmark(generations, pool),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_training(
    config_path: PathBuf,
    data_path: Option<PathBuf>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    let data = match &data_path {
        Some(path) => {
            println!("Loading training set from: {:?}", path);
            TrainingSet::from_file(path)?
        }
        None => {
            println!("Using built-in logical-OR training set");
            TrainingSet::logical_or()
        }
    };

    if data.input_count != config.network.input_count {
        return Err(format!(
            "training set has {} inputs but the network expects {}",
            data.input_count, config.network.input_count
        )
        .into());
    }

    let mut trainer = match seed {
        Some(s) => {
            println!("Using seed: {}", s);
            Trainer::new_with_seed(&config, s)
        }
        None => Trainer::new(&config),
    };

    println!("Starting evolution");
    println!("  Pool size: {}", config.evolution.pool_size);
    println!("  Topology: {} inputs -> {:?}", config.network.input_count, config.network.layer_sizes);
    println!("  Generation budget: {}", config.evolution.generation_budget);
    println!();

    let start = Instant::now();
    let stats_interval = config.logging.stats_interval.max(1);

    let mut generations = 0;
    for _ in 0..config.evolution.generation_budget {
        let stats = trainer.step(&data)?;
        generations = stats.generation;

        if !quiet && stats.generation % stats_interval == 0 {
            println!("{}", stats.summary());
        }

        if trainer.best_error() <= 0.0 {
            println!("\nExact fit at generation {}", stats.generation);
            break;
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("=== Evolution Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Generations: {}", generations);
    println!("Speed: {:.1} generations/s", generations as f64 / elapsed.as_secs_f64());
    println!("Best error: {:.6}", trainer.best_error());
    println!();
    println!("Champion network:");
    println!("{}", trainer.best().draw());

    print_champion_report(trainer.best(), &data)?;

    if let Some(path) = output {
        trainer.history().save(path.to_str().unwrap())?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

/// Print the champion's output against every training example
fn print_champion_report(
    network: &Network,
    data: &TrainingSet,
) -> Result<(), Box<dyn std::error::Error>> {
    for example in &data.examples {
        match &example.target {
            Target::Single(target) => {
                let output = network.run(&example.inputs)?;
                println!(
                    "inputs = {:?}  target = {}  output = {:.4}",
                    example.inputs, target, output
                );
            }
            Target::Multi(targets) => {
                let outputs = network.run_multi(&example.inputs)?;
                println!(
                    "inputs = {:?}  targets = {:?}  outputs = {:?}",
                    example.inputs, targets, outputs
                );
            }
        }
    }
    Ok(())
}

fn run_benchmark(generations: u64, pool: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== EVONET Benchmark ===");
    println!("Generations: {}", generations);
    println!("Pool size: {}", pool);
    println!();

    let result = benchmark(generations, pool);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
